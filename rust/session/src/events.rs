use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;
use uuid::Uuid;

// Bounded per-subscriber buffer; a slow subscriber loses events rather than
// blocking the game operation that fired them.
const EVENT_CHANNEL_BUFFER: usize = 256;

/// Change signals pushed to subscribers of one game. Every variant carries
/// the join code; subscribers are expected to re-fetch the session rather
/// than patch state from the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined {
        code: String,
        player_id: Uuid,
        name: String,
    },
    CategorySubmitted {
        code: String,
        player_id: Uuid,
    },
    GameStarted {
        code: String,
    },
    GameChanged {
        code: String,
    },
}

impl GameEvent {
    pub fn code(&self) -> &str {
        match self {
            GameEvent::PlayerJoined { code, .. }
            | GameEvent::CategorySubmitted { code, .. }
            | GameEvent::GameStarted { code }
            | GameEvent::GameChanged { code } => code,
        }
    }
}

pub type EventReceiver = mpsc::Receiver<GameEvent>;

/// RAII subscription handle; dropping it detaches the receiver from the bus.
pub struct EventSubscription {
    bus: EventBus,
    code: String,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.code, self.subscriber_id);
    }
}

/// In-process notification gateway: per-game-code fan-out of [`GameEvent`]s
/// over bounded channels. A wire transport attaches here by subscribing and
/// relaying to its clients.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<String, Vec<(usize, mpsc::Sender<GameEvent>)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, code: impl Into<String>) -> EventSubscription {
        let code = code.into();
        let (tx, receiver) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let subscriber_id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);

        self.write_subscribers()
            .entry(code.clone())
            .or_default()
            .push((subscriber_id, tx));

        tracing::debug!(code = %code, subscriber_id, "subscribed to game events");

        EventSubscription {
            bus: self.clone(),
            code,
            subscriber_id,
            receiver,
        }
    }

    /// Fire-and-forget delivery. Full channels count as gone subscribers and
    /// are pruned, so one stuck listener cannot wedge the game.
    pub fn broadcast(&self, event: GameEvent) {
        let code = event.code().to_string();
        let targets = self.read_subscribers().get(&code).cloned();

        let Some(targets) = targets else {
            tracing::trace!(code = %code, "no subscribers for game");
            return;
        };

        let mut stale = Vec::new();
        for (id, sender) in targets {
            if sender.try_send(event.clone()).is_err() {
                tracing::warn!(code = %code, subscriber_id = id, "dropping unresponsive subscriber");
                stale.push(id);
            }
        }
        if !stale.is_empty() {
            self.remove_subscribers(&code, &stale);
        }
    }

    pub fn unsubscribe(&self, code: &str, subscriber_id: usize) {
        self.remove_subscribers(code, &[subscriber_id]);
    }

    /// Forget every subscriber of a game, e.g. when it is archived away.
    pub fn drop_game(&self, code: &str) {
        self.write_subscribers().remove(code);
    }

    pub fn subscriber_count(&self) -> usize {
        self.read_subscribers().values().map(Vec::len).sum()
    }

    fn remove_subscribers(&self, code: &str, ids: &[usize]) {
        let mut guard = self.write_subscribers();
        if let Some(list) = guard.get_mut(code) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(code);
            }
        }
    }

    // The map holds only channel handles; recover from a poisoned lock
    // instead of propagating panics into game operations.
    fn read_subscribers(
        &self,
    ) -> RwLockReadGuard<'_, HashMap<String, Vec<(usize, mpsc::Sender<GameEvent>)>>> {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_subscribers(
        &self,
    ) -> RwLockWriteGuard<'_, HashMap<String, Vec<(usize, mpsc::Sender<GameEvent>)>>> {
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

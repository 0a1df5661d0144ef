use crate::game::Game;
use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

/// Picks who selects the next clue after `answerer_id` closed one (by a
/// correct answer or by taking the no-answer penalty on their own clue).
///
/// Control stays with the answerer unless every *other* player's own category
/// is exhausted. In that case only the answerer's board has clues left, which
/// the answerer may not pick from themselves, so control passes to a
/// uniformly-random other player. With two players this degenerates to "keep
/// control while the opponent still has clues."
pub fn next_chooser<R: Rng + ?Sized>(game: &Game, answerer_id: Uuid, rng: &mut R) -> Uuid {
    let others: Vec<&_> = game
        .players
        .iter()
        .filter(|p| p.id != answerer_id)
        .collect();

    if others.iter().any(|p| p.has_unanswered_clues()) {
        return answerer_id;
    }

    others
        .choose(rng)
        .map(|p| p.id)
        .unwrap_or(answerer_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, CategoryDraft, ClueDraft};
    use crate::player::{Identity, Player};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    fn board(label: &str) -> CategoryDraft {
        CategoryDraft {
            title: label.into(),
            clues: (1..=5)
                .map(|i| ClueDraft {
                    question: format!("{label} q{i}"),
                    answer: format!("{label} a{i}"),
                    point_value: i * 100,
                })
                .collect(),
        }
    }

    fn game_of(names: &[&str]) -> Game {
        let mut players = names.iter().enumerate().map(|(idx, name)| {
            let mut player = Player::new(Identity::new(Uuid::new_v4(), *name), idx == 0);
            player.category = Some(Category::from_draft(player.id, None, board(name), true));
            player
        });
        let mut game = Game::new("ABCDEF", players.next().unwrap());
        game.players.extend(players);
        game
    }

    fn exhaust_board(game: &mut Game, index: usize) {
        let filler = Uuid::new_v4();
        for clue in &mut game.players[index].category.as_mut().unwrap().clues {
            clue.answered_by_player_id = Some(filler);
        }
    }

    #[test]
    fn answerer_keeps_control_while_others_have_clues() {
        let game = game_of(&["Asta", "Berit", "Carl"]);
        let answerer = game.players[1].id;
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(next_chooser(&game, answerer, &mut rng), answerer);
    }

    #[test]
    fn control_passes_when_only_the_answerer_has_clues_left() {
        let mut game = game_of(&["Asta", "Berit", "Carl"]);
        exhaust_board(&mut game, 1);
        exhaust_board(&mut game, 2);
        let answerer = game.players[0].id;
        let others: HashSet<Uuid> = [game.players[1].id, game.players[2].id].into();

        let mut seen = HashSet::new();
        for seed in 0..64 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let chosen = next_chooser(&game, answerer, &mut rng);
            assert_ne!(chosen, answerer, "answerer must never be chosen");
            assert!(others.contains(&chosen));
            seen.insert(chosen);
        }
        // across seeds both opponents come up
        assert_eq!(seen, others);
    }

    #[test]
    fn two_player_game_keeps_control_with_the_answerer() {
        let game = game_of(&["Asta", "Berit"]);
        let answerer = game.players[0].id;
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert_eq!(next_chooser(&game, answerer, &mut rng), answerer);
    }

    #[test]
    fn two_player_game_hands_over_once_the_opponent_is_exhausted() {
        let mut game = game_of(&["Asta", "Berit"]);
        exhaust_board(&mut game, 1);
        let answerer = game.players[0].id;
        let opponent = game.players[1].id;
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        assert_eq!(next_chooser(&game, answerer, &mut rng), opponent);
    }
}

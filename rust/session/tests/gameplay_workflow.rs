/// Full-game workflows through the public service API: lobby to Finished,
/// derived scores, and the hand-off rule once boards run dry.
use buzzboard_engine::category::{CategoryDraft, ClueDraft};
use buzzboard_engine::errors::GameError;
use buzzboard_engine::game::{Game, GameState};
use buzzboard_engine::player::Identity;
use buzzboard_session::{EventBus, GameService, MemoryGameStore, ServiceConfig};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

fn service_with_seed(seed: u64) -> GameService {
    GameService::with_config(
        Arc::new(MemoryGameStore::new()),
        EventBus::new(),
        ServiceConfig {
            seed: Some(seed),
            code_attempts: 16,
        },
    )
    .expect("valid config")
}

fn full_board(label: &str) -> CategoryDraft {
    CategoryDraft {
        title: format!("{label}'s board"),
        clues: (1..=5)
            .map(|i| ClueDraft {
                question: format!("{label} question {i}"),
                answer: format!("{label} answer {i}"),
                point_value: i * 100,
            })
            .collect(),
    }
}

fn started_game(service: &GameService, names: &[&str]) -> Game {
    let creator = Identity::new(Uuid::new_v4(), names[0]);
    let created = service.create_game(creator.clone()).expect("create game");
    let code = created.code.clone();

    for name in &names[1..] {
        service
            .join_game(&code, Identity::new(Uuid::new_v4(), *name))
            .expect("join game");
    }
    let lobby = service.game(&code).expect("load game");
    for player in &lobby.players {
        service
            .save_category(&code, player.id, full_board(&player.name), true)
            .expect("submit category");
    }
    service
        .start_game(&code, creator.user_id)
        .expect("start game")
}

fn player_id(game: &Game, name: &str) -> Uuid {
    game.players
        .iter()
        .find(|p| p.name == name)
        .expect("player by name")
        .id
}

fn board_clues(game: &Game, owner_name: &str) -> Vec<Uuid> {
    game.players
        .iter()
        .find(|p| p.name == owner_name)
        .and_then(|p| p.category.as_ref())
        .expect("submitted board")
        .clues
        .iter()
        .map(|c| c.id)
        .collect()
}

/// Select `clue_id`, let `buzzer` buzz, and have the owner judge it correct.
fn answer_correctly(service: &GameService, code: &str, clue_id: Uuid, buzzer: Uuid) -> Game {
    let game = service.select_clue(code, clue_id).expect("select clue");
    let owner = game.clue_owner(clue_id).expect("clue owner");
    service.press_buzzer(code, buzzer).expect("press buzzer");
    service
        .judge_answer(code, owner, true)
        .expect("judge answer")
}

#[test]
fn two_players_sweep_each_other_to_1500() {
    let service = service_with_seed(100);
    let game = started_game(&service, &["Asta", "Berit"]);
    let code = game.code.clone();
    let asta = player_id(&game, "Asta");
    let berit = player_id(&game, "Berit");

    // Asta clears Berit's board, then Berit clears Asta's
    let mut latest = game.clone();
    assert_eq!(latest.state, GameState::InProgress);
    for clue_id in board_clues(&game, "Berit") {
        latest = answer_correctly(&service, &code, clue_id, asta);
    }

    // an already-answered clue can no longer be put in play
    assert_eq!(
        service.select_clue(&code, board_clues(&game, "Berit")[0]),
        Err(GameError::ClueUnavailable.into())
    );
    for clue_id in board_clues(&game, "Asta") {
        latest = answer_correctly(&service, &code, clue_id, berit);
    }

    assert_eq!(latest.state, GameState::Finished);
    assert_eq!(latest.score_of(asta), 1500);
    assert_eq!(latest.score_of(berit), 1500);
    assert!(latest.selected_clue_id.is_none());
    assert!(latest.buzzed_player_id.is_none());

    // the terminal state rejects further selection
    let leftover = Uuid::new_v4();
    assert_eq!(
        service.select_clue(&code, leftover),
        Err(GameError::NotInProgress.into())
    );
}

#[test]
fn finish_is_reached_exactly_on_the_last_answer() {
    let service = service_with_seed(101);
    let game = started_game(&service, &["Asta", "Berit"]);
    let code = game.code.clone();
    let asta = player_id(&game, "Asta");
    let berit = player_id(&game, "Berit");

    let berit_board = board_clues(&game, "Berit");
    let asta_board = board_clues(&game, "Asta");

    for clue_id in &berit_board {
        let after = answer_correctly(&service, &code, *clue_id, asta);
        assert_ne!(after.state, GameState::Finished);
    }
    for (idx, clue_id) in asta_board.iter().enumerate() {
        let after = answer_correctly(&service, &code, *clue_id, berit);
        if idx + 1 < asta_board.len() {
            assert_eq!(after.state, GameState::InProgress);
        } else {
            assert_eq!(after.state, GameState::Finished);
        }
    }
}

#[test]
fn handoff_never_picks_the_answerer_once_only_their_board_remains() {
    for seed in 0..8 {
        let service = service_with_seed(200 + seed);
        let game = started_game(&service, &["Asta", "Berit", "Carl"]);
        let code = game.code.clone();
        let asta = player_id(&game, "Asta");
        let others: HashSet<Uuid> = [player_id(&game, "Berit"), player_id(&game, "Carl")].into();

        // Asta alone clears both opponents' boards; her own stays untouched
        let mut latest = game.clone();
        assert_eq!(latest.current_choosing_player_id, Some(asta));
        for owner_name in ["Berit", "Carl"] {
            for clue_id in board_clues(&game, owner_name) {
                latest = answer_correctly(&service, &code, clue_id, asta);
            }
        }

        assert_eq!(latest.state, GameState::InProgress);
        let chooser = latest.current_choosing_player_id.expect("chooser");
        assert_ne!(chooser, asta, "seed {seed}: answerer kept a dead board");
        assert!(others.contains(&chooser));
    }
}

#[test]
fn no_answer_path_counts_against_the_owner_in_the_final_tally() {
    let service = service_with_seed(102);
    let game = started_game(&service, &["Asta", "Berit"]);
    let code = game.code.clone();
    let asta = player_id(&game, "Asta");
    let berit = player_id(&game, "Berit");

    let berit_board = board_clues(&game, "Berit");

    // Asta takes the first four of Berit's clues; the 500 clue stumps everyone
    for clue_id in &berit_board[..4] {
        answer_correctly(&service, &code, *clue_id, asta);
    }
    service
        .select_clue(&code, berit_board[4])
        .expect("select clue");
    let after = service
        .no_one_can_answer(&code, berit)
        .expect("no one can answer");

    assert_eq!(after.score_of(asta), 100 + 200 + 300 + 400);
    assert_eq!(after.score_of(berit), -500);

    let closed = after.find_clue(berit_board[4]).expect("clue");
    assert_eq!(closed.answered_by_player_id, Some(berit));
    assert!(closed.no_one_could_answer);
}

#[test]
fn fresh_codes_do_not_collide_in_practice() {
    let service = service_with_seed(103);
    let mut codes = HashSet::new();
    for i in 0..32 {
        let game = service
            .create_game(Identity::new(Uuid::new_v4(), format!("Host {i}")))
            .expect("create game");
        assert!(codes.insert(game.code.clone()), "duplicate {}", game.code);
    }
}

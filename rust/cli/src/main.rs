use buzzboard_engine::category::{CategoryDraft, ClueDraft};
use buzzboard_engine::game::{Game, GameState};
use buzzboard_engine::player::Identity;
use buzzboard_session::{init_logging, EventBus, GameService, MemoryGameStore, ServiceConfig};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

const ROSTER: [&str; 8] = [
    "Asta", "Berit", "Carl", "Dora", "Erik", "Frida", "Greta", "Hugo",
];

// How often the scripted judge rules a buzzed answer correct.
const CORRECT_ODDS: f64 = 0.7;

/// Scripted local playthrough of a buzzboard quiz: builds a lobby, submits a
/// board per player, then selects, buzzes, and judges until the game
/// finishes. The same seed replays the same game.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for the playthrough; omit for a fresh random game.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of players, including the host (2-8).
    #[arg(long, default_value_t = 3)]
    players: usize,

    /// Print the final game aggregate as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = Args::parse();

    if !(2..=ROSTER.len()).contains(&args.players) {
        return Err(format!("--players must be between 2 and {}", ROSTER.len()).into());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("replayable with --seed {seed}");

    // script decisions draw from their own stream so they cannot disturb the
    // service's code/turn randomness
    let mut script_rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(1));
    let service = GameService::with_config(
        Arc::new(MemoryGameStore::new()),
        EventBus::new(),
        ServiceConfig {
            seed: Some(seed),
            code_attempts: 16,
        },
    )?;

    let host = Identity::new(Uuid::new_v4(), ROSTER[0]);
    let created = service.create_game(host.clone())?;
    let code = created.code.clone();
    println!("game {code} opened by {}", host.name);

    for name in ROSTER.iter().take(args.players).skip(1) {
        service.join_game(&code, Identity::new(Uuid::new_v4(), *name))?;
        println!("{name} joined");
    }

    let lobby = service.game(&code)?;
    for player in &lobby.players {
        service.save_category(&code, player.id, board_for(&player.name), true)?;
        println!("{} submitted \"{}'s five\"", player.name, player.name);
    }

    let mut game = service.start_game(&code, host.user_id)?;
    println!("--- game on ---");

    while game.state != GameState::Finished {
        let clue_id = pick_clue(&game).ok_or("no unanswered clues left")?;
        game = service.select_clue(&code, clue_id)?;

        let clue = game.find_clue(clue_id).ok_or("selected clue vanished")?;
        let points = clue.point_value;
        let owner_id = game.clue_owner(clue_id).ok_or("selected clue has no owner")?;
        let owner_name = name_of(&game, owner_id);
        println!(
            "{} picks \"{}\" for {points}",
            name_of_chooser(&game),
            clue.question
        );

        let mut contenders: Vec<Uuid> = game
            .players
            .iter()
            .filter(|p| p.id != owner_id)
            .map(|p| p.id)
            .collect();
        contenders.shuffle(&mut script_rng);

        let mut answered = false;
        for contender in contenders {
            game = service.press_buzzer(&code, contender)?;
            let correct = script_rng.random_bool(CORRECT_ODDS);
            game = service.judge_answer(&code, owner_id, correct)?;
            if correct {
                println!("  {} buzzes... correct, +{points}", name_of(&game, contender));
                answered = true;
                break;
            }
            println!("  {} buzzes... wrong", name_of(&game, contender));
        }
        if !answered {
            game = service.no_one_can_answer(&code, owner_id)?;
            println!("  nobody got it; {owner_name} takes -{points}");
        }
    }

    println!("--- final scores ---");
    let mut standings: Vec<_> = game
        .players
        .iter()
        .map(|p| (game.score_of(p.id), p.name.clone()))
        .collect();
    standings.sort_by(|a, b| b.0.cmp(&a.0));
    for (score, name) in standings {
        println!("{score:>6}  {name}");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    }
    Ok(())
}

fn board_for(name: &str) -> CategoryDraft {
    CategoryDraft {
        title: format!("{name}'s five"),
        clues: (1..=5)
            .map(|i| ClueDraft {
                question: format!("{name}'s clue number {i}"),
                answer: format!("{name}'s answer number {i}"),
                point_value: i * 100,
            })
            .collect(),
    }
}

/// First unanswered clue outside the chooser's own board, falling back to
/// the chooser's own (the engine allows it; only buzzing there is barred).
fn pick_clue(game: &Game) -> Option<Uuid> {
    let chooser = game.current_choosing_player_id;
    let mut own_board = None;
    for player in &game.players {
        let Some(category) = &player.category else {
            continue;
        };
        for clue in &category.clues {
            if clue.is_answered() {
                continue;
            }
            if Some(player.id) != chooser {
                return Some(clue.id);
            }
            own_board.get_or_insert(clue.id);
        }
    }
    own_board
}

fn name_of(game: &Game, player_id: Uuid) -> String {
    game.player(player_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| player_id.to_string())
}

fn name_of_chooser(game: &Game) -> String {
    game.current_choosing_player_id
        .map(|id| name_of(game, id))
        .unwrap_or_else(|| "someone".to_string())
}

//! Local simulation driver: a few rooms, bots taking random legal actions.

use anyhow::{anyhow, Error};
use log::info;
use pico_args::Arguments;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;

use holdem_engine::api::HandCompleted;
use holdem_engine::domain::{Chips, SessionConfig};
use holdem_engine::engine::{ActionChoice, PlayerActionKind};
use holdem_engine::infra::EngineConfig;
use holdem_engine::room::{RoomHandle, RoomManager};

const HELP: &str = "\
Play simulated Texas Hold'em hands between random bots

USAGE:
  holdem_dev_cli [OPTIONS]

OPTIONS:
  --rooms      N       Rooms to open                       [default: 3]
  --players    N       Bots per room (2-10)                [default: 4]
  --hands      N       Hands to play per room              [default: 5]
  --seed       N       Seed for shuffles and bot choices   [default: random]
  --config     PATH    Engine config as JSON

FLAGS:
  -h, --help           Print help information

ENVIRONMENT:
  RUST_LOG             Log filter, e.g. holdem_engine=debug
";

struct Args {
    rooms: usize,
    players: u8,
    hands: u64,
    seed: Option<u64>,
    config: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        rooms: pargs.opt_value_from_str("--rooms")?.unwrap_or(3),
        players: pargs.opt_value_from_str("--players")?.unwrap_or(4),
        hands: pargs.opt_value_from_str("--hands")?.unwrap_or(5),
        seed: pargs.opt_value_from_str("--seed")?,
        config: pargs.opt_value_from_str("--config")?,
    };

    env_logger::builder().format_target(false).init();

    let engine_config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    // Hands are dealt by the driver so it can stop after `--hands`.
    let mut session_config = SessionConfig {
        max_players: args.players,
        auto_deal: false,
        ..engine_config.session.clone()
    };
    if let Some(seed) = args.seed {
        session_config.deck_seed = Some(seed);
    }

    let mut bot_rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let manager = RoomManager::new(engine_config);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<HandCompleted>();

    let mut rooms = Vec::with_capacity(args.rooms);
    for _ in 0..args.rooms {
        let room = manager
            .create_room(Some(session_config.clone()), Some(events_tx.clone()))
            .await?;
        for n in 0..args.players {
            room.join(format!("bot-{}", n + 1)).await?;
        }
        info!("room {} seated {} bots", room.session_id(), args.players);
        rooms.push(room);
    }
    drop(events_tx);

    let mut finished = vec![false; rooms.len()];
    while finished.iter().any(|f| !f) {
        for (i, room) in rooms.iter().enumerate() {
            if finished[i] {
                continue;
            }
            finished[i] = step(room, args.hands, &mut bot_rng).await?;
        }
        while let Ok(event) = events_rx.try_recv() {
            print_event(&event);
        }
    }

    for room in &rooms {
        let leftover = manager.close_room(room.session_id()).await?;
        leftover.iter().for_each(print_event);
    }
    while let Some(event) = events_rx.recv().await {
        print_event(&event);
    }

    Ok(())
}

/// Plays one bot action in `room`. Returns true once the room is done.
async fn step(room: &RoomHandle, hands: u64, rng: &mut StdRng) -> Result<bool, Error> {
    let state = room.public_state().await?;
    if state.closed || (state.hand_number >= hands && !state.hand_in_progress) {
        return Ok(true);
    }
    let Some(player_id) = state.to_act else {
        if !state.hand_in_progress {
            room.start_hand().await?;
        }
        return Ok(false);
    };

    let choices = room.legal_actions(player_id).await?;
    let kind = pick_action(&choices, rng).ok_or_else(|| anyhow!("player {player_id} has no legal action"))?;
    room.submit_action(player_id, kind).await?;
    Ok(false)
}

/// Mostly passive bots with the occasional raise or shove.
fn pick_action(choices: &[ActionChoice], rng: &mut StdRng) -> Option<PlayerActionKind> {
    let roll: u32 = rng.gen_range(0..100);
    let has = |pred: fn(&ActionChoice) -> bool| choices.iter().copied().find(pred);

    if roll < 10 {
        if let Some(ActionChoice::Raise { min_to, max_to }) = has(|c| matches!(c, ActionChoice::Raise { .. })) {
            let to = rng.gen_range(min_to.0..=max_to.0.min(min_to.0 * 3));
            return Some(PlayerActionKind::Raise(Chips(to)));
        }
    }
    if roll < 12 && has(|c| matches!(c, ActionChoice::AllIn(_))).is_some() {
        return Some(PlayerActionKind::AllIn);
    }
    if roll < 20 && has(|c| matches!(c, ActionChoice::Call(_))).is_some() {
        return Some(PlayerActionKind::Fold);
    }
    choices.iter().find_map(|c| match c {
        ActionChoice::Check => Some(PlayerActionKind::Check),
        ActionChoice::Call(_) => Some(PlayerActionKind::Call),
        _ => None,
    })
    .or_else(|| choices.first().map(|_| PlayerActionKind::Fold))
}

fn print_event(event: &HandCompleted) {
    let board = event
        .board
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "room {} hand #{}: {:?}, pot {}, board [{}], winners {:?}",
        event.session_id, event.hand_number, event.reason, event.pot, board, event.winners
    );
    for shown in &event.shown {
        println!("    player {} shows {}", shown.player_id, shown.category);
    }
    for d in &event.deltas {
        println!("    player {} {:+}", d.player_id, d.delta);
    }
    if !event.eliminated.is_empty() {
        println!("    eliminated: {:?}", event.eliminated);
    }
}

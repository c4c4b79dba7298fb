use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use dt_dice::{DiceRoller, DieType};
use dt_turn::{Narration, ScriptedNarrator, TaleSession, TurnConfig, TurnError};

type Session = TaleSession<ScriptedNarrator, DiceRoller>;

pub fn run(script: &Path, seed: Option<u64>, config: Option<&Path>) -> Result<(), String> {
    let raw = std::fs::read_to_string(script)
        .map_err(|e| format!("cannot read script {}: {e}", script.display()))?;

    let mut config = match config {
        Some(path) => TurnConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => TurnConfig::default(),
    }
    .with_env()
    .map_err(|e| e.to_string())?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    tracing::debug!(?config, "starting play session");

    let roller = DiceRoller::with_optional_seed(config.seed);
    let narrator = ScriptedNarrator::from_script(&raw);
    if narrator.remaining() == 0 {
        return Err(format!("script {} has no narration", script.display()));
    }
    let mut session = TaleSession::new(narrator, roller, config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| e.to_string())?;
    runtime.block_on(play(&mut session))
}

async fn play(session: &mut Session) -> Result<(), String> {
    println!("  {} DiceTales", "Starting".bold());
    println!("  Type an action, '/roll [die]' to force a roll, '/quit' to exit.\n");

    let opening = session.open("").await.map_err(|e| e.to_string())?;
    show_narration(&opening);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if session.narrator().remaining() == 0 {
            println!("{}", "The End.".bold());
            break;
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let step = match input.split_once(' ').map_or((input, ""), |(c, r)| (c, r.trim())) {
            ("/quit" | "/q", _) => break,
            ("/cancel", _) => {
                session.cancel();
                println!("Action dropped.\n");
                continue;
            }
            ("/status", _) => {
                print_status(session);
                continue;
            }
            ("/roll", die) => force_roll(session, die).await,
            _ => act(session, input).await,
        };

        match step {
            Ok(()) => {}
            Err(TurnError::Narrator(e)) => {
                println!("{}", format!("The narrator falls silent: {e}").yellow());
                break;
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    Ok(())
}

/// Declare an action, then roll for it or narrate it directly.
async fn act(session: &mut Session, action: &str) -> Result<(), TurnError> {
    session.declare(action)?;
    if session.roll_requested().is_some() {
        roll_and_advance(session).await
    } else {
        let narration = session.narrate_action().await?;
        show_narration(&narration);
        Ok(())
    }
}

async fn force_roll(session: &mut Session, die: &str) -> Result<(), TurnError> {
    let die = if die.is_empty() {
        DieType::D20
    } else {
        die.parse()?
    };
    if session.orchestrator().pending_action().is_none() {
        return Err(TurnError::NoPendingAction);
    }
    session.force_roll(die);
    roll_and_advance(session).await
}

async fn roll_and_advance(session: &mut Session) -> Result<(), TurnError> {
    let (outcome, tier) = session.roll()?;
    println!(
        "  Rolled {} on a {}: {}",
        outcome.result(),
        outcome.die(),
        super::paint_tier(tier)
    );
    let report = session.advance().await?;
    show_narration(&report.narration);
    Ok(())
}

fn show_narration(narration: &Narration) {
    println!("{} {}", "Narrator:".bold(), narration.text);
    if let Some(request) = &narration.request {
        println!("  Roll requested: {}", request.die);
    }
    println!();
}

fn print_status(session: &Session) {
    let orchestrator = session.orchestrator();
    println!("Phase: {:?}", orchestrator.phase());
    match orchestrator.current_turn() {
        Some(turn) => println!(
            "Turn: {} ({}, {})",
            turn.id(),
            turn.die(),
            if turn.has_rolled() { "rolled" } else { "open" }
        ),
        None => println!("Turn: none"),
    }
    match orchestrator.pending_action() {
        Some(action) => println!("Pending: {}", action.text),
        None => println!("Pending: none"),
    }
    println!("Turns started: {}\n", orchestrator.coordinator().turns_started());
}

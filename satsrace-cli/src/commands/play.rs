use crate::config::CliConfig;
use crate::input::{Key, KeySource, TerminalKeys};
use crate::render::{self, QrPaymentCode};
use anyhow::{anyhow, Result};
use dialoguer::{Confirm, Input, Select};
use satsrace_core::{
    format_elapsed, PaymentCodeRenderer, Phase, RaceError, RaceSession, TapMeter,
    TapOutcome,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const PAYMENT_CODE_SIZE: u32 = 200;

pub async fn play(cli_config: &CliConfig, json: bool) -> Result<()> {
    let race_config = cli_config.race_config()?;
    let mut session = RaceSession::new(race_config)?;
    let renderer = QrPaymentCode::default();

    print_home(&session);

    loop {
        match session.phase() {
            Phase::Setup => {
                if !setup_screen(&mut session)? {
                    break;
                }
            }
            Phase::Racing => race_screen(&mut session).await?,
            Phase::Results => {
                results_screen(&session, &renderer)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
                }

                let again = Confirm::new()
                    .with_prompt("Play again?")
                    .default(true)
                    .interact()?;
                if !again {
                    break;
                }
                session.reset();
            }
        }
    }

    println!("Thanks for racing!");
    Ok(())
}

fn print_home(session: &RaceSession) {
    println!();
    println!("=== SATS RACE ===");
    println!("Tap as fast as you can. The fastest racer wins the reward!");
    println!(
        "Reward: {} sats",
        render::format_sats(session.reward().to_sat())
    );
    println!();
}

/// Message shown to players when the game rejects an action
pub fn user_message(err: &RaceError) -> String {
    match err {
        RaceError::Validation(msg) | RaceError::Precondition(msg) => msg.clone(),
        RaceError::PlayerNotFound(_) => "That player is not registered".to_string(),
        _ => err.to_string(),
    }
}

/// Returns `false` when the players want to leave
fn setup_screen(session: &mut RaceSession) -> Result<bool> {
    let items = ["Add player", "Start race!", "Quit"];

    loop {
        println!("Players ({})", session.players().len());
        if session.players().is_empty() {
            println!("  No players added yet");
        } else {
            println!("{}", render::players_table(session.players()));
        }

        let choice = Select::new()
            .with_prompt("Setup your race")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let name: String = Input::new()
                    .with_prompt("Player name")
                    .allow_empty(true)
                    .interact_text()?;
                let payout_address: String = Input::new()
                    .with_prompt("Lightning address")
                    .allow_empty(true)
                    .interact_text()?;

                if let Err(e) = session.register(&name, &payout_address) {
                    println!("{}", user_message(&e));
                }
            }
            1 => match session.begin() {
                Ok(_) => return Ok(true),
                Err(e) => println!("{}", user_message(&e)),
            },
            _ => return Ok(false),
        }
    }
}

async fn race_screen(session: &mut RaceSession) -> Result<()> {
    let name = session
        .current_player()
        .map(|p| p.name().to_string())
        .ok_or_else(|| anyhow!("No active player while racing"))?;

    // raw mode: every line needs its own carriage return
    let mut keys = TerminalKeys::new()?;
    let mut out = std::io::stdout();

    write!(out, "\r\n{}'s Turn to Race\r\nGet ready to tap!\r\n", name)?;
    for n in (1..=session.config().countdown_secs).rev() {
        write!(out, "  {}\r\n", n)?;
        out.flush()?;
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    write!(out, "TAP! TAP! TAP! (press SPACE, 'q' to give up)\r\n")?;
    out.flush()?;

    let meter = tokio::task::block_in_place(|| {
        run_turn(session, &mut keys, |meter, now| {
            let mut out = std::io::stdout();
            write!(
                out,
                "\r{}",
                render::race_line(meter.progress(), meter.taps(), meter.elapsed_ms(now))
            )?;
            out.flush()
        })
    })?;
    write!(out, "\r\n")?;

    match meter.finish_ms() {
        Some(ms) => write!(
            out,
            "Race Finished! Your time: {}\r\n",
            format_elapsed(Some(ms))
        )?,
        None => {
            tracing::info!("{} gave up after {} taps", name, meter.taps());
            write!(out, "{}: {}\r\n", name, format_elapsed(None))?;
        }
    }

    let next = if session.is_last_turn() {
        "see the results"
    } else {
        "hand over to the next player"
    };
    write!(out, "Press Enter to {}\r\n", next)?;
    out.flush()?;
    tokio::task::block_in_place(|| wait_for_continue(&mut keys))?;
    drop(keys);

    session.advance()?;
    Ok(())
}

/// Play the active player's turn until they cross the finish line or give
/// up. Presses made before the start or after the end are dropped, so they
/// never count towards anyone's time.
pub fn run_turn<K: KeySource + ?Sized>(
    session: &mut RaceSession,
    keys: &mut K,
    mut show: impl FnMut(&TapMeter, Instant) -> io::Result<()>,
) -> Result<TapMeter> {
    let id = session
        .current_player_id()
        .ok_or_else(|| anyhow!("No active player while racing"))?;
    let mut meter = TapMeter::from_config(session.config());

    let early = keys.drain()?;
    if early > 0 {
        tracing::debug!("Ignored {} presses during the countdown", early);
    }
    meter.start(Instant::now());

    while meter.is_running() {
        match keys.read_key()? {
            Key::Tap => {
                let now = Instant::now();
                match meter.tap(now) {
                    TapOutcome::Progress(progress) => {
                        session.record_progress(id, progress)?;
                    }
                    TapOutcome::Finished { elapsed_ms } => {
                        session.record_finish(id, elapsed_ms)?;
                    }
                    TapOutcome::Idle => {}
                }
                show(&meter, now)?;
            }
            Key::GiveUp | Key::Closed => break,
            Key::Continue | Key::Other => {}
        }
    }

    let late = keys.drain()?;
    if late > 0 {
        tracing::debug!("Ignored {} presses after the turn ended", late);
    }
    Ok(meter)
}

/// Block until Enter is pressed. Taps in the meantime do nothing.
pub fn wait_for_continue<K: KeySource + ?Sized>(keys: &mut K) -> Result<()> {
    loop {
        match keys.read_key()? {
            Key::Continue | Key::Closed => return Ok(()),
            Key::Tap | Key::GiveUp | Key::Other => {}
        }
    }
}

fn results_screen(session: &RaceSession, renderer: &dyn PaymentCodeRenderer) -> Result<()> {
    println!();
    println!("=== Race Results ===");
    println!(
        "Finished at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    match (session.winner(), session.payment_request()) {
        (Some(winner), Some(request)) => {
            println!();
            println!("Winner: {}", winner.name());
            println!("Time: {}", format_elapsed(winner.finish_time_ms()));
            println!("{}", renderer.render(&request, PAYMENT_CODE_SIZE)?);
            println!(
                "Reward: {} sats",
                render::format_sats(request.amount_sats)
            );
            println!("Scan the QR code to pay the winner!");
        }
        _ => println!("No winner determined"),
    }

    println!();
    println!("Leaderboard");
    println!("{}", render::leaderboard_table(session));
    Ok(())
}

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context};
use crossterm::{cursor, event::Event, terminal, ExecutableCommand};
use rand::thread_rng;

use term_invaders::config::Config;
use term_invaders::display::{terminal::present, FrameBuffer};
use term_invaders::game::Game;
use term_invaders::highscores::Ledger;
use term_invaders::input::{self, InputEvent, Key};
use term_invaders::logging::{self, LogSink};

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    if let LogSink::File(path) = logging::init(&config.log_path) {
        tracing::info!(path = %path.display(), "logging to file");
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("terminal does not support raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide)?;

    let rx = input::spawn_poller();
    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting after error");
    }
    result
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate loop: at most one key per frame, then one update and one draw.
/// Resizes are applied the moment they are read and redrawn straight away.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: Config) -> anyhow::Result<()> {
    let ledger = Ledger::load(&config.highscore_path).unwrap_or_else(|err| {
        tracing::error!(error = %err, "starting with an empty highscore table");
        Ledger::default()
    });

    let frame_time = config.frame_duration();
    let (width, height) = terminal::size().context("failed to query terminal size")?;
    let mut game = Game::new(config, ledger, width, height);
    let mut frame = FrameBuffer::new(width, height);
    let mut rng = thread_rng();

    loop {
        let frame_start = Instant::now();

        loop {
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => bail!("input poller disconnected"),
            };
            match input::translate(event) {
                Some(InputEvent::Resize(width, height)) => {
                    game.resize(width, height);
                    frame.resize(width, height);
                    game.draw(&mut frame);
                    present(out, &frame)?;
                }
                Some(InputEvent::Interrupt) => return Ok(()),
                Some(InputEvent::Key(Key::Char('q'))) if !game.accepts_text() => return Ok(()),
                Some(InputEvent::Key(key)) => {
                    game.handle_key(key, &mut rng);
                    break;
                }
                None => {}
            }
        }

        game.update(&mut rng);
        game.draw(&mut frame);
        present(out, &frame)?;

        if let Some(freeze) = game.take_freeze() {
            thread::sleep(freeze.duration);
            continue;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

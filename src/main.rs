use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invader::audio::{Audio, Silent, TerminalBell};
use space_invader::display::TerminalRenderer;
use space_invader::input::KeyboardState;
use space_invader::random::RngSource;
use space_invader::{Game, GameConfig};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser)]
#[command(name = "space_invader")]
#[command(about = "Fend off waves of fighters in your terminal")]
struct Args {
    /// JSON file overriding any tuning values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Session ───────────────────────────────────────────────────────────────────

fn new_game(config: &GameConfig, seed: Option<u64>, mute: bool) -> Game {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let audio: Box<dyn Audio> = if mute { Box::new(Silent) } else { Box::new(TerminalBell) };
    Game::new(config.clone(), Box::new(RngSource(rng)), audio)
}

enum Outcome {
    Quit,
    Restart,
}

/// Run one session until the player quits or asks for a new game.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<Outcome> {
    let mut keys = KeyboardState::new();
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();
        keys.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key @ KeyEvent { code, kind, modifiers, .. }) => {
                    if kind == KeyEventKind::Press {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(Outcome::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(Outcome::Quit);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if game.is_over() => {
                                return Ok(Outcome::Restart);
                            }
                            _ => {}
                        }
                    }
                    keys.handle(&key);
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                Event::FocusLost => keys.clear(),
                _ => {}
            }
        }

        let now_ms = started.elapsed().as_millis() as u64;
        game.refresh(now_ms, &keys, renderer)?;
        renderer.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn run<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    config: &GameConfig,
) -> anyhow::Result<()> {
    loop {
        let mut game = new_game(config, args.seed, args.mute);
        match game_loop(renderer, &mut game, rx)? {
            Outcome::Quit => return Ok(()),
            Outcome::Restart => log::info!("restarting after wave {}", game.wave()),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let (cols, rows) = terminal::size()?;
    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the kitty protocol
    // fall back to hold-window expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let mut renderer = TerminalRenderer::new(out, &config, cols, rows);
    let result = run(&mut renderer, &rx, &args, &config);

    // Always restore the terminal
    let out = renderer.get_mut();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

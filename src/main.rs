mod config;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use sky_shooter::input::{Drag, FrameInput, HeldKeys};
use sky_shooter::Session;

use config::{Args, Settings};
use display::{Atlas, Viewport};

/// How long the title card stays up when nobody presses a key.
const INTRO_TIMEOUT: Duration = Duration::from_secs(5);

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this long.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is always refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    key_seen
        .get(key)
        .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|k| is_held(key_seen, k, now))
}

fn held_keys(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> HeldKeys {
    HeldKeys {
        left: any_held(key_seen, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], now),
        right: any_held(key_seen, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], now),
        up: any_held(key_seen, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], now),
        down: any_held(key_seen, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], now),
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (*code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Intro ─────────────────────────────────────────────────────────────────────

/// Show the title card until a key is pressed. Returns `true` → quit program.
fn intro<W: Write>(out: &mut W, view: Viewport, rx: &mpsc::Receiver<Event>) -> Result<bool> {
    display::render_intro(out, view)?;
    let deadline = Instant::now() + INTRO_TIMEOUT;

    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return Ok(false);
        }
        match rx.recv_timeout(left) {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            })) => return Ok(is_quit(&code, modifiers)),
            Ok(_) => {}
            Err(mpsc::RecvTimeoutError::Timeout) => return Ok(false),
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(true),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_seen` map records when each key last produced a
/// press/repeat event; every frame the keys still inside `HOLD_WINDOW` become
/// the held-direction set handed to the core.  Mouse press + drag steers the
/// player horizontally; release ends the drag.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    atlas: &Atlas,
    mut view: Viewport,
    settings: &Settings,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1000.0;

    session.intro_finished(now_ms())?;

    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut drag: Option<Drag> = None;

    loop {
        let frame_start = Instant::now();
        let game_over = session.game().map(|g| g.is_over()).unwrap_or(false);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(&code, modifiers) {
                            return Ok(());
                        }
                        if game_over && matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                            session.restart(now_ms())?;
                            key_seen.clear();
                            drag = None;
                            continue;
                        }
                        key_seen.insert(code, frame_start);
                    }
                    KeyEventKind::Repeat => {
                        key_seen.insert(code, frame_start);
                    }
                    KeyEventKind::Release => {
                        key_seen.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, .. }) => {
                    let x = view.column_to_x(column);
                    drag = match kind {
                        MouseEventKind::Down(MouseButton::Left) => session
                            .game()
                            .map(|g| Drag::begin(x, g.player.x)),
                        MouseEventKind::Drag(MouseButton::Left) => drag.map(|d| d.moved_to(x)),
                        MouseEventKind::Up(MouseButton::Left) => None,
                        _ => drag,
                    };
                }
                Event::Resize(cols, rows) => view = Viewport::new(cols, rows),
                _ => {}
            }
        }

        let input = FrameInput {
            keys: held_keys(&key_seen, frame_start),
            drag,
        };
        let draw = session.frame(&input, now_ms(), &mut rng)?;

        // A finished game produces nothing; leave the last frame on screen.
        if !draw.is_empty() {
            display::render(out, atlas, view, &draw, session.fade())
                .context("failed to draw frame")?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < settings.frame {
            thread::sleep(settings.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let settings = Args::parse().into_settings()?;
    if let Some(path) = &settings.log_file {
        init_logging(path)?;
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &settings, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "session ended with an error");
    }
    result
}

fn run<W: Write>(out: &mut W, settings: &Settings, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let view = Viewport::new(cols, rows);

    let mut session = Session::new();
    let atlas = Atlas::load(&mut session)?;

    if settings.intro && intro(out, view, rx)? {
        return Ok(());
    }

    game_loop(out, &mut session, &atlas, view, settings, rx)
}

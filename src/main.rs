mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;

use display::Viewport;
use kitten_shooter::clock::FrameClock;
use kitten_shooter::compute::{apply_command, init_state, restart, tick};
use kitten_shooter::config::GameConfig;
use kitten_shooter::entities::{GameState, GameStatus};
use kitten_shooter::input::Key;
use kitten_shooter::render::Frame;

// ── Input translation ─────────────────────────────────────────────────────────

fn key_from(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn is_restart(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drive the game until the player quits.
///
/// One iteration per display refresh: drain pending input, tick while the
/// game is running, draw the resulting frame, then sleep out the rest of the
/// frame interval.  Once the player dies ticking stops; the last frame stays
/// on screen until restart or quit.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    rng: &mut ThreadRng,
) -> std::io::Result<()> {
    let frame_interval = Duration::from_millis(config.frame_interval_ms);
    let (width, height) = terminal::size()?;
    let mut view = Viewport::fit(config, width, height);
    let mut clock = FrameClock::start(Instant::now());
    let mut shown = Frame::default();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    modifiers,
                    ..
                }) => {
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    if state.status == GameStatus::GameOver && is_restart(code) {
                        *state = restart(state, config, rng);
                        clock.reset(Instant::now());
                        continue;
                    }
                    if let Some(command) = key_from(code).and_then(|k| config.keys.command_for(k)) {
                        *state = apply_command(state, command, config);
                    }
                }
                Event::Resize(width, height) => {
                    view = Viewport::fit(config, width, height);
                    display::render(out, &shown, &view, config)?;
                }
                _ => {}
            }
        }

        // ── Tick & draw ───────────────────────────────────────────────────────
        if state.status == GameStatus::Running {
            let dt_ms = clock.advance(Instant::now());
            let (next, frame) = tick(state, dt_ms, config, rng);
            *state = next;
            display::render(out, &frame, &view, config)?;
            shown = frame;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Log to a file: stdout is the game screen.
fn init_logging() {
    let path = std::env::temp_dir().join("kitten_shooter.log");
    if let Ok(file) = File::create(&path) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::resolve(config_path.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-repeat events; terminals without support fall back to
    // plain presses.
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

    let mut rng = thread_rng();
    let mut state = init_state(&config, &mut rng);
    log::info!(
        "Game started: {} lanes, {} enemies",
        config.lane_count(),
        config.max_enemies
    );
    let result = game_loop(&mut out, &mut state, &config, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    log::info!("Quit with score {}", state.score);
    Ok(())
}

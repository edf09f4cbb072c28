//! Terminal Tetrad runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, one thread.
//! Gravity runs on a fixed interval; key presses are applied between ticks.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_tetrad::core::{GameSnapshot, GameState, ShapeSource, TickOutcome, UniformShapes};
use tui_tetrad::input::{intent_for_key, should_quit};
use tui_tetrad::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_tetrad::{Config, EventLog};

type Log = EventLog<std::io::BufWriter<std::fs::File>>;

/// How the loop ended.
enum Exit {
    Quit,
    GameOver,
}

fn main() -> Result<()> {
    let config = Config::from_env();

    let source = match config.seed {
        Some(seed) => UniformShapes::new(seed),
        None => UniformShapes::from_entropy(),
    };
    let seed = source.seed();
    let mut game = GameState::new(source);

    let mut log = match &config.log_path {
        Some(path) => {
            let mut log = EventLog::open(path)?;
            log.log_start(seed)?;
            eprintln!("[tetrad] logging events to {}", path.display());
            Some(log)
        }
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, log.as_mut(), &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = log.as_mut() {
        log.flush()?;
    }

    let pieces = game.pieces_spawned();
    let seed = seed.map_or_else(|| "-".to_string(), |s| s.to_string());
    match result? {
        Exit::GameOver => {
            println!("You lost. Make sure that no blocks reach the Tetrad spawning area!");
            println!(
                "Pieces: {}  Rows cleared: {}  Seed: {}",
                pieces,
                game.rows_cleared(),
                seed
            );
        }
        Exit::Quit => {
            eprintln!("[tetrad] quit after {} pieces (seed {})", pieces, seed);
        }
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    mut log: Option<&mut Log>,
    config: &Config,
) -> Result<Exit> {
    game.start();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = config.tick_interval();
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if let Some(log) = log.as_deref_mut() {
            log.log_events(&game.take_events())?;
        }

        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if game.is_game_over() {
            // Leave the final board with its overlay up for a moment.
            std::thread::sleep(tick.min(Duration::from_secs(1)));
            return Ok(Exit::GameOver);
        }

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(Exit::Quit);
                    }
                    if let Some(intent) = intent_for_key(key) {
                        dirty |= game.apply(intent);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if game.tick() != TickOutcome::Idle {
                dirty = true;
            }
        }
    }
}

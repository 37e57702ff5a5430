use std::fs::File;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pacmaze::config::Args;
use pacmaze::constants::MAX_DT;
use pacmaze::render::TerminalSurface;
use pacmaze::{Direction, Game};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let game = Game::from_file(&args.maze, &args.portal)
        .with_context(|| format!("failed to load maze {}", args.maze.display()))?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (tick_ms, render_fps) = args.speed_settings();

    if let Some(ticks) = args.headless {
        run_headless(game, ticks, tick_ms, &mut rng);
        return Ok(());
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, game, &mut rng, tick_ms, render_fps);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result.context("terminal session failed")
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match (&args.log_file, args.headless) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, Some(_)) => builder.with_writer(io::stderr).init(),
        (None, None) => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

fn run_headless(mut game: Game, ticks: u32, tick_ms: u64, rng: &mut impl Rng) {
    let dt = (tick_ms as f32 / 1000.0).min(MAX_DT);
    info!(ticks, dt, "running headless");
    let mut played = 0;
    for _ in 0..ticks {
        let requested = autopilot(&game, rng);
        game.tick(dt, requested, rng);
        played += 1;
        if game.is_over() || game.is_cleared() {
            break;
        }
    }
    info!(
        ticks = played,
        score = game.score,
        lives = game.lives,
        pellets_left = game.pellets.len(),
        mode = ?game.ghost.mode.current(),
        "simulation finished"
    );
}

// Keeps pacman moving: once stopped, pick any open direction.
fn autopilot(game: &Game, rng: &mut impl Rng) -> Option<Direction> {
    let entity = &game.pacman.entity;
    if entity.direction().is_some() {
        return None;
    }
    let open: Vec<Direction> = Direction::CARDINAL
        .into_iter()
        .filter(|&dir| entity.can_move(&game.nodes, dir))
        .collect();
    open.choose(rng).copied()
}

fn run(
    stdout: &mut Stdout,
    mut game: Game,
    rng: &mut impl Rng,
    tick_ms: u64,
    render_fps: u64,
) -> io::Result<()> {
    let mut surface = TerminalSurface::new(game.grid().cols(), game.grid().rows());
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut last_tick = Instant::now();
    let mut requested: Option<Direction> = None;

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('k') | KeyCode::Up => requested = Some(Direction::Up),
                    KeyCode::Char('j') | KeyCode::Down => requested = Some(Direction::Down),
                    KeyCode::Char('h') | KeyCode::Left => requested = Some(Direction::Left),
                    KeyCode::Char('l') | KeyCode::Right => requested = Some(Direction::Right),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            let dt = last_tick.elapsed().as_secs_f32().min(MAX_DT);
            last_tick = Instant::now();
            game.tick(dt, requested, rng);
        }

        surface.clear();
        game.render(&mut surface);
        surface.present(stdout, &game.hud())?;

        if game.is_over() || game.is_cleared() {
            let message = if game.is_over() {
                format!("GAME OVER - Final Score: {} (press q to quit)", game.score)
            } else {
                format!("MAZE CLEARED - Score: {} (press q to quit)", game.score)
            };
            return wait_for_quit(stdout, &game, &message);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn wait_for_quit(stdout: &mut Stdout, game: &Game, message: &str) -> io::Result<()> {
    let (_, term_h) = terminal::size()?;
    let row = (game.grid().rows() as u16 + 2).min(term_h.saturating_sub(1));
    stdout.queue(MoveTo(0, row))?;
    stdout.queue(Print(message))?;
    stdout.flush()?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::collapsible_if)]

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use wumpus_rust::simulation::{
    Action, Controller, GameConfig, Progress,
    params::{GRID_SIZE, MAX_TURNS, TICK_MILLIS},
};
use wumpus_rust::ui::{Snapshot, render::draw_ui};

#[derive(Parser, Debug)]
#[command(
    name = "wumpus_rust",
    version,
    about = "A belief-driven explorer in the Wumpus world"
)]
struct Cli {
    /// Side length of the cave.
    #[arg(long, default_value_t = GRID_SIZE)]
    size: i32,

    /// Turns before the game is called a loss.
    #[arg(long, default_value_t = MAX_TURNS)]
    max_turns: u32,

    /// Seed for cave generation (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Run to completion without the terminal UI and print the result.
    #[arg(long, conflicts_with = "manual")]
    headless: bool,

    /// Type the explorer's actions on stdin (w a d s g c, q to quit).
    #[arg(long)]
    manual: bool,

    /// Milliseconds between turns in the terminal UI.
    #[arg(long, default_value_t = TICK_MILLIS)]
    tick_ms: u64,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = GameConfig {
        size: cli.size,
        max_turns: cli.max_turns,
        seed: cli.seed,
        ..GameConfig::default()
    };
    let (mut controller, seed) =
        Controller::from_config(&config).context("invalid game configuration")?;
    info!(seed, "starting game");

    if cli.headless {
        let result = controller.run_to_end();
        for entry in controller.messages().iter() {
            println!("{entry}");
        }
        println!("seed {seed}: {result}");
        return Ok(());
    }
    if cli.manual {
        return run_manual(&mut controller, seed);
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(
        &mut terminal,
        &mut controller,
        Duration::from_millis(cli.tick_ms),
    );

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res?;
    if let Some(result) = controller.result() {
        println!("seed {seed}: {result}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut Controller,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let mut paused = false;
    loop {
        // 1. Update
        if !paused && !controller.is_over() && last_tick.elapsed() >= tick_rate {
            controller.advance();
            last_tick = Instant::now();
        }

        // 2. Render
        let snapshot = Snapshot::capture(controller);
        terminal.draw(|f| draw_ui(f, &snapshot))?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => paused = !paused,
                    KeyCode::Char('n') if paused => {
                        controller.advance();
                    }
                    _ => {}
                }
            }
        }
    }
}

fn print_board(controller: &Controller) {
    let snapshot = Snapshot::capture(controller);
    println!("{}", snapshot.hud);
    for (belief, cave) in snapshot.beliefs.iter().zip(&snapshot.cave) {
        println!("{belief}   {cave}");
    }
    for message in &snapshot.messages {
        println!("  {message}");
    }
}

fn run_manual(controller: &mut Controller, seed: u64) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_board(controller);
        if let Some(result) = controller.result() {
            println!("seed {seed}: {result}");
            return Ok(());
        }
        print!("action [w a d s g c, q quits]> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let Some(key) = line.trim().chars().next() else {
            continue;
        };
        if key.eq_ignore_ascii_case(&'q') {
            return Ok(());
        }
        match Action::from_key(key) {
            Some(action) => {
                if let Progress::Finished(result) = controller.advance_with(action) {
                    info!(%result, "manual game finished");
                }
            }
            None => println!("unknown command '{key}'"),
        }
    }
}

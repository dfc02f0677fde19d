mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::build_info;
use flappy::core::config::load_config;
use flappy::core::constants::{FRAME_MS, STORAGE_FILE};
use flappy::host::App;
use flappy::rules::BestScore;
use flappy::utils::logging::initialize_logging;
use flappy::{JsonFileStore, KeyValueStore, RulesEngine};
use input::KeyAction;
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Longest simulated step; larger gaps (e.g. after a suspend) are clamped.
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "reset" => {
                reset_best_score()?;
                println!("Best score cleared.");
                return Ok(());
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Flappy - side-scrolling arcade game\n");
                println!("Usage: flappy [command]\n");
                println!("Commands:");
                println!("  reset      Clear the stored best score");
                println!("  --version  Show version information");
                println!("  --help     Show this help message\n");
                println!("Controls: Space flap, Esc pause, Q quit");
                println!("Logs: ~/.flappy/flappy.log (level via FLAPPY_LOG)");
                return Ok(());
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'flappy --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = initialize_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = load_config().context("invalid ~/.flappy/config.json")?;
    let (cols, rows) = terminal::size().context("could not query terminal size")?;
    let config = config.with_viewport(ui::viewport_world_width(
        cols,
        rows,
        config.screen_height,
    ));
    tracing::info!(width = config.screen_width, "content area sized");

    let store = JsonFileStore::in_flappy_dir(STORAGE_FILE).context("could not open storage")?;
    let engine = RulesEngine::new(config, store)?;
    let mut app = App::new(engine, rand::thread_rng());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("exiting after error: {:#}", e);
    }
    result
}

fn run<S: KeyValueStore, R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S, R>,
) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_update = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = frame.saturating_sub(last_update.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match input::map_key(key) {
                    Some(KeyAction::Quit) => app.should_quit = true,
                    Some(KeyAction::Host(input)) => app.handle_input(input),
                    None => {}
                }
            }
        }

        let elapsed = last_update.elapsed();
        if elapsed >= frame {
            app.update(elapsed.min(MAX_FRAME_DT));
            last_update = Instant::now();
        }
    }
    Ok(())
}

fn reset_best_score() -> Result<()> {
    let store = JsonFileStore::in_flappy_dir(STORAGE_FILE).context("could not open storage")?;
    let mut best = BestScore::new(store);
    best.clear().context("could not clear best score")?;
    Ok(())
}

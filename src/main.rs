mod app;
mod events;
mod tui;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

use snappick::config::Config;
use snappick::{log, Orientation};

use app::App;
use events::EventHandler;

/// Redraw and settling cadence.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Parsed command line.
#[derive(Debug, Default)]
struct CliArgs {
    orientation: Option<Orientation>,
    cyclic: Option<bool>,
    initial_index: Option<usize>,
    json: bool,
    values: Vec<String>,
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--horizontal" | "-H" => cli.orientation = Some(Orientation::Horizontal),
            "--vertical" | "-V" => cli.orientation = Some(Orientation::Vertical),
            "--cyclic" | "-c" => cli.cyclic = Some(true),
            "--no-cyclic" => cli.cyclic = Some(false),
            "--json" => cli.json = true,
            "--initial" | "-i" => {
                match args.get(i + 1).map(|raw| raw.parse::<usize>()) {
                    Some(Ok(index)) => {
                        cli.initial_index = Some(index);
                        i += 1;
                    }
                    Some(Err(_)) => {
                        eprintln!("Warning: '{}' is not a valid index", args[i + 1]);
                        i += 1;
                    }
                    None => eprintln!("Warning: --initial requires an index argument"),
                }
            }
            "--" => {
                cli.values.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if !arg.starts_with('-') => cli.values.push(arg.to_string()),
            arg => eprintln!("Warning: unknown flag '{}' ignored", arg),
        }
        i += 1;
    }

    cli
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    // Config precedence: CLI > env var > file > default
    let values = (!cli.values.is_empty()).then_some(cli.values);
    let config = Config::load().with_overrides(cli.orientation, cli.cyclic, cli.initial_index, values);
    log::log(&format!("Config: {:?}", config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let result = match App::new(&config, tui::ui::picker_area(Rect::new(0, 0, size.width, size.height))) {
        Ok(mut app) => run_app(&mut terminal, &mut app).await.map(|_| app),
        Err(e) => Err(e).context("cannot start picker"),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let app = result?;
    if let Some(value) = &app.chosen {
        match app.picker.save_state() {
            Some(state) if cli.json => println!("{}", serde_json::to_string(&state)?),
            _ => println!("{}", value),
        }
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);

    loop {
        terminal.draw(|frame| {
            app.fit_viewport(tui::ui::picker_area(frame.area()));
            tui::ui::render(frame, app);
        })?;

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event);
                        app.dispatch(action);
                    }
                    Some(Err(e)) => {
                        log::log_warn(&format!("terminal event error: {}", e));
                    }
                    None => return Ok(()),
                }
            }
            _ = frames.tick() => {
                app.tick();
            }
        }
    }
}

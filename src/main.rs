//! sectio: A section-by-section rich text editor for problem-set HTML.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sectio::app_state::{AppState, Flow, View};
use sectio::config::Config;
use sectio::error::SessionError;
use sectio::session::{LoadState, Session};
use sectio::ui;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sectio")]
#[command(about = "Edit problem-set HTML one section at a time", long_about = None)]
struct Args {
    /// HTML document to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Directory to write exported files into (overrides the configured export_dir)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the parsed sections as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Export the document without opening the editor
    #[arg(long, conflicts_with = "dump")]
    export: bool,
}

/// Sends log output to the configured file; the terminal belongs to the UI.
fn init_logging(cfg: &Config) -> io::Result<()> {
    let Some(path) = cfg.log_file() else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<(), SessionError> {
    let args = Args::parse();
    let cfg = Config::load();
    init_logging(&cfg)?;

    // Command line overrides config
    let export_dir = args.output.unwrap_or_else(|| cfg.export_dir());

    let mut session = Session::new();
    session.load_path(&args.file)?;
    if let LoadState::Failed { error, .. } = session.state() {
        return Err(error.clone().into());
    }

    if args.dump {
        let model = session.model().cloned().unwrap_or_default();
        let json = serde_json::to_string_pretty(&model).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    if args.export {
        session.open_regions();
        let path = session.export()?.write_to_dir(&export_dir)?;
        println!("{}", path.display());
        return Ok(());
    }

    run_tui(AppState::new(session, export_dir))?;
    Ok(())
}

fn run_tui(mut app: AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.current_view {
            View::Document => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Enter => app.enter_edit_view(),
                KeyCode::Char(':') => {
                    app.current_view = View::Command;
                    app.command_buffer.clear();
                    app.message = None;
                }
                _ => {}
            },
            View::Edit => app.edit_key(key),
            View::Command => match key.code {
                KeyCode::Char(c) => app.command_buffer.push(c),
                KeyCode::Backspace => {
                    app.command_buffer.pop();
                }
                KeyCode::Enter => {
                    let cmd = std::mem::take(&mut app.command_buffer);
                    app.current_view = View::Document;
                    if app.run_command(&cmd) == Flow::Quit {
                        return Ok(());
                    }
                }
                KeyCode::Esc => {
                    app.current_view = View::Document;
                    app.command_buffer.clear();
                }
                _ => {}
            },
        }
    }
}

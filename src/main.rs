//! snipsnap - terminal snippet popup
//!
//! Keeps short reusable texts, tags them with a color, filters by tag and
//! copies them to the clipboard with date/time placeholders filled in.

use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use snipsnap::app::{ViewController, ViewSettings};
use snipsnap::clipboard::{self, ClipboardSink};
use snipsnap::config::Config;
use snipsnap::models::{JsonFileStore, KeyValueStore, SnippetStore};
use snipsnap::{handlers, logging, ui};
use std::error::Error;
use std::io::{self};
use std::time::{Duration, Instant};

/// Application entry point and initialization
/// Loads the config, starts logging, opens the store, and runs the popup
/// until the user quits. The terminal is restored even if the loop fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    let log_path = logging::init_tracing(&data_dir)?;
    tracing::info!(
        data_dir = %data_dir.display(),
        log = %log_path.display(),
        "starting snipsnap"
    );

    let store = SnippetStore::new(JsonFileStore::in_data_dir(&data_dir));
    let settings = ViewSettings {
        copy_flash: config.copy_flash(),
        formats: config.template_formats(),
    };
    let mut app = ViewController::new(store, clipboard::system_or_unavailable(), settings);
    app.refresh().await;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app).await;

    restore_terminal()?;
    terminal.show_cursor()?;
    tracing::info!("snipsnap closed");

    result
}

/// Draw / read key / tick until a handler asks to quit
async fn run<B, S, C>(
    terminal: &mut Terminal<B>,
    app: &mut ViewController<S, C>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    S: KeyValueStore,
    C: ClipboardSink,
{
    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.needs_redraw = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if handlers::keys::handle_key_events(key, app).await {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            }
        }

        app.tick(Instant::now());
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

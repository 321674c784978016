use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use aflambox_lib::app::{App, AsyncAction, Command};
use aflambox_lib::assistant::{
    Assistant, GeminiAssistant, Recommendation, RECOMMEND_FALLBACK, SUMMARY_FALLBACK,
};
use aflambox_lib::snapshot::{Snapshot, EXPORT_FILE_NAME};
use aflambox_lib::store::PersistStore;
use aflambox_lib::ui;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Write the current state to a snapshot file and exit
    #[arg(long, value_name = "PATH")]
    export: Option<Option<PathBuf>>,

    /// Replace the current state from a snapshot file and exit
    #[arg(long, value_name = "PATH")]
    import: Option<PathBuf>,
}

fn init_logging(store_dir_available: bool) {
    use tracing_subscriber::EnvFilter;

    if !store_dir_available {
        return;
    }
    let Some(proj) = directories::ProjectDirs::from("com", "aflambox", "aflambox") else {
        return;
    };
    let path = proj.config_dir().join("aflambox.log");
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    // Log to a file so the TUI screen stays clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();

    let store = PersistStore::open_default();
    init_logging(store.is_some());

    // -- CLI MODE --
    if let Some(path) = args.export {
        let loaded = store.as_ref().map(|s| s.load()).unwrap_or_default();
        let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
        Snapshot::from_state(&loaded.catalog, &loaded.prefs)
            .write_to(&path)
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        println!("Exported to {}", path.display());
        return Ok(());
    }
    if let Some(path) = args.import {
        let snapshot =
            Snapshot::read_from(&path).map_err(|e| anyhow::anyhow!(e.user_message()))?;
        let (catalog, prefs) = snapshot.into_state();
        match &store {
            Some(store) => store.save(&catalog, &prefs),
            None => anyhow::bail!("No config directory available to import into"),
        }
        println!("Imported {} items from {}", catalog.len(), path.display());
        return Ok(());
    }

    // -- TUI MODE (Default) --
    let loaded = store.as_ref().map(|s| s.load()).unwrap_or_default();
    info!(items = loaded.catalog.len(), "catalog loaded");

    let assistant: Option<Arc<dyn Assistant>> = GeminiAssistant::from_env()
        .map(|a| Arc::new(a) as Arc<dyn Assistant>);

    let mut app = App::new(loaded, store);
    app.assistant_available = assistant.is_some();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::channel::<AsyncAction>(32);
    let res = run_app(&mut terminal, &mut app, assistant, tx, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    assistant: Option<Arc<dyn Assistant>>,
    tx: mpsc::Sender<AsyncAction>,
    rx: &mut mpsc::Receiver<AsyncAction>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // 1. Drain async completions (non-blocking).
        while let Ok(action) = rx.try_recv() {
            app.handle_async_action(action);
        }

        // 2. Fire the deferred scroll once the filter burst settles.
        app.tick(Instant::now());

        // 3. Poll input; the timeout doubles as the tick interval.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.handle_key_event(key) {
                    spawn_command(command, assistant.clone(), tx.clone());
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Fire-and-forget the async work behind a key press. Service failures are
/// converted to the friendly fallbacks here; the state engine never sees a
/// raw error from the assistant.
fn spawn_command(
    command: Command,
    assistant: Option<Arc<dyn Assistant>>,
    tx: mpsc::Sender<AsyncAction>,
) {
    match command {
        Command::Summarize(item) => {
            let Some(assistant) = assistant else { return };
            tokio::spawn(async move {
                let text = assistant
                    .summarize(&item.title, &item.description, item.kind.display_name())
                    .await
                    .unwrap_or_else(|err| {
                        tracing::warn!(%err, "summary request failed");
                        SUMMARY_FALLBACK.to_string()
                    });
                let _ = tx.send(AsyncAction::SummaryReady(item.id, text)).await;
            });
        }
        Command::Recommend(query, catalog) => {
            let Some(assistant) = assistant else { return };
            tokio::spawn(async move {
                let rec = assistant
                    .recommend(&catalog, &query)
                    .await
                    .unwrap_or_else(|err| {
                        tracing::warn!(%err, "recommendation request failed");
                        Recommendation::none(RECOMMEND_FALLBACK)
                    });
                let _ = tx.send(AsyncAction::RecommendationReady(rec)).await;
            });
        }
        Command::ImportFile(path) => {
            tokio::spawn(async move {
                let result =
                    tokio::task::spawn_blocking(move || Snapshot::read_from(&path))
                        .await
                        .unwrap_or_else(|_| {
                            Err(aflambox_lib::errors::SnapshotError::Read(
                                io::Error::other("import task failed"),
                            ))
                        });
                let _ = tx.send(AsyncAction::ImportLoaded(result)).await;
            });
        }
    }
}

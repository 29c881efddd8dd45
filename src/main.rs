// ABOUTME: Main entry point for the FylShare terminal client
// Runs the TUI by default, or a single search/upload headlessly

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use std::{io, path::PathBuf, sync::Arc, time::Duration};
use tracing::{error, info};

use fylshare::api::HttpTransport;
use fylshare::app::{App, EventHandler};
use fylshare::clock::SystemClock;
use fylshare::components::LayoutComponent;
use fylshare::config::{AdminCredentials, AppConfig};
use fylshare::lifecycle::{Phase, RequestController, SearchOperation, UploadOperation};
use fylshare::models::{format_size, UploadFile, UploadRequest};
use fylshare::notification::NotificationManager;

const MAX_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "fylshare")]
#[command(about = "Share files by six-digit code or PIN-protected box", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/fylshare/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and FYLSHARE_API_URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the files shared under an access code
    Search {
        /// Six-digit access code
        code: String,
    },
    /// Upload files anonymously and print the access code
    Upload {
        /// Name shown to the recipient
        #[arg(long)]
        name: String,

        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();
    setup_panic_handler();

    let config = load_config(&cli)?;
    let transport = Arc::new(HttpTransport::new(&config.api).context("Failed to build HTTP client")?);
    info!("Using API at {}", transport.base_url());

    match cli.command {
        Some(Command::Search { code }) => run_search(&config, transport, code).await,
        Some(Command::Upload { name, files }) => run_upload(&config, transport, name, files).await,
        None => {
            let admin = AdminCredentials::load().context("Failed to load admin credentials")?;
            let mut app = App::new(config, admin, transport, Arc::new(SystemClock::new()));
            let mut layout = LayoutComponent::new();
            run_tui(&mut app, &mut layout).await
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_env();
            config
        }
        None => AppConfig::load()?,
    };
    let config = config.with_api_url(cli.api_url.clone());
    config.validate()?;
    Ok(config)
}

async fn run_search(config: &AppConfig, transport: Arc<HttpTransport>, code: String) -> Result<()> {
    let notifications = NotificationManager::shared(Arc::new(SystemClock::new()));
    let controller = RequestController::new(
        SearchOperation,
        transport,
        Arc::clone(&notifications),
        config.notifications.search(),
    );

    let attempt = controller.submit(code).await;
    print_notification(&notifications, attempt.notification());

    match attempt.result() {
        Some(package) => {
            println!("Shared by {}", package.name);
            for file in &package.files {
                println!("  {}  {}", file.name, file.url);
            }
            Ok(())
        }
        None => bail!("search failed"),
    }
}

async fn run_upload(config: &AppConfig, transport: Arc<HttpTransport>, name: String, paths: Vec<PathBuf>) -> Result<()> {
    if paths.len() > config.upload.max_files {
        bail!("You can upload up to {} files", config.upload.max_files);
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))?;
        files.push(file);
    }

    let notifications = NotificationManager::shared(Arc::new(SystemClock::new()));
    let controller = RequestController::new(
        UploadOperation::new(config.upload.max_total_bytes),
        transport,
        Arc::clone(&notifications),
        config.notifications.upload(),
    );

    let attempt = controller.submit(UploadRequest::new(name, files)).await;
    print_notification(&notifications, attempt.notification());

    match (attempt.phase(), attempt.result()) {
        (Phase::Succeeded, Some(receipt)) => {
            println!("{} files, {}", receipt.file_count, format_size(receipt.total_size));
            Ok(())
        }
        _ => bail!("upload failed"),
    }
}

fn print_notification(
    notifications: &fylshare::notification::SharedNotifications,
    handle: Option<fylshare::notification::NotificationHandle>,
) {
    let manager = notifications.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(notification) = handle.and_then(|h| manager.get(h)) {
        println!("{} {}", notification.severity().indicator(), notification.text());
    }
}

async fn run_tui(app: &mut App<HttpTransport>, layout: &mut LayoutComponent) -> Result<()> {
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, layout).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<HttpTransport>,
    layout: &mut LayoutComponent,
) -> Result<()> {
    loop {
        let toasts = app.toasts();
        terminal.draw(|frame| {
            layout.render(frame, &app.state, &toasts);
        })?;

        // Wake up for the next toast step even without input
        if event::poll(app.poll_timeout(MAX_POLL))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    if let Some(app_event) = EventHandler::handle_key_event(key_event, &mut app.state) {
                        EventHandler::process_event(app_event, &mut app.state);
                    }
                }
            }
        }

        if let Err(e) = app.tick().await {
            error!("Error during app tick: {}", e);
        }

        if app.state.should_quit {
            info!("Quit requested");
            return Ok(());
        }
    }
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| home.join(".fylshare").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".fylshare/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!("fylshare-{}.log", chrono::Local::now().format("%Y%m%d-%H%M%S")));

    // Without a writable log file the client still runs, just silently
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "fylshare=info".into()))
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before reporting
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}

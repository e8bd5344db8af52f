mod app_state;
mod cli;
mod console;

use std::path::PathBuf;

use oneai_config::OneAiConfig;
use oneai_tiling::{FileStore, KeyValueStore, MemoryStore};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- OneAI crashed ---");
        eprintln!("The last saved workspace is kept; run with --reset-workspace if it fails to load.");
        eprintln!("---------------------\n");
        default_hook(info);
    }));
}

/// `--log-level` wins over `RUST_LOG`, which wins over the config file.
fn init_logging(cli_level: Option<&str>, config: &OneAiConfig) {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(cli::log_directive(level)),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.logging.level.directive())),
    }
    .unwrap_or_else(|_| EnvFilter::new("oneai=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// `--storage` > `persistence.storage_path` > the platform data dir.
fn open_store(cli_path: Option<PathBuf>, config: &OneAiConfig) -> Box<dyn KeyValueStore> {
    let path = cli_path
        .or_else(|| config.persistence.storage_path.as_ref().map(PathBuf::from))
        .or_else(FileStore::default_path);
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Workspace storage");
            Box::new(FileStore::new(path))
        }
        None => {
            tracing::warn!("No data directory; the workspace will not outlive this session");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Logging depends on the config, so load it first and report afterwards.
    let loaded = oneai_config::load_config(args.config.as_deref());
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (OneAiConfig::default(), Some(e)),
    };

    init_logging(args.log_level.as_deref(), &config);
    tracing::info!("OneAI v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &args.config {
        tracing::info!(path = %path.display(), "Using config override");
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let store = open_store(args.storage.clone(), &config);

    let mut app = match app_state::OneAiApp::new(config, store, args.reset_workspace) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };
    app.attach_console(console::spawn_stdin_reader());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}

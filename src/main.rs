use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fieldbook::config::{Config, ConfigStore};
use fieldbook::ui;

/// Terminal console for a remote reporting service: browse and manage
/// users, reporting forms and the organisation tree.
#[derive(Parser, Debug)]
#[command(name = "fieldbook", version, about)]
struct Cli {
    /// Config file path. Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL from the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Override the rows shown per table page.
    #[arg(long)]
    page_size: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fieldbook: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.ui.page_size = page_size;
    }
    config.validate()?;

    ui::run(ConfigStore::new(config, path))
}

/// File logging, enabled by pointing `FIELDBOOK_LOG` at a path. Off by
/// default so nothing writes across the alternate screen.
///
/// Log files get a `.{timestamp}.{pid}` suffix so concurrent instances
/// never share a file.
fn init_tracing() {
    let Ok(log_path) = std::env::var("FIELDBOOK_LOG") else {
        return;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{log_path}.{timestamp}.{pid}");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("warning: failed to create log file: {unique_path}");
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

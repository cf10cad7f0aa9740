use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use econfeed::app::{build_http_client, App};
use econfeed::config::{self, Config};
use econfeed::display::{CategoryFilter, ALL_LABEL};
use econfeed::feed::{FeedLoader, FeedSource, LOAD_FAILED_HINT, LOAD_FAILED_MESSAGE};
use econfeed::html;
use econfeed::theme::ThemeVariant;
use econfeed::ui;

/// Log file written while the terminal view owns the screen.
const LOG_FILE: &str = "econfeed.log";

#[derive(Parser, Debug)]
#[command(
    name = "econfeed",
    version,
    about = "Terminal viewer for a pre-generated economic news feed"
)]
struct Args {
    /// Feed location: an http(s) URL or a file path (overrides the config file)
    #[arg(long, value_name = "SRC")]
    feed: Option<String>,

    /// Config file [default: ~/.config/econfeed/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a static HTML page to FILE instead of starting the terminal view
    #[arg(long, value_name = "FILE")]
    export_html: Option<PathBuf>,

    /// Category shown in the exported page
    #[arg(long, value_name = "LABEL", default_value = ALL_LABEL, requires = "export_html")]
    category: String,

    /// Extra "load more" steps applied to the exported page
    #[arg(long, value_name = "N", default_value_t = 0, requires = "export_html")]
    load_more: usize,
}

/// Create the config directory with user-only permissions.
fn ensure_config_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(dir)?.permissions();
        perms.set_mode(0o700);
        if let Err(e) = std::fs::set_permissions(dir, perms) {
            eprintln!(
                "Warning: failed to set permissions on {}: {}",
                dir.display(),
                e
            );
        }
    }

    Ok(())
}

/// Initialise tracing once: to `log_file` when given, otherwise to stderr.
///
/// Verbosity comes from `RUST_LOG`.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Resolve the config file path: `--config` wins, then the default location.
fn config_path(args: &Args, config_dir: Option<&Path>) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| config_dir.map(|dir| dir.join("config.toml")))
}

/// Load the feed once and write the page. Returns whether the feed loaded.
async fn export(loader: &FeedLoader, out: &Path, args: &Args) -> Result<bool> {
    let now = Utc::now();

    let (page, loaded) = match loader.load().await {
        Ok(document) => {
            let category = CategoryFilter::from_label(&args.category);
            (
                html::export_document(document, category, args.load_more, now),
                true,
            )
        }
        Err(e) => {
            tracing::error!(error = %e, source = %loader.source(), "Feed load failed");
            eprintln!("{} {} ({})", LOAD_FAILED_MESSAGE, LOAD_FAILED_HINT, e);
            (html::export_failure(), false)
        }
    };

    std::fs::write(out, page).with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), loaded, "Exported HTML page");
    Ok(loaded)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = config::config_dir().ok();

    // The terminal view owns the screen, so its logs go to a file
    if args.export_html.is_none() {
        let dir = config_dir
            .as_deref()
            .context("HOME environment variable not set")?;
        ensure_config_dir(dir)?;
        init_tracing(Some(&dir.join(LOG_FILE)))?;
    } else {
        init_tracing(None)?;
    }

    let config = match config_path(&args, config_dir.as_deref()) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let feed = args.feed.as_deref().unwrap_or(&config.feed);
    let source = FeedSource::parse(feed).context("Invalid feed location")?;
    let client = build_http_client().context("Failed to build HTTP client")?;
    let loader = FeedLoader::new(client, source).with_timeout(config.request_timeout());

    if let Some(out) = &args.export_html {
        let loaded = export(&loader, out, &args).await?;
        if !loaded {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut app = App::new(loader);

    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark"),
    }

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!(warning = %warning, "Ignoring keybinding override");
    }

    tracing::info!(source = %app.loader.source(), "Starting terminal view");
    ui::run(&mut app).await?;

    Ok(())
}

//! Pickbox CLI
//!
//! Drive the combobox demo against the HTTP API or the in-process mock.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pickbox_app::{
    AnyBackend, App, AppConfig, Corner, FetchMode, HttpBackend, MockBackend, SubmitMode,
    CONFIG_FILE,
};
use pickbox_core::{Key, Point};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod repl;

#[derive(Parser)]
#[command(name = "pickbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pickbox combobox demo", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Use the in-process mock backend instead of HTTP
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the option catalog and print the load status
    Fetch {
        /// ok, empty, null, or error
        #[arg(short, long, default_value = "ok")]
        mode: FetchMode,

        /// Print at most this many options
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Submit a value
    Submit {
        /// Value to submit
        value: String,

        /// ok sends the value, error sends a value the server rejects
        #[arg(short, long, default_value = "ok")]
        mode: SubmitMode,
    },

    /// Run a scripted walkthrough of the four demo selects
    Demo,

    /// Drive the demo interactively from stdin
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(&cli)?;
    let backend = make_backend(&cli, &config)?;
    let mut app = App::new(backend, config);

    match cli.command {
        Commands::Fetch { mode, limit } => cmd_fetch(&mut app, mode, limit).await,
        Commands::Submit { value, mode } => cmd_submit(&mut app, value, mode).await,
        Commands::Demo => cmd_demo(&mut app).await,
        Commands::Repl => repl::run(&mut app).await,
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    match &cli.base_url {
        Some(url) => Ok(config.with_base_url(url.as_str())?),
        None => Ok(config),
    }
}

fn make_backend(cli: &Cli, config: &AppConfig) -> Result<AnyBackend> {
    if cli.mock {
        info!("using mock backend");
        return Ok(AnyBackend::Mock(MockBackend::new()));
    }
    info!("using {}", config.base_url);
    Ok(AnyBackend::Http(HttpBackend::new(config.clone())?))
}

async fn cmd_fetch(app: &mut App<AnyBackend>, mode: FetchMode, limit: usize) -> Result<()> {
    app.load_options(mode).await;

    let options = app.options();
    println!("{}", app.status_line());
    println!("Placeholder: {}", app.placeholder());
    if let Some(error) = &options.error {
        anyhow::bail!("load failed: {}", error);
    }
    for option in options.items.iter().take(limit) {
        println!("  {} = {}", option.name, option.value);
    }
    if options.items.len() > limit {
        println!("  … {} more", options.items.len() - limit);
    }
    Ok(())
}

async fn cmd_submit(app: &mut App<AnyBackend>, value: String, mode: SubmitMode) -> Result<()> {
    app.set_value(Some(value));
    app.submit(mode).await;

    let selection = app.selection();
    if let Some(error) = selection.error {
        anyhow::bail!(error);
    }
    if let Some(message) = selection.message {
        println!("{}", message);
    }
    Ok(())
}

async fn cmd_demo(app: &mut App<AnyBackend>) -> Result<()> {
    app.load_options(FetchMode::Ok).await;
    println!("{}", app.status_line());

    println!("\n# typing \"5\" into the top-left select");
    app.focus(Corner::TopLeft);
    app.key_down(Key::Char('5'));
    app.key_down(Key::ArrowDown);
    app.key_down(Key::ArrowDown);
    println!("{}", app.render_text());

    println!("\n# committing the highlighted option");
    app.key_down(Key::Enter);
    println!("{}", app.render_text());

    println!("\n# opening the bottom-right select (drops up)");
    let bounds = Corner::BottomRight.bounds(app.viewport());
    app.tap(Point::new(bounds.x() + 20.0, bounds.y() + bounds.height() / 2.0));
    println!("{}", app.render_text());

    println!("\n# clicking outside");
    app.tap(Point::new(
        app.viewport().width / 2.0,
        app.viewport().height / 2.0,
    ));

    println!("\n# pressing the bottom-left submit, then the top-right error button");
    app.submit_from(Corner::BottomLeft).await;
    app.submit_from(Corner::TopRight).await;
    println!("{}", app.render_text());
    Ok(())
}

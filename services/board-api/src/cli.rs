use crate::demo::{
    run_apply, run_bookmarks, run_demo, run_jobs, run_toggle_bookmark, ApplyArgs, BookmarkArgs,
    JobsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board",
    about = "Browse, bookmark and apply to postings from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List postings matching the given filters
    Jobs(JobsArgs),
    /// Toggle the bookmark on a posting
    Bookmark(BookmarkArgs),
    /// List bookmarked postings
    Bookmarks,
    /// Submit an application for a posting
    Apply(ApplyArgs),
    /// Walk through filtering, bookmarking and applying against an in-memory board
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct StorageArgs {
    /// Override BOARD_STORE_PATH, the file bookmarks are persisted to
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Override BOARD_CATALOG_CSV, a CSV catalog replacing the built-in postings
    #[arg(long, global = true)]
    catalog_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(store) = cli.storage.store {
        config.storage.store_path = store;
    }
    if let Some(catalog_csv) = cli.storage.catalog_csv {
        config.storage.catalog_csv = Some(catalog_csv);
    }

    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Jobs(args) => run_jobs(&config, args),
        Command::Bookmark(args) => run_toggle_bookmark(&config, args),
        Command::Bookmarks => run_bookmarks(&config),
        Command::Apply(args) => run_apply(&config, args),
        Command::Demo => run_demo(),
    }
}

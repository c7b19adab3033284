use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use promptfeed::SourceKind;
use promptfeed::core::config::{self, CliOverrides};
use promptfeed::core::selection::FeedMode;
use promptfeed::{feed, tui};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "promptfeed", about = "Browse community prompts by tag")]
struct Args {
    /// Where prompts come from
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// JSON feed file for the file source
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Base URL of the prompt service for the remote source
    #[arg(short, long)]
    url: Option<String>,

    /// Initial feed ordering
    #[arg(short, long, value_enum)]
    mode: Option<FeedMode>,

    /// Most prompt cards to show
    #[arg(short, long)]
    limit: Option<usize>,

    /// Config file to use instead of ~/.promptfeed/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to promptfeed.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("promptfeed.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let file_config = loaded.map_err(|e| {
        let location = args
            .config
            .clone()
            .or_else(config::config_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "config file".to_string());
        std::io::Error::other(format!("{location}: {e}"))
    })?;

    let cli = CliOverrides {
        source: args.source,
        file: args.file,
        url: args.url,
        mode: args.mode,
        limit: args.limit,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!(
        "promptfeed starting up with {:?} source, {:?} mode",
        resolved.source,
        resolved.mode
    );

    let source = feed::build_source(&resolved).map_err(std::io::Error::other)?;
    tui::run(&resolved, source)
}

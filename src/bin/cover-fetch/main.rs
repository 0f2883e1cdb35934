use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use cover_fetch::http::ReqwestFetcher;
use cover_fetch::logger::configure_logger;
use cover_fetch::pipeline::CoverPipeline;

use crate::config::open_config;

mod config;

const APP_DIR_NAME: &str = "cover-fetch";
const CFG_FILE_NAME: &str = "cover-fetch.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory with the posts. Overrides paths.content_dir
    #[arg(long)]
    content_dir: Option<String>,

    /// Directory where the images are saved. Overrides paths.images_dir
    #[arg(long)]
    images_dir: Option<String>,

    /// Seconds to wait between posts. Overrides fetch.delay_secs
    #[arg(long)]
    delay_secs: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let mut config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run cover-fetch --help");
            return Ok(());
        }
    };

    if let Some(content_dir) = args.content_dir {
        config.paths.content_dir = PathBuf::from(content_dir);
    }
    if let Some(images_dir) = args.images_dir {
        config.paths.images_dir = PathBuf::from(images_dir);
    }
    if let Some(delay_secs) = args.delay_secs {
        config.fetch.delay_secs = delay_secs;
    }

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let http = ReqwestFetcher::new(&config.fetch.user_agent)?;
    let pipeline = CoverPipeline::new(&config, http)?;
    let report = pipeline.run()?;

    info!("{}", report);
    println!("\nDone! Run 'hugo server -D' to preview.");

    Ok(())
}

use clap::Parser;
use log::{error, info};

use dataprep::{expand_dataset, CloneArgs, DataprepError};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = CloneArgs::parse();
    let config = args.to_clone_config();

    match expand_dataset(&config) {
        Ok(report) => {
            report.print_summary();
            info!("Cloning finished.");
        }
        Err(e @ DataprepError::NoSourceVideo { .. }) => {
            error!("{}; make sure the MOSE directory already holds a video", e);
        }
        Err(e) => {
            error!("Failed to expand MOSE dataset: {}", e);
            std::process::exit(1);
        }
    }
}

use clap::Parser;
use log::{error, info};

use dataprep::{sample_toy_coco, SampleArgs};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();
    let args = SampleArgs::parse();
    let config = args.to_sampler_config();

    info!(
        "Creating toy COCO dataset from {}...",
        config.source_dir.display()
    );

    match sample_toy_coco(&config) {
        Ok(report) => report.print_summary(),
        Err(e) => {
            error!("Failed to create toy COCO dataset: {}", e);
            std::process::exit(1);
        }
    }
}

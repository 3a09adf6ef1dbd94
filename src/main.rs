use clap::Parser;

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod utils;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = utils::logger::init(utils::logger::level_from_flags(cli.verbose, cli.quiet)) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let (config, msg) = Config::load();
    log::debug!("{}", msg);

    if cli.save_defaults {
        log::info!("{}", cli.merged_config(&config).save());
    }

    let opts = cli.options(&config);
    log::debug!("Spin: {:?}, wrap: {:?}", opts.spin, opts.wrap);

    if let Err(e) = convert::convert(&cli.seed, cli.output_seed(), opts) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

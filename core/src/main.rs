use clap::Parser;
use csv2json_core::cli::report::{MAN_PAGE, TITLE};
use csv2json_core::cli::Cli;
use csv2json_core::{convert, LogObserver, OptionsReport, SummaryReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.man {
        println!("{}", MAN_PAGE);
        return;
    }

    setup_logging(cli.verbose);

    let Some(options) = cli.to_options() else {
        eprintln!("Error: input and output directories are required");
        process::exit(2);
    };

    if !options.input_dir.is_dir() {
        eprintln!("Error: {} is not a directory", options.input_dir.display());
        process::exit(1);
    }

    for line in TITLE.lines().filter(|l| !l.is_empty()) {
        info!("{}", line);
    }
    info!("csv2json version {}", env!("CARGO_PKG_VERSION"));
    for line in OptionsReport::new(&options).to_string().lines() {
        info!("{}", line);
    }

    match convert(&options, &mut LogObserver) {
        Ok(summary) => println!("{}", SummaryReport::new(&summary)),
        Err(e) => {
            error!("Conversion failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

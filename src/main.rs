use clap::{Arg, Command as ClapCommand, ArgAction, value_parser};
use std::path::Path;
use std::process;
use log::{error, LevelFilter};

use tiffchunker::utils::logger::Logger;
use tiffchunker::commands::{CommandFactory, ChunkerCommandFactory};

fn build_cli() -> ClapCommand {
    ClapCommand::new("tiffchunker")
        .version("0.1.0")
        .about("Split GeoTIFF rasters into fixed-size JPEG chunks, skipping blank ones")
        .arg(
            Arg::new("input")
                .help("Input GeoTIFF file, or a directory searched recursively")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory for the chunks")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Chunk width in pixels [default: 5120]")
                .value_name("PIXELS")
                .value_parser(value_parser!(u32))
                .required(false),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Chunk height in pixels [default: 5120]")
                .value_name("PIXELS")
                .value_parser(value_parser!(u32))
                .required(false),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Prefix prepended to every chunk file name")
                .value_name("PREFIX")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with source, output, chunk_width, chunk_height and prefix")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log output to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw progress bars")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    let log_file = matches.get_one::<String>("log-file").map(Path::new);
    if let Err(e) = Logger::init_global_logger(log_file, level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = ChunkerCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}

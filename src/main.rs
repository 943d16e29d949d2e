use std::process;
use log::error;

use vectorkit::utils::logger::Logger;
use vectorkit::commands::{build_cli, CommandFactory, VectorkitCommandFactory};

fn main() {
    let matches = build_cli().get_matches();

    let log_file = "vectorkit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if matches.get_flag("verbose") {
        Logger::init_console_logger();
    } else if let Err(e) = Logger::init_global_logger("vectorkit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = VectorkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
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

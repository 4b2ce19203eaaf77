use mcm::cli::commands::{CliArgs, Commands};
use mcm::cli::handlers::{handle_discover, handle_list, handle_show};
use mcm::util::{init_logging, parse_level, LoggingConfig};
use mcm::{McmConfig, McmHome, VERSION};

use clap::Parser;
use tracing::{debug, warn, Level};

fn main() {
    let args = CliArgs::parse();

    let mut config = McmConfig::default();
    if let Some(home) = &args.home {
        config = config.with_home(home);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let home = McmHome::new(&config.home);
    let home_ready = home.ensure_directories();

    init_logging_from_args(&args, &config, &home, home_ready.is_ok());

    debug!("mcm v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("{}", config);

    if let Err(e) = home_ready {
        warn!("Could not prepare {}: {}", home.root().display(), e);
    }

    let exit_code = match &args.command {
        Commands::Discover(discover_args) => {
            handle_discover(discover_args, &config, &home, args.quiet)
        }
        Commands::List(list_args) => handle_list(list_args, &home),
        Commands::Show(show_args) => handle_show(show_args, &home),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &McmConfig, home: &McmHome, with_file: bool) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    let mut logging = LoggingConfig::with_level(level).json(config.log_json);
    if with_file {
        logging = logging.with_log_file(home.log_file());
    }
    init_logging(logging);
}

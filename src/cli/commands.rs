use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Discover, profile and register MCP integration packages
#[derive(Parser, Debug)]
#[command(
    name = "mcm",
    about = "Discover, profile and register MCP integration packages",
    version,
    long_about = "mcm resolves MCP identifiers (GitHub URLs, npm packages or bare names) \
                  to their source repositories, estimates the tool inventory and context \
                  cost of each one, and records the results in a local registry."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "mcm home directory (overrides MCM_HOME)"
    )]
    pub home: Option<PathBuf>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Discover MCPs listed in a file",
        long_about = "Reads one MCP identifier per line and resolves each in turn. Lines may be \
                      GitHub URLs, npm package names or bare names (resolved through search, \
                      which needs EXA_API_KEY).\n\n\
                      Examples:\n  \
                      mcm discover mcps.txt\n  \
                      mcm discover mcps.txt --delay-ms 0"
    )]
    Discover(DiscoverArgs),

    #[command(about = "List discovered MCPs")]
    List(ListArgs),

    #[command(about = "Show the stored record for one MCP")]
    Show(ShowArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverArgs {
    #[arg(value_name = "INPUT_FILE", help = "File with one MCP identifier per line")]
    pub input_file: PathBuf,

    #[arg(
        long,
        value_name = "MILLISECONDS",
        help = "Pause between items (overrides MCM_REQUEST_DELAY_MS)"
    )]
    pub delay_ms: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_name = "NAME", help = "Registry name of the MCP")]
    pub name: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_discover_args() {
        let args = CliArgs::parse_from(["mcm", "discover", "mcps.txt"]);
        match args.command {
            Commands::Discover(discover) => {
                assert_eq!(discover.input_file, PathBuf::from("mcps.txt"));
                assert!(discover.delay_ms.is_none());
            }
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_discover_requires_input_file() {
        assert!(CliArgs::try_parse_from(["mcm", "discover"]).is_err());
    }

    #[test]
    fn test_list_defaults_to_human() {
        let args = CliArgs::parse_from(["mcm", "list"]);
        match args.command {
            Commands::List(list) => assert_eq!(list.format, OutputFormatArg::Human),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from([
            "mcm",
            "show",
            "servers",
            "--format",
            "json",
            "--home",
            "/tmp/h",
            "-v",
        ]);
        assert_eq!(args.home, Some(PathBuf::from("/tmp/h")));
        assert!(args.verbose);
        match args.command {
            Commands::Show(show) => {
                assert_eq!(show.name, "servers");
                assert_eq!(show.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CliArgs::try_parse_from(["mcm", "list", "-q", "-v"]).is_err());
    }
}

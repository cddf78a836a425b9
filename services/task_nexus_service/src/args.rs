use std::path::PathBuf;

use strum::Display;

use crate::{init_tracing::TraceLevel, routes::root::RouterConfig};

#[derive(clap::Parser)]
#[command(name = "task-nexus-service")]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: CliSubcommands,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum CliSubcommands {
    Serve(ServeCommand),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeCommand {
    #[command(flatten)]
    pub args: ServeArgs,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ServeArgs {
    #[clap(
        long,
        short,
        default_value = "0.0.0.0:5000",
        env = "TASK_NEXUS_LISTEN",
        help = "The address to listen on"
    )]
    pub listen: String,

    #[clap(
        long,
        env = "TASK_NEXUS_CONFIG",
        help = "Service configuration, as a file path or inline JSON depending on --config-type"
    )]
    pub config: Option<String>,

    #[clap(
        long,
        value_enum,
        env = "TASK_NEXUS_CONFIG_TYPE",
        help = "How to interpret --config"
    )]
    pub config_type: Option<ConfigType>,

    #[clap(
        long,
        short,
        env = "TASK_NEXUS_DATABASE_URL",
        help = "SQLite database URL, overrides the configuration file"
    )]
    pub database_url: Option<String>,

    #[clap(
        long,
        env = "TASK_NEXUS_TOKEN_SECRET",
        help = "Identity token signing secret, overrides the configuration file"
    )]
    pub token_secret: Option<String>,

    #[clap(
        long,
        default_value = "info",
        value_enum,
        env = "TASK_NEXUS_LOG_LEVEL",
        help = "Stdout trace level"
    )]
    pub log_level: TraceLevel,

    #[clap(
        long,
        env = "TASK_NEXUS_LOG_FILE",
        help = "Optional JSON trace log file"
    )]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub routes: RouterConfig,
}

#[derive(
    clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Display,
)]
pub enum ConfigType {
    #[strum(serialize = "file")]
    File,
    #[strum(serialize = "inline")]
    Inline,
}

use std::{fs, fs::File, io::IsTerminal as _, sync::Arc};

use strum::Display;
use tracing_core::LevelFilter;
use tracing_subscriber::{
    Layer as _, Registry, filter::Targets, layer::SubscriberExt as _,
};

use crate::args::ServeArgs;

#[derive(
    clap::ValueEnum,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
)]
pub enum TraceLevel {
    #[strum(serialize = "none")]
    None,
    #[strum(serialize = "error")]
    Error,
    #[strum(serialize = "warn")]
    Warn,
    #[default]
    #[strum(serialize = "info")]
    Info,
    #[strum(serialize = "debug")]
    Debug,
    #[strum(serialize = "trace")]
    Trace,
}

impl TraceLevel {
    pub fn is_none(self) -> bool {
        matches!(self, TraceLevel::None)
    }
}

impl From<TraceLevel> for LevelFilter {
    fn from(value: TraceLevel) -> Self {
        match value {
            TraceLevel::None => LevelFilter::OFF,
            TraceLevel::Error => LevelFilter::ERROR,
            TraceLevel::Warn => LevelFilter::WARN,
            TraceLevel::Info => LevelFilter::INFO,
            TraceLevel::Debug => LevelFilter::DEBUG,
            TraceLevel::Trace => LevelFilter::TRACE,
        }
    }
}

pub fn init_tracing(args: &ServeArgs) -> eyre::Result<()> {
    let mut layers = Vec::new();

    let main_filters = Targets::new().with_target("sqlx", LevelFilter::WARN);

    if !args.log_level.is_none() {
        let filter: LevelFilter = args.log_level.into();
        let stdout_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .without_time()
            .with_writer(std::io::stdout)
            .with_ansi(std::io::stdout().is_terminal())
            .with_file(false)
            .with_target(false)
            .with_line_number(false)
            .with_filter(main_filters.clone().with_default(filter))
            .boxed();

        layers.push(stdout_layer);
    }

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(main_filters.clone().with_default(LevelFilter::ERROR))
        .boxed();

    layers.push(stderr_layer);

    if let Some(file_path) = &args.log_file {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(Arc::new(File::create(file_path)?))
            .with_filter(main_filters.clone().with_default(LevelFilter::INFO))
            .boxed();

        layers.push(file_layer);
    }

    tracing::subscriber::set_global_default(Registry::default().with(layers))?;

    Ok(())
}

//! Logger module
//!
//! `tracing-subscriber` registry with an optional console layer and an optional
//! file layer (Full, Compact or JSON). The file writer falls back to stderr when
//! the log file becomes unwritable.

pub mod config;
pub mod error;
pub(crate) mod writer;


pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};
use writer::LogFileWriter;

/// Install the global subscriber. Fails if one is already set.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(config.filter_directive()?)?;

    let file_layer = match config.file.enabled {
        true => Some(file_layer(&config.file)?),
        false => None,
    };
    let console_layer = config.console.enabled.then(|| {
        fmt::layer()
            .with_ansi(config.console.colored && std::io::stdout().is_terminal())
            .with_target(true)
    });

    // File layer before console so console ANSI codes never end up in
    // span fields written to the file (tokio-rs/tracing#1817).
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(())
}

fn file_layer<S>(config: &FileConfig) -> Result<Box<dyn Layer<S> + Send + Sync>, LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let writer = LogFileWriter::new(config)?;
    let layer = fmt::layer().with_ansi(false).with_target(true);

    Ok(match config.format {
        LogFormat::Full => layer.with_writer(writer).boxed(),
        LogFormat::Compact => layer.compact().with_writer(writer).boxed(),
        LogFormat::Json => layer.json().with_writer(writer).boxed(),
    })
}

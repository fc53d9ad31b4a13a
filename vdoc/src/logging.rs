use anyhow::Result;
use tracing_subscriber::{
    filter::LevelFilter, fmt::Layer as FmtLayer, layer::SubscriberExt as _, Layer as _, Registry,
};

pub(crate) struct Options {
    pub verbose: bool,
    pub color: bool,
}

/// Install the global subscriber: plain log lines on stderr.
pub(crate) fn set_up(options: &Options) -> Result<()> {
    let filter = if options.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };

    let fmt_layer = FmtLayer::new()
        .with_writer(std::io::stderr)
        .with_target(options.verbose)
        .with_ansi(options.color)
        .with_filter(filter);
    let subscriber = Registry::default().with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set up tracing: {}", e))?;

    Ok(())
}

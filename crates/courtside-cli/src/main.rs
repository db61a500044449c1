use anyhow::Context as _;

mod command;
mod util;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    command::run()
}

/// Library diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt};

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

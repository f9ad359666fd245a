use {
  anyhow::Context,
  clap::Parser,
  leaktrace::Config,
  std::io,
  tracing_subscriber::EnvFilter,
};

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(io::stderr)
    .init();

  let config = Config::parse();

  let report = config.run()?;

  report
    .write_text(io::stdout().lock())
    .context("failed to print leak report")?;

  Ok(())
}

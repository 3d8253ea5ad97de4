use anyhow::Result;
use clap::Parser;
use search_cli::{run, Cli};
use std::io::{self, BufWriter, Write};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    run(cli, stdin.lock(), &mut out)?;
    out.flush()?;
    Ok(())
}

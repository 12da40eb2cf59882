use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use wunder2org::convert_file;

#[derive(Debug, Parser)]
#[command(
    name = "wunder2org",
    about = "Convert a Wunderlist JSON export into an Org outline",
    version
)]
struct Cli {
    /// Wunderlist export (JSON) to convert.
    input: PathBuf,
    /// Write the Org document to this path instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Enable verbose logging for debugging.
    #[arg(long)]
    verbose: bool,
    /// Logger specification, e.g. `info` or `wunder2org=trace`. Overrides --verbose.
    #[arg(long, value_name = "SPEC")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose, cli.log_level.as_deref())?;

    let Cli { input, output, .. } = cli;
    log::debug!("converting {:?}", input);
    let text = convert_file(&input)?;

    match output {
        Some(path) => {
            fs::write(&path, text.as_bytes()).with_context(|| format!("writing {:?}", path))?;
            log::info!("wrote Org outline to {:?}", path);
        }
        None => println!("{text}"),
    }

    Ok(())
}

fn init_logging(verbose: bool, spec: Option<&str>) -> Result<LoggerHandle> {
    let spec = spec.unwrap_or(if verbose { "debug" } else { "warn" });
    Logger::try_with_str(spec)
        .with_context(|| format!("invalid log specification `{spec}`"))?
        .log_to_stderr()
        .start()
        .context("starting logger")
}

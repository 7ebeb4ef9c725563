use std::error::Error;
use std::io::{self, Write};

use fileinput::cli::InputArgs;
use fileinput::{FileInputBuilder, InputConfig, Mode, Resource};
use sarge::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  fcat [--input <path>[,<path>...]]... [--mode concat|each] [--policy fast_fail|accumulate] [--config <file>]"
    );
    eprintln!();
    eprintln!("With no inputs, fcat reads stdin.");
    eprintln!();
    eprintln!("Input tokens:");
    eprintln!("  - | stdin          Read from stdin");
    eprintln!("  @<path>            Force treating value as a file path");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  concat             Stream all inputs as one (stops at the first error)");
    eprintln!("  each               Copy inputs one by one under the error policy");
}

fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<InputArgs>(tag::both('i', "input"));
    let mode_ref = reader.add::<String>(tag::both('m', "mode"));
    let policy_ref = reader.add::<String>(tag::both('p', "policy"));
    let config_ref = reader.add::<String>(tag::both('c', "config"));

    let args = reader.parse()?;

    let input = match input_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(e)) => match e {},
        None => InputArgs::default(),
    };

    let mut config = match config_ref.get(&args) {
        Some(Ok(path)) => InputConfig::from_path(&path)?,
        Some(Err(e)) => return Err(format!("invalid --config: {e:?}").into()),
        None => InputConfig::default(),
    };
    config.paths.extend(input.into_paths());

    if let Some(mode) = mode_ref.get(&args) {
        let mode = mode.map_err(|e| format!("invalid --mode: {e:?}"))?;
        config.mode = mode.parse::<Mode>()?;
    }
    if let Some(policy) = policy_ref.get(&args) {
        let policy = policy.map_err(|e| format!("invalid --policy: {e:?}"))?;
        config.error_policy = Some(policy);
    }

    let engine = FileInputBuilder::from_config(&config)?.build();
    info!(inputs = engine.paths().len(), stdin = engine.reads_stdin(), mode = ?config.mode, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.mode {
        Mode::Concat => {
            let mut reader = engine.concat();
            let copied = io::copy(&mut reader, &mut out);
            let closed = reader.close();
            let bytes = copied?;
            closed?;
            info!(bytes, "copied concatenated input");
        }
        Mode::Each => {
            engine.for_each(|path, reader| {
                let bytes = io::copy(reader, &mut out)?;
                info!(path, bytes, "copied input");
                Ok(())
            })?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("fcat error: {e}");
        print_usage();
        std::process::exit(1);
    }
}

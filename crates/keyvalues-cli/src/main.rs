mod args;
mod commands;

use anyhow::{Context, Result};
use args::{Args, Command, USAGE, parse_args};
use keyvalues_config::Config;
use std::{env, io, process};

fn main() -> Result<()> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let Args { config, command } = args;
    match command {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("keyvalues {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Explicit --config must exist; the default location is optional
    let config = match config {
        Some(path) => Config::load_from_path(&path)?
            .with_context(|| format!("config file '{}' not found", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };

    let level = config.log_level.as_deref().unwrap_or("warn");
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .init();
    log::debug!("config path: {}", Config::config_path().display());

    let limits = config.limits();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Events { file } => {
            commands::events(&config.resolve_document(&file), limits, &mut out)?;
        }
        Command::Fmt { file, output } => {
            let output = output.map(|path| config.resolve_document(&path));
            commands::fmt(
                &config.resolve_document(&file),
                output.as_deref(),
                limits,
                &mut out,
            )?;
        }
        Command::Find {
            file,
            pattern,
            options,
        } => {
            commands::find(
                &config.resolve_document(&file),
                &pattern,
                options,
                limits,
                &mut out,
            )?;
        }
        Command::Check { file } => {
            if !commands::check(&config.resolve_document(&file), limits, &mut out)? {
                process::exit(1);
            }
        }
        Command::Help | Command::Version => {}
    }

    Ok(())
}

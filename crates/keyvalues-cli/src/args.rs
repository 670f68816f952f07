use anyhow::{Result, anyhow, bail};
use keyvalues_engine::{MatchField, SearchOptions};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: keyvalues [--config <path>] <command> [args]

Commands:
  events <file>                 print depth, key and value of every pair
  fmt <file> [-o <out>]         re-serialize a document
  find <file> <pattern> [--value] [--ignore-case] [--level N]
                                print every matching node with its level
  check <file>                  report syntax problems, exit 1 if any

Options:
  --config <path>   config file (default ~/.config/keyvalues/config.toml)
  -h, --help        show this help
  -V, --version     show the version";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Events {
        file: PathBuf,
    },
    Fmt {
        file: PathBuf,
        output: Option<PathBuf>,
    },
    Find {
        file: PathBuf,
        pattern: String,
        options: SearchOptions,
    },
    Check {
        file: PathBuf,
    },
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub command: Command,
}

/// Parse the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut config = None;
    let mut positional = Vec::new();
    let mut output = None;
    let mut options = SearchOptions::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Ok(Args {
                    config,
                    command: Command::Help,
                });
            }
            "-V" | "--version" => {
                return Ok(Args {
                    config,
                    command: Command::Version,
                });
            }
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                config = Some(PathBuf::from(path));
            }
            "-o" | "--output" => {
                let path = args.next().ok_or_else(|| anyhow!("{arg} needs a path"))?;
                output = Some(PathBuf::from(path));
            }
            "--value" => options.field = MatchField::Value,
            "--ignore-case" => options.case_insensitive = true,
            "--level" => {
                let level = args.next().ok_or_else(|| anyhow!("--level needs a number"))?;
                let level = level
                    .parse()
                    .map_err(|_| anyhow!("--level expects a non-negative number, got '{level}'"))?;
                options.level = Some(level);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option '{flag}'"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(name) = positional.next() else {
        bail!("no command given");
    };
    let file = positional
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("'{name}' needs a file"))?;

    let command = match name.as_str() {
        "events" => Command::Events { file },
        "fmt" => Command::Fmt { file, output },
        "check" => Command::Check { file },
        "find" => {
            let pattern = positional
                .next()
                .ok_or_else(|| anyhow!("'find' needs a pattern"))?;
            Command::Find {
                file,
                pattern,
                options,
            }
        }
        other => bail!("unknown command '{other}'"),
    };

    if let Some(extra) = positional.next() {
        bail!("unexpected argument '{extra}'");
    }

    Ok(Args { config, command })
}

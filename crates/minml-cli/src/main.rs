use anyhow::{Context, Result};
use minml_config::{Config, OutputFormat};
use minml_engine::TreeParser;
use minml_engine::ast::Node;
use minml_engine::io::{IoError, read_source};
use minml_engine::writer::{self, html, minml, xml};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::{env, process};
use thiserror::Error;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <sourcefile>", args[0]);
        process::exit(1);
    }
    let source_path = PathBuf::from(&args[1]);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    if let Err(e) = convert(&source_path, &config) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn load_config() -> Result<Config> {
    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load()
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?
        .unwrap_or_default();
    log::debug!("Using {config:?}");
    Ok(config)
}

/// Failure at one of the three stages of a conversion.
#[derive(Debug, Error)]
enum ConvertError {
    #[error("Error opening {}: {source}", .file.display())]
    Opening { file: PathBuf, source: IoError },

    #[error("Error parsing {}: {source}", .file.display())]
    Parsing {
        file: PathBuf,
        source: minml_engine::Error,
    },

    #[error("Error encoding {}: {source}", .file.display())]
    Encoding { file: PathBuf, source: writer::Error },
}

fn convert(source_path: &Path, config: &Config) -> Result<(), ConvertError> {
    let file = || source_path.to_path_buf();

    let bytes = read_source(source_path).map_err(|source| ConvertError::Opening {
        file: file(),
        source,
    })?;
    log::debug!("Read {} bytes from {}", bytes.len(), source_path.display());

    let nodes = TreeParser::new(&bytes[..])
        .with_transformers(config.transformers())
        .parse()
        .map_err(|source| ConvertError::Parsing {
            file: file(),
            source,
        })?;
    log::debug!("Parsed {} top-level nodes", nodes.len());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_nodes(&nodes, config.format, &mut out)
        .and_then(|()| out.flush().map_err(writer::Error::from))
        .map_err(|source| ConvertError::Encoding {
            file: file(),
            source,
        })?;
    Ok(())
}

fn write_nodes<W: Write>(
    nodes: &[Node],
    format: OutputFormat,
    out: &mut W,
) -> Result<(), writer::Error> {
    log::debug!("Writing {format:?}");
    match format {
        OutputFormat::Html => html::write(nodes, out),
        OutputFormat::Xml => xml::write(nodes, out),
        OutputFormat::Minml => minml::write(nodes, out),
    }
}

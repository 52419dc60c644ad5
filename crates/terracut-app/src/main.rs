//! terracut: select a region on the globe and export its terrain.
//!
//! Usage:
//!   terracut replay session.jsonl --config terracut.toml
//!   terracut export --bounds 56.0,26.0,56.5,26.5 --config terracut.toml

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use tracing::{error, info};

use terracut_app::logging::init_logging;
use terracut_app::replay;
use terracut_app::{AppConfig, ViewController};
use terracut_core::types::GeoRectangle;
use terracut_core::{Error, Result};
use terracut_selection::TrackedOverlay;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let rest = &args[2..];
    let config = match load_config(rest) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging.filter) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "replay" => cmd_replay(rest, &config).await,
        "export" => cmd_export(rest, &config).await,
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        error!(error = %e, "terracut failed");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "terracut: globe region selection and terrain export\n\
         \n\
         Commands:\n\
         \n\
         replay    Drive the selection view from recorded input events\n\
         \n\
           <events.jsonl>     One JSON input event per line\n\
           --config <path>    TOML configuration (optional)\n\
         \n\
         export    Export a rectangle without interaction\n\
         \n\
           --bounds <w,s,e,n> Rectangle in degrees\n\
           --config <path>    TOML configuration (optional)\n\
         \n\
         Examples:\n\
         \n\
           terracut replay session.jsonl --config terracut.toml\n\
           terracut export --bounds 56.0,26.0,56.5,26.5\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn load_config(args: &[String]) -> Result<AppConfig> {
    match flag_value(args, "--config") {
        Some(path) => AppConfig::load(Path::new(path)),
        None => Ok(AppConfig::default()),
    }
}

fn parse_bounds(value: &str) -> Option<GeoRectangle> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<Vec<f64>>>()?;
    match parts.as_slice() {
        [west, south, east, north] => Some(GeoRectangle::from_bounds(*west, *south, *east, *north)),
        _ => None,
    }
}

// --- Replay command ---

async fn cmd_replay(args: &[String], config: &AppConfig) -> Result<()> {
    let path = match args.first().filter(|a| !a.starts_with("--")) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: replay needs an events file");
            process::exit(1);
        }
    };

    let text = std::fs::read_to_string(&path)?;
    let events = replay::parse_events(&text);
    info!(events = events.len(), path = %path.display(), "Replaying");

    let mut controller = ViewController::new(
        config.camera(),
        TrackedOverlay::new(),
        config.keys.clone(),
        Arc::new(config.pipeline()?),
    )?;
    if let Some(report) = replay::replay(&mut controller, &events).await? {
        for file in &report.files {
            info!(path = %file.display(), "Wrote");
        }
    }
    Ok(())
}

// --- Export command ---

async fn cmd_export(args: &[String], config: &AppConfig) -> Result<()> {
    let rectangle = flag_value(args, "--bounds")
        .and_then(parse_bounds)
        .ok_or_else(|| Error::config("--bounds <west,south,east,north> is required"))?;

    let pipeline = config.pipeline()?;
    let settings = pipeline.settings();
    info!(
        columns = settings.columns,
        rows = settings.rows,
        format = ?settings.format,
        "One-shot export"
    );
    let report = pipeline.run(rectangle).await?;
    for file in &report.files {
        info!(path = %file.display(), "Wrote");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        let rect = parse_bounds("56.5, 26.0,56.0,26.5").unwrap();
        assert_eq!(rect, GeoRectangle::from_bounds(56.0, 26.0, 56.5, 26.5));
        assert!(parse_bounds("1,2,3").is_none());
        assert!(parse_bounds("a,b,c,d").is_none());
    }

    #[test]
    fn test_flag_value() {
        let args: Vec<String> = ["events.jsonl", "--config", "t.toml"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(flag_value(&args, "--config"), Some("t.toml"));
        assert_eq!(flag_value(&args, "--bounds"), None);
    }
}

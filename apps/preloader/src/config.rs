use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::builder::breakpoints::UNBOUNDED_WIDTH;

const DEFAULT_VIEWPORT_BREAKPOINTS: &str = "480,600,782";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file with the site's documents and responsive breakpoints.
    pub site_data_path: Option<PathBuf>,
    /// Ascending maximum widths bounding the URL metric viewport groups.
    pub viewport_breakpoints: Vec<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            site_data_path: std::env::var("SITE_DATA_PATH")
                .ok()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            viewport_breakpoints: parse_viewport_breakpoints(
                &std::env::var("VIEWPORT_BREAKPOINTS")
                    .unwrap_or_else(|_| DEFAULT_VIEWPORT_BREAKPOINTS.to_string()),
            )
            .context("VIEWPORT_BREAKPOINTS must be ascending pixel widths, e.g. 480,600,782")?,
        })
    }
}

fn parse_viewport_breakpoints(raw: &str) -> Result<Vec<u32>> {
    let mut breakpoints = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let width = part
            .parse::<u32>()
            .with_context(|| format!("'{part}' is not a pixel width"))?;
        if width == 0 {
            bail!("breakpoint widths must be greater than zero");
        }
        if width == UNBOUNDED_WIDTH {
            bail!("{width} leaves no room for a final viewport group");
        }
        if let Some(&previous) = breakpoints.last() {
            if width <= previous {
                bail!("{width} does not follow {previous} in ascending order");
            }
        }
        breakpoints.push(width);
    }
    Ok(breakpoints)
}

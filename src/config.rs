use std::path::PathBuf;

use clap::Parser;

use crate::constants::{DEFAULT_MAZE, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS};
use crate::game::PortalPair;

#[derive(Parser, Debug)]
#[command(author, version, about = "Maze graph and ghost mode demo", long_about = None)]
pub struct Args {
    /// Maze file to load
    #[arg(short, long, default_value = DEFAULT_MAZE)]
    pub maze: PathBuf,

    /// Portal pair as `col,row:col,row`; may be repeated
    #[arg(short, long, value_parser = parse_portal)]
    pub portal: Vec<PortalPair>,

    /// Run this many ticks without a terminal and log a summary
    #[arg(long)]
    pub headless: Option<u32>,

    /// Simulation tick in milliseconds (falls back to PACMAZE_TICK_MS)
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Redraw rate (falls back to PACMAZE_FPS)
    #[arg(long)]
    pub fps: Option<u64>,

    /// Seed for ghost tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here; terminal mode discards them otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn speed_settings(&self) -> (u64, u64) {
        let tick_ms = self
            .tick_ms
            .filter(|v| *v > 0)
            .or_else(|| env_u64("PACMAZE_TICK_MS"))
            .unwrap_or(DEFAULT_TICK_MS);
        let render_fps = self
            .fps
            .filter(|v| *v > 0)
            .or_else(|| env_u64("PACMAZE_FPS"))
            .unwrap_or(DEFAULT_RENDER_FPS);
        (tick_ms, render_fps)
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
}

fn parse_tile(s: &str) -> Result<(i32, i32), String> {
    let (col, row) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `col,row`, got `{s}`"))?;
    let col = col.trim().parse().map_err(|e| format!("bad column `{col}`: {e}"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row `{row}`: {e}"))?;
    Ok((col, row))
}

pub fn parse_portal(s: &str) -> Result<PortalPair, String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `col,row:col,row`, got `{s}`"))?;
    Ok((parse_tile(a)?, parse_tile(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_portal() {
        assert_eq!(parse_portal("0,17:27,17"), Ok(((0, 17), (27, 17))));
        assert_eq!(parse_portal(" 1, 2 : 3 ,4"), Ok(((1, 2), (3, 4))));
        assert!(parse_portal("0,17").is_err());
        assert!(parse_portal("a,1:2,3").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["pacmaze"]);
        assert_eq!(args.maze, PathBuf::from(DEFAULT_MAZE));
        assert!(args.portal.is_empty());
        assert!(args.headless.is_none());
    }

    #[test]
    fn test_args_flags() {
        let args = Args::parse_from([
            "pacmaze",
            "--maze",
            "m.txt",
            "-p",
            "0,1:5,1",
            "--portal",
            "0,3:5,3",
            "--headless",
            "100",
            "--tick-ms",
            "20",
            "--fps",
            "60",
        ]);
        assert_eq!(args.portal, vec![((0, 1), (5, 1)), ((0, 3), (5, 3))]);
        assert_eq!(args.headless, Some(100));
        assert_eq!(args.speed_settings(), (20, 60));
    }
}

//! Finding a Stockfish executable.
//!
//! An explicit path (from `--engine-path` or `STOCKFISH_PATH`) is used as
//! given. Otherwise the usual install locations for the current platform are
//! tried, followed by every `PATH` entry.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engines::engine_trait::OpponentError;

const EXECUTABLE_NAMES: [&str; 2] = ["stockfish", "stockfish.exe"];

fn platform_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            "C:\\Program Files\\Stockfish\\stockfish.exe",
            "C:\\Program Files (x86)\\Stockfish\\stockfish.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/usr/local/bin/stockfish",
            "/opt/homebrew/bin/stockfish",
            "/Applications/Stockfish.app/Contents/MacOS/stockfish",
        ]
    } else {
        &["/usr/bin/stockfish", "/usr/local/bin/stockfish", "/usr/games/stockfish"]
    }
}

/// Every location that will be probed, in order.
pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut paths: Vec<PathBuf> = platform_candidates().iter().map(PathBuf::from).collect();
    if let Some(search_path) = env::var_os("PATH") {
        for dir in env::split_paths(&search_path) {
            paths.extend(EXECUTABLE_NAMES.iter().map(|name| dir.join(name)));
        }
    }
    paths
}

/// First candidate that exists as a file.
pub fn locate_engine(explicit: Option<&Path>) -> Result<PathBuf, OpponentError> {
    let candidates = candidate_paths(explicit);
    for path in &candidates {
        if path.is_file() {
            debug!(path = %path.display(), "found engine executable");
            return Ok(path.clone());
        }
    }

    Err(OpponentError::NotFound(match explicit {
        Some(path) => path.display().to_string(),
        None => format!(
            "no stockfish among {} candidate locations; install it or pass --engine-path",
            candidates.len()
        ),
    }))
}

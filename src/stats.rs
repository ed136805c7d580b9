//! Win/loss counts for a session, persisted between runs.
//!
//! The file is plain `key: value` lines:
//!
//! ```text
//! last_played: 2026-10-19T09:30:00+00:00
//! won_in: 1 0 2 0 0 0
//! lost: 1
//! ```

use crate::MAX_GUESSES;
use crate::{debug_log, info_log};
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const STATS_FILE_NAME: &str = "stats.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    won_in: [u32; MAX_GUESSES],
    lost: u32,
    last_played: Option<DateTime<Utc>>,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a game won with `guesses` guesses (1-based).
    pub fn record_win(&mut self, guesses: usize) {
        if let Some(slot) = guesses.checked_sub(1).and_then(|i| self.won_in.get_mut(i)) {
            *slot += 1;
        } else {
            log::warn!("Ignoring win recorded with {guesses} guesses");
        }
    }

    pub fn record_loss(&mut self) {
        self.lost += 1;
    }

    #[must_use]
    pub const fn won_in(&self) -> &[u32; MAX_GUESSES] {
        &self.won_in
    }

    #[must_use]
    pub const fn lost(&self) -> u32 {
        self.lost
    }

    #[must_use]
    pub fn games_won(&self) -> u32 {
        self.won_in.iter().sum()
    }

    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_won() + self.lost
    }

    #[must_use]
    pub const fn last_played(&self) -> Option<DateTime<Utc>> {
        self.last_played
    }

    /// Parse the file format. Returns `None` for anything malformed.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        let mut stats = Self::default();
        let mut saw_won = false;
        let mut saw_lost = false;
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once(':')?;
            let value = value.trim();
            match key.trim() {
                "won_in" => {
                    let counts: Vec<u32> = value
                        .split_whitespace()
                        .map(str::parse::<u32>)
                        .collect::<Result<_, _>>()
                        .ok()?;
                    stats.won_in = counts.try_into().ok()?;
                    saw_won = true;
                }
                "lost" => {
                    stats.lost = value.parse().ok()?;
                    saw_lost = true;
                }
                "last_played" => {
                    stats.last_played = DateTime::parse_from_rfc3339(value)
                        .ok()
                        .map(|d| d.with_timezone(&Utc));
                }
                other => {
                    debug_log!("Ignoring unknown stats key '{}'", other);
                }
            }
        }
        (saw_won && saw_lost).then_some(stats)
    }

    #[must_use]
    pub fn to_file_contents(&self) -> String {
        let counts: Vec<String> = self.won_in.iter().map(u32::to_string).collect();
        let mut out = String::new();
        if let Some(when) = self.last_played {
            out.push_str(&format!("last_played: {}\n", when.to_rfc3339()));
        }
        out.push_str(&format!("won_in: {}\n", counts.join(" ")));
        out.push_str(&format!("lost: {}\n", self.lost));
        out
    }

    /// Load stats from `path`; a missing or malformed file gives fresh stats.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => Self::parse(&data).unwrap_or_else(|| {
                log::warn!("Malformed stats file {}, starting fresh", path.display());
                Self::default()
            }),
            Err(e) => {
                debug_log!("No stats loaded from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write stats to `path`, stamping the current time.
    ///
    /// # Errors
    /// Propagates any I/O error from creating the directory or writing the file.
    pub fn save(&mut self, path: &Path) -> io::Result<()> {
        self.last_played = Some(Utc::now());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_file_contents())?;
        info_log!("Saved stats to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games won in:")?;
        for (i, count) in self.won_in.iter().enumerate() {
            writeln!(f, "{} moves: {}", i + 1, count)?;
        }
        write!(f, "Games lost: {}", self.lost)
    }
}

#[must_use]
pub fn default_stats_path() -> Option<PathBuf> {
    crate::app_data_dir().map(|dir| dir.join(STATS_FILE_NAME))
}

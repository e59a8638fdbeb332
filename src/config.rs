use log::warn;
use std::env;

use crate::ledger::DEFAULT_DIFFICULTY;
use crate::pow::MAX_DIFFICULTY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: usize,
}

impl Config {
    /// Read `HOST`, `PORT` and `POW_DIFFICULTY` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080);
        let mut difficulty =
            parse_or("POW_DIFFICULTY", lookup("POW_DIFFICULTY"), DEFAULT_DIFFICULTY);
        if difficulty > MAX_DIFFICULTY {
            warn!("POW_DIFFICULTY={difficulty} exceeds {MAX_DIFFICULTY}, using default");
            difficulty = DEFAULT_DIFFICULTY;
        }
        Self {
            host,
            port,
            difficulty,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={v:?}, using default");
            default
        }),
    }
}

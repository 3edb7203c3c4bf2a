//! Severity level definitions
//!
//! Levels form a fixed, totally ordered set. `Off` carries the highest
//! ordinal and `All` the lowest, so "is this level enabled" is a single
//! integer comparison. `All` and `Off` are threshold values; events are
//! emitted at `Debug` through `Fatal`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Level {
    All = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Off = 6,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::All => "ALL",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Off => "OFF",
        }
    }

    /// Whether `self` is at least as severe as `other`.
    #[inline]
    pub fn is_at_least(&self, other: Level) -> bool {
        *self >= other
    }

    /// Parse a level name, falling back to `default` on unknown input.
    ///
    /// Matching is case-insensitive and accepts `WARNING` as an alias for
    /// `WARN`. This function never fails: configuration files are
    /// hand-edited, so unknown names degrade to the caller-supplied default
    /// instead of erroring.
    ///
    /// # Example
    ///
    /// ```
    /// use hierlog::Level;
    ///
    /// assert_eq!(Level::parse("warn", Level::Debug), Level::Warn);
    /// assert_eq!(Level::parse("no-such-level", Level::Debug), Level::Debug);
    /// ```
    #[must_use]
    pub fn parse(s: &str, default: Level) -> Level {
        s.parse().unwrap_or(default)
    }

    /// All well-known levels, from least to most severe.
    pub fn all_levels() -> &'static [Level] {
        &[
            Level::All,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Fatal,
            Level::Off,
        ]
    }

    #[inline]
    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(v: u8) -> Level {
        match v {
            0 => Level::All,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            5 => Level::Fatal,
            _ => Level::Off,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(Level::All),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            "OFF" => Ok(Level::Off),
            _ => Err(format!("Invalid level: '{}'", s)),
        }
    }
}

#[cfg(feature = "console")]
impl Level {
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::All | Level::Off => BrightBlack,
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::Fatal => BrightRed,
        }
    }
}

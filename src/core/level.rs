// steplog - core/level.rs
//
// Verbosity levels. Pure data, no I/O.
//
// A message is written when the level of the section it is emitted from is
// numerically at or below the logger's threshold.

use crate::util::error::LevelError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Ordered verbosity levels, from quietest to chattiest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize,
)]
#[serde(try_from = "RawLevel")]
pub enum VerbosityLevel {
    Silent = 0,
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
    Highest = 4,
}

/// Either form a level may be given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelValue<'a> {
    Ordinal(i64),
    Name(&'a str),
}

impl From<i64> for LevelValue<'_> {
    fn from(v: i64) -> Self {
        Self::Ordinal(v)
    }
}

impl From<i32> for LevelValue<'_> {
    fn from(v: i32) -> Self {
        Self::Ordinal(i64::from(v))
    }
}

impl From<u8> for LevelValue<'_> {
    fn from(v: u8) -> Self {
        Self::Ordinal(i64::from(v))
    }
}

impl<'a> From<&'a str> for LevelValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::Name(v)
    }
}

impl<'a> From<&'a String> for LevelValue<'a> {
    fn from(v: &'a String) -> Self {
        Self::Name(v.as_str())
    }
}

impl From<VerbosityLevel> for LevelValue<'_> {
    fn from(v: VerbosityLevel) -> Self {
        Self::Ordinal(i64::from(v.as_u8()))
    }
}

impl VerbosityLevel {
    /// Returns all levels in ascending order.
    pub fn all() -> &'static [VerbosityLevel] {
        &[
            Self::Silent,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::Highest,
        ]
    }

    /// Highest accepted ordinal.
    pub const MAX_ORDINAL: u8 = 4;

    /// Interpret an ordinal or a case-insensitive level name.
    pub fn from_value<'a>(value: impl Into<LevelValue<'a>>) -> Result<Self, LevelError> {
        match value.into() {
            LevelValue::Ordinal(v) => Self::try_from(v),
            LevelValue::Name(name) => name.parse(),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as accepted by `from_value`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Highest => "highest",
        }
    }

    /// True for every level except `Silent`.
    pub fn is_audible(self) -> bool {
        self > Self::Silent
    }
}

impl TryFrom<i64> for VerbosityLevel {
    type Error = LevelError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|l| i64::from(l.as_u8()) == v)
            .ok_or(LevelError::OutOfRange {
                value: v,
                max: Self::MAX_ORDINAL,
            })
    }
}

impl FromStr for VerbosityLevel {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|l| l.name() == lower)
            .ok_or_else(|| LevelError::UnknownName {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deserialisable shape: `level = 2` or `level = "medium"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Ordinal(i64),
    Name(String),
}

impl TryFrom<RawLevel> for VerbosityLevel {
    type Error = LevelError;

    fn try_from(raw: RawLevel) -> Result<Self, Self::Error> {
        match raw {
            RawLevel::Ordinal(v) => Self::try_from(v),
            RawLevel::Name(name) => name.parse(),
        }
    }
}

use std::{fmt, num::NonZeroU64};

use super::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    RoundRobin { quantum: NonZeroU64 },
}

impl Policy {
    /// Builds a round robin policy, rejecting a quantum of zero or less.
    pub fn round_robin(quantum: i64) -> Result<Self, ConfigError> {
        u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .map(|quantum| Self::RoundRobin { quantum })
            .ok_or(ConfigError::NonPositiveQuantum(quantum))
    }

    /// Resolves an algorithm tag. Accepts `FCFS`, `SJF`, `RR` in any case,
    /// and the short flags `-f`, `-s`, `-r`. `quantum` is only read for RR.
    pub fn from_tag(tag: &str, quantum: Option<i64>) -> Result<Self, ConfigError> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "FCFS" | "-F" => Ok(Self::Fcfs),
            "SJF" | "-S" => Ok(Self::Sjf),
            "RR" | "-R" => Self::round_robin(quantum.ok_or(ConfigError::MissingQuantum)?),
            _ => Err(ConfigError::UnknownPolicy(tag.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::RoundRobin { .. } => "RR",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin { .. })
    }
}

/// Parses a quantum given as decimal text. Range is checked by [`Policy::round_robin`].
pub fn parse_quantum(value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidQuantum(value.to_string()))
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "First Come First Served"),
            Self::Sjf => write!(f, "Shortest Job First"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin with quantum {quantum}"),
        }
    }
}

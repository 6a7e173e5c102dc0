use std::{fmt, io, path::PathBuf};

use crate::{core::Ticks, scheduler::DispatchError};

/// The run was asked for something that cannot be simulated. Nothing is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownPolicy(String),
    MissingQuantum,
    InvalidQuantum(String),
    NonPositiveQuantum(i64),
    EmptyJobList,
    TooManyJobs { limit: usize, got: usize },
    InvalidBurstRange { min: Ticks, max: Ticks },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPolicy(tag) => {
                write!(f, "unknown scheduling policy '{tag}' (expected FCFS, SJF or RR)")
            }
            Self::MissingQuantum => write!(f, "round robin requires a time quantum"),
            Self::InvalidQuantum(value) => write!(f, "invalid time quantum '{value}'"),
            Self::NonPositiveQuantum(q) => {
                write!(f, "time quantum must be positive, got {q}")
            }
            Self::EmptyJobList => write!(f, "no jobs to schedule"),
            Self::TooManyJobs { limit, got } => {
                write!(f, "{got} jobs exceed the configured limit of {limit}")
            }
            Self::InvalidBurstRange { min, max } => {
                write!(f, "invalid burst range {min}..={max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A job record that cannot be admitted to the job table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    MissingField { line: usize, field: &'static str },
    InvalidBurst { line: usize, value: String },
    ZeroBurst { name: String },
    DuplicateName { name: String },
    /// Adding this job's burst would push the total run time past `Ticks::MAX`.
    TotalBurstOverflow { name: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { line, field } => {
                write!(f, "line {line}: missing {field}")
            }
            Self::InvalidBurst { line, value } => {
                write!(f, "line {line}: invalid burst time '{value}'")
            }
            Self::ZeroBurst { name } => write!(f, "job {name} has a zero burst time"),
            Self::DuplicateName { name } => write!(f, "job name {name} appears more than once"),
            Self::TotalBurstOverflow { name } => {
                write!(f, "total burst time overflows at job {name}")
            }
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Input(InputError),
    Dispatch(DispatchError),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Input(err) => write!(f, "input error: {err}"),
            Self::Dispatch(err) => write!(f, "scheduling error: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Input(err) => Some(err),
            Self::Dispatch(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<DispatchError> for Error {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

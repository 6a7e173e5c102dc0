pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod job;
pub mod policy;
pub mod report;
pub mod trace;
pub mod workload;

pub use config::SimConfig;
pub use driver::{Outcome, Sim, run};
pub use error::{ConfigError, Error, InputError};
pub use job::{JobSpec, NAME_WIDTH};
pub use policy::Policy;
pub use report::{JobReport, Report};

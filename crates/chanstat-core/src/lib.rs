pub mod error;
pub mod params;
pub mod report;
pub mod runlog;

pub use error::{Error, Result};
pub use report::{FinishStatus, RunCounters};
pub use runlog::RunLog;

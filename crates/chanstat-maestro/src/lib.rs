mod client;
mod error;
mod types;

pub use client::MaestroClient;
pub use error::{Error, Result};
pub use types::{AlertType, Execution};

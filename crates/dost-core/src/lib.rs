pub mod config;
pub mod error;
pub mod types;

pub use config::DostConfig;
pub use error::{DostError, Result};
pub use types::*;

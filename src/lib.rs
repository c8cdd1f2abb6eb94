pub mod config;
pub mod display;
pub mod error;
pub mod income;
pub mod picker;

pub use config::Config;
pub use error::{PickstatError, Result};

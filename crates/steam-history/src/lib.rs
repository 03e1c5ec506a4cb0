pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod sync;

pub use error::{SteamError, Result};

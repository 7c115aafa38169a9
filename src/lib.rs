pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;
pub mod utils;
pub mod workout;

pub use error::{MaptyError, Result};

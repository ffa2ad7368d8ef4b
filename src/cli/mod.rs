pub mod check;
pub mod commands;
pub mod context;
pub mod progress;
pub mod quiz;
pub mod summarize;

pub use commands::{Cli, Commands};

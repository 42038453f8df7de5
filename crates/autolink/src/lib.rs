#![deny(clippy::all)]

pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod presenter;
pub mod targets;

pub use config::AutolinkConfig;
pub use error::CliError;
pub use handlers::HandlerResult;
pub use targets::LinkTarget;

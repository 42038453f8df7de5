#![deny(clippy::all)]

mod color;
mod telemetry;

pub use color::Colors;
pub use color::init as color_init;
pub use telemetry::LOG_FILE_ENV;
pub use telemetry::TelemetryGuard;
pub use telemetry::init_tracing;

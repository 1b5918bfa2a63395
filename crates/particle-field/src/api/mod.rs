pub mod color;
pub mod config;
pub mod host;
pub mod presets;

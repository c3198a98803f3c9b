//! Generator configuration module

pub mod defaults;
mod settings;

pub use settings::GenConfig;

//! CLI library for testing purposes

pub mod convert;
pub mod debug;
pub mod font;
pub mod validation;
pub mod view;

pub use font::{FontConfig, ToolPaths};

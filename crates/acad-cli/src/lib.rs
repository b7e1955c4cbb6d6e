//! Library components of the `acad` catalog inspection CLI.

pub mod catalog;
pub mod logging;
pub mod render;

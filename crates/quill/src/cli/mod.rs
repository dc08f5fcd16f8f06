//! Command-line interface module.

mod commands;
mod generate;
mod render;
mod serve;

pub use commands::{Cli, Commands};
pub use generate::generate;
pub use render::render_file;
pub use serve::serve;

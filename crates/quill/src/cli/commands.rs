//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quill - blog posts generated on demand
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Generate, render and serve LLM-written blog posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a post for a topic
    Generate {
        /// Topic to write about
        topic: String,

        /// Print text as it arrives
        #[arg(long)]
        stream: bool,

        /// Print the rendered HTML body instead of JSON
        #[arg(long)]
        html: bool,
    },

    /// Render a Markdown file to HTML on stdout
    Render {
        /// Path to the Markdown file
        path: PathBuf,
    },

    /// Serve posts over HTTP
    Serve {
        /// Address to listen on (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
}

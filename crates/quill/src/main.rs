//! Quill CLI binary.
//!
//! - Generate a post for a topic, in one round trip or streamed
//! - Render a Markdown file with syntax highlighting
//! - Serve posts over HTTP

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, generate, render_file, serve};

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    quill::init_tracing(cli.verbose)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    match cli.command {
        Commands::Generate { topic, stream, html } => {
            generate(&topic, stream, html).await?;
        }
        Commands::Render { path } => {
            render_file(&path)?;
        }
        Commands::Serve { host, port } => {
            serve(host, port).await?;
        }
    }

    Ok(())
}

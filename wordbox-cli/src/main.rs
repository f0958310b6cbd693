//! # wordbox CLI
//!
//! Command-line interface for the wordbox blog engine.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wordbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "wordbox.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new wordbox site
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Render a stored document to HTML
    Render {
        /// Content kind (post, topic, magazine, dictionary)
        kind: String,

        /// Document slug (file name without `.md`)
        slug: String,

        /// Emit JSON with metadata and headings
        #[arg(long)]
        json: bool,
    },

    /// List the public documents of a kind, or those carrying a tag
    List {
        /// Content kind (post, topic, magazine, dictionary)
        kind: String,

        /// Only documents with this exact tag, unlisted ones included
        #[arg(long)]
        tag: Option<String>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Render any markdown file with the site's cross-references
    RenderFile {
        /// Markdown file to render
        path: PathBuf,
    },

    /// Print the plain-text extraction of a markdown file
    Plain {
        /// Markdown file to read
        path: PathBuf,
    },

    /// Search posts, topics and magazines
    Search {
        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,

        /// Filter by document types (comma separated)
        #[arg(long, value_delimiter = ',')]
        types: Vec<String>,
    },

    /// Print the stylesheet for highlighted code
    Css {
        /// syntect theme name (defaults to the configured theme)
        #[arg(long)]
        theme: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Render { kind, slug, json } => {
            commands::render_document(&cli.config, &kind, &slug, json)
        }
        Commands::List { kind, tag, json } => {
            let opts = commands::ListOptions { tag, json };
            commands::list_documents(&cli.config, &kind, opts)
        }
        Commands::RenderFile { path } => commands::render_file(&cli.config, &path),
        Commands::Plain { path } => commands::plain_text(&path),
        Commands::Search {
            query,
            limit,
            json,
            types,
        } => {
            let opts = commands::SearchOptions { limit, json, types };
            commands::search_site(&cli.config, &query, opts)
        }
        Commands::Css { theme } => commands::print_stylesheet(&cli.config, theme.as_deref()),
    }
}

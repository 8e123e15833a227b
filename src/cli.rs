use crate::types::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docsearch")]
#[command(about = "Search generated documentation indexes", long_about = None)]
pub struct Cli {
    /// Documentation root holding `<version>/search_index.js` (overrides config)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search one snapshot for a case-insensitive substring
    Search {
        query: String,
        /// Snapshot version to search (e.g. dev, latest, v0.1.0)
        #[arg(short, long)]
        snapshot: Option<String>,
        /// Only show records of this category
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List discovered snapshots
    List,
    /// Serve the indexes as MCP tools over stdio
    Serve,
}

pub mod commands;

use clap::{Parser, Subcommand};

use crate::domain::Category;

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A terminal news reader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a page of top headlines
    Headlines {
        /// Filter by category
        #[arg(short, long)]
        category: Option<Category>,

        /// Two-letter country code (default from config)
        #[arg(long)]
        country: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search all indexed articles, newest first
    Search {
        /// Query text
        query: String,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Launch the TUI (default)
    Tui,
}

//! Argument parsing for the `shelf` binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Run and use the shelf book catalog",
    version,
    after_help = "Configuration is read from config/base.toml, config/<SHELF_ENV>.toml and SHELF_* variables"
)]
pub struct Cli {
    /// Server to talk to (default: client.base_url from settings)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Print every book
    List,

    /// Add a book
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        genre: String,
    },

    /// Change fields of a book; omitted fields are kept
    Edit {
        /// Book ID
        #[arg(long)]
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        genre: Option<String>,
    },

    /// Delete a book
    Delete {
        /// Book ID
        #[arg(long)]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

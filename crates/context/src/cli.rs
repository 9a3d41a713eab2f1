//! Command line definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docchat", version, about = "Ask questions about an extracted document")]
pub struct Cli {
    /// Configuration file (defaults to config/default plus APP__ environment overrides)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the context and pages retrieved for a question
    Context {
        /// Extracted text file, pages separated by form feeds
        #[arg(short, long)]
        document: PathBuf,

        /// Question to retrieve context for
        #[arg(short, long)]
        question: String,
    },

    /// Answer a question about a document
    Ask {
        /// Extracted text file, pages separated by form feeds
        #[arg(short, long)]
        document: PathBuf,

        /// Question to answer
        #[arg(short, long)]
        question: String,
    },
}

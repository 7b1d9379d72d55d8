use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedimage")]
#[command(about = "Featured images and media extensions for RSS/Atom feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the featured image of every entry
    Images {
        /// Feed file path or http(s) URL
        source: String,

        /// Skip inline images whose URL contains this text (repeatable)
        #[arg(long)]
        ignore: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every media thumbnail of every entry
    Thumbnails {
        /// Feed file path or http(s) URL
        source: String,
    },

    /// Show traffic and news items of a Google Trends feed
    Trends {
        /// Feed file path or http(s) URL
        source: String,
    },

    /// Print the first value of a tag such as media:title for every entry
    Tag {
        /// Feed file path or http(s) URL
        source: String,

        /// Tag name, optionally with a registered prefix
        name: String,
    },

    /// Extract the readable article content of one entry
    Readable {
        /// Feed file path or http(s) URL
        source: String,

        /// Zero-based entry index
        #[arg(long, default_value_t = 0)]
        entry: usize,

        /// Read the article HTML from this file instead of fetching the entry link
        #[arg(long)]
        html_file: Option<String>,
    },
}

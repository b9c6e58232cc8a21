use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ghostpad")]
#[command(version, about = "Short-lived text and code notes behind custom or random URLs")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new pad in the current directory
    Init {
        /// Do not create a local identity (notes cannot be reserved)
        #[arg(long)]
        anonymous: bool,
    },

    /// Create a new note
    New {
        /// Note title
        title: Option<String>,

        /// Body text
        #[arg(long)]
        text: Option<String>,

        /// Code snippet as "language=path" or just "path" (can be specified multiple times)
        #[arg(long = "snippet", short = 's', value_name = "LANG=FILE")]
        snippets: Vec<String>,

        /// Read already encoded note content from stdin
        #[arg(long, conflicts_with_all = ["title", "text", "snippets"])]
        stdin: bool,

        /// Custom url for the note
        #[arg(long)]
        url: Option<String>,

        /// Reserve the url so only you can edit the note
        #[arg(long)]
        reserve: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a note
    Show {
        /// Note url
        url: String,

        /// Output as JSON
        #[arg(long, conflicts_with = "raw")]
        json: bool,

        /// Print the stored content as is
        #[arg(long)]
        raw: bool,
    },

    /// Edit an existing note
    Edit {
        /// Note url
        url: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body text
        #[arg(long)]
        text: Option<String>,

        /// Append a code snippet as "language=path" or just "path"
        #[arg(long = "add-snippet", value_name = "LANG=FILE")]
        add_snippets: Vec<String>,

        /// Remove the snippet at this position (1-based)
        #[arg(long = "remove-snippet", value_name = "N")]
        remove_snippets: Vec<usize>,

        /// Replace the whole content with encoded content from stdin
        #[arg(long, conflicts_with_all = ["title", "text", "add_snippets", "remove_snippets"])]
        stdin: bool,
    },

    /// Check whether a custom url is free to claim
    Check {
        /// Url to check
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note url
        url: String,
    },

    /// Encode a JSON note from stdin into stored content
    Encode,

    /// Decode stored content from stdin into JSON
    Decode,

    /// List your reserved notes
    Reserved {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorite notes
    Favorite(FavoriteCommand),

    /// Remove expired notes
    Purge,
}

#[derive(Args, Debug)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    pub action: FavoriteAction,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteAction {
    /// Add a note to your favorites
    Add {
        /// Note url
        url: String,
    },

    /// Remove a note from your favorites
    Remove {
        /// Note url
        url: String,
    },

    /// List your favorites
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

use clap::{Parser, Subcommand};

/// Command-line interface definition for mealjournal
/// CLI application to keep a daily calorie journal with SQLite
#[derive(Parser)]
#[command(
    name = "mealjournal",
    version = env!("CARGO_PKG_VERSION"),
    about = "A meal journal CLI: estimate calories from a photo and track daily intake against a limit",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a meal to today's journal by hand
    Add {
        /// Meal name
        #[arg(long)]
        name: String,

        /// Calories of the portion
        #[arg(long, allow_hyphen_values = true)]
        kcal: String,

        /// Protein in grams
        #[arg(long)]
        protein: Option<u32>,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<u32>,

        /// Fat in grams
        #[arg(long)]
        fat: Option<u32>,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Additional details (portion, sides, cooking method...)
        #[arg(long)]
        details: Option<String>,
    },

    /// Analyze a meal photo and add the estimate to today's journal
    Scan {
        /// Path of the photo (jpg, png, webp, heic)
        image: String,

        /// Extra context passed to the analyzer and stored with the entry
        #[arg(long)]
        details: Option<String>,
    },

    /// Delete an entry of today's journal
    Del {
        /// Entry id (as shown by `list`)
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Show or set today's calorie limit
    Limit {
        /// New limit in kcal
        value: Option<u32>,
    },

    /// List the entries of a day
    List {
        /// Day to show (YYYY-MM-DD), default today
        #[arg(long)]
        day: Option<String>,

        /// Print the stored day as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the cumulative intake of a day
    Chart {
        /// Day to show (YYYY-MM-DD), default today
        #[arg(long)]
        day: Option<String>,
    },

    /// List every day stored in the journal
    Days {
        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },
}

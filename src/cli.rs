use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "companion")]
#[command(about = "A daily dashboard for todos, mood, quotes and focus", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the dashboard (default if no command given)
    Show,
    /// Add a todo
    Add {
        text: String,

        /// low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Estimated minutes
        #[arg(short, long)]
        estimate: Option<u32>,

        #[arg(short, long)]
        category: Option<String>,
    },
    /// Toggle a todo between done and not done (id or list position)
    Toggle { todo: String },
    /// Toggle a todo's in-progress flag (id or list position)
    Progress { todo: String },
    /// Delete a todo (id or list position)
    Delete { todo: String },
    /// Record how you feel
    Mood {
        /// happy, sad, excited, calm, stressed, motivated, tired, anxious, hopeful, focused
        mood: Option<String>,

        /// Free text; classified into a mood when no mood is given
        #[arg(short, long)]
        note: Option<String>,

        #[arg(short, long, default_value_t = 5)]
        intensity: u8,

        /// Classify the note with the configured AI companion
        #[arg(long)]
        ai: bool,
    },
    /// Show a new quote
    Quote {
        /// daily, random, or a category (motivational, productivity, wisdom, funny)
        #[arg(short, long, default_value = "daily")]
        selection: String,

        /// Ask the AI companion for a quote matching the current mood
        #[arg(long)]
        ai: bool,
    },
    /// Add or remove the current quote from favorites
    Favorite,
    /// Toggle night mode
    Night,
    /// Write a journal entry
    Journal {
        content: String,

        #[arg(short, long)]
        mood: Option<String>,

        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Run a focus session in the terminal
    Focus {
        /// 15, 25, 30, 45 or 60 (defaults to the configured length)
        #[arg(short, long)]
        minutes: Option<u32>,

        /// Todo to complete when the session finishes (id or list position)
        #[arg(short, long)]
        task: Option<String>,
    },
    /// Guided breathing exercise
    Breathe {
        /// 4-7-8, 4-4-4 or 6-2-6 (defaults to the configured pattern)
        #[arg(short, long)]
        pattern: Option<String>,

        #[arg(short, long, default_value_t = 3)]
        cycles: u32,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
    /// Run the local JSON API
    Serve {
        /// Port to run the server on (defaults to the configured port, 48373)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Show => "show",
            Commands::Add { .. } => "add",
            Commands::Toggle { .. } => "toggle",
            Commands::Progress { .. } => "progress",
            Commands::Delete { .. } => "delete",
            Commands::Mood { .. } => "mood",
            Commands::Quote { .. } => "quote",
            Commands::Favorite => "favorite",
            Commands::Night => "night",
            Commands::Journal { .. } => "journal",
            Commands::Focus { .. } => "focus",
            Commands::Breathe { .. } => "breathe",
            Commands::Config { .. } => "config",
            Commands::Serve { .. } => "serve",
        }
    }
}

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hydroflow", version, author, about = "A terminal hydration companion with weather-aware daily goals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup wizard (location, coordinates, activity, weather key)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Show today's intake, goal and weather
    Status,
    /// Log glasses of water for today
    Drink {
        /// Number of glasses
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },
    /// Reset today's count to zero
    Reset,
    /// Show how today's goal is calculated
    Goal {
        /// Preview the goal for another activity level (low, moderate, high)
        #[arg(long)]
        activity: Option<String>,
    },
    /// Show points and streak
    Stats {
        /// Show a chart of the last 7 days
        #[arg(long)]
        week: bool,
    },
    /// Run hydration reminders in the foreground until interrupted
    Remind,
    /// Export a weekly summary to stdout
    Export {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

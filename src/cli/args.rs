use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "streakwise", version, author, about = "Daily health-log streaks, week dots and heatmaps")]
pub struct Cli {
    /// Treat this day (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log activity for a module (login, food, exercise, medication, water, weight)
    Log {
        /// Module name
        module: String,
        /// How many entries to add
        #[arg(long, default_value = "1")]
        count: u32,
        /// Day to log (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Overwrite the day's count instead of adding to it
        #[arg(long)]
        set: bool,
    },
    /// Remove a day's entries for a module
    Unlog {
        /// Module name
        module: String,
        /// Day to clear (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Show current and best streak (all modules if none given)
    Streak {
        /// Module name
        module: Option<String>,
    },
    /// Show which of the last 7 days belong to the running streak
    Week {
        /// Module name
        module: String,
    },
    /// Show a weekly heatmap of logged activity
    Heatmap {
        /// Module name
        module: String,
        /// Number of weeks to show
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        weeks: Option<u32>,
    },
    /// One line per module
    Summary,
    /// Export every module's streak, week and heatmap to stdout
    Export {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show or initialise the config file
    Config {
        /// Write the default config if none exists
        #[arg(long)]
        init: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_weeks_must_be_positive() {
        assert!(Cli::try_parse_from(["streakwise", "heatmap", "food", "--weeks", "0"]).is_err());
        let cli = Cli::try_parse_from(["streakwise", "heatmap", "food", "--weeks", "3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Heatmap { weeks: Some(3), .. })));
    }
}

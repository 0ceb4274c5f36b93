//! Command-line interface definition using clap.

use std::path::PathBuf;

use buildinghub_core::config::{ConfigError, API_URL_ENV};
use buildinghub_core::Settings;
use buildinghub_models::Role;
use clap::{Parser, Subcommand, ValueEnum};

/// BuildingHub - apartment management in the terminal
#[derive(Parser, Debug)]
#[command(name = "buildinghub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend base URL
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Path to state directory
    #[arg(short, long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive TUI
    Tui {
        /// Sign in directly as this role
        #[arg(short, long, value_parser = parse_role)]
        role: Option<Role>,
    },

    /// List building rules
    Rules {
        /// Only this category (label or name, e.g. "giờ giấc" or hours)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text search
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List regulations with their full text
    Regulations {
        /// Only this category (label or name, e.g. "an ninh" or security)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text search
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List voluntary contribution campaigns
    Campaigns {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List lost-item announcements, newest first
    LostItems {
        /// Case-insensitive text search
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Fetch issues from the backend
    Issues {
        /// Only the most recent unprocessed issues
        #[arg(short, long)]
        urgent: bool,

        /// Only issues routed to the authority
        #[arg(short, long)]
        authority: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Fetch residents from the backend
    Residents {
        /// Filter by name, email or room
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a role's navigation menu
    Menu {
        /// Role (admin, resident, accountant, authority)
        #[arg(value_parser = parse_role)]
        role: Role,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse::<Role>().map_err(|e| e.to_string())
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Apply `--state-dir` and `--api-url` on top of `settings`.
    pub fn apply_overrides(&self, mut settings: Settings) -> Result<Settings, ConfigError> {
        if let Some(dir) = &self.state_dir {
            settings = settings.with_state_dir(dir);
        }
        if let Some(url) = &self.api_url {
            settings = settings.with_api_url(url)?;
        }
        Ok(settings)
    }

    /// Whether this invocation runs the interactive TUI.
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tui() {
        let cli = Cli::try_parse_from(["buildinghub"]).unwrap();
        assert!(cli.is_tui());
        assert_eq!(cli.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_tui_with_role() {
        let cli = Cli::try_parse_from(["buildinghub", "tui", "--role", "accounting"]).unwrap();
        match cli.command {
            Some(Commands::Tui { role }) => assert_eq!(role, Some(Role::Accountant)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rules_args() {
        let cli = Cli::try_parse_from([
            "buildinghub", "-vv", "rules", "--category", "hours", "-q", "giờ", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
        match cli.command {
            Some(Commands::Rules { category, search, format }) => {
                assert_eq!(category.as_deref(), Some("hours"));
                assert_eq!(search.as_deref(), Some("giờ"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_state_dir_flag_keeps_log_dir_from_env() {
        use buildinghub_core::config::{LOG_DIR_ENV, STATE_DIR_ENV};
        use std::path::Path;

        let env = Settings::from_lookup(|key| match key {
            k if k == STATE_DIR_ENV => Some("/tmp/bh-state".to_string()),
            k if k == LOG_DIR_ENV => Some("/tmp/bh-logs".to_string()),
            _ => None,
        })
        .unwrap();
        let cli = Cli::try_parse_from(["buildinghub", "--state-dir", "/tmp/bh-flag", "campaigns"])
            .unwrap();
        let settings = cli.apply_overrides(env).unwrap();
        assert_eq!(settings.state_dir, Path::new("/tmp/bh-flag"));
        assert_eq!(settings.logs_dir, Path::new("/tmp/bh-logs"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(Cli::try_parse_from(["buildinghub", "menu", "janitor"]).is_err());
    }
}

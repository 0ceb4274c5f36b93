//! BuildingHub Core - presentation logic shared by the CLI and the TUI.
//!
//! - **config**: State directory, environment variables and runtime settings
//! - **filter**: Category and search filtering for list views
//! - **format**: Currency, relative time and progress formatting
//! - **forms**: Login, sign-up, password reset and profile editing state
//! - **navigation**: Role-scoped sidebar shell
//! - **notifications**: Transient notices
//! - **text_block**: Structured rendering of regulation text

pub mod config;
pub mod filter;
pub mod format;
pub mod forms;
pub mod navigation;
pub mod notifications;
pub mod text_block;

pub use config::{load_env_files, state_dir, ConfigError, Settings};
pub use filter::{
    authority_issues, newest_first, urgent_issues, CategoryFilter, Categorized, ListFilter,
    RuleStats, SearchTerm, Searchable, Visible, URGENT_LIMIT,
};
pub use format::{format_date, format_vnd, progress_bar, relative_time};
pub use forms::{
    FormError, ForgotPasswordForm, LoginFocus, LoginForm, ProfileEditor, SignupFocus, SignupForm,
    TextField,
};
pub use navigation::{NavigationShell, ShellEvents, ShellOutcome};
pub use notifications::{Notice, NoticeLevel, Notices};
pub use text_block::{render_text_block, to_plain_text, TextBlocks, TextNode};

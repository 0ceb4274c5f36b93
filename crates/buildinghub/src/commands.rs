//! One-shot CLI commands.

use std::fmt::Write as _;

use buildinghub_client::{ApiClient, ClientError};
use buildinghub_core::filter::{self, empty, ListFilter, SearchTerm, Visible, URGENT_LIMIT};
use buildinghub_core::{format_vnd, progress_bar, relative_time, render_text_block, to_plain_text};
use buildinghub_core::{ConfigError, Settings};
use buildinghub_models::{
    Campaign, Issue, LostItemReport, Regulation, RegulationCategory, Resident, Role, RoleMenu,
    Rule, RuleCategory, CAMPAIGNS, LOST_ITEM_REPORTS, REGULATIONS, RULES,
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::cli::{Commands, OutputFormat};

/// Errors from CLI commands.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("backend error: {0}")]
    Client(#[from] ClientError),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Execute a non-interactive command and print its output.
pub fn execute(cmd: Commands, settings: &Settings) -> Result<()> {
    let output = match cmd {
        Commands::Rules { category, search, format } => {
            let mut filter = ListFilter::new();
            if let Some(c) = category {
                let parsed = RuleCategory::parse(&c).ok_or(CommandError::UnknownCategory(c))?;
                filter = filter.with_category(parsed);
            }
            if let Some(s) = search {
                filter = filter.with_search(s);
            }
            render_list(&filter.apply(RULES), format, empty::RULES, rules_table)?
        }
        Commands::Regulations { category, search, format } => {
            let mut filter = ListFilter::new();
            if let Some(c) = category {
                let parsed =
                    RegulationCategory::parse(&c).ok_or(CommandError::UnknownCategory(c))?;
                filter = filter.with_category(parsed);
            }
            if let Some(s) = search {
                filter = filter.with_search(s);
            }
            render_list(&filter.apply(REGULATIONS), format, empty::REGULATIONS, regulations_text)?
        }
        Commands::Campaigns { format } => {
            let all: Vec<&Campaign> = CAMPAIGNS.iter().collect();
            render_list(&all, format, empty::CAMPAIGNS, campaigns_table)?
        }
        Commands::LostItems { search, format } => {
            let sorted = filter::newest_first(LOST_ITEM_REPORTS);
            let term = SearchTerm::new(search.unwrap_or_default());
            render_list(&term.apply(&sorted), format, empty::LOST_ITEMS, lost_items_table)?
        }
        Commands::Issues { urgent, authority, format } => {
            let mut issues = block_on_client(settings, |client| async move {
                client.fetch_issues().await
            })?;
            if authority {
                issues = filter::authority_issues(issues);
            }
            let visible: Vec<&Issue> = if urgent {
                filter::urgent_issues(&issues, URGENT_LIMIT)
            } else {
                issues.iter().collect()
            };
            render_list(&visible, format, empty::ISSUES, issues_table)?
        }
        Commands::Residents { search, format } => {
            let residents = block_on_client(settings, |client| async move {
                client.fetch_residents().await
            })?;
            let term = SearchTerm::new(search.unwrap_or_default());
            render_list(&term.apply(&residents), format, empty::RESIDENTS, residents_table)?
        }
        Commands::Menu { role, format } => menu_output(role, format)?,
        // Started from main before reaching here.
        Commands::Tui { .. } => return Ok(()),
    };

    print!("{}", output);
    Ok(())
}

/// Run one backend request on a short-lived runtime.
fn block_on_client<T, F, Fut>(settings: &Settings, request: F) -> Result<T>
where
    F: FnOnce(ApiClient) -> Fut,
    Fut: std::future::Future<Output = buildinghub_client::Result<T>>,
{
    let client = ApiClient::new(settings.api_url.clone(), settings.timeout)?;
    info!(api_url = %settings.api_url, "Contacting backend");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(request(client))?)
}

fn render_list<T: Serialize>(
    items: &[&T],
    format: OutputFormat,
    empty_message: &'static str,
    table: fn(&[&T]) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(items)?)),
        OutputFormat::Table => Ok(match Visible::new(items.to_vec(), empty_message) {
            Visible::Empty { message } => format!("{}\n", message),
            Visible::Items(items) => table(&items),
        }),
    }
}

fn rules_table(rules: &[&Rule]) -> String {
    let mut out = String::new();
    let owned: Vec<Rule> = rules.iter().map(|r| **r).collect();
    let stats = filter::RuleStats::from_rules(&owned);
    let _ = writeln!(
        out,
        "{} quy định, {} về an toàn, {} danh mục\n",
        stats.total, stats.safety, stats.categories
    );
    for rule in rules {
        let _ = writeln!(out, "[{}] {}", rule.category.label(), rule.title);
        let _ = writeln!(out, "    {}", rule.description);
    }
    out
}

fn regulations_text(regulations: &[&Regulation]) -> String {
    let mut out = String::new();
    for (i, regulation) in regulations.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "== {} [{} | {} | cập nhật {}]",
            regulation.title,
            regulation.category.label(),
            regulation.priority.label(),
            regulation.last_updated
        );
        out.push_str(&to_plain_text(render_text_block(regulation.content)));
    }
    out
}

fn campaigns_table(campaigns: &[&Campaign]) -> String {
    let mut out = String::new();
    for campaign in campaigns {
        let pct = campaign.progress_percent();
        let _ = writeln!(out, "{} ({})", campaign.title, campaign.status.label());
        let _ = writeln!(
            out,
            "    {} {:>3}%  {} / {}  {} người tham gia",
            progress_bar(pct, 20),
            pct,
            format_vnd(campaign.total_raised),
            format_vnd(campaign.goal),
            campaign.participants
        );
    }
    out
}

fn lost_items_table(reports: &[&LostItemReport]) -> String {
    let now = Utc::now();
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(
            out,
            "{:<16} {:<28} {}",
            report.status.label(),
            report.title,
            relative_time(report.created_at(), now)
        );
        let _ = writeln!(out, "    {} (ngày {})", report.message, report.event_date);
    }
    out
}

fn issues_table(issues: &[&Issue]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:<12} {:<18} TIÊU ĐỀ", "ID", "TRẠNG THÁI", "LOẠI");
    for issue in issues {
        let _ = writeln!(
            out,
            "{:>5}  {:<12} {:<18} {}",
            issue.id,
            issue.status.label(),
            issue.kind.label(),
            issue.title
        );
    }
    out
}

fn residents_table(residents: &[&Resident]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<6} {:<28} {:<28} ĐIỆN THOẠI", "PHÒNG", "HỌ TÊN", "EMAIL");
    for resident in residents {
        let _ = writeln!(
            out,
            "{:<6} {:<28} {:<28} {}",
            resident.room_number, resident.full_name, resident.email, resident.phone_number
        );
    }
    out
}

fn menu_output(role: Role, format: OutputFormat) -> Result<String> {
    let menu = RoleMenu::for_role(role);
    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(menu)?));
    }
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", role.label(), role);
    for (name, group) in [("primary", menu.primary), ("secondary", menu.secondary)] {
        let _ = writeln!(out, "  {}:", name);
        for item in group {
            let target = match (item.route(), item.action()) {
                (Some(route), _) => route.path().to_string(),
                (None, Some(action)) => format!("<{}>", action.tag()),
                (None, None) => format!("#{}", item.id),
            };
            let _ = writeln!(out, "    {} {:<24} {}", item.icon.glyph(), item.label, target);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildinghub_models::{IssueKind, IssueStatus};

    #[test]
    fn test_rules_table_lists_each_rule() {
        let rules: Vec<&Rule> = RULES.iter().collect();
        let out = rules_table(&rules);
        for rule in RULES {
            assert!(out.contains(rule.title));
        }
        assert!(out.starts_with(&format!("{} quy định", RULES.len())));
    }

    #[test]
    fn test_regulations_render_bullets() {
        let regs: Vec<&Regulation> = REGULATIONS.iter().take(1).collect();
        let out = regulations_text(&regs);
        assert!(out.starts_with("== "));
        assert!(out.contains("  \u{2022} "));
    }

    #[test]
    fn test_empty_table_shows_message() {
        let none: Vec<&Rule> = Vec::new();
        let out = render_list(&none, OutputFormat::Table, empty::RULES, rules_table).unwrap();
        assert_eq!(out, format!("{}\n", empty::RULES));
    }

    #[test]
    fn test_json_output_is_an_array() {
        let campaigns: Vec<&Campaign> = CAMPAIGNS.iter().collect();
        let out = render_list(&campaigns, OutputFormat::Json, empty::CAMPAIGNS, campaigns_table)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), CAMPAIGNS.len());
    }

    #[test]
    fn test_campaigns_table_formats_vnd() {
        let campaigns: Vec<&Campaign> = CAMPAIGNS.iter().collect();
        let out = campaigns_table(&campaigns);
        assert!(out.contains("50.000.000 ₫ / 100.000.000 ₫"));
        assert!(out.contains(" 50%"));
    }

    #[test]
    fn test_issues_table() {
        let issue = Issue::new(5, IssueKind::Authority, IssueStatus::Unprocessed, "Mất xe đạp");
        let out = issues_table(&[&issue]);
        assert!(out.contains("Mất xe đạp"));
        assert!(out.contains(IssueStatus::Unprocessed.label()));
    }

    #[test]
    fn test_menu_output_shows_logout_action() {
        let out = menu_output(Role::Resident, OutputFormat::Table).unwrap();
        assert!(out.contains("/resident/rules"));
        assert!(out.contains("<logout>"));

        let json = menu_output(Role::Accountant, OutputFormat::Json).unwrap();
        assert!(json.contains("debt-management"));
    }
}

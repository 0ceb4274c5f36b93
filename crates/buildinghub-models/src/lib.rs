//! Core data models for BuildingHub.
//!
//! This crate provides the data types shared by every BuildingHub interface:
//! roles and their navigation menus, the static regulation/rule/campaign
//! catalogs, and the records fetched from the backend (issues, residents).

pub mod campaign;
pub mod issue;
pub mod lost_item;
pub mod menu;
pub mod profile;
pub mod regulation;
pub mod resident;
pub mod role;
pub mod rule;

// Re-export main types
pub use campaign::{Campaign, CampaignStatus, CAMPAIGNS};
pub use issue::{Issue, IssueKind, IssueStatus};
pub use lost_item::{LostItemReport, LostItemStatus, LOST_ITEM_REPORTS};
pub use menu::{AccountingTab, Activation, Icon, MenuAction, MenuItem, MenuTarget, Route, RoleMenu};
pub use profile::{Profile, ProfileField};
pub use regulation::{Priority, Regulation, RegulationCategory, REGULATIONS};
pub use resident::Resident;
pub use role::Role;
pub use rule::{Rule, RuleCategory, RuleIcon, RULES};

//! Role navigation menus.
//!
//! Each role has a static [`RoleMenu`] with two ordered groups of
//! [`MenuItem`]s: the primary navigation entries and the secondary
//! (settings/profile/logout) entries shown at the bottom of the panel.

use serde::Serialize;
use std::fmt;

use crate::role::Role;

/// An absolute, path-based route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    AdminDashboard,
    AdminResidents,
    AdminApartments,
    AdminBills,
    AdminServices,
    AdminNotifications,
    AdminRecommendations,
    AdminContributions,
    AdminSettings,
    AdminProfile,
    ResidentDashboard,
    ResidentAnnouncements,
    ResidentInvoice,
    ResidentRules,
    ResidentInformation,
    ResidentSettings,
    ResidentProfile,
    AuthorityDashboard,
    AuthorityResidents,
    AuthorityAnnouncements,
    Settings,
    Profile,
}

impl Route {
    /// Every known route.
    pub const ALL: [Route; 22] = [
        Route::AdminDashboard,
        Route::AdminResidents,
        Route::AdminApartments,
        Route::AdminBills,
        Route::AdminServices,
        Route::AdminNotifications,
        Route::AdminRecommendations,
        Route::AdminContributions,
        Route::AdminSettings,
        Route::AdminProfile,
        Route::ResidentDashboard,
        Route::ResidentAnnouncements,
        Route::ResidentInvoice,
        Route::ResidentRules,
        Route::ResidentInformation,
        Route::ResidentSettings,
        Route::ResidentProfile,
        Route::AuthorityDashboard,
        Route::AuthorityResidents,
        Route::AuthorityAnnouncements,
        Route::Settings,
        Route::Profile,
    ];

    /// The route's path.
    pub fn path(self) -> &'static str {
        match self {
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminResidents => "/admin/residents",
            Route::AdminApartments => "/admin/apartments",
            Route::AdminBills => "/admin/bills",
            Route::AdminServices => "/admin/services",
            Route::AdminNotifications => "/admin/notifications",
            Route::AdminRecommendations => "/admin/recommendations",
            Route::AdminContributions => "/admin/contributions",
            Route::AdminSettings => "/admin/settings",
            Route::AdminProfile => "/admin/profile",
            Route::ResidentDashboard => "/resident/dashboard",
            Route::ResidentAnnouncements => "/resident/announcements",
            Route::ResidentInvoice => "/resident/invoice",
            Route::ResidentRules => "/resident/rules",
            Route::ResidentInformation => "/resident/information",
            Route::ResidentSettings => "/resident/settings",
            Route::ResidentProfile => "/resident/profile",
            Route::AuthorityDashboard => "/authority-dashboard",
            Route::AuthorityResidents => "/authority-residents",
            Route::AuthorityAnnouncements => "/authority-announcements",
            Route::Settings => "/settings",
            Route::Profile => "/profile",
        }
    }

    /// Look up a route by exact path.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Tabs of the accountant shell, which switches views by tab id rather
/// than by route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccountingTab {
    Dashboard,
    DebtManagement,
    InvoiceCreation,
    Settings,
    Profile,
}

impl AccountingTab {
    /// Tab identifier.
    pub fn id(self) -> &'static str {
        match self {
            AccountingTab::Dashboard => "accounting-dashboard",
            AccountingTab::DebtManagement => "debt-management",
            AccountingTab::InvoiceCreation => "invoice-creation",
            AccountingTab::Settings => "settings",
            AccountingTab::Profile => "profile",
        }
    }
}

/// Icon shown next to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Dashboard,
    Users,
    Building,
    Receipt,
    Wrench,
    Bell,
    Lightbulb,
    FileText,
    Info,
    Heart,
    CreditCard,
    PlusCircle,
    Settings,
    User,
    LogOut,
}

impl Icon {
    /// Single-cell glyph used by the terminal UI.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Dashboard => "\u{25A6}",  // ▦
            Icon::Users => "\u{263A}",      // ☺
            Icon::Building => "\u{2302}",   // ⌂
            Icon::Receipt => "\u{2630}",    // ☰
            Icon::Wrench => "\u{2692}",     // ⚒
            Icon::Bell => "\u{266A}",       // ♪
            Icon::Lightbulb => "\u{2600}",  // ☀
            Icon::FileText => "\u{2637}",   // ☷
            Icon::Info => "\u{2139}",       // ℹ
            Icon::Heart => "\u{2665}",      // ♥
            Icon::CreditCard => "\u{25AD}", // ▭
            Icon::PlusCircle => "\u{2295}", // ⊕
            Icon::Settings => "\u{2699}",   // ⚙
            Icon::User => "\u{263B}",       // ☻
            Icon::LogOut => "\u{21E6}",     // ⇦
        }
    }
}

/// Non-navigation actions a menu entry can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Logout,
}

impl MenuAction {
    /// Action tag.
    pub fn tag(self) -> &'static str {
        match self {
            MenuAction::Logout => "logout",
        }
    }
}

/// What activating a menu entry does.
///
/// An entry either navigates (by route or by tab) or triggers an action,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MenuTarget {
    Path(Route),
    Tab(AccountingTab),
    Action(MenuAction),
}

/// A single navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: Icon,
    pub target: MenuTarget,
}

impl MenuItem {
    const fn path(id: &'static str, label: &'static str, icon: Icon, route: Route) -> Self {
        Self {
            id,
            label,
            icon,
            target: MenuTarget::Path(route),
        }
    }

    const fn tab(id: &'static str, label: &'static str, icon: Icon, tab: AccountingTab) -> Self {
        Self {
            id,
            label,
            icon,
            target: MenuTarget::Tab(tab),
        }
    }

    const fn logout(label: &'static str) -> Self {
        Self {
            id: "logout",
            label,
            icon: Icon::LogOut,
            target: MenuTarget::Action(MenuAction::Logout),
        }
    }

    /// The navigation path, if this entry navigates by route.
    pub fn route(&self) -> Option<Route> {
        match self.target {
            MenuTarget::Path(route) => Some(route),
            _ => None,
        }
    }

    /// The action, if this entry triggers one.
    pub fn action(&self) -> Option<MenuAction> {
        match self.target {
            MenuTarget::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Whether this is the logout entry.
    pub fn is_logout(&self) -> bool {
        self.action() == Some(MenuAction::Logout)
    }
}

/// How a shell decides which entry is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// The entry whose path matches the current route.
    Route,
    /// The entry whose id equals the active tab.
    Tab,
}

/// The navigation model for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMenu {
    pub role: Role,
    pub primary: &'static [MenuItem],
    pub secondary: &'static [MenuItem],
    pub activation: Activation,
}

impl RoleMenu {
    /// The static menu for a role.
    pub fn for_role(role: Role) -> &'static RoleMenu {
        match role {
            Role::Admin => &ADMIN_MENU,
            Role::Resident => &RESIDENT_MENU,
            Role::Accountant => &ACCOUNTING_MENU,
            Role::Authority => &AUTHORITY_MENU,
        }
    }

    /// All entries, primary group first.
    pub fn items(&self) -> impl Iterator<Item = &'static MenuItem> {
        self.primary.iter().chain(self.secondary.iter())
    }

    /// Find an entry by id.
    pub fn find(&self, id: &str) -> Option<&'static MenuItem> {
        self.items().find(|item| item.id == id)
    }

    /// Where the role lands after signing in: the first primary entry.
    pub fn home(&self) -> MenuTarget {
        self.primary[0].target
    }
}

static ADMIN_MENU: RoleMenu = RoleMenu {
    role: Role::Admin,
    primary: &[
        MenuItem::path("dashboard", "Dashboard", Icon::Dashboard, Route::AdminDashboard),
        MenuItem::path("residents", "Residents", Icon::Users, Route::AdminResidents),
        MenuItem::path("apartments", "Apartments", Icon::Building, Route::AdminApartments),
        MenuItem::path("bills", "Bills", Icon::Receipt, Route::AdminBills),
        MenuItem::path("services", "Services", Icon::Wrench, Route::AdminServices),
        MenuItem::path("notifications", "Notifications", Icon::Bell, Route::AdminNotifications),
        MenuItem::path(
            "recommendations",
            "Recommendations",
            Icon::Lightbulb,
            Route::AdminRecommendations,
        ),
        MenuItem::path("contributions", "Contributions", Icon::Heart, Route::AdminContributions),
    ],
    secondary: &[
        MenuItem::path("settings", "Settings", Icon::Settings, Route::AdminSettings),
        MenuItem::path("profile", "Profile", Icon::User, Route::AdminProfile),
        MenuItem::logout("Logout"),
    ],
    activation: Activation::Route,
};

static RESIDENT_MENU: RoleMenu = RoleMenu {
    role: Role::Resident,
    primary: &[
        MenuItem::path("dashboard", "Quản lý căn hộ", Icon::Dashboard, Route::ResidentDashboard),
        MenuItem::path("announcements", "Thông báo", Icon::Bell, Route::ResidentAnnouncements),
        MenuItem::path("invoice", "Hóa đơn", Icon::Receipt, Route::ResidentInvoice),
        MenuItem::path("rules", "Nội quy", Icon::FileText, Route::ResidentRules),
        MenuItem::path("information", "Tra cứu thông tin", Icon::Info, Route::ResidentInformation),
    ],
    secondary: &[
        MenuItem::path("settings", "Cài đặt", Icon::Settings, Route::ResidentSettings),
        MenuItem::path("profile", "Hồ sơ", Icon::User, Route::ResidentProfile),
        MenuItem::logout("Đăng xuất"),
    ],
    activation: Activation::Route,
};

static ACCOUNTING_MENU: RoleMenu = RoleMenu {
    role: Role::Accountant,
    primary: &[
        MenuItem::tab(
            "accounting-dashboard",
            "Dashboard",
            Icon::Dashboard,
            AccountingTab::Dashboard,
        ),
        MenuItem::tab(
            "debt-management",
            "Quản Lý Công Nợ",
            Icon::CreditCard,
            AccountingTab::DebtManagement,
        ),
        MenuItem::tab(
            "invoice-creation",
            "Tạo Hóa Đơn",
            Icon::PlusCircle,
            AccountingTab::InvoiceCreation,
        ),
    ],
    secondary: &[
        MenuItem::tab("settings", "Cài Đặt", Icon::Settings, AccountingTab::Settings),
        MenuItem::tab("profile", "Hồ Sơ", Icon::User, AccountingTab::Profile),
        MenuItem::logout("Đăng Xuất"),
    ],
    activation: Activation::Tab,
};

static AUTHORITY_MENU: RoleMenu = RoleMenu {
    role: Role::Authority,
    primary: &[
        MenuItem::path("dashboard", "Dashboard", Icon::Dashboard, Route::AuthorityDashboard),
        MenuItem::path("residents", "Quản Lý Cư Dân", Icon::Users, Route::AuthorityResidents),
        MenuItem::path(
            "announcements",
            "Thông Báo Mất Đồ",
            Icon::Bell,
            Route::AuthorityAnnouncements,
        ),
    ],
    secondary: &[
        MenuItem::path("settings", "Cài Đặt", Icon::Settings, Route::Settings),
        MenuItem::path("profile", "Hồ Sơ", Icon::User, Route::Profile),
        MenuItem::logout("Đăng Xuất"),
    ],
    activation: Activation::Route,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_role_has_exactly_one_logout() {
        for role in Role::ALL {
            let menu = RoleMenu::for_role(role);
            let logouts = menu.items().filter(|i| i.is_logout()).count();
            assert_eq!(logouts, 1, "role {}", role);
            assert!(menu.secondary.last().unwrap().is_logout());
        }
    }

    #[test]
    fn test_item_ids_unique_per_role() {
        for role in Role::ALL {
            let menu = RoleMenu::for_role(role);
            let ids: HashSet<_> = menu.items().map(|i| i.id).collect();
            assert_eq!(ids.len(), menu.items().count(), "role {}", role);
        }
    }

    #[test]
    fn test_target_is_path_or_action_not_both() {
        for role in Role::ALL {
            for item in RoleMenu::for_role(role).items() {
                if item.action().is_some() {
                    assert!(item.route().is_none());
                } else {
                    assert!(item.route().is_some() || matches!(item.target, MenuTarget::Tab(_)));
                }
            }
        }
    }

    #[test]
    fn test_tab_ids_match_item_ids() {
        let menu = RoleMenu::for_role(Role::Accountant);
        assert_eq!(menu.activation, Activation::Tab);
        for item in menu.items() {
            if let MenuTarget::Tab(tab) = item.target {
                assert_eq!(tab.id(), item.id);
            }
        }
    }

    #[test]
    fn test_route_path_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_role_paths_are_prefixed() {
        for item in RoleMenu::for_role(Role::Admin).items() {
            if let Some(route) = item.route() {
                assert!(route.path().starts_with("/admin/"));
            }
        }
        for item in RoleMenu::for_role(Role::Resident).items() {
            if let Some(route) = item.route() {
                assert!(route.path().starts_with("/resident/"));
            }
        }
    }

    #[test]
    fn test_home_is_first_primary() {
        assert_eq!(RoleMenu::for_role(Role::Admin).home(), MenuTarget::Path(Route::AdminDashboard));
        assert_eq!(
            RoleMenu::for_role(Role::Accountant).home(),
            MenuTarget::Tab(AccountingTab::Dashboard)
        );
    }
}

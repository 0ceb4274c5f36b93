//! Role-scoped navigation shell.
//!
//! The shell is the sidebar for one role: a backdrop, a primary group of
//! destinations and a secondary group holding settings, profile and logout.
//! It does not own routing. The current location is passed in by the caller
//! and every activation is reported through [`ShellEvents`].

use buildinghub_models::{Activation, MenuItem, MenuTarget, Role, RoleMenu, Route};
use tracing::debug;

/// Callbacks fired by the shell.
pub trait ShellEvents {
    /// The shell should close.
    fn on_close(&mut self);
    /// The user chose to sign out.
    fn on_logout(&mut self);
    /// The user chose a destination.
    fn on_navigate(&mut self, target: &MenuTarget);
}

/// Result of a click on the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOutcome {
    /// The shell is closed, so the click did nothing.
    Ignored,
    /// The backdrop was clicked.
    Closed,
    Navigated(MenuTarget),
    LoggedOut,
}

/// The sidebar for one role.
#[derive(Debug, Clone)]
pub struct NavigationShell {
    menu: &'static RoleMenu,
    open: bool,
    /// Keyboard cursor into [`RoleMenu::items`].
    cursor: usize,
}

impl NavigationShell {
    /// Creates a closed shell for `role`.
    pub fn new(role: Role) -> Self {
        Self {
            menu: RoleMenu::for_role(role),
            open: false,
            cursor: 0,
        }
    }

    pub fn menu(&self) -> &'static RoleMenu {
        self.menu
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// The item groups drawn while open; nothing while closed.
    pub fn visible_groups(&self) -> Vec<&'static [MenuItem]> {
        if self.open {
            vec![self.menu.primary, self.menu.secondary]
        } else {
            Vec::new()
        }
    }

    /// The item marked active for the current location.
    ///
    /// Route-activated menus match on path segments and prefer the longest
    /// matching path; tab-activated menus match the tab exactly.
    pub fn active_item(&self, current: &MenuTarget) -> Option<&'static MenuItem> {
        match (self.menu.activation, current) {
            (Activation::Route, MenuTarget::Path(route)) => self
                .menu
                .items()
                .filter_map(|item| item.route().map(|r| (item, r)))
                .filter(|(_, candidate)| route_matches(*candidate, *route))
                .max_by_key(|(_, candidate)| candidate.path().len())
                .map(|(item, _)| item),
            (Activation::Tab, MenuTarget::Tab(tab)) => self
                .menu
                .items()
                .find(|item| item.target == MenuTarget::Tab(*tab)),
            _ => None,
        }
    }

    /// Click on the backdrop outside the panel.
    pub fn click_backdrop<E: ShellEvents>(&mut self, events: &mut E) -> ShellOutcome {
        if !self.open {
            return ShellOutcome::Ignored;
        }
        events.on_close();
        ShellOutcome::Closed
    }

    /// Click on the item with `id`.
    pub fn click_item<E: ShellEvents>(&mut self, id: &str, events: &mut E) -> ShellOutcome {
        if !self.open {
            return ShellOutcome::Ignored;
        }
        match self.menu.find(id) {
            Some(item) => self.activate(item, events),
            None => ShellOutcome::Ignored,
        }
    }

    /// Item under the keyboard cursor.
    pub fn selected(&self) -> Option<&'static MenuItem> {
        self.menu.items().nth(self.cursor)
    }

    pub fn select_next(&mut self) {
        let count = self.menu.items().count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.menu.items().count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Move the cursor onto the item active for `current`.
    pub fn select_active(&mut self, current: &MenuTarget) {
        if let Some(active) = self.active_item(current) {
            if let Some(index) = self.menu.items().position(|item| item.id == active.id) {
                self.cursor = index;
            }
        }
    }

    /// Click on the item under the keyboard cursor.
    pub fn activate_selected<E: ShellEvents>(&mut self, events: &mut E) -> ShellOutcome {
        if !self.open {
            return ShellOutcome::Ignored;
        }
        match self.selected() {
            Some(item) => self.activate(item, events),
            None => ShellOutcome::Ignored,
        }
    }

    fn activate<E: ShellEvents>(
        &mut self,
        item: &'static MenuItem,
        events: &mut E,
    ) -> ShellOutcome {
        debug!(role = %self.menu.role, item = item.id, "Menu item activated");
        if item.is_logout() {
            events.on_logout();
            events.on_close();
            return ShellOutcome::LoggedOut;
        }
        events.on_navigate(&item.target);
        events.on_close();
        ShellOutcome::Navigated(item.target)
    }
}

/// `current` equals `candidate` or sits below it on a segment boundary.
fn route_matches(candidate: Route, current: Route) -> bool {
    let base = candidate.path();
    let path = current.path();
    path == base || (path.starts_with(base) && path[base.len()..].starts_with('/'))
}

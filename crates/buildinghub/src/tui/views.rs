//! Per-page state for the signed-in shell.
//!
//! Each page owns its filter state and any backend fetches. A page is
//! replaced on navigation; dropping it aborts whatever it still had in
//! flight.

use std::future::Future;

use buildinghub_client::{ApiClient, ClientError, FetchPoll, ViewFetch};
use buildinghub_core::filter::{self, CategoryFilter, ListFilter, SearchTerm, URGENT_LIMIT};
use buildinghub_core::{Notices, ProfileEditor};
use buildinghub_models::{
    AccountingTab, Campaign, Issue, LostItemReport, MenuTarget, Profile, Regulation,
    RegulationCategory, Resident, Role, RoleMenu, Route, Rule, RuleCategory, CAMPAIGNS,
    LOST_ITEM_REPORTS, REGULATIONS, RULES,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Handle;
use tracing::warn;

/// Backend access for pages that load data.
#[derive(Debug, Clone)]
pub struct Backend {
    client: ApiClient,
    runtime: Handle,
}

impl Backend {
    pub fn new(client: ApiClient, runtime: Handle) -> Self {
        Self { client, runtime }
    }

    /// Start a request owned by the calling page.
    pub fn spawn<T, F, Fut>(&self, label: &'static str, request: F) -> ViewFetch<T>
    where
        T: Send + 'static,
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = buildinghub_client::Result<T>> + Send + 'static,
    {
        ViewFetch::spawn(&self.runtime, label, request(self.client.clone()))
    }
}

/// A list loaded once from the backend when its page opens.
#[derive(Debug)]
pub struct Remote<T> {
    pub data: Vec<T>,
    fetch: Option<ViewFetch<Vec<T>>>,
    what: &'static str,
}

impl<T> Remote<T> {
    /// Nothing to load; stays empty.
    pub fn idle(what: &'static str) -> Self {
        Self {
            data: Vec::new(),
            fetch: None,
            what,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_some()
    }

    /// Take a finished result. Failures become a notice and leave the list
    /// as it was.
    pub fn poll(&mut self, notices: &mut Notices) {
        let Some(fetch) = self.fetch.as_mut() else {
            return;
        };
        match fetch.poll() {
            FetchPoll::Pending => {}
            FetchPoll::Ready(Ok(data)) => {
                self.data = data;
                self.fetch = None;
            }
            FetchPoll::Ready(Err(e)) => {
                self.fetch = None;
                report_failure(notices, self.what, &e);
            }
        }
    }
}

impl<T: Send + 'static> Remote<T> {
    /// Start loading through `backend`, or stay idle without one.
    pub fn load<F, Fut>(backend: Option<&Backend>, what: &'static str, request: F) -> Self
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = buildinghub_client::Result<Vec<T>>> + Send + 'static,
    {
        Self {
            data: Vec::new(),
            fetch: backend.map(|b| b.spawn(what, request)),
            what,
        }
    }
}

fn report_failure(notices: &mut Notices, what: &str, error: &ClientError) {
    warn!(what, error = %error, "Fetch failed");
    notices.error(format!("Không thể tải {}: {}", what, error));
}

/// Keyboard cursor over a list of `len` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(pub usize);

impl Cursor {
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.0 = (self.0 + 1).min(len - 1);
        }
    }

    pub fn prev(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.0 = self.0.min(len.saturating_sub(1));
    }
}

/// Edit a search term from a key press. Returns false when editing ends.
fn edit_search(term: &mut SearchTerm, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            term.push(c);
            true
        }
        KeyCode::Backspace => {
            term.pop();
            true
        }
        KeyCode::Enter | KeyCode::Esc => false,
        _ => true,
    }
}

/// Step through `options`, wrapping at both ends.
fn cycle<C: Copy + PartialEq>(
    options: &[CategoryFilter<C>],
    current: CategoryFilter<C>,
    forward: bool,
) -> CategoryFilter<C> {
    let len = options.len();
    if len == 0 {
        return current;
    }
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
    options[next]
}

/// Admin overview: resident count and the urgent-issues table.
#[derive(Debug)]
pub struct AdminDashboard {
    pub residents: Remote<Resident>,
    pub issues: Remote<Issue>,
}

impl AdminDashboard {
    pub fn open(backend: Option<&Backend>) -> Self {
        Self {
            residents: Remote::load(backend, "danh sách cư dân", |c| async move {
                c.fetch_residents().await
            }),
            issues: Remote::load(backend, "danh sách sự cố", |c| async move {
                c.fetch_issues().await
            }),
        }
    }

    pub fn urgent(&self) -> Vec<&Issue> {
        filter::urgent_issues(&self.issues.data, URGENT_LIMIT)
    }
}

/// Authority overview: residents, authority issues and lost-item totals.
#[derive(Debug)]
pub struct AuthorityDashboard {
    pub residents: Remote<Resident>,
    pub issues: Remote<Issue>,
}

impl AuthorityDashboard {
    pub fn open(backend: Option<&Backend>) -> Self {
        Self {
            residents: Remote::load(backend, "danh sách cư dân", |c| async move {
                c.fetch_residents().await
            }),
            issues: Remote::load(backend, "danh sách sự cố", |c| async move {
                c.fetch_issues().await.map(filter::authority_issues)
            }),
        }
    }
}

/// Searchable resident directory.
#[derive(Debug)]
pub struct ResidentsView {
    pub residents: Remote<Resident>,
    pub search: SearchTerm,
    pub searching: bool,
    pub cursor: Cursor,
}

impl ResidentsView {
    pub fn open(backend: Option<&Backend>) -> Self {
        Self {
            residents: Remote::load(backend, "danh sách cư dân", |c| async move {
                c.fetch_residents().await
            }),
            search: SearchTerm::default(),
            searching: false,
            cursor: Cursor::default(),
        }
    }

    pub fn visible(&self) -> Vec<&Resident> {
        self.search.apply(&self.residents.data)
    }
}

/// Building rules with a category filter and a detail overlay.
#[derive(Debug, Default)]
pub struct RulesView {
    pub filter: ListFilter<RuleCategory>,
    pub cursor: Cursor,
    pub detail: bool,
}

impl RulesView {
    pub fn options() -> Vec<CategoryFilter<RuleCategory>> {
        CategoryFilter::options(buildinghub_models::rule::present_categories(RULES))
    }

    pub fn visible(&self) -> Vec<&'static Rule> {
        self.filter.apply(RULES)
    }

    /// The rule shown in the detail overlay.
    pub fn selected(&self) -> Option<&'static Rule> {
        self.visible().get(self.cursor.0).copied()
    }
}

/// Regulations lookup with category, search and an expanded entry.
#[derive(Debug, Default)]
pub struct InformationView {
    pub filter: ListFilter<RegulationCategory>,
    pub searching: bool,
    pub cursor: Cursor,
    pub expanded: bool,
}

impl InformationView {
    pub fn options() -> Vec<CategoryFilter<RegulationCategory>> {
        CategoryFilter::options(RegulationCategory::ALL)
    }

    pub fn visible(&self) -> Vec<&'static Regulation> {
        self.filter.apply(REGULATIONS)
    }

    pub fn selected(&self) -> Option<&'static Regulation> {
        self.visible().get(self.cursor.0).copied()
    }
}

/// Voluntary contribution campaigns.
#[derive(Debug, Default)]
pub struct ContributionsView {
    pub search: SearchTerm,
    pub searching: bool,
    pub cursor: Cursor,
}

impl ContributionsView {
    pub fn visible(&self) -> Vec<&'static Campaign> {
        self.search.apply(CAMPAIGNS)
    }
}

/// Lost-item announcements, newest first.
#[derive(Debug)]
pub struct LostItemsView {
    pub reports: Vec<LostItemReport>,
    pub search: SearchTerm,
    pub searching: bool,
    pub cursor: Cursor,
}

impl Default for LostItemsView {
    fn default() -> Self {
        Self {
            reports: filter::newest_first(LOST_ITEM_REPORTS),
            search: SearchTerm::default(),
            searching: false,
            cursor: Cursor::default(),
        }
    }
}

impl LostItemsView {
    pub fn visible(&self) -> Vec<&LostItemReport> {
        self.search.apply(&self.reports)
    }
}

/// The page shown in the shell's content area.
#[derive(Debug)]
pub enum View {
    AdminDashboard(AdminDashboard),
    AuthorityDashboard(AuthorityDashboard),
    Residents(ResidentsView),
    Rules(RulesView),
    Information(InformationView),
    Contributions(ContributionsView),
    LostItems(LostItemsView),
    Profile(ProfileEditor),
    /// A page with no content in this client.
    Placeholder { title: &'static str },
}

impl View {
    /// Build the page for `target`, starting any loads it needs.
    pub fn open(target: MenuTarget, role: Role, backend: Option<&Backend>) -> Self {
        match target {
            MenuTarget::Path(Route::AdminDashboard) => {
                View::AdminDashboard(AdminDashboard::open(backend))
            }
            MenuTarget::Path(Route::AuthorityDashboard) => {
                View::AuthorityDashboard(AuthorityDashboard::open(backend))
            }
            MenuTarget::Path(Route::AdminResidents | Route::AuthorityResidents) => {
                View::Residents(ResidentsView::open(backend))
            }
            MenuTarget::Path(Route::ResidentRules) => View::Rules(RulesView::default()),
            MenuTarget::Path(Route::ResidentInformation) => {
                View::Information(InformationView::default())
            }
            MenuTarget::Path(Route::AdminContributions) => {
                View::Contributions(ContributionsView::default())
            }
            MenuTarget::Path(Route::AuthorityAnnouncements) => {
                View::LostItems(LostItemsView::default())
            }
            MenuTarget::Path(Route::AdminProfile | Route::ResidentProfile | Route::Profile)
            | MenuTarget::Tab(AccountingTab::Profile) => {
                View::Profile(ProfileEditor::new(Profile::sample(role)))
            }
            other => View::Placeholder {
                title: RoleMenu::for_role(role)
                    .items()
                    .find(|item| item.target == other)
                    .map(|item| item.label)
                    .unwrap_or("BuildingHub"),
            },
        }
    }

    /// Collect finished loads.
    pub fn poll(&mut self, notices: &mut Notices) {
        match self {
            View::AdminDashboard(v) => {
                v.residents.poll(notices);
                v.issues.poll(notices);
            }
            View::AuthorityDashboard(v) => {
                v.residents.poll(notices);
                v.issues.poll(notices);
            }
            View::Residents(v) => {
                v.residents.poll(notices);
                let len = v.visible().len();
                v.cursor.clamp(len);
            }
            _ => {}
        }
    }

    /// Whether typed characters go to a text input on this page.
    pub fn captures_text(&self) -> bool {
        match self {
            View::Residents(v) => v.searching,
            View::Information(v) => v.searching,
            View::Contributions(v) => v.searching,
            View::LostItems(v) => v.searching,
            View::Profile(editor) => editor.is_editing(),
            _ => false,
        }
    }

    /// Handle a key press. Returns true when the page used it.
    pub fn handle_key(&mut self, key: KeyEvent, notices: &mut Notices) -> bool {
        match self {
            View::Residents(v) => {
                if v.searching {
                    v.searching = edit_search(&mut v.search, key);
                    v.cursor.clamp(v.visible().len());
                    return true;
                }
                match key.code {
                    KeyCode::Char('/') => v.searching = true,
                    KeyCode::Down | KeyCode::Char('j') => v.cursor.next(v.visible().len()),
                    KeyCode::Up | KeyCode::Char('k') => v.cursor.prev(),
                    _ => return false,
                }
                true
            }
            View::Rules(v) => {
                match key.code {
                    KeyCode::Esc if v.detail => v.detail = false,
                    KeyCode::Enter => v.detail = !v.detail && v.selected().is_some(),
                    KeyCode::Right | KeyCode::Char(']') => {
                        v.filter.category = cycle(&RulesView::options(), v.filter.category, true);
                        v.cursor = Cursor::default();
                    }
                    KeyCode::Left | KeyCode::Char('[') => {
                        v.filter.category = cycle(&RulesView::options(), v.filter.category, false);
                        v.cursor = Cursor::default();
                    }
                    KeyCode::Down | KeyCode::Char('j') => v.cursor.next(v.visible().len()),
                    KeyCode::Up | KeyCode::Char('k') => v.cursor.prev(),
                    _ => return false,
                }
                true
            }
            View::Information(v) => {
                if v.searching {
                    v.searching = edit_search(&mut v.filter.search, key);
                    v.cursor.clamp(v.visible().len());
                    return true;
                }
                match key.code {
                    KeyCode::Char('/') => v.searching = true,
                    KeyCode::Esc if v.expanded => v.expanded = false,
                    KeyCode::Enter => v.expanded = !v.expanded && v.selected().is_some(),
                    KeyCode::Right | KeyCode::Char(']') => {
                        v.filter.category =
                            cycle(&InformationView::options(), v.filter.category, true);
                        v.cursor = Cursor::default();
                    }
                    KeyCode::Left | KeyCode::Char('[') => {
                        v.filter.category =
                            cycle(&InformationView::options(), v.filter.category, false);
                        v.cursor = Cursor::default();
                    }
                    KeyCode::Down | KeyCode::Char('j') => v.cursor.next(v.visible().len()),
                    KeyCode::Up | KeyCode::Char('k') => v.cursor.prev(),
                    _ => return false,
                }
                true
            }
            View::Contributions(v) => {
                if v.searching {
                    v.searching = edit_search(&mut v.search, key);
                    v.cursor.clamp(v.visible().len());
                    return true;
                }
                match key.code {
                    KeyCode::Char('/') => v.searching = true,
                    KeyCode::Down | KeyCode::Char('j') => v.cursor.next(v.visible().len()),
                    KeyCode::Up | KeyCode::Char('k') => v.cursor.prev(),
                    _ => return false,
                }
                true
            }
            View::LostItems(v) => {
                if v.searching {
                    v.searching = edit_search(&mut v.search, key);
                    v.cursor.clamp(v.visible().len());
                    return true;
                }
                match key.code {
                    KeyCode::Char('/') => v.searching = true,
                    KeyCode::Down | KeyCode::Char('j') => v.cursor.next(v.visible().len()),
                    KeyCode::Up | KeyCode::Char('k') => v.cursor.prev(),
                    _ => return false,
                }
                true
            }
            View::Profile(editor) => handle_profile_key(editor, key, notices),
            _ => false,
        }
    }
}

/// Saved message for a committed profile edit.
pub const PROFILE_SAVED: &str = "Đã lưu thông tin cá nhân";

fn handle_profile_key(editor: &mut ProfileEditor, key: KeyEvent, notices: &mut Notices) -> bool {
    if !editor.is_editing() {
        return match key.code {
            KeyCode::Char('e') => {
                editor.begin_edit();
                true
            }
            _ => false,
        };
    }
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if editor.save() {
                notices.success(PROFILE_SAVED);
            }
        }
        KeyCode::Enter => {
            if editor.save() {
                notices.success(PROFILE_SAVED);
            }
        }
        KeyCode::Esc => editor.cancel(),
        KeyCode::Tab | KeyCode::Down => editor.focus_next(),
        KeyCode::BackTab | KeyCode::Up => editor.focus_prev(),
        KeyCode::Backspace => editor.pop_char(),
        KeyCode::Char(c) => editor.push_char(c),
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildinghub_core::NoticeLevel;
    use buildinghub_models::{IssueKind, IssueStatus, ProfileField};

    fn press(view: &mut View, code: KeyCode) -> bool {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut Notices::default())
    }

    fn type_text(view: &mut View, text: &str) {
        for c in text.chars() {
            press(view, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_open_maps_routes_to_pages() {
        let v = View::open(MenuTarget::Path(Route::ResidentRules), Role::Resident, None);
        assert!(matches!(v, View::Rules(_)));

        let v = View::open(MenuTarget::Tab(AccountingTab::Profile), Role::Accountant, None);
        assert!(matches!(v, View::Profile(_)));

        let v = View::open(MenuTarget::Path(Route::AdminBills), Role::Admin, None);
        assert!(matches!(v, View::Placeholder { title: "Bills" }));

        let v = View::open(MenuTarget::Tab(AccountingTab::DebtManagement), Role::Accountant, None);
        assert!(matches!(v, View::Placeholder { title: "Quản Lý Công Nợ" }));
    }

    #[test]
    fn test_without_backend_lists_stay_empty() {
        let mut v = View::open(MenuTarget::Path(Route::AdminDashboard), Role::Admin, None);
        let mut notices = Notices::default();
        v.poll(&mut notices);
        match v {
            View::AdminDashboard(d) => {
                assert!(!d.issues.is_loading());
                assert!(d.urgent().is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(notices.is_empty());
    }

    #[test]
    fn test_urgent_from_loaded_issues() {
        let mut dashboard = AdminDashboard::open(None);
        dashboard.issues.data = vec![
            Issue::new(5, IssueKind::Authority, IssueStatus::Unprocessed, "a"),
            Issue::new(2, IssueKind::Noise, IssueStatus::Unprocessed, "b"),
            Issue::new(9, IssueKind::Authority, IssueStatus::Processed, "c"),
        ];
        let ids: Vec<u64> = dashboard.urgent().iter().map(|i| i.id).collect();
        assert_eq!(ids, [5, 2]);
    }

    #[tokio::test]
    async fn test_failed_load_becomes_notice() {
        let mut remote: Remote<Issue> = Remote {
            data: Vec::new(),
            fetch: Some(ViewFetch::spawn(&Handle::current(), "test", async {
                Err(ClientError::Status {
                    url: "http://localhost:8081/api/issues".into(),
                    status: 503,
                })
            })),
            what: "danh sách sự cố",
        };
        let mut notices = Notices::default();
        for _ in 0..100 {
            remote.poll(&mut notices);
            if !remote.is_loading() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(!remote.is_loading());
        assert!(remote.data.is_empty());
        assert!(notices.latest().unwrap().message.contains("danh sách sự cố"));
    }

    #[test]
    fn test_rules_category_cycle_and_detail() {
        let mut view = View::open(MenuTarget::Path(Route::ResidentRules), Role::Resident, None);
        press(&mut view, KeyCode::Right);
        let View::Rules(rules) = &view else { panic!() };
        let CategoryFilter::Only(category) = rules.filter.category else { panic!() };
        assert!(rules.visible().iter().all(|r| r.category == category));

        press(&mut view, KeyCode::Enter);
        let View::Rules(rules) = &view else { panic!() };
        assert!(rules.detail);
        assert!(rules.selected().is_some());

        press(&mut view, KeyCode::Esc);
        let View::Rules(rules) = &view else { panic!() };
        assert!(!rules.detail);
    }

    #[test]
    fn test_category_cycle_wraps_to_all() {
        let options = RulesView::options();
        let last = options[options.len() - 1];
        assert_eq!(cycle(&options, last, true), CategoryFilter::All);
        assert_eq!(cycle(&options, CategoryFilter::All, false), last);
    }

    #[test]
    fn test_information_search_mode() {
        let mut view =
            View::open(MenuTarget::Path(Route::ResidentInformation), Role::Resident, None);
        press(&mut view, KeyCode::Char('/'));
        assert!(view.captures_text());
        type_text(&mut view, "zzzz");
        let View::Information(info) = &view else { panic!() };
        assert!(info.visible().is_empty());

        press(&mut view, KeyCode::Esc);
        assert!(!view.captures_text());
    }

    #[test]
    fn test_lost_items_search() {
        let mut view = View::open(
            MenuTarget::Path(Route::AuthorityAnnouncements),
            Role::Authority,
            None,
        );
        press(&mut view, KeyCode::Char('/'));
        type_text(&mut view, "ví");
        let View::LostItems(items) = &view else { panic!() };
        assert!(!items.visible().is_empty());
        assert!(items
            .visible()
            .iter()
            .all(|r| (r.title.to_string() + r.message).to_lowercase().contains("ví")));
    }

    #[test]
    fn test_profile_edit_and_cancel() {
        let mut view = View::open(MenuTarget::Path(Route::Profile), Role::Authority, None);
        assert!(press(&mut view, KeyCode::Char('e')));
        assert!(view.captures_text());
        press(&mut view, KeyCode::Backspace);
        press(&mut view, KeyCode::Esc);
        let View::Profile(editor) = &view else { panic!() };
        assert!(!editor.is_editing());
        assert_eq!(editor.draft().get(ProfileField::LastName), "Văn C");
    }

    #[test]
    fn test_profile_save_posts_success_notice() {
        let mut view = View::open(MenuTarget::Path(Route::ResidentProfile), Role::Resident, None);
        let mut notices = Notices::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        view.handle_key(enter, &mut notices);
        assert!(notices.is_empty());

        view.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE), &mut notices);
        view.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE), &mut notices);
        view.handle_key(enter, &mut notices);
        let View::Profile(editor) = &view else { panic!() };
        assert!(!editor.is_editing());
        let notice = notices.latest().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, PROFILE_SAVED);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut cursor = Cursor::default();
        cursor.prev();
        assert_eq!(cursor.0, 0);
        cursor.next(2);
        cursor.next(2);
        assert_eq!(cursor.0, 1);
        cursor.clamp(0);
        assert_eq!(cursor.0, 0);
    }
}

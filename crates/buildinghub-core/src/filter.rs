//! List filtering for the informational and fetched views.

use std::borrow::Cow;

use buildinghub_models::{
    Campaign, Issue, IssueKind, IssueStatus, LostItemReport, Regulation, RegulationCategory,
    Resident, Rule, RuleCategory,
};

/// Number of rows in the admin dashboard's urgent-issues table.
pub const URGENT_LIMIT: usize = 3;

/// Items that can be matched against a [`SearchTerm`].
pub trait Searchable {
    /// The text fields a search looks into.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// Items that belong to exactly one category.
pub trait Categorized {
    type Category: PartialEq;

    fn category(&self) -> &Self::Category;
}

/// Category selector; `All` matches every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C> Default for CategoryFilter<C> {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl<C: PartialEq> CategoryFilter<C> {
    /// Returns true if an item in `category` passes this filter.
    pub fn matches(&self, category: &C) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl<C> CategoryFilter<C> {
    /// Selectable options: `All` first, then each category in order.
    pub fn options<I>(categories: I) -> Vec<CategoryFilter<C>>
    where
        I: IntoIterator<Item = C>,
    {
        std::iter::once(CategoryFilter::All)
            .chain(categories.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    /// Display label, using `all_label` for the `All` option.
    pub fn label<'a>(&'a self, all_label: &'a str, label: impl Fn(&'a C) -> &'a str) -> &'a str {
        match self {
            CategoryFilter::All => all_label,
            CategoryFilter::Only(category) => label(category),
        }
    }
}

/// Case-insensitive substring search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    /// Creates a search for `term`.
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// The term as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// An empty term matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Appends a typed character.
    pub fn push(&mut self, c: char) {
        self.raw.push(c);
        self.needle = self.raw.to_lowercase();
    }

    /// Removes the last character.
    pub fn pop(&mut self) {
        self.raw.pop();
        self.needle = self.raw.to_lowercase();
    }

    pub fn clear(&mut self) {
        self.raw.clear();
        self.needle.clear();
    }

    /// Returns true if any searchable field of `item` contains the term.
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        if self.is_empty() {
            return true;
        }
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Items matching the term, in source order.
    pub fn apply<'a, T: Searchable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Category plus search criteria for a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<C> {
    pub category: CategoryFilter<C>,
    pub search: SearchTerm,
}

impl<C> Default for ListFilter<C> {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: SearchTerm::default(),
        }
    }
}

impl<C: PartialEq> ListFilter<C> {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: C) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    /// Sets the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = SearchTerm::new(term);
        self
    }

    /// Returns true if the item matches both criteria.
    pub fn matches<T>(&self, item: &T) -> bool
    where
        T: Searchable + Categorized<Category = C>,
    {
        self.category.matches(item.category()) && self.search.matches(item)
    }

    /// Items matching both criteria, in source order.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: Searchable + Categorized<Category = C>,
    {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// The visible subset of a list, or the message to show when it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visible<'a, T> {
    Empty { message: &'static str },
    Items(Vec<&'a T>),
}

impl<'a, T> Visible<'a, T> {
    /// Wraps a filtered list, substituting `message` when nothing matched.
    pub fn new(items: Vec<&'a T>, message: &'static str) -> Self {
        if items.is_empty() {
            Visible::Empty { message }
        } else {
            Visible::Items(items)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Visible::Empty { .. } => 0,
            Visible::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visible items; empty when there are none.
    pub fn items(&self) -> &[&'a T] {
        match self {
            Visible::Empty { .. } => &[],
            Visible::Items(items) => items,
        }
    }
}

/// Empty-state messages for each list view.
pub mod empty {
    pub const REGULATIONS: &str = "Không tìm thấy thông tin";
    pub const RULES: &str = "Không có quy định nào trong danh mục này";
    pub const LOST_ITEMS: &str = "Không có thông báo mất đồ nào khớp với tìm kiếm.";
    pub const RESIDENTS: &str = "Không tìm thấy cư dân nào";
    pub const CAMPAIGNS: &str = "Chưa có chiến dịch quyên góp nào";
    pub const ISSUES: &str = "Không có sự cố nào cần xử lý";
}

/// Unprocessed issues, most recent (highest id) first, at most `limit`.
pub fn urgent_issues(issues: &[Issue], limit: usize) -> Vec<&Issue> {
    let mut urgent: Vec<&Issue> = issues
        .iter()
        .filter(|issue| issue.status == IssueStatus::Unprocessed)
        .collect();
    urgent.sort_by(|a, b| b.id.cmp(&a.id));
    urgent.truncate(limit);
    urgent
}

/// Issues routed to the authority role.
pub fn authority_issues(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| issue.kind == IssueKind::Authority)
        .collect()
}

/// Lost-item reports ordered newest first.
pub fn newest_first(reports: &[LostItemReport]) -> Vec<LostItemReport> {
    let mut sorted = reports.to_vec();
    sorted.sort_by(|a, b| b.created_at_unix.cmp(&a.created_at_unix));
    sorted
}

/// Summary figures for the rules page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleStats {
    pub total: usize,
    pub safety: usize,
    pub categories: usize,
}

impl RuleStats {
    pub fn from_rules(rules: &[Rule]) -> Self {
        Self {
            total: rules.len(),
            safety: rules.iter().filter(|r| r.category.is_safety()).count(),
            categories: buildinghub_models::rule::present_categories(rules).len(),
        }
    }
}

impl Searchable for Regulation {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.title), Cow::Borrowed(self.content)]
    }
}

impl Categorized for Regulation {
    type Category = RegulationCategory;

    fn category(&self) -> &RegulationCategory {
        &self.category
    }
}

impl Searchable for Rule {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.title), Cow::Borrowed(self.description)]
    }
}

impl Categorized for Rule {
    type Category = RuleCategory;

    fn category(&self) -> &RuleCategory {
        &self.category
    }
}

impl Searchable for LostItemReport {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.title), Cow::Borrowed(self.message)]
    }
}

impl Searchable for Campaign {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.title)]
    }
}

impl Searchable for Resident {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.full_name.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Owned(self.room_number.to_string()),
        ]
    }
}

impl Searchable for Issue {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.description.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildinghub_models::{LostItemStatus, LOST_ITEM_REPORTS, REGULATIONS, RULES};

    struct Listing {
        category: &'static str,
        title: &'static str,
    }

    impl Searchable for Listing {
        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(self.title)]
        }
    }

    impl Categorized for Listing {
        type Category = &'static str;

        fn category(&self) -> &&'static str {
            &self.category
        }
    }

    fn issue(id: u64, status: IssueStatus) -> Issue {
        Issue::new(id, IssueKind::Authority, status, format!("Sự cố {}", id))
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = ListFilter::new();
        assert_eq!(filter.apply(RULES).len(), RULES.len());
    }

    #[test]
    fn test_category_filter_returns_exact_matches() {
        let listings = [
            Listing {
                category: "Tiện ích",
                title: "Hồ bơi",
            },
            Listing {
                category: "An ninh",
                title: "Camera",
            },
            Listing {
                category: "Tiện ích",
                title: "Phòng gym",
            },
        ];
        let filter = ListFilter::new().with_category("Tiện ích");
        let titles: Vec<_> = filter.apply(&listings).iter().map(|l| l.title).collect();
        assert_eq!(titles, ["Hồ bơi", "Phòng gym"]);
    }

    #[test]
    fn test_rule_category_filter() {
        let filter = ListFilter::new().with_category(RuleCategory::SafetySecurity);
        let visible = filter.apply(RULES);
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|r| r.category == RuleCategory::SafetySecurity));
        assert_eq!(
            visible.len(),
            RULES.iter().filter(|r| r.category == RuleCategory::SafetySecurity).count()
        );
    }

    #[test]
    fn test_search_is_case_insensitive_over_unicode() {
        let term = SearchTerm::new("THANG MÁY");
        let hits = term.apply(REGULATIONS);
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|r| r.content.to_lowercase().contains("thang máy")
                || r.title.to_lowercase().contains("thang máy")));
    }

    #[test]
    fn test_search_and_category_combine() {
        let filter = ListFilter::new()
            .with_category(RegulationCategory::Security)
            .with_search("camera");
        for regulation in filter.apply(REGULATIONS) {
            assert_eq!(regulation.category, RegulationCategory::Security);
        }

        let none = ListFilter::new()
            .with_category(RegulationCategory::Finance)
            .with_search("zzz-no-match");
        assert!(none.apply(REGULATIONS).is_empty());
    }

    #[test]
    fn test_search_term_editing() {
        let mut term = SearchTerm::default();
        assert!(term.is_empty());
        term.push('V');
        term.push('í');
        assert_eq!(term.as_str(), "Ví");
        assert!(term.matches(&LOST_ITEM_REPORTS[0]));
        term.pop();
        term.pop();
        assert!(term.is_empty());
    }

    #[test]
    fn test_resident_search_includes_room() {
        let resident = Resident {
            id: uuid::Uuid::nil(),
            full_name: "Lê Văn Tám".into(),
            email: "tam@example.com".into(),
            phone_number: String::new(),
            room_number: 1204,
        };
        assert!(SearchTerm::new("120").matches(&resident));
        assert!(SearchTerm::new("lê văn").matches(&resident));
        assert!(!SearchTerm::new("0909").matches(&resident));
    }

    #[test]
    fn test_visible_empty_state() {
        let visible: Visible<'_, Rule> = Visible::new(Vec::new(), empty::RULES);
        assert_eq!(
            visible,
            Visible::Empty {
                message: empty::RULES,
            }
        );
        assert!(visible.is_empty());
        assert!(visible.items().is_empty());

        let visible = Visible::new(RULES.iter().collect(), empty::RULES);
        assert_eq!(visible.len(), RULES.len());
    }

    #[test]
    fn test_urgent_issues_filters_then_sorts_descending() {
        let issues = vec![
            issue(5, IssueStatus::Unprocessed),
            issue(2, IssueStatus::Unprocessed),
            issue(9, IssueStatus::Processed),
        ];
        let ids: Vec<u64> = urgent_issues(&issues, URGENT_LIMIT).iter().map(|i| i.id).collect();
        assert_eq!(ids, [5, 2]);
    }

    #[test]
    fn test_urgent_issues_truncates() {
        let issues: Vec<Issue> = (1..=6).map(|id| issue(id, IssueStatus::Unprocessed)).collect();
        let ids: Vec<u64> = urgent_issues(&issues, URGENT_LIMIT).iter().map(|i| i.id).collect();
        assert_eq!(ids, [6, 5, 4]);
    }

    #[test]
    fn test_authority_issues() {
        let mut noise = issue(3, IssueStatus::Processing);
        noise.kind = IssueKind::Noise;
        let kept = authority_issues(vec![issue(1, IssueStatus::Unprocessed), noise]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_newest_first() {
        let sorted = newest_first(LOST_ITEM_REPORTS);
        assert_eq!(sorted.len(), LOST_ITEM_REPORTS.len());
        assert!(sorted.windows(2).all(|w| w[0].created_at_unix >= w[1].created_at_unix));
        assert_eq!(sorted[0].status, LostItemStatus::InProgress);
    }

    #[test]
    fn test_category_options_start_with_all() {
        let options = CategoryFilter::options(RuleCategory::ALL);
        assert_eq!(options.len(), RuleCategory::ALL.len() + 1);
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[0].label("Tất cả", |c| c.label()), "Tất cả");
        assert_eq!(options[1].label("Tất cả", |c| c.label()), RuleCategory::ALL[0].label());
    }

    #[test]
    fn test_rule_stats() {
        let stats = RuleStats::from_rules(RULES);
        assert_eq!(stats.total, RULES.len());
        assert_eq!(
            stats.safety,
            RULES.iter().filter(|r| r.category == RuleCategory::SafetySecurity).count()
        );
        assert!(stats.categories <= RuleCategory::ALL.len());
    }
}

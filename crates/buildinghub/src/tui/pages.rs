//! Page bodies for the signed-in shell.

use buildinghub_core::filter::{empty, CategoryFilter, RuleStats, SearchTerm, Visible};
use buildinghub_core::{
    format_date, format_vnd, progress_bar, relative_time, render_text_block, ProfileEditor,
    TextNode,
};
use buildinghub_models::lost_item::count_by_status;
use buildinghub_models::regulation::latest_update;
use buildinghub_models::rule::RuleIcon;
use buildinghub_models::{ProfileField, LOST_ITEM_REPORTS, REGULATIONS, RULES};
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::views::{
    AdminDashboard, AuthorityDashboard, ContributionsView, Cursor, InformationView, LostItemsView,
    Remote, ResidentsView, RulesView, View,
};

const LOADING: &str = "Đang tải...";

/// Key hints for the footer.
pub fn hints(view: &View) -> &'static str {
    match view {
        View::Residents(v) if v.searching => " Gõ để tìm | Enter/Esc xong ",
        View::Information(v) if v.searching => " Gõ để tìm | Enter/Esc xong ",
        View::Contributions(v) if v.searching => " Gõ để tìm | Enter/Esc xong ",
        View::LostItems(v) if v.searching => " Gõ để tìm | Enter/Esc xong ",
        View::Profile(editor) if editor.is_editing() => {
            " Tab/↑/↓ chuyển ô | Enter lưu | Esc hủy "
        }
        View::Profile(_) => " e chỉnh sửa | m menu | q thoát ",
        View::Rules(_) => " ←/→ danh mục | ↑/↓ chọn | Enter chi tiết | m menu | q thoát ",
        View::Information(_) => {
            " / tìm | ←/→ danh mục | ↑/↓ chọn | Enter mở rộng | m menu | q thoát "
        }
        View::Residents(_) | View::Contributions(_) | View::LostItems(_) => {
            " / tìm | ↑/↓ chọn | m menu | q thoát "
        }
        _ => " m menu | q thoát ",
    }
}

/// Draw the current page into `area`.
pub fn draw_view(frame: &mut Frame, view: &View, area: Rect) {
    match view {
        View::AdminDashboard(v) => draw_admin_dashboard(frame, v, area),
        View::AuthorityDashboard(v) => draw_authority_dashboard(frame, v, area),
        View::Residents(v) => draw_residents(frame, v, area),
        View::Rules(v) => draw_rules(frame, v, area),
        View::Information(v) => draw_information(frame, v, area),
        View::Contributions(v) => draw_contributions(frame, v, area),
        View::LostItems(v) => draw_lost_items(frame, v, area),
        View::Profile(editor) => draw_profile(frame, editor, area),
        View::Placeholder { title } => {
            let block = Block::default().borders(Borders::ALL).title(format!(" {} ", title));
            let text = Paragraph::new("Trang này chưa có nội dung trong phiên bản dòng lệnh.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(text, area);
        }
    }
}

fn titled(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

/// Rows for a list page: a message when empty, otherwise the items with the
/// cursor row highlighted.
fn list_rows<'a, T>(
    visible: Visible<'_, T>,
    cursor: Cursor,
    row: impl Fn(&T) -> Vec<Line<'a>>,
) -> Vec<ListItem<'a>> {
    match visible {
        Visible::Empty { message } => {
            vec![ListItem::new(message).style(Style::default().fg(Color::DarkGray))]
        }
        Visible::Items(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == cursor.0 {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(Text::from(row(item))).style(style)
            })
            .collect()
    }
}

fn search_line(term: &SearchTerm, active: bool) -> Paragraph<'static> {
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let shown = if term.is_empty() && !active {
        "nhấn / để tìm kiếm".to_string()
    } else {
        term.as_str().to_string()
    };
    Paragraph::new(Line::from(vec![Span::styled("Tìm: ", style), Span::raw(shown)]))
}

/// Category selector: every option, the current one highlighted.
fn category_line<C: Copy + PartialEq>(
    options: &[CategoryFilter<C>],
    current: CategoryFilter<C>,
    label: fn(C) -> &'static str,
) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for option in options {
        let text = match option {
            CategoryFilter::All => "Tất cả",
            CategoryFilter::Only(c) => label(*c),
        };
        let style = if *option == current {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", text), style));
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans))
}

fn count_text<T>(remote: &Remote<T>) -> String {
    if remote.is_loading() {
        LOADING.to_string()
    } else {
        remote.data.len().to_string()
    }
}

fn stat_box(frame: &mut Frame, title: &str, value: String, area: Rect) {
    let text = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(titled(format!(" {} ", title)));
    frame.render_widget(text, area);
}

fn issue_rows(issues: &[&buildinghub_models::Issue]) -> Vec<ListItem<'static>> {
    issues
        .iter()
        .map(|issue| {
            let mut line = vec![
                Span::styled(format!("#{:<5}", issue.id), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<12}", issue.status.label()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(format!("{:<18}", issue.kind.label())),
                Span::raw(issue.title.clone()),
            ];
            if let Some(room) = issue.room_number {
                line.push(Span::styled(
                    format!("  (phòng {})", room),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(line))
        })
        .collect()
}

fn draw_admin_dashboard(frame: &mut Frame, view: &AdminDashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    stat_box(frame, "Tổng số cư dân", count_text(&view.residents), chunks[0]);

    let urgent = view.urgent();
    let items = if view.issues.is_loading() {
        vec![ListItem::new(LOADING)]
    } else if urgent.is_empty() {
        vec![ListItem::new(empty::ISSUES).style(Style::default().fg(Color::DarkGray))]
    } else {
        issue_rows(&urgent)
    };
    frame.render_widget(
        List::new(items).block(titled(" Sự cố cần xử lý gấp ".to_string())),
        chunks[1],
    );
}

fn draw_authority_dashboard(frame: &mut Frame, view: &AuthorityDashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(chunks[0]);

    stat_box(frame, "Cư dân", count_text(&view.residents), stats[0]);
    stat_box(frame, "Sự cố an ninh", count_text(&view.issues), stats[1]);
    let lost = count_by_status(LOST_ITEM_REPORTS)
        .iter()
        .map(|(status, n)| format!("{} {}", n, status.label()))
        .collect::<Vec<_>>()
        .join(" · ");
    stat_box(frame, "Thông báo mất đồ", lost, stats[2]);

    let issues: Vec<_> = view.issues.data.iter().collect();
    let items = if view.issues.is_loading() {
        vec![ListItem::new(LOADING)]
    } else if issues.is_empty() {
        vec![ListItem::new(empty::ISSUES).style(Style::default().fg(Color::DarkGray))]
    } else {
        issue_rows(&issues)
    };
    frame.render_widget(
        List::new(items).block(titled(" Sự cố chuyển cơ quan chức năng ".to_string())),
        chunks[1],
    );
}

fn draw_residents(frame: &mut Frame, view: &ResidentsView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    frame.render_widget(search_line(&view.search, view.searching), chunks[0]);

    let title = format!(" Cư dân ({}) ", count_text(&view.residents));
    let items = if view.residents.is_loading() {
        vec![ListItem::new(LOADING)]
    } else {
        list_rows(Visible::new(view.visible(), empty::RESIDENTS), view.cursor, |r| {
            vec![Line::from(vec![
                Span::styled(format!("{:<6}", r.room_number), Style::default().fg(Color::Cyan)),
                Span::raw(format!("{:<28}", r.full_name)),
                Span::raw(format!("{:<30}", r.email)),
                Span::styled(r.phone_number.clone(), Style::default().fg(Color::DarkGray)),
            ])]
        })
    };
    frame.render_widget(List::new(items).block(titled(title)), chunks[1]);
}

fn rule_badge(icon: RuleIcon) -> Span<'static> {
    match icon {
        RuleIcon::Info => Span::styled("ℹ ", Style::default().fg(Color::Blue)),
        RuleIcon::Alert => Span::styled("! ", Style::default().fg(Color::Red)),
        RuleIcon::Check => Span::styled("✓ ", Style::default().fg(Color::Green)),
    }
}

fn draw_rules(frame: &mut Frame, view: &RulesView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let stats = RuleStats::from_rules(RULES);
    frame.render_widget(
        Paragraph::new(format!(
            "{} quy định · {} về an toàn · {} danh mục",
            stats.total, stats.safety, stats.categories
        ))
        .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );
    frame.render_widget(
        category_line(&RulesView::options(), view.filter.category, |c| c.label()),
        chunks[1],
    );

    let items = list_rows(Visible::new(view.visible(), empty::RULES), view.cursor, |rule| {
        vec![
            Line::from(vec![
                rule_badge(rule.icon),
                Span::styled(rule.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  [{}]", rule.category.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(format!("   {}", rule.description)),
        ]
    });
    frame.render_widget(List::new(items).block(titled(" Nội quy ".to_string())), chunks[2]);

    if view.detail {
        if let Some(rule) = view.selected() {
            let popup = Rect {
                x: area.x + area.width / 8,
                y: area.y + area.height / 4,
                width: area.width - area.width / 4,
                height: (area.height / 2).max(3),
            }
            .intersection(area);
            let text = vec![
                Line::from(vec![
                    rule_badge(rule.icon),
                    Span::styled(rule.category.label(), Style::default().fg(Color::Cyan)),
                ]),
                Line::from(""),
                Line::from(rule.description),
            ];
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .block(
                        titled(format!(" {} ", rule.title))
                            .border_style(Style::default().fg(Color::Yellow)),
                    ),
                popup,
            );
        }
    }
}

/// Structured lines for a regulation body.
fn text_block_lines(content: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for node in render_text_block(content) {
        match node {
            TextNode::Heading(text) => lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))),
            TextNode::BulletList(items) => {
                lines.extend(items.into_iter().map(|item| Line::from(format!("  • {}", item))));
            }
            TextNode::Paragraph(text) => lines.push(Line::from(text)),
            TextNode::Spacer => lines.push(Line::from("")),
        }
    }
    lines
}

fn draw_information(frame: &mut Frame, view: &InformationView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(search_line(&view.filter.search, view.searching), chunks[0]);
    frame.render_widget(
        category_line(&InformationView::options(), view.filter.category, |c| c.label()),
        chunks[1],
    );

    let body = if view.expanded {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(chunks[2])
    };

    let items = list_rows(Visible::new(view.visible(), empty::REGULATIONS), view.cursor, |r| {
        vec![
            Line::from(Span::styled(r.title, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                format!("   {} · {} · {}", r.category.label(), r.priority.label(), r.last_updated),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    });
    frame.render_widget(List::new(items).block(titled(" Tra cứu thông tin ".to_string())), body[0]);

    if view.expanded {
        if let Some(regulation) = view.selected() {
            frame.render_widget(
                Paragraph::new(text_block_lines(regulation.content))
                    .wrap(Wrap { trim: false })
                    .block(titled(format!(" {} ", regulation.title))),
                body[1],
            );
        }
    }

    let updated = latest_update(REGULATIONS)
        .map(format_date)
        .unwrap_or_else(|| "-".to_string());
    frame.render_widget(
        Paragraph::new(format!("Cập nhật lần cuối: {}", updated))
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn draw_contributions(frame: &mut Frame, view: &ContributionsView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    frame.render_widget(search_line(&view.search, view.searching), chunks[0]);

    let items = list_rows(Visible::new(view.visible(), empty::CAMPAIGNS), view.cursor, |c| {
        let pct = c.progress_percent();
        vec![
            Line::from(vec![
                Span::styled(c.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  ({})", c.status.label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                Span::styled(progress_bar(pct, 24), Style::default().fg(Color::Green)),
                Span::raw(format!(
                    " {:>3}%  {} / {}  {} người tham gia",
                    pct,
                    format_vnd(c.total_raised),
                    format_vnd(c.goal),
                    c.participants
                )),
            ]),
        ]
    });
    frame.render_widget(
        List::new(items).block(titled(" Đóng góp tự nguyện ".to_string())),
        chunks[1],
    );
}

fn draw_lost_items(frame: &mut Frame, view: &LostItemsView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    frame.render_widget(search_line(&view.search, view.searching), chunks[0]);

    let now = Utc::now();
    let items = list_rows(Visible::new(view.visible(), empty::LOST_ITEMS), view.cursor, |r| {
        vec![
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", r.status.label()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(r.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", relative_time(r.created_at(), now)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(format!("   {} (ngày {})", r.message, r.event_date)),
        ]
    });
    frame.render_widget(
        List::new(items).block(titled(" Thông báo mất đồ ".to_string())),
        chunks[1],
    );
}

fn draw_profile(frame: &mut Frame, editor: &ProfileEditor, area: Rect) {
    let profile = editor.draft();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", profile.initials()),
                Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(profile.display_name(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];
    for field in ProfileField::ALL {
        let focused = editor.is_editing() && editor.focused() == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut value = profile.get(field).to_string();
        if focused {
            value.push('▏');
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", field.label()), label_style),
            Span::raw(value),
        ]));
    }

    let title = if editor.is_editing() {
        " Hồ sơ (đang chỉnh sửa) "
    } else {
        " Hồ sơ "
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(titled(title.to_string())),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildinghub_core::Notices;
    use buildinghub_models::{MenuTarget, Resident, Role, Route};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(view: &View) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_view(f, view, area)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn press(view: &mut View, code: KeyCode) {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut Notices::default());
    }

    #[test]
    fn test_text_block_lines_structure() {
        let lines = text_block_lines("1. Giờ giấc:\n- Không gây ồn\n\nGhi chú");
        let texts: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(texts, ["1. Giờ giấc:", "  • Không gây ồn.", "", "  • Ghi chú."]);
    }

    #[test]
    fn test_rules_page_shows_stats() {
        let view = View::open(MenuTarget::Path(Route::ResidentRules), Role::Resident, None);
        let out = render(&view);
        assert!(out.contains(&format!("{} quy định", RULES.len())));
        assert!(out.contains("Tất cả"));
    }

    #[test]
    fn test_information_empty_message() {
        let mut view =
            View::open(MenuTarget::Path(Route::ResidentInformation), Role::Resident, None);
        press(&mut view, KeyCode::Char('/'));
        for c in "không-có-kết-quả".chars() {
            press(&mut view, KeyCode::Char(c));
        }
        assert!(render(&view).contains(empty::REGULATIONS));
    }

    #[test]
    fn test_information_expanded_renders_bullets() {
        let mut view =
            View::open(MenuTarget::Path(Route::ResidentInformation), Role::Resident, None);
        press(&mut view, KeyCode::Enter);
        let out = render(&view);
        assert!(out.contains("  • "));
        assert!(out.contains("Cập nhật lần cuối"));
    }

    #[test]
    fn test_residents_page_lists_loaded_rows() {
        let mut view = View::open(MenuTarget::Path(Route::AdminResidents), Role::Admin, None);
        if let View::Residents(v) = &mut view {
            v.residents.data = vec![Resident {
                id: uuid::Uuid::nil(),
                full_name: "Trần Thị B".into(),
                email: "b@example.com".into(),
                phone_number: "0900000000".into(),
                room_number: 1202,
            }];
        }
        let out = render(&view);
        assert!(out.contains("Trần Thị B"));
        assert!(out.contains("1202"));
    }

    #[test]
    fn test_contributions_page() {
        let view = View::open(MenuTarget::Path(Route::AdminContributions), Role::Admin, None);
        assert!(render(&view).contains("₫"));
    }

    #[test]
    fn test_profile_page_shows_name() {
        let view = View::open(MenuTarget::Path(Route::Profile), Role::Authority, None);
        assert!(render(&view).contains("Nguyễn Văn C"));
    }
}

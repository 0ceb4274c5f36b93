//! TUI rendering using ratatui.

use buildinghub_core::{LoginFocus, NoticeLevel, SignupFocus, TextField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Screen, Session};
use super::pages;

const LABEL_WIDTH: usize = 18;

/// Draw the TUI.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => draw_login(frame, app),
        Screen::Signup => draw_signup(frame, app),
        Screen::ForgotPassword => draw_forgot(frame, app),
        Screen::Shell => match &app.session {
            Some(session) => draw_shell(frame, session),
            None => draw_login(frame, app),
        },
    }

    draw_notices(frame, app);
    if let Some(alert) = &app.alert {
        draw_alert(frame, &alert.message);
    }
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn header_bar(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD))
}

fn footer_bar(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White))
}

/// Split the screen into header, content and footer rows.
fn chrome(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// A labelled input row. Places the terminal cursor when focused.
fn field_line<'a>(
    frame: &mut Frame,
    label: &'a str,
    field: &TextField,
    masked: bool,
    focused: bool,
    row: Rect,
) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    if focused {
        let x = row.x + LABEL_WIDTH as u16 + field.cursor() as u16;
        if x < row.x + row.width {
            frame.set_cursor_position((x, row.y));
        }
    }
    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), style),
        Span::raw(field.display(masked)),
    ])
}

/// Rows inside a bordered form box, one per line.
fn form_rows(inner: Rect, count: u16) -> Vec<Rect> {
    (0..count.min(inner.height))
        .map(|i| Rect {
            x: inner.x,
            y: inner.y + i,
            width: inner.width,
            height: 1,
        })
        .collect()
}

fn draw_form_box(
    frame: &mut Frame,
    title: &'static str,
    footer: &'static str,
    height: u16,
) -> Rect {
    let [header, content, foot] = chrome(frame.area());
    frame.render_widget(header_bar(" BuildingHub ".to_string()), header);
    frame.render_widget(footer_bar(footer), foot);

    let area = centered_rect(64, height, content);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn draw_login(frame: &mut Frame, app: &App) {
    let form = &app.login;
    let inner = draw_form_box(
        frame,
        " Đăng nhập ",
        " Tab chuyển ô | ←/→ chọn loại tài khoản | F2 hiện mật khẩu | F5 đăng ký | F6 quên mật khẩu | Enter đăng nhập ",
        9,
    );
    let rows = form_rows(inner, 7);
    if rows.len() < 7 {
        return;
    }

    let focus_style = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let role = form.role.map(|r| r.label()).unwrap_or("Chọn loại tài khoản");
    let role_line = Line::from(vec![
        Span::styled(
            format!("{:<width$}", "Loại tài khoản", width = LABEL_WIDTH),
            focus_style(form.focus == LoginFocus::Role),
        ),
        Span::styled(format!("◀ {} ▶", role), Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(role_line), rows[0]);

    let email = field_line(
        frame,
        "Email",
        &form.email,
        false,
        form.focus == LoginFocus::Email,
        rows[2],
    );
    frame.render_widget(Paragraph::new(email), rows[2]);

    let password = field_line(
        frame,
        "Mật khẩu",
        &form.password,
        !form.show_password,
        form.focus == LoginFocus::Password,
        rows[3],
    );
    frame.render_widget(Paragraph::new(password), rows[3]);

    let check = if form.remember_me { "[x]" } else { "[ ]" };
    let remember = Line::from(Span::styled(
        format!("{} Ghi nhớ đăng nhập", check),
        focus_style(form.focus == LoginFocus::RememberMe),
    ));
    frame.render_widget(Paragraph::new(remember), rows[5]);
}

fn draw_signup(frame: &mut Frame, app: &App) {
    let form = &app.signup;
    let inner = draw_form_box(
        frame,
        " Đăng ký ",
        " Tab chuyển ô | Enter đăng ký | Esc quay lại ",
        7,
    );
    let rows = form_rows(inner, 5);
    if rows.len() < 5 {
        return;
    }

    let name = field_line(
        frame,
        "Họ tên",
        &form.name,
        false,
        form.focus == SignupFocus::Name,
        rows[0],
    );
    frame.render_widget(Paragraph::new(name), rows[0]);
    let email = field_line(
        frame,
        "Email",
        &form.email,
        false,
        form.focus == SignupFocus::Email,
        rows[2],
    );
    frame.render_widget(Paragraph::new(email), rows[2]);
    let password = field_line(
        frame,
        "Mật khẩu",
        &form.password,
        true,
        form.focus == SignupFocus::Password,
        rows[4],
    );
    frame.render_widget(Paragraph::new(password), rows[4]);
}

fn draw_forgot(frame: &mut Frame, app: &App) {
    let inner = draw_form_box(frame, " Quên mật khẩu ", " Enter gửi liên kết | Esc quay lại ", 6);
    let rows = form_rows(inner, 3);
    if rows.len() < 3 {
        return;
    }
    frame.render_widget(
        Paragraph::new("Nhập email để nhận liên kết đặt lại mật khẩu.")
            .style(Style::default().fg(Color::DarkGray)),
        rows[0],
    );
    let email = field_line(frame, "Email", &app.forgot.email, false, true, rows[2]);
    frame.render_widget(Paragraph::new(email), rows[2]);
}

fn draw_shell(frame: &mut Frame, session: &Session) {
    let [header, content, footer] = chrome(frame.area());

    let page = session.active_item().map(|item| item.label).unwrap_or("");
    frame.render_widget(
        header_bar(format!(" BuildingHub - [{}] {} ", session.role.label(), page)),
        header,
    );

    pages::draw_view(frame, &session.view, content);

    if session.shell.is_open() {
        draw_sidebar(frame, session, content);
        frame.render_widget(footer_bar(" ↑/↓ chọn | Enter mở | Esc/m đóng menu "), footer);
    } else {
        frame.render_widget(footer_bar(pages::hints(&session.view)), footer);
    }
}

/// The sidebar, drawn over the left of the content.
fn draw_sidebar(frame: &mut Frame, session: &Session, content: Rect) {
    let area = Rect {
        width: content.width.min(32),
        ..content
    };
    let active = session.active_item().map(|item| item.id);
    let cursor = session.shell.selected().map(|item| item.id);

    let mut items = Vec::new();
    for (i, group) in session.shell.visible_groups().into_iter().enumerate() {
        if i > 0 {
            items.push(ListItem::new("─".repeat(area.width.saturating_sub(2) as usize))
                .style(Style::default().fg(Color::DarkGray)));
        }
        for item in group {
            let mut style = Style::default();
            if Some(item.id) == active {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if item.is_logout() {
                style = style.fg(Color::Red);
            }
            if Some(item.id) == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let text = format!(" {} {}", item.icon.glyph(), item.label);
            items.push(ListItem::new(text).style(style));
        }
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", session.role.label())),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(list, area);
}

/// Recent notices stacked above the footer on the right.
fn draw_notices(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let width = area.width.min(56);
    let mut y = area.height.saturating_sub(2);
    for notice in app.notices.iter().rev().take(3) {
        if y <= area.y + 1 {
            break;
        }
        let style = match notice.level {
            NoticeLevel::Info => Style::default().bg(Color::Blue).fg(Color::White),
            NoticeLevel::Success => Style::default().bg(Color::Green).fg(Color::Black),
            NoticeLevel::Error => Style::default().bg(Color::Red).fg(Color::White),
        };
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height: 1,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(format!(" {} ", notice.message)).style(style), rect);
        y -= 1;
    }
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Thông báo ");
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Enter để đóng", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildinghub_models::Role;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_login_screen() {
        let mut app = App::new(None);
        app.login.password = TextField::with_value("abc");
        let out = render(&app);
        assert!(out.contains("Đăng nhập"));
        assert!(out.contains("Chọn loại tài khoản"));
        assert!(out.contains("•••"));
        assert!(!out.contains("abc"));

        app.login.toggle_show_password();
        assert!(render(&app).contains("abc"));
    }

    #[test]
    fn test_alert_is_drawn() {
        let mut app = App::new(None);
        app.submit_login();
        let out = render(&app);
        assert!(out.contains("Thông báo"));
    }

    #[test]
    fn test_shell_header_and_sidebar() {
        let mut app = App::new(None);
        app.sign_in(Role::Resident);
        let out = render(&app);
        assert!(out.contains("BuildingHub - [Cư dân] Quản lý căn hộ"));
        assert!(!out.contains("Tra cứu thông tin"));

        app.toggle_menu();
        let out = render(&app);
        assert!(out.contains("Tra cứu thông tin"));
        assert!(out.contains("Đăng xuất"));
    }

    #[test]
    fn test_notice_is_drawn() {
        let mut app = App::new(None);
        app.notices.error("Không thể tải danh sách cư dân");
        assert!(render(&app).contains("Không thể tải danh sách cư dân"));
    }

    #[test]
    fn test_notices_stack_newest_last() {
        let mut app = App::new(None);
        app.notices.error("thông báo một");
        app.notices.info("thông báo hai");
        app.notices.success("thông báo ba");
        app.notices.error("thông báo bốn");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let out = buffer_text(buffer);
        assert!(!out.contains("thông báo một"));
        let rows: Vec<&str> = out.lines().collect();
        let row_of = |text: &str| rows.iter().position(|r| r.contains(text)).unwrap();
        assert_eq!(row_of("thông báo bốn"), 28);
        assert_eq!(row_of("thông báo ba"), 27);
        assert_eq!(row_of("thông báo hai"), 26);

        // Notices are right-aligned; the last column carries the level colour.
        assert_eq!(buffer[(99, 27)].bg, Color::Green);
        assert_eq!(buffer[(99, 26)].bg, Color::Blue);
        assert_eq!(buffer[(99, 28)].bg, Color::Red);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = App::new(None);
        app.sign_in(Role::Admin);
        app.toggle_menu();
        app.show_alert("x");
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}

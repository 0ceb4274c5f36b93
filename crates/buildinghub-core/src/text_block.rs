//! Text-block rendering for regulation content.
//!
//! Converts a semi-structured plain-text block (numbered section headings,
//! dash-bulleted lines, plain paragraphs) into a sequence of [`TextNode`]s.
//! Parsing is lazy: nodes are produced one at a time as the caller iterates.

use std::fmt::Write as _;
use std::str::Lines;

/// Bullet markers: hyphen, en dash, em dash.
const BULLET_MARKERS: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// Characters accepted as terminal punctuation on a bullet item.
const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// A structured display node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextNode {
    /// A numbered section heading, e.g. `1. Giờ giấc sinh hoạt:`.
    Heading(String),
    /// Consecutive bullet items.
    BulletList(Vec<String>),
    /// A plain line outside any section.
    Paragraph(String),
    /// Vertical space standing in for a blank line.
    Spacer,
}

impl TextNode {
    /// The semantic text carried by this node, one entry per source line.
    pub fn text_lines(&self) -> Vec<&str> {
        match self {
            TextNode::Heading(text) | TextNode::Paragraph(text) => vec![text.as_str()],
            TextNode::BulletList(items) => items.iter().map(String::as_str).collect(),
            TextNode::Spacer => Vec::new(),
        }
    }
}

/// Lazily parse a text block.
///
/// Leading and trailing blank lines of the block are ignored. Empty input
/// yields no nodes. The input is never modified and parsing never fails:
/// anything that is not a heading or bullet becomes a paragraph.
pub fn render_text_block(text: &str) -> TextBlocks<'_> {
    TextBlocks {
        lines: text.trim().lines(),
        bullets: Vec::new(),
        inside_section: false,
        last_was_blank: false,
        pending: None,
    }
}

/// Iterator over the nodes of a text block. See [`render_text_block`].
#[derive(Debug, Clone)]
pub struct TextBlocks<'a> {
    lines: Lines<'a>,
    bullets: Vec<String>,
    /// Set after a numbered heading; unmarked lines become bullets.
    inside_section: bool,
    last_was_blank: bool,
    /// Node held back while a buffered bullet list is emitted first.
    pending: Option<TextNode>,
}

impl TextBlocks<'_> {
    fn take_bullets(&mut self) -> Option<TextNode> {
        if self.bullets.is_empty() {
            None
        } else {
            Some(TextNode::BulletList(std::mem::take(&mut self.bullets)))
        }
    }

    /// Emit `node`, flushing any buffered bullet list ahead of it.
    fn emit(&mut self, node: TextNode) -> Option<TextNode> {
        match self.take_bullets() {
            Some(list) => {
                self.pending = Some(node);
                Some(list)
            }
            None => Some(node),
        }
    }
}

impl Iterator for TextBlocks<'_> {
    type Item = TextNode;

    fn next(&mut self) -> Option<TextNode> {
        if let Some(node) = self.pending.take() {
            return Some(node);
        }

        loop {
            let Some(raw) = self.lines.next() else {
                return self.take_bullets();
            };
            let line = raw.trim();

            if line.is_empty() {
                // A run of blank lines is a single break.
                if self.last_was_blank {
                    continue;
                }
                self.last_was_blank = true;
                return self.emit(TextNode::Spacer);
            }
            self.last_was_blank = false;

            if is_heading(line) {
                self.inside_section = true;
                return self.emit(TextNode::Heading(line.to_string()));
            }

            if let Some(item) = strip_bullet_marker(line) {
                self.bullets.push(ensure_terminal_punctuation(item));
                continue;
            }

            if self.inside_section {
                self.bullets.push(ensure_terminal_punctuation(line));
                continue;
            }

            return self.emit(TextNode::Paragraph(line.to_string()));
        }
    }
}

impl std::iter::FusedIterator for TextBlocks<'_> {}

/// A line starting with one or more ASCII digits followed by a period.
fn is_heading(line: &str) -> bool {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && line.as_bytes().get(digits) == Some(&b'.')
}

/// Strip a leading bullet marker that is followed by whitespace.
fn strip_bullet_marker(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let marker = chars.next()?;
    if !BULLET_MARKERS.contains(&marker) {
        return None;
    }
    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// Append a period unless the text already ends with `.`, `!` or `?`.
fn ensure_terminal_punctuation(text: &str) -> String {
    if text.ends_with(TERMINAL_PUNCTUATION) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

/// Render nodes as indented plain text, one node per line group.
pub fn to_plain_text<I>(nodes: I) -> String
where
    I: IntoIterator<Item = TextNode>,
{
    let mut out = String::new();
    for node in nodes {
        match node {
            TextNode::Heading(text) | TextNode::Paragraph(text) => {
                let _ = writeln!(out, "{}", text);
            }
            TextNode::BulletList(items) => {
                for item in items {
                    let _ = writeln!(out, "  \u{2022} {}", item);
                }
            }
            TextNode::Spacer => out.push('\n'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(text: &str) -> Vec<TextNode> {
        render_text_block(text).collect()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(nodes("").is_empty());
        assert!(nodes("   \n\n  \t\n").is_empty());
    }

    #[test]
    fn test_numbered_heading() {
        assert_eq!(
            nodes("1. Giờ giấc sinh hoạt:"),
            vec![TextNode::Heading("1. Giờ giấc sinh hoạt:".into())]
        );
    }

    #[test]
    fn test_bullet_after_heading_gets_period() {
        assert_eq!(
            nodes("1. Thang máy:\n- Không hút thuốc"),
            vec![
                TextNode::Heading("1. Thang máy:".into()),
                TextNode::BulletList(vec!["Không hút thuốc.".into()]),
            ]
        );
    }

    #[test]
    fn test_existing_punctuation_kept() {
        assert_eq!(
            nodes("- Đã có dấu chấm.\n- Cảnh báo!\n- Hỏi?"),
            vec![TextNode::BulletList(vec![
                "Đã có dấu chấm.".into(),
                "Cảnh báo!".into(),
                "Hỏi?".into(),
            ])]
        );
    }

    #[test]
    fn test_en_and_em_dash_markers() {
        assert_eq!(
            nodes("\u{2013} một\n\u{2014}  hai"),
            vec![TextNode::BulletList(vec!["một.".into(), "hai.".into()])]
        );
    }

    #[test]
    fn test_marker_without_whitespace_is_not_a_bullet() {
        assert_eq!(nodes("-5 độ"), vec![TextNode::Paragraph("-5 độ".into())]);
    }

    #[test]
    fn test_inside_section_auto_bullets() {
        assert_eq!(
            nodes("2. Camera:\nLắp đặt tại khu vực chung\nDữ liệu lưu 30 ngày."),
            vec![
                TextNode::Heading("2. Camera:".into()),
                TextNode::BulletList(vec![
                    "Lắp đặt tại khu vực chung.".into(),
                    "Dữ liệu lưu 30 ngày.".into(),
                ]),
            ]
        );
    }

    #[test]
    fn test_paragraph_flushes_bullets() {
        assert_eq!(
            nodes("- một\nĐoạn văn"),
            vec![
                TextNode::BulletList(vec!["một.".into()]),
                TextNode::Paragraph("Đoạn văn".into()),
            ]
        );
    }

    #[test]
    fn test_blank_line_flushes_and_emits_spacer_without_leaving_section() {
        assert_eq!(
            nodes("1. A:\n- x\n\n\n\ny"),
            vec![
                TextNode::Heading("1. A:".into()),
                TextNode::BulletList(vec!["x.".into()]),
                TextNode::Spacer,
                TextNode::BulletList(vec!["y.".into()]),
            ]
        );
    }

    #[test]
    fn test_heading_requires_period_after_digits() {
        assert_eq!(nodes("2025 là năm"), vec![TextNode::Paragraph("2025 là năm".into())]);
        assert_eq!(nodes("12.Tiêu đề"), vec![TextNode::Heading("12.Tiêu đề".into())]);
    }

    #[test]
    fn test_every_line_appears_exactly_once() {
        let input = "Lời mở đầu\n1. Một:\n   - a\n   b!\n\n2. Hai:\n   – c\nd\n\n   ";
        let expected = ["Lời mở đầu", "1. Một:", "a.", "b!", "2. Hai:", "c.", "d."];

        let produced: Vec<String> = render_text_block(input)
            .flat_map(|n| n.text_lines().into_iter().map(str::to_string).collect::<Vec<_>>())
            .collect();
        assert_eq!(produced, expected);
    }

    #[test]
    fn test_pure_and_repeatable() {
        let input = "1. A:\n- x\nB";
        let first: Vec<_> = render_text_block(input).collect();
        let second: Vec<_> = render_text_block(input).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut blocks = render_text_block("- x");
        assert!(blocks.next().is_some());
        assert!(blocks.next().is_none());
        assert!(blocks.next().is_none());
    }

    #[test]
    fn test_regulation_catalog_renders_three_sections_each() {
        for regulation in buildinghub_models::REGULATIONS {
            let rendered: Vec<_> = render_text_block(regulation.content).collect();
            let headings = rendered.iter().filter(|n| matches!(n, TextNode::Heading(_))).count();
            assert_eq!(headings, 3, "{}", regulation.title);
            assert!(!rendered.iter().any(|n| matches!(n, TextNode::Paragraph(_))));
        }
    }

    #[test]
    fn test_to_plain_text() {
        let text = to_plain_text(render_text_block("1. A:\n- x\n\nB"));
        assert_eq!(text, "1. A:\n  \u{2022} x.\n\n  \u{2022} B.\n");
    }
}

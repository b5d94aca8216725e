//! Pure view functions.
//!
//! Everything here takes `&AppState` and draws to a ratatui `Frame`. No
//! mutations, no effects.

use goldgpt_core::api::{ChartPayload, ImagePayload, Message};
use goldgpt_core::session::relative_label;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::state::{AppState, Focus, WELCOME_SUGGESTIONS};
use crate::text::{sanitize_for_display, truncate_with_ellipsis, wrap_text};

const SIDEBAR_WIDTH: u16 = 32;
const HEADER_HEIGHT: u16 = 1;
const ERROR_HEIGHT: u16 = 4;
const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Sidebar rows above the first history entry.
const SIDEBAR_HEADER_ROWS: usize = 2;
const SIDEBAR_ROWS_PER_ENTRY: usize = 2;

/// Horizontal padding on each side of the transcript.
const TRANSCRIPT_MARGIN: u16 = 1;

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 3;

const GOLD: Color = Color::Yellow;

pub const LOADING_TEXT: &str = "GoldGPT is analyzing...";

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let main = if app.sidebar.open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(area);
        render_sidebar(app, frame, columns[0]);
        columns[1]
    } else {
        area
    };

    let error_height = if app.session.error.is_some() {
        ERROR_HEIGHT
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(error_height),
            Constraint::Min(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(main);

    render_header(app, frame, rows[0]);
    if let Some(error) = &app.session.error {
        render_error(error, frame, rows[1]);
    }
    render_transcript(app, frame, rows[2]);
    render_input(app, frame, rows[3]);
    render_status(app, frame, rows[4]);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " GoldGPT",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.session.base_url),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_error(error: &str, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ");
    let paragraph = Paragraph::new(sanitize_for_display(error).into_owned())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Sidebar;
    let border_color = if focused { GOLD } else { Color::DarkGray };
    let title = if app.session.history.is_placeholder() {
        " History (offline) "
    } else {
        " History "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let lines = sidebar_lines(app, inner_width);
    let offset = sidebar_scroll(app.sidebar.selected, inner_height);
    frame.render_widget(
        Paragraph::new(lines).scroll((offset, 0)).block(block),
        area,
    );
}

/// First sidebar row to draw so the selected entry stays in view.
pub fn sidebar_scroll(selected: usize, height: usize) -> u16 {
    let bottom = SIDEBAR_HEADER_ROWS + (selected + 1) * SIDEBAR_ROWS_PER_ENTRY;
    u16::try_from(bottom.saturating_sub(height)).unwrap_or(u16::MAX)
}

/// Sidebar content: "New chat" hint, then two lines per history entry.
pub fn sidebar_lines(app: &AppState, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis("+ New chat (Ctrl+N)", width),
            Style::default().fg(GOLD),
        )),
        Line::from(""),
    ];

    let active = app.session.session_id.as_deref();
    for (index, entry) in app.session.history.entries().iter().enumerate() {
        let selected = app.focus == Focus::Sidebar && index == app.sidebar.selected;
        let mut style = Style::default();
        if active == Some(entry.id.as_str()) {
            style = style.fg(GOLD).add_modifier(Modifier::BOLD);
        }
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let marker = if selected { "› " } else { "  " };
        let title = sanitize_for_display(&entry.title);
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&format!("{marker}{title}"), width),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", relative_label(entry.timestamp, app.now)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn render_transcript(app: &AppState, frame: &mut Frame, area: Rect) {
    let area = Rect {
        x: area.x + TRANSCRIPT_MARGIN,
        width: area.width.saturating_sub(TRANSCRIPT_MARGIN * 2),
        ..area
    };
    let width = area.width as usize;
    let height = area.height as usize;

    let lines = if app.shows_welcome() {
        welcome_lines()
    } else {
        transcript_lines(&app.session.messages, width)
    };

    // Scroll is measured from the bottom so new messages stay in view.
    let total = lines.len();
    let max_offset = total.saturating_sub(height);
    let offset = (app.scroll as usize).min(max_offset);
    let start = max_offset - offset;
    let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(height).collect();

    frame.render_widget(Paragraph::new(visible), area);
}

fn welcome_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to GoldGPT",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Ask about gold prices, investing, charts and images.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for (index, suggestion) in WELCOME_SUGGESTIONS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", index + 1), Style::default().fg(GOLD)),
            Span::raw(*suggestion),
        ]));
    }
    lines
}

/// Transcript rendered to wrapped lines, oldest first.
pub fn transcript_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in messages {
        let (label, color) = if message.is_user() {
            ("You", Color::Cyan)
        } else {
            ("GoldGPT", GOLD)
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        for line in wrap_text(&sanitize_for_display(&message.content), width) {
            lines.push(Line::from(line));
        }
        if let Some(chart) = &message.chart {
            lines.extend(chart_lines(chart, width));
        }
        if let Some(image) = &message.image {
            lines.extend(image_lines(image, width));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn chart_lines(chart: &ChartPayload, width: usize) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Green);
    let mut lines = vec![Line::from(Span::styled(
        truncate_with_ellipsis(&format!("📊 {}", chart.display_title()), width),
        style,
    ))];
    if let Some((x, y)) = chart.latest() {
        let axis = chart.yaxis_title.as_deref().unwrap_or("value");
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(
                &format!("   latest {x}: {y:.2} ({axis}, {} points)", chart.y.len()),
                width,
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn image_lines(image: &ImagePayload, width: usize) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Magenta);
    let prompt = image.display_prompt().unwrap_or("Generated image");
    let mut lines = vec![Line::from(Span::styled(
        truncate_with_ellipsis(&format!("🖼 {}", sanitize_for_display(prompt)), width),
        style,
    ))];
    if let Some(location) = image.url.as_deref().or(image.filename.as_deref()) {
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&format!("   {location}"), width),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn render_input(app: &AppState, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border_color = if focused { GOLD } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_column = app.input.cursor_column();
    // Horizontal scroll keeps the cursor visible on long input.
    let skip = cursor_column.saturating_sub(inner_width.saturating_sub(1));

    let (text, style) = if app.input.is_empty() {
        (
            "Ask about gold prices, investments, or request a chart...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (skip_columns(app.input.text(), skip), Style::default())
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text, style))).block(block);
    frame.render_widget(paragraph, area);

    if focused {
        let x = area.x + 1 + (cursor_column - skip) as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

/// Drops leading characters until `columns` display columns are skipped.
fn skip_columns(text: &str, columns: usize) -> String {
    let mut skipped = 0;
    let mut out = String::new();
    for ch in text.chars() {
        if skipped < columns {
            skipped += ch.to_string().width();
            continue;
        }
        out.push(ch);
    }
    out
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    let left = if app.session.is_loading() {
        let index = (app.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
        vec![
            Span::styled(
                format!(" {} ", SPINNER_FRAMES[index]),
                Style::default().fg(GOLD),
            ),
            Span::styled(LOADING_TEXT, Style::default().fg(GOLD)),
        ]
    } else {
        vec![Span::styled(
            " Enter send · Ctrl+N new · Ctrl+B sidebar · Tab focus · Esc quit",
            Style::default().fg(Color::DarkGray),
        )]
    };

    let session = app
        .session
        .session_id
        .as_deref()
        .map_or_else(|| "new chat".to_string(), |id| format!("session {id}"));

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(session.width() as u16 + 1)])
        .split(area);
    frame.render_widget(Paragraph::new(Line::from(left)), columns[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(session, Style::default().fg(Color::DarkGray))),
        columns[1],
    );
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use goldgpt_core::api::{HistoryMap, HistorySummary};
    use goldgpt_core::session::{PendingSend, TaskId};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn empty_conversation_shows_welcome_suggestions() {
        let app = AppState::new("http://127.0.0.1:5003", false);
        let screen = draw(&app);
        assert!(screen.contains("Welcome to GoldGPT"));
        for suggestion in WELCOME_SUGGESTIONS {
            assert!(screen.contains(suggestion), "missing {suggestion}");
        }
    }

    #[test]
    fn loading_shows_analyzing_status() {
        let mut app = AppState::new("http://127.0.0.1:5003", false);
        app.session.messages.push(Message::user("Hello"));
        app.session.pending_send = Some(PendingSend {
            task: TaskId(0),
            epoch: 0,
            transcript: app.session.messages.clone(),
        });

        let screen = draw(&app);
        assert!(screen.contains(LOADING_TEXT));
        assert!(screen.contains("Hello"));
    }

    #[test]
    fn error_banner_is_rendered() {
        let mut app = AppState::new("http://127.0.0.1:5003", true);
        app.session.error = Some("Failed to send message.".to_string());
        assert!(draw(&app).contains("Failed to send message."));
    }

    #[test]
    fn chart_and_image_get_summary_lines() {
        let mut message = Message::assistant("Here you go");
        message.chart = Some(ChartPayload {
            x: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            y: vec![2050.0, 2061.5],
            title: Some("Gold Price".to_string()),
            ..ChartPayload::default()
        });
        message.image = Some(ImagePayload {
            url: Some("/static/images/gold.png".to_string()),
            prompt: Some("a gold bar".to_string()),
            ..ImagePayload::default()
        });

        let lines: Vec<String> = transcript_lines(&[message], 80)
            .iter()
            .map(line_text)
            .collect();

        assert!(lines.contains(&"📊 Gold Price".to_string()));
        assert!(lines.iter().any(|l| l.contains("2024-01-02: 2061.50")));
        assert!(lines.contains(&"🖼 a gold bar".to_string()));
        assert!(lines.contains(&"   /static/images/gold.png".to_string()));
    }

    #[test]
    fn sidebar_marks_placeholder_history() {
        let mut app = AppState::new("http://127.0.0.1:5003", true);
        app.session.history.use_placeholders(app.now);
        let lines: Vec<String> = sidebar_lines(&app, 30).iter().map(line_text).collect();

        assert!(lines.iter().any(|l| l.contains("Gold Investment Strategy")));
        assert!(lines.iter().any(|l| l.contains("Yesterday")));
        assert!(draw(&app).contains("History (offline)"));
    }

    #[test]
    fn sidebar_follows_selection_below_the_fold() {
        let mut app = AppState::new("http://127.0.0.1:5003", true);
        let history: HistoryMap = (0..30_i64)
            .map(|i| {
                (
                    format!("s{i}"),
                    HistorySummary {
                        title: format!("Session{i}"),
                        timestamp: Some(app.now - Duration::hours(i)),
                    },
                )
            })
            .collect();
        app.session.history.replace(history);
        app.focus = Focus::Sidebar;
        app.sidebar.selected = 25;

        let screen = draw(&app);
        assert!(screen.contains("› Session25"), "selected entry not on screen");
        assert!(!screen.contains("Session0 "));
    }

    #[test]
    fn sidebar_scroll_is_zero_while_selection_fits() {
        assert_eq!(sidebar_scroll(0, 28), 0);
        assert_eq!(sidebar_scroll(12, 28), 0);
        assert_eq!(sidebar_scroll(13, 28), 2);
    }

    #[test]
    fn skip_columns_drops_prefix() {
        assert_eq!(skip_columns("abcdef", 2), "cdef");
        assert_eq!(skip_columns("abc", 0), "abc");
    }
}

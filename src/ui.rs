use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, BorderType, Borders, Clear, Gauge, Paragraph, Tabs, Wrap},
    Frame,
};
use std::{ops::Range, time::Instant};

use crate::{
    app::{ActiveView, App, EditTarget, InputMode},
    collection::{BoundedCollection, CollectionKind, Discipline},
    themes::Theme,
    version,
};

/// Width of one stack cell, in columns
const STACK_CELL_WIDTH: usize = 12;

/// Width of one queue cell including its gap, in columns
const QUEUE_CELL_WIDTH: usize = 12;

/// Width of a notice toast
const TOAST_WIDTH: u16 = 40;

const PENDING_LABEL: &str = "✖ deleting";

/// Shorten `text` to `keep` characters plus an ellipsis once it is longer
/// than `max` characters.
pub fn truncate_token(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Which queue elements fit in `fit` cells.
///
/// The newest elements are followed, except while the front is being removed,
/// so the removal stays on screen.
fn queue_window(len: usize, fit: usize, pending: bool) -> Range<usize> {
    if len <= fit {
        0..len
    } else if pending {
        0..fit
    } else {
        len - fit..len
    }
}

/// Which stack elements fit in `rows` rows; the top is always followed.
fn stack_window(len: usize, rows: usize) -> Range<usize> {
    len.saturating_sub(rows)..len
}

// Helper function to create aligned label-value pairs
fn create_aligned_field<'a>(
    label: &'a str,
    value: String,
    label_width: usize,
    theme: &'a Theme,
) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:width$}", label, width = label_width),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}

fn element_style(theme: &Theme, pending: bool) -> Style {
    if pending {
        Style::default()
            .fg(theme.element_pending_fg)
            .bg(theme.element_pending_bg)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default()
            .fg(theme.element_fg)
            .bg(theme.element_bg)
            .add_modifier(Modifier::BOLD)
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Active visualizer
            Constraint::Length(3), // Input
            Constraint::Length(1), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_tabs(f, chunks[1], app);

    if app.show_help {
        render_help(f, chunks[2], app);
    } else {
        match app.active_view {
            ActiveView::Stack => render_stack(f, chunks[2], app),
            ActiveView::Queue => render_queue(f, chunks[2], app),
            ActiveView::List => render_linked_list(f, chunks[2], app),
        }
    }

    render_input(f, chunks[3], app);
    render_key_hints(f, chunks[4], app);
    render_notices(f, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let header_content = vec![
        Line::from(vec![
            Span::styled(
                "Data Structure Visualizer",
                Style::default()
                    .fg(theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", version::get_version()),
                Style::default()
                    .fg(theme.text_accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![Span::styled(
            format!(
                "Built: {} | Git: {}",
                version::get_build_time(),
                version::get_git_hash()
            ),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::ITALIC),
        )]),
    ];

    let header = Paragraph::new(header_content)
        .style(Style::default().bg(theme.header_bg))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border_normal)),
        );

    f.render_widget(header, area);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<Line> = ActiveView::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.display_name())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .style(Style::default().fg(theme.text_secondary).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Data Structures - Tab to switch")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border_normal)),
        );

    f.render_widget(tabs, area);
}

fn render_stack(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let stack = &app.stack.collection;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),                           // Index column
            Constraint::Length(STACK_CELL_WIDTH as u16 + 2), // Stack body
            Constraint::Length(2),                           // Gap
            Constraint::Min(24),                             // Status
        ])
        .split(area);

    // Open at the top like a physical stack
    let body_block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.background));
    let rows = body_block.inner(chunks[1]).height as usize;

    let window = stack_window(stack.len(), rows);
    let padding = rows.saturating_sub(window.len());
    let pending_index = stack.pending_index();

    let mut element_lines: Vec<Line> = vec![Line::from(""); padding];
    let mut index_lines: Vec<Line> = vec![Line::from(""); padding];

    // Top of the stack first
    for index in window.rev() {
        let pending = pending_index == Some(index);
        let (text, index_text) = if pending {
            (PENDING_LABEL.to_string(), "✖".to_string())
        } else {
            let token = stack.items()[index].as_str();
            (truncate_token(token, 8, 8), index.to_string())
        };

        element_lines.push(Line::from(Span::styled(
            format!("{:^width$}", text, width = STACK_CELL_WIDTH),
            element_style(theme, pending),
        )));

        let index_style = if pending {
            Style::default().fg(theme.element_pending_fg)
        } else {
            Style::default().fg(theme.index_text)
        };
        index_lines.push(Line::from(Span::styled(index_text, index_style)));
    }

    let index_area = Rect {
        height: rows as u16,
        ..chunks[0]
    };
    f.render_widget(
        Paragraph::new(index_lines)
            .alignment(Alignment::Right)
            .style(Style::default().bg(theme.background)),
        index_area,
    );
    f.render_widget(
        Paragraph::new(element_lines)
            .alignment(Alignment::Center)
            .block(body_block),
        chunks[1],
    );

    render_collection_status(f, chunks[3], app, stack);
}

fn render_queue(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let queue = &app.queue.collection;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Queue body
            Constraint::Length(1), // Index row
            Constraint::Min(6),    // Status
        ])
        .split(area);

    let body_block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .title("back ◀")
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.background));
    let inner_width = body_block.inner(chunks[0]).width as usize;
    let fit = (inner_width / QUEUE_CELL_WIDTH).max(1);

    let pending_index = queue.pending_index();
    let window = queue_window(queue.len(), fit, pending_index.is_some());

    let mut element_spans = Vec::new();
    let mut index_spans = Vec::new();

    // Back on the left, front on the right
    for index in window.rev() {
        let pending = pending_index == Some(index);
        let (text, index_text) = if pending {
            (PENDING_LABEL.to_string(), "✖".to_string())
        } else {
            let token = queue.items()[index].as_str();
            (truncate_token(token, 10, 9), index.to_string())
        };

        element_spans.push(Span::styled(
            format!("{:^width$}", text, width = QUEUE_CELL_WIDTH - 1),
            element_style(theme, pending),
        ));
        element_spans.push(Span::raw(" "));

        let index_style = if pending {
            Style::default().fg(theme.element_pending_fg)
        } else {
            Style::default().fg(theme.index_text)
        };
        index_spans.push(Span::styled(
            format!("{:^width$}", index_text, width = QUEUE_CELL_WIDTH - 1),
            index_style,
        ));
        index_spans.push(Span::raw(" "));
    }

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(element_spans),
        Line::from(""),
    ])
    .alignment(Alignment::Right)
    .block(body_block.title(Title::from("▶ front").alignment(Alignment::Right)));
    f.render_widget(body, chunks[0]);

    f.render_widget(
        Paragraph::new(Line::from(index_spans))
            .alignment(Alignment::Right)
            .style(Style::default().bg(theme.background)),
        chunks[1],
    );

    render_collection_status(f, chunks[2], app, queue);
}

fn render_collection_status<D: Discipline>(
    f: &mut Frame,
    area: Rect,
    app: &App,
    collection: &BoundedCollection<D>,
) {
    let theme = &app.theme;
    let kind = collection.kind();
    const LABEL_WIDTH: usize = 12;

    let state_span = if collection.is_full() {
        Span::styled("Full", Style::default().fg(theme.status_full))
    } else if collection.is_empty() {
        Span::styled("Empty", Style::default().fg(theme.status_empty))
    } else {
        Span::styled("Ready", Style::default().fg(theme.text_accent))
    };

    let mut lines = vec![
        create_aligned_field(
            "Capacity: ",
            collection.capacity().to_string(),
            LABEL_WIDTH,
            theme,
        ),
        create_aligned_field("Size: ", collection.len().to_string(), LABEL_WIDTH, theme),
        Line::from(vec![
            Span::styled(
                format!("{:width$}", "State: ", width = LABEL_WIDTH),
                Style::default().fg(theme.text_secondary),
            ),
            state_span,
        ]),
        create_aligned_field(
            match kind {
                CollectionKind::Stack => "Top: ",
                CollectionKind::Queue => "Front: ",
            },
            collection
                .peek()
                .map(|token| token.to_string())
                .unwrap_or_else(|_| "-".to_string()),
            LABEL_WIDTH,
            theme,
        ),
        create_aligned_field(
            "Removing: ",
            collection
                .pending_token()
                .map(|token| token.to_string())
                .unwrap_or_else(|| "-".to_string()),
            LABEL_WIDTH,
            theme,
        ),
    ];

    if collection.pending().is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Resizing clears all elements",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.text_primary).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} Status", kind))
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border_normal)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chunks[0]);

    if let Some(pending) = collection.pending() {
        let progress = pending.progress(Instant::now());
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Element being {}", kind.removed_verb()))
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme.element_pending_fg)),
            )
            .gauge_style(
                Style::default()
                    .fg(theme.element_pending_fg)
                    .bg(theme.background),
            )
            .ratio(progress)
            .label(format!("{:.0}%", progress * 100.0));
        f.render_widget(gauge, chunks[1]);
    }
}

fn render_linked_list(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let list = &app.linked_list;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Singly Linked List ({} nodes)", list.len()))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.background));

    if list.is_empty() {
        let hint = Paragraph::new("Press i, enter items separated by space, then Enter to generate nodes.")
            .style(Style::default().fg(theme.text_secondary))
            .alignment(Alignment::Center)
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(hint, area);
        return;
    }

    let node_style = element_style(theme, false);
    let arrow_style = Style::default().fg(theme.node_arrow);

    let mut spans = Vec::with_capacity(list.len() * 2);
    for (i, node) in list.nodes().iter().enumerate() {
        spans.push(Span::styled(format!(" {} ", node), node_style));
        if i + 1 < list.len() {
            spans.push(Span::styled(" ──▶ ", arrow_style));
        }
    }

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let (title, text, editing) = match app.input_mode {
        InputMode::Normal => (
            "Input - i to type a value".to_string(),
            String::new(),
            false,
        ),
        InputMode::Editing(target) => {
            let buffer = app.edit_buffer(target);
            let title = match (target, app.active_view) {
                (EditTarget::Capacity, view) => {
                    format!("Enter the Size of {} (1-200) - Enter to apply, Esc to cancel", view.display_name())
                }
                (EditTarget::Value, ActiveView::Stack) => {
                    format!("Push({}) - Enter to push, Esc to stop", truncate_token(buffer, 12, 10))
                }
                (EditTarget::Value, ActiveView::Queue) => {
                    format!("Enqueue({}) - Enter to enqueue, Esc to stop", truncate_token(buffer, 12, 10))
                }
                (EditTarget::Value, ActiveView::List) => {
                    "Items separated by space - Enter to generate nodes, Esc to stop".to_string()
                }
            };
            (title, buffer.to_string(), true)
        }
    };

    let border_color = if editing {
        theme.input_editing
    } else {
        theme.border_normal
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    // Keep the end of long input visible
    let width = inner.width.saturating_sub(1) as usize;
    let len = text.chars().count();
    let offset = len.saturating_sub(width);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.text_primary).bg(theme.background))
        .scroll((0, offset as u16))
        .block(block);
    f.render_widget(paragraph, area);

    if editing {
        f.set_cursor(inner.x + (len - offset) as u16, inner.y);
    }
}

fn render_key_hints(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let hints = match (app.input_mode, app.active_view) {
        (InputMode::Editing(_), _) => "Enter submit | Backspace delete | Esc done | Ctrl+C quit",
        (InputMode::Normal, ActiveView::Stack) => {
            "i push | p pop | k peek | e is-empty | +/- size | s set size | h help | q quit"
        }
        (InputMode::Normal, ActiveView::Queue) => {
            "i enqueue | d dequeue | k peek | e is-empty | +/- size | s set size | h help | q quit"
        }
        (InputMode::Normal, ActiveView::List) => "i enter items | c clear | h help | q quit",
    };

    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(theme.text_secondary).bg(theme.background)),
        area,
    );
}

fn render_notices(f: &mut Frame, app: &App) {
    if app.notice_board.is_empty() {
        return;
    }
    let theme = &app.theme;
    let screen = f.size();
    let width = TOAST_WIDTH.min(screen.width);
    let x = screen.x + screen.width - width;

    // Newest on top
    let mut y = screen.y + 1;
    for toast in app.notice_board.toasts().rev() {
        if y + 3 > screen.y + screen.height {
            break;
        }
        let area = Rect {
            x,
            y,
            width,
            height: 3,
        };
        let color = theme.get_notice_color(toast.notice.level());
        let paragraph = Paragraph::new(toast.notice.to_string())
            .style(Style::default().fg(theme.text_primary).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
        y += 3;
    }
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(theme.text_accent)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Data Structure Visualizer Help",
            Style::default()
                .fg(theme.text_accent)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  Tab/Shift+Tab - Next/previous data structure"),
        Line::from("  1/2/3         - Stack / Queue / Linked List"),
        Line::from(""),
        section("Stack and Queue:"),
        Line::from("  i/Enter       - Type a value; Enter pushes or enqueues it"),
        Line::from("  p/d/Del       - Pop (stack) or dequeue (queue)"),
        Line::from("  k             - Peek at the top or front element"),
        Line::from("  e             - Check whether the collection is empty"),
        Line::from("  +/-           - Grow or shrink the size by one (clears elements)"),
        Line::from("  s             - Type a new size, 1 to 200 (clears elements)"),
        Line::from(""),
        section("Linked List:"),
        Line::from("  i/Enter       - Type items separated by spaces; Enter builds the list"),
        Line::from("  c             - Clear the list"),
        Line::from(""),
        section("General:"),
        Line::from("  Ctrl+L        - Redraw screen"),
        Line::from("  h/F1          - Show/hide this help"),
        Line::from("  q/Esc/Ctrl+C  - Quit application"),
        Line::from(""),
        section("Legend:"),
        Line::from(vec![
            Span::styled(format!(" {} ", PENDING_LABEL), element_style(theme, true)),
            Span::raw("  - Element being removed; it leaves after a short delay"),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .style(Style::default().fg(theme.text_primary).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.border_normal)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_truncate_token() {
        assert_eq!(truncate_token("short", 8, 8), "short");
        assert_eq!(truncate_token("exactly8", 8, 8), "exactly8");
        assert_eq!(truncate_token("ninechars", 8, 8), "ninechar...");
        assert_eq!(truncate_token("abcdefghijk", 10, 9), "abcdefghi...");
        assert_eq!(truncate_token("ñññññññññññ", 10, 9), "ñññññññññ...");
    }

    #[test]
    fn test_queue_window_follows_back_unless_pending() {
        assert_eq!(queue_window(3, 5, false), 0..3);
        assert_eq!(queue_window(8, 5, false), 3..8);
        assert_eq!(queue_window(8, 5, true), 0..5);
    }

    #[test]
    fn test_stack_window_follows_top() {
        assert_eq!(stack_window(3, 10), 0..3);
        assert_eq!(stack_window(12, 10), 2..12);
        assert_eq!(stack_window(0, 10), 0..0);
    }

    #[test]
    fn test_every_view_renders() {
        let mut app = App::new(&Config::default());
        app.stack.collection.push("a-very-long-token").unwrap();
        app.queue.collection.enqueue("q").unwrap();
        app.linked_list.generate_from("x y z");
        app.queue.dequeue(Instant::now());

        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        for view in ActiveView::all() {
            app.active_view = *view;
            terminal.draw(|f| ui(f, &app)).unwrap();
        }
        app.show_help = true;
        terminal.draw(|f| ui(f, &app)).unwrap();
    }
}

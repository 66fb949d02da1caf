use crate::tui::{
    highlight::{reference_lines, result_line},
    state::{AppState, PaneId},
};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = &app.theme;
    let full = f.size();

    // Clear and paint the full background to avoid artifacts after resizing.
    f.render_widget(Clear, full);
    f.render_widget(Block::default().style(Style::default().bg(theme.bg)), full);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // query input
            Constraint::Min(1),    // results | detail
            Constraint::Length(1), // status line
        ])
        .split(full);

    render_query(f, app, layout[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(layout[1]);

    render_results(f, app, main_chunks[0]);
    render_detail(f, app, main_chunks[1]);
    render_status(f, app, layout[2]);
}

fn render_query(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(app.query.as_str(), Style::default().fg(theme.fg)),
        Span::styled("█", Style::default().fg(theme.focus_border)),
    ]);
    let widget = Paragraph::new(line).block(theme.panel_block("Query"));
    f.render_widget(widget, area);
}

fn render_results(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = &app.theme;
    let title = format!("Results ({})", app.hits.len());
    let block = theme.panel_block_focus(&title, app.focus == PaneId::Results);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.hits.is_empty() {
        let empty = Paragraph::new("no matches").style(Style::default().fg(theme.panel_text));
        f.render_widget(empty, inner);
        return;
    }

    let height = inner.height as usize;
    let offset = list_offset(app.selected, app.hits.len(), height);
    let mut lines: Vec<Line> = Vec::new();
    for (i, hit) in app.hits.iter().enumerate().skip(offset).take(height) {
        let mut line = result_line(&hit.key, &hit.reference, &app.query, theme);
        line.style = if i == app.selected {
            theme.result_selected
        } else {
            theme.result_normal
        };
        lines.push(line);
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_detail(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = &app.theme;
    let title = match app.selected_hit() {
        Some(hit) => format!("Detail: {}", hit.key),
        None => "Detail".to_string(),
    };
    let block = theme.panel_block_focus(&title, app.focus == PaneId::Detail);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for reference in app.selected_references() {
        lines.extend(reference_lines(reference, theme));
    }
    let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
    let scroll = app.detail_scroll.min(max_scroll);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = &app.theme;
    let text = compose_status(
        &app.status_line(),
        "Tab focus | Ctrl-U clear | Esc quit",
        area.width as usize,
    );
    f.render_widget(Paragraph::new(text).style(theme.status), area);
}

/// Left info plus right-aligned hints. Pads by character count, not byte
/// length, so multibyte query text doesn't push the hints off screen.
fn compose_status(left: &str, hints: &str, width: usize) -> String {
    let pad = width
        .saturating_sub(left.chars().count() + hints.chars().count())
        .max(1);
    format!("{}{}{}", left, " ".repeat(pad), hints)
}

/// First visible row so the selection stays on screen.
fn list_offset(selected: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    if selected < height {
        0
    } else {
        (selected + 1 - height).min(len - height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_pad_counts_chars_not_bytes() {
        let ascii = compose_status("3 hit(s) for 'set'", "Esc quit", 40);
        assert_eq!(ascii.chars().count(), 40);

        // Same visible length as the ASCII query, despite more bytes.
        let multibyte = compose_status("3 hit(s) for 'sét'", "Esc quit", 40);
        assert_eq!(multibyte.chars().count(), 40);
        assert!(multibyte.ends_with("Esc quit"));
    }

    #[test]
    fn status_keeps_one_space_when_too_narrow() {
        let cramped = compose_status("a long left side", "long hints", 10);
        assert!(cramped.contains("a long left side long hints"));
    }

    #[test]
    fn offset_keeps_selection_visible() {
        assert_eq!(list_offset(0, 100, 10), 0);
        assert_eq!(list_offset(9, 100, 10), 0);
        assert_eq!(list_offset(10, 100, 10), 1);
        assert_eq!(list_offset(99, 100, 10), 90);
        assert_eq!(list_offset(5, 8, 10), 0);
    }
}

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::index::Reference;
use crate::tui::theme::Theme;

/// Render a result key with the matched prefix emphasized. `prefix` is always
/// a true prefix of `key` here (prefix lookup guarantees it), but the split is
/// guarded anyway so a stale query can't panic mid-redraw.
pub fn highlight_key<'a>(key: &'a str, prefix: &str, theme: &Theme) -> Line<'a> {
    if prefix.is_empty() || !key.starts_with(prefix) {
        return Line::from(Span::styled(key, Style::default().fg(theme.panel_text)));
    }
    let split = prefix.len();
    let mut spans = vec![Span::styled(&key[..split], theme.match_prefix)];
    if split < key.len() {
        spans.push(Span::styled(
            &key[split..],
            Style::default().fg(theme.panel_text),
        ));
    }
    Line::from(spans)
}

/// One result row: highlighted key, then the reference label dimmed.
pub fn result_line<'a>(
    key: &'a str,
    reference: &'a Reference,
    prefix: &str,
    theme: &Theme,
) -> Line<'a> {
    let mut line = highlight_key(key, prefix, theme);
    if reference.label != key {
        line.spans.push(Span::raw("  "));
        line.spans
            .push(Span::styled(reference.label.as_str(), theme.locator));
    }
    line
}

/// Detail-pane lines for a single reference.
pub fn reference_lines<'a>(reference: &'a Reference, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(
        reference.label.as_str(),
        Style::default().fg(theme.panel_text),
    ))];
    if let Some(scope) = reference.scope.as_deref() {
        lines.push(Line::from(vec![
            Span::raw("  scope:    "),
            Span::styled(scope, theme.scope),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw("  document: "),
        Span::styled(reference.locator.document.as_str(), theme.locator),
    ]));
    if let Some(anchor) = reference.locator.anchor.as_deref() {
        lines.push(Line::from(vec![
            Span::raw("  anchor:   "),
            Span::styled(anchor, theme.locator),
        ]));
    }
    lines.push(Line::from(""));
    lines
}

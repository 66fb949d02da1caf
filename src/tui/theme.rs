use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

#[derive(Clone, Debug)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,

    pub panel_border: Color,
    pub panel_title: Color,
    pub panel_text: Color,

    pub result_normal: Style,
    pub result_selected: Style,

    pub match_prefix: Style,
    pub scope: Style,
    pub locator: Style,
    pub status: Style,
    pub focus_border: Color,
}

impl Theme {
    pub fn default() -> Self {
        let fg = Color::White;
        let bg = Color::Black;
        let result_normal = Style::default().fg(fg).bg(bg);
        let result_selected = result_normal.add_modifier(Modifier::REVERSED);

        Self {
            bg,
            fg,

            panel_border: Color::Gray,
            panel_title: Color::White,
            panel_text: fg,

            result_normal,
            result_selected,

            match_prefix: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            scope: Style::default().fg(Color::Yellow),
            locator: Style::default().fg(Color::DarkGray),
            status: Style::default().fg(Color::Gray),
            focus_border: Color::Cyan,
        }
    }

    pub fn panel_block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(self.panel_border))
            .style(Style::default().bg(self.bg))
            .title(title)
            .title_style(Style::default().fg(self.panel_title))
    }

    pub fn panel_block_focus<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let base = self.panel_block(title);
        if !focused {
            return base;
        }
        base.border_style(Style::default().fg(self.focus_border))
    }
}

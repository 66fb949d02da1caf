use crate::index::{Reference, SymbolIndex};
use crate::tui::theme::Theme;
use std::time::Instant;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaneId {
    Results,
    Detail,
}

/// Owned snapshot of one prefix hit, so the result list survives query edits
/// without borrowing from the index.
#[derive(Clone, Debug)]
pub struct Hit {
    pub key: String,
    pub reference: Reference,
}

#[derive(Debug)]
pub struct AppState {
    pub theme: Theme,
    pub index: SymbolIndex,
    pub query: String,
    pub hits: Vec<Hit>,
    pub selected: usize,
    pub detail_scroll: u16,
    pub focus: PaneId,
    pub verbose: bool,
}

impl AppState {
    pub fn new(index: SymbolIndex, verbose: bool) -> Self {
        let mut state = Self {
            theme: Theme::default(),
            index,
            query: String::new(),
            hits: Vec::new(),
            selected: 0,
            detail_scroll: 0,
            focus: PaneId::Results,
            verbose,
        };
        state.refresh();
        state
    }

    /// Re-run the prefix lookup after a query edit.
    pub fn refresh(&mut self) {
        let t0 = Instant::now();
        self.hits = self
            .index
            .lookup_prefix(&self.query)
            .into_iter()
            .map(|(key, reference)| Hit {
                key: key.to_string(),
                reference: reference.clone(),
            })
            .collect();
        if self.selected >= self.hits.len() {
            self.selected = self.hits.len().saturating_sub(1);
        }
        self.detail_scroll = 0;
        if self.verbose {
            crate::logger::log_debug(&format!(
                "[tui] query '{}': {} hit(s) in {}us",
                self.query,
                self.hits.len(),
                t0.elapsed().as_micros()
            ));
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refresh();
        }
    }

    pub fn selected_hit(&self) -> Option<&Hit> {
        self.hits.get(self.selected)
    }

    /// Every reference for the selected key, not just the one hit row, so the
    /// detail pane shows all overloads together.
    pub fn selected_references(&self) -> Vec<&Reference> {
        match self.selected_hit() {
            Some(hit) => self.index.lookup_exact(&hit.key),
            None => Vec::new(),
        }
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.hits.is_empty() {
            return;
        }
        let len = self.hits.len() as i32;
        self.selected = (self.selected as i32 + delta).clamp(0, len - 1) as usize;
        self.detail_scroll = 0;
    }

    pub fn scroll_detail(&mut self, delta: i16) {
        let new_val = self.detail_scroll as i32 + delta as i32;
        self.detail_scroll = new_val.clamp(0, u16::MAX as i32) as u16;
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} entries | {} references | {} hit(s) for '{}'",
            self.index.len(),
            self.index.reference_count(),
            self.hits.len(),
            self.query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Record, SymbolIndex};

    fn record(key: &str, label: &str, locator: &str) -> Record {
        Record {
            key: key.to_string(),
            label: label.to_string(),
            locator: locator.to_string(),
        }
    }

    fn state() -> AppState {
        let index = SymbolIndex::from_records(vec![
            record("setOrbit", "AstroLib::Orbit::setOrbit()", "o.html#a1"),
            record(
                "setOrbit",
                "AstroLib::Orbit::setOrbit(double, double)",
                "o.html#a2",
            ),
            record("setJulianDate", "AstroLib::JulianDate::setJulianDate()", "j.html#a3"),
        ])
        .unwrap();
        AppState::new(index, false)
    }

    #[test]
    fn typing_narrows_and_clearing_restores() {
        let mut app = state();
        assert_eq!(app.hits.len(), 3);
        for c in "setO".chars() {
            app.push_char(c);
        }
        assert_eq!(app.hits.len(), 2);
        assert!(app.hits.iter().all(|h| h.key == "setOrbit"));
        app.clear_query();
        assert_eq!(app.hits.len(), 3);
    }

    #[test]
    fn selection_clamps_when_results_shrink() {
        let mut app = state();
        app.move_selection(2);
        assert_eq!(app.selected, 2);
        for c in "setOrbit".chars() {
            app.push_char(c);
        }
        assert!(app.selected < app.hits.len());
    }

    #[test]
    fn detail_covers_all_overloads_of_selected_key() {
        let mut app = state();
        for c in "setO".chars() {
            app.push_char(c);
        }
        assert_eq!(app.selected_references().len(), 2);
    }
}

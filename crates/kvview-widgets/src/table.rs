#![forbid(unsafe_code)]

//! Storage table widget.
//!
//! Renders any [`Model`] as a header line plus one line per visible row, with
//! a selection cursor that follows model updates.
//!
//! # Model updates
//!
//! [`StorageTableState`] registers a tracker with the model. The tracker only
//! records what happened; the state reconciles on the next render:
//!
//! - `DidUpdate(InvalidateAllIndices)` drops the selection and scroll offset.
//! - `DidUpdate(DontInvalidateIndices)` keeps them, clamped to the new row
//!   count.

use std::cell::Cell;
use std::rc::Rc;

use kvview_model::{Model, ModelClient, ModelEvent, ModelRole, UpdateFlag};

use crate::text::{display_width, fit, sanitize};
use crate::{Size, StatefulWidget};

/// Records model events for a [`StorageTableState`].
#[derive(Debug, Default)]
struct UpdateTracker {
    inserting: Cell<bool>,
    invalidated: Cell<bool>,
    updates: Cell<u64>,
}

impl ModelClient for UpdateTracker {
    fn on_model_event(&self, event: &ModelEvent) {
        match *event {
            ModelEvent::BeginInsertRows { .. } => self.inserting.set(true),
            ModelEvent::EndInsertRows => self.inserting.set(false),
            ModelEvent::DidUpdate(flag) => {
                self.updates.set(self.updates.get() + 1);
                if flag == UpdateFlag::InvalidateAllIndices {
                    self.invalidated.set(true);
                }
            }
        }
    }
}

/// State for a [`StorageTable`].
#[derive(Debug, Default)]
pub struct StorageTableState {
    selected: Option<usize>,
    offset: usize,
    tracker: Rc<UpdateTracker>,
}

impl StorageTableState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `model`'s updates.
    pub fn attach<M: Model>(&self, model: &M) {
        model.register_client(&self.tracker);
    }

    /// Stop following `model`. Returns whether the state was attached.
    pub fn detach<M: Model>(&self, model: &M) -> bool {
        model.unregister_client(&self.tracker)
    }

    /// Selected row, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// First visible row.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of `DidUpdate` events seen since creation.
    #[must_use]
    pub fn updates_seen(&self) -> u64 {
        self.tracker.updates.get()
    }

    /// Whether the model is between `BeginInsertRows` and `EndInsertRows`.
    #[must_use]
    pub fn is_mid_insert(&self) -> bool {
        self.tracker.inserting.get()
    }

    /// Apply recorded updates and clamp to `row_count`.
    pub fn sync(&mut self, row_count: usize) {
        if self.tracker.invalidated.replace(false) {
            self.selected = None;
            self.offset = 0;
        }
        if row_count == 0 {
            self.selected = None;
            self.offset = 0;
            return;
        }
        let last = row_count - 1;
        self.selected = self.selected.map(|row| row.min(last));
        self.offset = self.offset.min(last);
    }

    /// Select `row` (clamped), or clear the selection.
    pub fn select(&mut self, row: Option<usize>, row_count: usize) -> bool {
        let next = match row {
            Some(_) if row_count == 0 => None,
            Some(row) => Some(row.min(row_count - 1)),
            None => None,
        };
        if self.selected == next {
            return false;
        }
        #[cfg(feature = "tracing")]
        let old = self.selected;
        self.selected = next;
        #[cfg(feature = "tracing")]
        Self::log_select(old, next);
        true
    }

    /// Move the selection down one row; selects the first row if none is.
    pub fn next(&mut self, row_count: usize) -> bool {
        let row = self.selected.map_or(0, |row| row.saturating_add(1));
        self.select(Some(row), row_count)
    }

    /// Move the selection up one row; selects the first row if none is.
    pub fn previous(&mut self, row_count: usize) -> bool {
        let row = self.selected.map_or(0, |row| row.saturating_sub(1));
        self.select(Some(row), row_count)
    }

    pub fn first(&mut self, row_count: usize) -> bool {
        self.select(Some(0), row_count)
    }

    pub fn last(&mut self, row_count: usize) -> bool {
        self.select(Some(row_count.saturating_sub(1)), row_count)
    }

    /// Scroll so the selection lies within `visible` rows from the offset.
    fn ensure_visible(&mut self, visible: usize) {
        let Some(selected) = self.selected else {
            return;
        };
        if visible == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }
    }

    #[cfg(feature = "tracing")]
    fn log_select(from: Option<usize>, to: Option<usize>) {
        tracing::debug!(message = "table.select", ?from, ?to);
    }
}

/// Table view over a [`Model`].
#[derive(Debug, Clone)]
pub struct StorageTable<'a, M> {
    model: &'a M,
    key_width: Option<u16>,
    separator: &'a str,
    header: bool,
    highlight_symbol: &'a str,
    ellipsis: &'a str,
}

impl<'a, M: Model> StorageTable<'a, M> {
    #[must_use]
    pub fn new(model: &'a M) -> Self {
        Self {
            model,
            key_width: None,
            separator: " │ ",
            header: true,
            highlight_symbol: "> ",
            ellipsis: "…",
        }
    }

    /// Fix the width of the first column. By default it is sized to its
    /// widest cell, capped at half the available width.
    #[must_use]
    pub fn key_width(mut self, width: u16) -> Self {
        self.key_width = Some(width);
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    /// Show the header line.
    #[must_use]
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Marker drawn before the selected row. Other rows get the same width of
    /// padding.
    #[must_use]
    pub fn highlight_symbol(mut self, symbol: &'a str) -> Self {
        self.highlight_symbol = symbol;
        self
    }

    /// Marker for truncated cells.
    #[must_use]
    pub fn ellipsis(mut self, ellipsis: &'a str) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    fn cell_text(&self, row: usize, column: usize) -> String {
        let index = self.model.index(row as i32, column as i32);
        sanitize(&self.model.data(index, ModelRole::Display).to_string())
    }

    fn auto_key_width(&self) -> usize {
        let header = if self.header {
            display_width(&self.model.column_name(0))
        } else {
            0
        };
        (0..self.model.row_count())
            .map(|row| display_width(&self.cell_text(row, 0)))
            .fold(header, usize::max)
    }

    /// Widths for each column given `available` cells after separators.
    fn column_widths(&self, columns: usize, available: usize) -> Vec<usize> {
        if columns == 1 {
            return vec![available];
        }
        let first = match self.key_width {
            Some(width) => usize::from(width),
            None => self.auto_key_width().min(available / 2).max(1),
        }
        .min(available);

        let rest = available - first;
        let others = columns - 1;
        let mut widths = Vec::with_capacity(columns);
        widths.push(first);
        for i in 0..others {
            let extra = usize::from(i + 1 == others) * (rest % others);
            widths.push(rest / others + extra);
        }
        widths
    }

    fn line(&self, prefix: &str, cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
        let mut line = String::from(prefix);
        for (i, (text, width)) in cells.zip(widths).enumerate() {
            if i > 0 {
                line.push_str(self.separator);
            }
            line.push_str(&fit(&text, *width, self.ellipsis));
        }
        line
    }
}

impl<M: Model> StatefulWidget for StorageTable<'_, M> {
    type State = StorageTableState;

    fn render(&self, area: Size, state: &mut StorageTableState) -> Vec<String> {
        let row_count = self.model.row_count();
        state.sync(row_count);

        let columns = self.model.column_count();
        if area.is_empty() || columns == 0 {
            return Vec::new();
        }

        #[cfg(feature = "tracing")]
        let render_span = tracing::debug_span!(
            "table.render",
            rows = row_count,
            offset = tracing::field::Empty,
            selected = ?state.selected
        );
        #[cfg(feature = "tracing")]
        let _render_guard = render_span.enter();

        let width = usize::from(area.width);
        let symbol_width = display_width(self.highlight_symbol).min(width);
        let separators = display_width(self.separator) * (columns - 1);
        let available = width.saturating_sub(symbol_width + separators);
        let widths = self.column_widths(columns, available);
        let blank = " ".repeat(symbol_width);
        let symbol = fit(self.highlight_symbol, symbol_width, "");

        let mut lines = Vec::with_capacity(usize::from(area.height));
        if self.header {
            let names = (0..columns).map(|column| sanitize(&self.model.column_name(column as i32)));
            lines.push(fit(&self.line(&blank, names, &widths), width, ""));
        }

        let visible = usize::from(area.height).saturating_sub(lines.len());
        state.ensure_visible(visible);
        #[cfg(feature = "tracing")]
        render_span.record("offset", state.offset);

        let end = state.offset.saturating_add(visible).min(row_count);
        for row in state.offset..end {
            let prefix = if state.selected == Some(row) {
                &symbol
            } else {
                &blank
            };
            let cells = (0..columns).map(|column| self.cell_text(row, column));
            lines.push(fit(&self.line(prefix, cells, &widths), width, ""));
        }
        lines
    }
}

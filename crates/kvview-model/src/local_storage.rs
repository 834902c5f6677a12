#![forbid(unsafe_code)]

//! Two-column model over a local-storage snapshot.
//!
//! # Update protocol
//!
//! [`LocalStorageModel::set_items`] and [`LocalStorageModel::clear_items`]
//! both emit, in order:
//!
//! 1. `BeginInsertRows { first: n, last: n }` where `n` is the row count
//!    *before* the change,
//! 2. `EndInsertRows` after the new contents are in place,
//! 3. `DidUpdate(DontInvalidateIndices)`.
//!
//! Clients therefore never see a removal event, even when the table shrinks
//! to zero rows. Indices they hold stay usable as coordinates but must be
//! re-checked against [`Model::row_count`] before use.

use crate::entries::OrderedEntries;
use crate::index::{Column, ModelIndex, ModelRole};
use crate::model::Model;
use crate::notify::{ClientRegistry, UpdateFlag};
use crate::variant::Variant;

/// Table view of local-storage entries with `Key` and `Value` columns.
#[derive(Debug, Default)]
pub struct LocalStorageModel {
    entries: OrderedEntries,
    clients: ClientRegistry,
}

impl LocalStorageModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole table with `items`. Their order becomes row order.
    pub fn set_items(&mut self, items: OrderedEntries) {
        let previous = self.entries.len();
        self.begin_insert_rows(previous, previous);
        self.entries = items;
        self.end_insert_rows();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "model.set_items",
            previous_rows = previous,
            rows = self.entries.len()
        );

        self.did_update(UpdateFlag::DontInvalidateIndices);
    }

    /// Remove every entry.
    pub fn clear_items(&mut self) {
        let previous = self.entries.len();
        self.begin_insert_rows(previous, previous);
        self.entries.clear();
        self.end_insert_rows();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "model.clear_items", previous_rows = previous);

        self.did_update(UpdateFlag::DontInvalidateIndices);
    }

    /// Current snapshot.
    #[must_use]
    pub fn items(&self) -> &OrderedEntries {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Model for LocalStorageModel {
    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn column_count(&self) -> usize {
        Column::COUNT as usize
    }

    fn column_name(&self, column: i32) -> String {
        Column::from_index(column)
            .map(|column| column.label().to_owned())
            .unwrap_or_default()
    }

    fn index(&self, row: i32, column: i32) -> ModelIndex {
        match usize::try_from(row) {
            Ok(r) if r < self.entries.len() => ModelIndex::new(row, column),
            _ => ModelIndex::INVALID,
        }
    }

    /// # Panics
    ///
    /// Panics if `index` is valid but its row is past the current row count
    /// (a stale index kept across a replace), or if its column is neither
    /// `Key` nor `Value`. Neither can happen for an index fresh from
    /// [`Model::index`] with a storage column.
    fn data(&self, index: ModelIndex, role: ModelRole) -> Variant {
        if role != ModelRole::Display || !index.is_valid() {
            return Variant::Empty;
        }

        let row = index.row() as usize;
        let Some((key, value)) = self.entries.entry_at(row) else {
            panic!("row {row} is past the end of {} rows", self.entries.len());
        };

        match Column::from_index(index.column()) {
            Some(Column::Key) => Variant::from(key),
            Some(Column::Value) => Variant::from(value),
            None => unreachable!("column {} is not a storage column", index.column()),
        }
    }

    fn clients(&self) -> &ClientRegistry {
        &self.clients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{ModelClient, ModelEvent};
    use std::cell::RefCell;
    use std::rc::Rc;
    #[cfg(feature = "tracing")]
    use std::sync::{Arc, Mutex};
    #[cfg(feature = "tracing")]
    use tracing::Subscriber;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::Layer;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Default)]
    struct EventLog {
        events: RefCell<Vec<ModelEvent>>,
    }

    impl ModelClient for EventLog {
        fn on_model_event(&self, event: &ModelEvent) {
            self.events.borrow_mut().push(*event);
        }
    }

    fn sample() -> OrderedEntries {
        [("theme", "dark"), ("session", "abc123")]
            .into_iter()
            .collect()
    }

    fn cell(model: &LocalStorageModel, row: i32, column: Column) -> Variant {
        model.data(model.index(row, column.as_index()), ModelRole::Display)
    }

    #[test]
    fn theme_session_scenario() {
        let mut model = LocalStorageModel::new();
        model.set_items(sample());

        assert_eq!(model.row_count(), 2);
        assert_eq!(cell(&model, 0, Column::Key), Variant::from("theme"));
        assert_eq!(cell(&model, 0, Column::Value), Variant::from("dark"));
        assert_eq!(cell(&model, 1, Column::Key), Variant::from("session"));
        assert_eq!(cell(&model, 1, Column::Value), Variant::from("abc123"));

        model.clear_items();
        assert_eq!(model.row_count(), 0);
        assert!(!model.index(0, Column::Key.as_index()).is_valid());
    }

    #[test]
    fn column_names() {
        let model = LocalStorageModel::new();
        assert_eq!(model.column_name(Column::Key.as_index()), "Key");
        assert_eq!(model.column_name(Column::Value.as_index()), "Value");
        assert_eq!(model.column_name(Column::COUNT), "");
        assert_eq!(model.column_name(-1), "");
        assert_eq!(model.column_name(42), "");
        assert_eq!(model.column_count(), 2);
    }

    #[test]
    fn out_of_range_rows_are_invalid() {
        let mut model = LocalStorageModel::new();
        assert!(!model.index(0, 0).is_valid());
        model.set_items(sample());
        assert!(model.index(1, 1).is_valid());
        assert!(!model.index(2, 0).is_valid());
        assert!(!model.index(2, 1).is_valid());
        assert!(!model.index(-1, 0).is_valid());
    }

    #[test]
    fn non_display_roles_are_empty() {
        let mut model = LocalStorageModel::new();
        model.set_items(sample());
        let index = model.index(0, Column::Key.as_index());
        for role in [
            ModelRole::Edit,
            ModelRole::Tooltip,
            ModelRole::Sort,
            ModelRole::Search,
            ModelRole::TextAlignment,
        ] {
            assert_eq!(model.data(index, role), Variant::Empty);
        }
        assert_eq!(
            model.data(ModelIndex::INVALID, ModelRole::Display),
            Variant::Empty
        );
    }

    #[test]
    #[should_panic(expected = "not a storage column")]
    fn unknown_column_in_data_is_fatal() {
        let mut model = LocalStorageModel::new();
        model.set_items(sample());
        let index = model.index(0, Column::COUNT);
        assert!(index.is_valid());
        let _ = model.data(index, ModelRole::Display);
    }

    #[test]
    fn empty_value_is_displayed_as_empty_string() {
        let mut model = LocalStorageModel::new();
        model.set_items([("flag", "")].into_iter().collect());
        assert_eq!(cell(&model, 0, Column::Value), Variant::from(""));
    }

    #[test]
    fn set_items_notification_sequence() {
        let mut model = LocalStorageModel::new();
        let log = Rc::new(EventLog::default());
        model.register_client(&log);

        model.set_items(sample());
        model.set_items([("only", "one")].into_iter().collect());

        assert_eq!(
            *log.events.borrow(),
            vec![
                ModelEvent::BeginInsertRows { first: 0, last: 0 },
                ModelEvent::EndInsertRows,
                ModelEvent::DidUpdate(UpdateFlag::DontInvalidateIndices),
                ModelEvent::BeginInsertRows { first: 2, last: 2 },
                ModelEvent::EndInsertRows,
                ModelEvent::DidUpdate(UpdateFlag::DontInvalidateIndices),
            ]
        );
    }

    #[test]
    fn clear_items_signals_insert_at_old_extent() {
        let mut model = LocalStorageModel::new();
        model.set_items(sample());
        let log = Rc::new(EventLog::default());
        model.register_client(&log);

        model.clear_items();

        assert_eq!(
            *log.events.borrow(),
            vec![
                ModelEvent::BeginInsertRows { first: 2, last: 2 },
                ModelEvent::EndInsertRows,
                ModelEvent::DidUpdate(UpdateFlag::DontInvalidateIndices),
            ]
        );
        assert!(model.is_empty());
    }

    #[test]
    fn set_items_twice_is_idempotent() {
        let mut model = LocalStorageModel::new();
        model.set_items(sample());
        let first = model.items().clone();
        model.set_items(sample());
        assert_eq!(model.items(), &first);
        assert_eq!(model.row_count(), 2);
    }

    #[test]
    fn stale_index_survives_replace_as_coordinate() {
        let mut model = LocalStorageModel::new();
        model.set_items(sample());
        let held = model.index(1, Column::Value.as_index());

        model.set_items([("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect());
        assert_eq!(model.data(held, ModelRole::Display), Variant::from("2"));
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn stale_index_past_shrunk_table_panics() {
        let mut model = LocalStorageModel::new();
        model.set_items([("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect());
        let held = model.index(2, Column::Key.as_index());
        assert!(held.is_valid());

        model.set_items([("only", "one")].into_iter().collect());
        assert!(held.is_valid());
        let _ = model.data(held, ModelRole::Display);
    }

    #[test]
    fn unregistered_client_sees_nothing() {
        let mut model = LocalStorageModel::new();
        let log = Rc::new(EventLog::default());
        model.register_client(&log);
        assert!(model.unregister_client(&log));
        model.set_items(sample());
        assert!(log.events.borrow().is_empty());
    }

    #[cfg(feature = "tracing")]
    struct MessageCapture {
        messages: Arc<Mutex<Vec<String>>>,
    }

    #[cfg(feature = "tracing")]
    impl<S> Layer<S> for MessageCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            struct Msg {
                message: Option<String>,
            }
            impl tracing::field::Visit for Msg {
                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    if field.name() == "message" {
                        self.message = Some(value.to_string());
                    }
                }

                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "message" {
                        self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                    }
                }
            }
            let mut msg = Msg { message: None };
            event.record(&mut msg);
            if let Some(message) = msg.message {
                self.messages.lock().expect("capture lock").push(message);
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn tracing_events_emitted_for_replace_and_clear() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(MessageCapture {
            messages: Arc::clone(&messages),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut model = LocalStorageModel::new();
        model.set_items(sample());
        model.clear_items();

        let seen = messages.lock().expect("capture lock");
        assert!(seen.iter().any(|m| m == "model.set_items"));
        assert!(seen.iter().any(|m| m == "model.clear_items"));
    }
}

#![forbid(unsafe_code)]

//! The row/column interface consumed by renderers.

use std::rc::Rc;

use crate::index::{ModelIndex, ModelRole};
use crate::notify::{ClientRegistry, ModelClient, ModelEvent, UpdateFlag};
use crate::variant::Variant;

/// A table of cells addressed by `(row, column)`.
///
/// Implementors supply the data queries and a [`ClientRegistry`]; the
/// notification helpers are provided.
pub trait Model {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Header label for `column`. Unknown columns yield an empty string.
    fn column_name(&self, column: i32) -> String;

    /// Resolve a cell. Rows at or past [`row_count`](Model::row_count) yield
    /// [`ModelIndex::INVALID`].
    fn index(&self, row: i32, column: i32) -> ModelIndex;

    /// Value of the cell at `index` for `role`.
    fn data(&self, index: ModelIndex, role: ModelRole) -> Variant;

    /// Registry of display clients.
    fn clients(&self) -> &ClientRegistry;

    /// Subscribe a display client to this model's events.
    fn register_client<C: ModelClient + 'static>(&self, client: &Rc<C>)
    where
        Self: Sized,
    {
        self.clients().register(client);
    }

    fn unregister_client<C: ModelClient + 'static>(&self, client: &Rc<C>) -> bool
    where
        Self: Sized,
    {
        self.clients().unregister(client)
    }

    fn begin_insert_rows(&self, first: usize, last: usize) {
        self.clients()
            .notify(&ModelEvent::BeginInsertRows { first, last });
    }

    fn end_insert_rows(&self) {
        self.clients().notify(&ModelEvent::EndInsertRows);
    }

    fn did_update(&self, flag: UpdateFlag) {
        self.clients().notify(&ModelEvent::DidUpdate(flag));
    }
}

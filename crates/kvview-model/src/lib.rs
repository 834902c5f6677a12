#![forbid(unsafe_code)]

//! Ordered key/value table model for kvview.
//!
//! The crate exposes a snapshot of key/value entries (typically a browser's
//! local storage) as rows and columns for a table widget:
//!
//! - [`OrderedEntries`]: insertion-ordered, unique-key string mapping.
//! - [`Model`]: the narrow row/column interface a renderer consumes.
//! - [`LocalStorageModel`]: the concrete two-column model (`Key`, `Value`).
//! - [`ClientRegistry`] / [`ModelClient`]: change notifications delivered to
//!   display layers.
//! - [`SnapshotSource`]: upstream producers of full snapshots.
//!
//! # Execution model
//!
//! Everything here is single-threaded and synchronous. Clients are held as
//! `Weak<dyn ModelClient>` behind `Rc`, so the model is `!Send`/`!Sync`; a
//! multithreaded host must guard the model and any live [`ModelIndex`] values
//! with a single mutex held across a read or a replace.

pub mod entries;
pub mod error;
pub mod index;
pub mod local_storage;
pub mod model;
pub mod notify;
pub mod snapshot;
pub mod variant;

pub use entries::OrderedEntries;
pub use error::{Result, SnapshotError};
pub use index::{Column, ModelIndex, ModelRole};
pub use local_storage::LocalStorageModel;
pub use model::Model;
pub use notify::{ClientRegistry, ModelClient, ModelEvent, UpdateFlag};
pub use snapshot::SnapshotSource;
#[cfg(feature = "serde")]
pub use snapshot::{JsonFileSource, SnapshotOptions};
pub use variant::Variant;

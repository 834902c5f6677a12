#![forbid(unsafe_code)]

//! Text widgets for kvview models.
//!
//! Widgets render into plain lines of text, one `String` per terminal row,
//! each exactly `width` cells wide.

pub mod table;
pub mod text;

pub use table::{StorageTable, StorageTableState};

/// Size of the area a widget renders into, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A widget that keeps state between renders.
pub trait StatefulWidget {
    type State;

    /// Render into `area`, returning at most `area.height` lines.
    fn render(&self, area: Size, state: &mut Self::State) -> Vec<String>;
}

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use kvview_model::{JsonFileSource, LocalStorageModel, Model, SnapshotOptions};
use kvview_widgets::{Size, StatefulWidget, StorageTable, StorageTableState};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// JSON object mapping storage keys to values.
    pub file: PathBuf,

    /// Table width in columns.
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Maximum lines to print, header included. Defaults to every row.
    #[arg(long)]
    pub height: Option<u16>,

    /// Fixed width of the key column.
    #[arg(long)]
    pub key_width: Option<u16>,

    /// Omit the header line.
    #[arg(long)]
    pub no_header: bool,

    /// Reject snapshots that repeat a key.
    #[arg(long)]
    pub strict: bool,

    /// Reject non-string values instead of stringifying them.
    #[arg(long)]
    pub no_coerce: bool,

    /// Highlight this row (zero-based); the view scrolls to it.
    #[arg(long)]
    pub select: Option<usize>,
}

impl ShowArgs {
    fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            strict: self.strict,
            coerce_scalars: !self.no_coerce,
        }
    }
}

pub fn run_show<W: Write>(args: &ShowArgs, out: &mut W) -> Result<()> {
    if args.width == 0 {
        return Err(CliError::invalid("--width must be at least 1"));
    }
    if args.height == Some(0) {
        return Err(CliError::invalid("--height must be at least 1"));
    }

    let source = JsonFileSource::new(&args.file).with_options(args.snapshot_options());
    let mut model = LocalStorageModel::new();
    let mut state = StorageTableState::new();
    state.attach(&model);
    model.load(&source)?;
    tracing::info!(
        path = %args.file.display(),
        rows = model.row_count(),
        "snapshot loaded"
    );

    if let Some(row) = args.select {
        state.select(Some(row), model.row_count());
    }

    let header_lines = usize::from(!args.no_header);
    let height = args.height.unwrap_or_else(|| {
        u16::try_from(model.row_count() + header_lines).unwrap_or(u16::MAX)
    });
    if height == 0 {
        return Ok(());
    }

    let mut table = StorageTable::new(&model)
        .header(!args.no_header)
        .highlight_symbol(if args.select.is_some() { "> " } else { "" });
    if let Some(width) = args.key_width {
        table = table.key_width(width);
    }

    for line in table.render(Size::new(args.width, height), &mut state) {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

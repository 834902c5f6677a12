use std::io::Write;

use clap::{Parser, Subcommand};
use kvview_model::{LocalStorageModel, Model};

use crate::error::Result;
use crate::logging;
use crate::show::{ShowArgs, run_show};

#[derive(Debug, Parser)]
#[command(
    name = "kvview",
    about = "Inspect local-storage snapshots as a key/value table",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a JSON snapshot file as a table.
    Show(ShowArgs),

    /// Print the table's column names.
    Columns,
}

pub fn run_from_env() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Show(args) => run_show(&args, &mut out),
        Commands::Columns => print_columns(&mut out),
    }
}

pub fn print_columns<W: Write>(out: &mut W) -> Result<()> {
    let model = LocalStorageModel::new();
    for column in 0..model.column_count() {
        writeln!(out, "{}", model.column_name(column as i32))?;
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::aggregate::Takeoff;
use crate::error::TakeoffError;
use crate::model::{Item, Subitem};

pub const ITEMS_FILE: &str = "monday_items.csv";
pub const SUBITEMS_FILE: &str = "monday_subitems.csv";

/// Paths of the tables actually written. A table with no rows is not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportPaths {
    pub items: Option<PathBuf>,
    pub subitems: Option<PathBuf>,
}

/// Write both tables into `out_dir`, creating it if absent.
pub fn write_takeoff(out_dir: &Path, takeoff: &Takeoff) -> Result<ExportPaths, TakeoffError> {
    std::fs::create_dir_all(out_dir)?;
    let mut paths = ExportPaths::default();

    if !takeoff.items.is_empty() {
        let path = out_dir.join(ITEMS_FILE);
        write_items(&path, &takeoff.items)?;
        paths.items = Some(path);
    }

    if !takeoff.subitems.is_empty() {
        let path = out_dir.join(SUBITEMS_FILE);
        write_subitems(&path, &takeoff.subitems)?;
        paths.subitems = Some(path);
    }

    Ok(paths)
}

/// Columns: Group, Item, Source PDF.
pub fn write_items(path: &Path, items: &[Item]) -> Result<(), TakeoffError> {
    write_records(path, items)
}

/// Columns: Item, Subitem, Quantity, Unit, Unit Price, Group, Source PDF.
pub fn write_subitems(path: &Path, subitems: &[Subitem]) -> Result<(), TakeoffError> {
    write_records(path, subitems)
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), TakeoffError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    // Check for error rather than implicitly flushing on drop.
    writer.flush()?;
    Ok(())
}

//! Seed the dishes table from a CSV file
//!
//! Expected layout, header row first:
//!
//! ```text
//! name,canteen,tag
//! Fried Rice,"East Canteen,West Canteen",staple
//! ```

use std::io::Read;
use std::path::Path;

use log::{error, info, warn};
use thiserror::Error;

use crate::domain::{DishRepository, DomainError, NewDish};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("failed to create dishes: {0}")]
    Storage(#[from] DomainError),
}

/// Parse dish rows. The header row is skipped; rows with fewer than three
/// columns are logged and ignored.
pub fn read_dishes<R: Read>(reader: R) -> Result<Vec<NewDish>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut dishes = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        match (record.get(0), record.get(1), record.get(2)) {
            (Some(name), Some(canteens), Some(tag)) => {
                dishes.push(NewDish::from_cells(name, canteens, tag));
            }
            _ => warn!("Skipping dish row {}: expected 3 columns, got {}", line + 2, record.len()),
        }
    }
    Ok(dishes)
}

/// Read dishes from the CSV file at `path`.
pub fn load_dishes(path: &Path) -> Result<Vec<NewDish>, SeedError> {
    let to_err = |source| SeedError::Csv {
        path: path.display().to_string(),
        source,
    };
    let file = std::fs::File::open(path).map_err(|e| to_err(csv::Error::from(e)))?;
    read_dishes(file).map_err(to_err)
}

/// Load `path` and insert every dish in batches of `batch_size`.
///
/// An unreadable file leaves the table empty and is only logged; a failed
/// insert is returned to the caller.
pub async fn seed_dishes(
    repo: &dyn DishRepository,
    path: &Path,
    batch_size: usize,
) -> Result<u64, SeedError> {
    let dishes = match load_dishes(path) {
        Ok(dishes) => dishes,
        Err(e) => {
            error!("{}", e);
            return Ok(0);
        }
    };
    if dishes.is_empty() {
        warn!("No dishes found in {}", path.display());
        return Ok(0);
    }

    let inserted = repo.insert_many(dishes, batch_size).await?;
    info!("Seeded {} dishes from {}", inserted, path.display());
    Ok(inserted)
}

// ── Tests ──────────────────────────────────────────────────────

use crate::weather_data::error::LoadError;
use crate::weather_data::extractor::header_names;
use crate::weather_data::loader::read_text_table;
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tempfile::NamedTempFile;

/// Appends a freshly downloaded export to an existing location file.
///
/// Both files are read as text. The rows of `new_path` are placed before the
/// rows of `existing_path`, then exact duplicate rows (cells compared after
/// trimming) are dropped, keeping the first occurrence. With `overwrite` the
/// combined table replaces `existing_path`; the write goes to a temporary file
/// in the same directory which is then renamed over the target.
///
/// # Errors
///
/// * [`LoadError::ColumnMismatch`] if the two files do not have the same columns in the same order.
/// * [`LoadError::CsvRead`] if either file cannot be parsed.
/// * [`LoadError::CsvWrite`] / [`LoadError::Persist`] if the overwrite fails. The
///   existing file is left untouched in that case.
pub fn update_data(
    new_path: impl AsRef<Path>,
    existing_path: impl AsRef<Path>,
    overwrite: bool,
) -> Result<DataFrame, LoadError> {
    let new_path = new_path.as_ref();
    let existing_path = existing_path.as_ref();

    let new_df = read_text_table(new_path)?;
    let existing_df = read_text_table(existing_path)?;

    let new_columns = header_names(&new_df);
    let existing_columns = header_names(&existing_df);
    if new_columns != existing_columns {
        return Err(LoadError::ColumnMismatch {
            new: new_path.to_path_buf(),
            existing: existing_path.to_path_buf(),
            new_columns,
            existing_columns,
        });
    }

    let combine_err = |e: PolarsError| LoadError::Combine {
        new: new_path.to_path_buf(),
        existing: existing_path.to_path_buf(),
        source: e,
    };
    let stacked = new_df.vstack(&existing_df).map_err(combine_err)?;
    let mut combined = drop_duplicate_rows(&stacked).map_err(combine_err)?;
    info!(
        "Combined {} new and {} existing rows into {} rows",
        new_df.height(),
        existing_df.height(),
        combined.height()
    );

    if overwrite {
        write_atomically(&mut combined, existing_path)?;
        info!("Updated {:?}", existing_path);
    }
    Ok(combined)
}

/// Keeps the first of each group of rows whose trimmed cells are identical.
fn drop_duplicate_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|c| c.str())
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(df.height());
    let mask: Vec<bool> = (0..df.height())
        .map(|idx| {
            let key = columns
                .iter()
                .map(|c| c.get(idx).map(str::trim).unwrap_or_default().to_string())
                .collect();
            seen.insert(key)
        })
        .collect();

    let duplicates = mask.iter().filter(|keep| !**keep).count();
    if duplicates > 0 {
        debug!("Dropping {} duplicate rows", duplicates);
    }
    df.filter(&BooleanChunked::from_slice("keep".into(), &mask))
}

fn write_atomically(df: &mut DataFrame, target: &Path) -> Result<(), LoadError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file =
        NamedTempFile::new_in(dir).map_err(|e| LoadError::Io(dir.to_path_buf(), e))?;
    CsvWriter::new(temp_file.as_file_mut())
        .include_header(true)
        .finish(df)
        .map_err(|e| LoadError::CsvWrite(temp_file.path().to_path_buf(), e))?;
    temp_file
        .persist(target)
        .map_err(|e| LoadError::Persist(target.to_path_buf(), e.error))?;
    Ok(())
}

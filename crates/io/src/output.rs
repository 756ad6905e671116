// Labeled output: derived path, all-or-nothing write

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use userlink_engine::model::Dataset;

use crate::error::IoError;

/// Insert `suffix` before the final extension of `input`'s file name.
///
/// `users.csv` -> `users_output.csv`, `a.b.tsv` -> `a.b_output.tsv`,
/// `users` -> `users_output`.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().map(OsString::from).unwrap_or_default();
    let mut name = stem;
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Write `column` + the dataset's headers, then one row per record prefixed
/// with its group id. Short rows are padded to the header width; extra
/// trailing fields are kept.
pub fn render_labeled<W: Write>(
    writer: W,
    dataset: &Dataset,
    user_ids: &[usize],
    column: &str,
    delimiter: u8,
) -> Result<(), csv::Error> {
    debug_assert_eq!(dataset.len(), user_ids.len());

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(dataset.headers.len() + 1);
    header.push(column);
    header.extend(dataset.headers.iter().map(String::as_str));
    writer.write_record(&header)?;

    let width = dataset.headers.len() + 1;
    for (record, id) in dataset.records.iter().zip(user_ids) {
        let mut row: Vec<String> = Vec::with_capacity(width.max(record.values.len() + 1));
        row.push(id.to_string());
        row.extend(record.values.iter().cloned());
        if row.len() < width {
            row.resize(width, String::new());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the labeled table to `path` atomically: render into a sibling
/// `.tmp` file, then rename it over `path`. On failure nothing is left at
/// `path` and the temp file is removed.
pub fn write_labeled(
    path: &Path,
    dataset: &Dataset,
    user_ids: &[usize],
    column: &str,
    delimiter: u8,
) -> Result<(), IoError> {
    let tmp_path = tmp_path_for(path);
    let write_err = |target: &Path, e: &dyn std::fmt::Display| IoError::Write {
        path: target.to_path_buf(),
        message: e.to_string(),
    };

    let result = (|| -> Result<(), IoError> {
        let file = std::fs::File::create(&tmp_path)
            .map_err(|e| write_err(tmp_path.as_path(), &e))?;
        let mut buffered = std::io::BufWriter::new(file);
        render_labeled(&mut buffered, dataset, user_ids, column, delimiter)
            .map_err(|e| write_err(tmp_path.as_path(), &e))?;
        let file = buffered
            .into_inner()
            .map_err(|e| write_err(tmp_path.as_path(), e.error()))?;
        file.sync_all().map_err(|e| write_err(tmp_path.as_path(), &e))?;
        std::fs::rename(&tmp_path, path).map_err(|e| write_err(path, &e))
    })();

    match &result {
        Ok(()) => log::debug!("renamed {} -> {}", tmp_path.display(), path.display()),
        Err(_) => {
            let _ = std::fs::remove_file(&tmp_path);
        }
    }
    result
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

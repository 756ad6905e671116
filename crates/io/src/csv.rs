// Delimited-file loading

use std::io::Read;
use std::path::Path;

use userlink_engine::model::{Dataset, Record};

use crate::error::IoError;

/// A loaded table plus what was learned while reading it.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub dataset: Dataset,
    /// Delimiter used to parse the file; the output reuses it.
    pub delimiter: u8,
    /// Rows whose field count differs from the header.
    pub ragged_rows: usize,
}

/// Load a delimited file with a header row. The delimiter is sniffed when
/// `delimiter` is `None`.
pub fn load(path: &Path, delimiter: Option<u8>) -> Result<LoadedTable, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(&content));
    let table = load_from_string(&content, delimiter)?;

    if table.dataset.headers.is_empty() {
        return Err(IoError::EmptyInput(path.to_path_buf()));
    }
    if table.ragged_rows > 0 {
        log::warn!(
            "{}: {} row(s) do not match the header width",
            path.display(),
            table.ragged_rows
        );
    }
    log::info!("loaded {} rows from {}", table.dataset.len(), path.display());
    Ok(table)
}

/// Parse delimited text. An input with no header yields an empty dataset.
pub fn load_from_string(content: &str, delimiter: u8) -> Result<LoadedTable, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    let mut ragged_rows = 0;
    for result in reader.records() {
        let record = result?;
        if record.len() != headers.len() {
            ragged_rows += 1;
        }
        records.push(Record::new(record.iter()));
    }

    Ok(LoadedTable {
        dataset: Dataset::new(headers, records),
        delimiter,
        ragged_rows,
    })
}

const DELIMITER_CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];

/// Guess the delimiter from the first ten lines. A candidate scores the
/// header's field count times the number of lines that agree with it; the
/// earliest candidate wins ties. When no candidate splits the header into
/// more than one field the result is a comma.
pub(crate) fn sniff_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();

    DELIMITER_CANDIDATES
        .iter()
        .filter_map(|&delim| {
            let widths: Vec<usize> = sample.iter().map(|line| field_count(line, delim)).collect();
            let header = *widths.first()?;
            if header <= 1 {
                return None;
            }
            let agreeing = widths.iter().filter(|&&w| w == header).count();
            Some((delim, agreeing * header))
        })
        .fold((b',', 0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .0
}

/// Fields in one line, honoring quotes. Unparseable lines count as one.
fn field_count(line: &str, delim: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map_or(1, |record| record.len())
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.).
/// A leading byte-order mark is dropped.
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let read_err = |e: std::io::Error| IoError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

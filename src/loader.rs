// File ingestion and dataset cleaning.
//
// Two readers (CSV and spreadsheet) both produce `RawRow`s; `clean_records`
// then applies the same coercion/classification pass regardless of where the
// rows came from. Row-level problems are absorbed and counted in the
// `LoadReport`; only structural failures (unreadable file, missing required
// column, unsupported type) surface as a `LoadError`.
use crate::classify::{classify_problem, is_placeholder_problem};
use crate::types::{CleanRecord, LoadReport, RawRow};
use crate::util::{is_missing_text, normalize_location, parse_date_safe, parse_hour_safe, MONTHS};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::Datelike;
use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

/// Columns the incident log must provide. Header names are matched after
/// trimming surrounding whitespace.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Tanggal", "Jam Mulai", "Permasalahan", "Lokasi"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file type {extension:?} (expected .csv, .xlsx, .xls or .ods)")]
    UnsupportedFormat { extension: String },
    #[error("required column {0:?} is missing from the file")]
    MissingColumn(&'static str),
    #[error("cannot read CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot read workbook: {0}")]
    Workbook(String),
    #[error("workbook contains no sheets")]
    NoSheets,
    #[error("sheet {0:?} has no header row")]
    EmptySheet(String),
}

/// Load an incident log from disk and clean it in one pass.
///
/// The file format is picked by extension. On success the cleaned records
/// satisfy the dataset invariants (valid date, canonical problem and
/// location); the `LoadReport` says what fell out and why.
pub fn load_and_clean(path: &str) -> Result<(Vec<CleanRecord>, LoadReport), LoadError> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let (rows, unparseable) = match extension.as_str() {
        "csv" => read_csv_rows(path)?,
        "xlsx" | "xls" | "xlsb" | "ods" => read_sheet_rows(path)?,
        _ => return Err(LoadError::UnsupportedFormat { extension }),
    };
    let (data, mut report) = clean_records(rows);
    report.total_rows += unparseable;
    report.unparseable_rows = unparseable;
    Ok((data, report))
}

fn read_csv_rows(path: &str) -> Result<(Vec<RawRow>, usize), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;
    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }
    let mut rows = Vec::new();
    let mut unparseable = 0usize;
    for result in rdr.deserialize::<RawRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(_) => unparseable += 1,
        }
    }
    Ok((rows, unparseable))
}

fn read_sheet_rows(path: &str) -> Result<(Vec<RawRow>, usize), LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Workbook(e.to_string()))?;
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet = sheet_names.first().ok_or(LoadError::NoSheets)?.clone();
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let mut row_iter = range.rows();
    let header_row = row_iter.next().ok_or_else(|| LoadError::EmptySheet(sheet.clone()))?;
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let mut column_at = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, col) in column_at.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == col)
            .ok_or(LoadError::MissingColumn(col))?;
    }
    let [tanggal_at, jam_at, masalah_at, lokasi_at] = column_at;

    let mut rows = Vec::new();
    for row in row_iter {
        rows.push(RawRow {
            tanggal: date_cell(row.get(tanggal_at)),
            jam_mulai: time_cell(row.get(jam_at)),
            permasalahan: text_cell(row.get(masalah_at)),
            lokasi: text_cell(row.get(lokasi_at)),
        });
    }
    Ok((rows, 0))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn text_cell(cell: Option<&Data>) -> Option<String> {
    let text = cell_text(cell?);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Date cells typed by the spreadsheet are rendered back to `YYYY-MM-DD` so
/// they take the same coercion path as free-text dates.
fn date_cell(cell: Option<&Data>) -> Option<String> {
    let cell = cell?;
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            cell.as_date().map(|d| d.format("%Y-%m-%d").to_string())
        }
        _ => text_cell(Some(cell)),
    }
}

/// Time cells typed by the spreadsheet become `HH:MM`, so a stored 00:00
/// filler is still recognized as "no time recorded".
fn time_cell(cell: Option<&Data>) -> Option<String> {
    let cell = cell?;
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            cell.as_time().map(|t| t.format("%H:%M").to_string())
        }
        _ => text_cell(Some(cell)),
    }
}

/// Clean a batch of raw rows into analysis-ready records.
///
/// Per row: coerce the date, drop placeholder problems, classify the problem
/// text, drop missing locations, normalize the location, coerce the start
/// hour, then keep the row only if its date parsed. Every drop is tallied;
/// nothing row-level ever errors.
pub fn clean_records(rows: Vec<RawRow>) -> (Vec<CleanRecord>, LoadReport) {
    let mut report = LoadReport {
        total_rows: rows.len(),
        ..LoadReport::default()
    };
    let mut data = Vec::new();

    for row in rows {
        let date = parse_date_safe(row.tanggal.as_deref());

        let permasalahan = row.permasalahan.as_deref().unwrap_or("").trim().to_string();
        if is_placeholder_problem(&permasalahan) {
            report.dropped_empty_problem += 1;
            continue;
        }
        let problem_clean = classify_problem(&permasalahan);

        let lokasi = row.lokasi.as_deref().unwrap_or("").trim().to_string();
        if is_missing_text(&lokasi) {
            report.dropped_empty_location += 1;
            continue;
        }
        let loc_clean = normalize_location(&lokasi);

        let jam_mulai = row
            .jam_mulai
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let hour = parse_hour_safe(jam_mulai.as_deref());

        // Final required-field filter: a record without a valid date never
        // reaches the output.
        let Some(tanggal) = date else {
            report.dropped_bad_date += 1;
            continue;
        };
        let tahun = tanggal.year();
        let bulan = tanggal.month();
        // month() is always 1..=12
        let bulan_nama = MONTHS[bulan as usize - 1];

        data.push(CleanRecord {
            tanggal,
            tahun,
            bulan,
            bulan_nama,
            permasalahan,
            problem_clean,
            lokasi,
            loc_clean,
            jam_mulai,
            hour,
        });
        report.cleaned_rows += 1;
    }

    (data, report)
}

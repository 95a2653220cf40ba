// Presentation-side helpers: CSV/JSON export and console table previews,
// plus the converters that turn pipeline output into display rows.
use crate::types::{
    CleanRecord, DailyRow, DetailRow, HourlyRow, LocationRow, MonthlyRow, SummaryStats,
};
use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print up to `max_rows` rows as a markdown-style table.
pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn location_rows(stats: &SummaryStats) -> Vec<LocationRow> {
    stats
        .top_locations
        .iter()
        .map(|l| LocationRow {
            location: l.location.clone(),
            cases: l.count,
        })
        .collect()
}

/// One row per hour 0–23, hour rendered as `"HH:00"`.
pub fn hourly_rows(stats: &SummaryStats) -> Vec<HourlyRow> {
    stats
        .hourly
        .iter()
        .enumerate()
        .map(|(hour, cases)| HourlyRow {
            hour: format!("{:02}:00", hour),
            cases: *cases,
        })
        .collect()
}

pub fn daily_rows(stats: &SummaryStats) -> Vec<DailyRow> {
    stats
        .daily
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|d| DailyRow {
            day: d.day,
            cases: d.count,
        })
        .collect()
}

pub fn monthly_rows(stats: &SummaryStats) -> Vec<MonthlyRow> {
    stats
        .monthly
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|m| MonthlyRow {
            month: m.month.to_string(),
            cases: m.count,
        })
        .collect()
}

/// Detail rows keep the reporter's original problem and start-time text;
/// dates are rendered day-first as on the printed reports.
pub fn detail_rows(records: &[CleanRecord]) -> Vec<DetailRow> {
    records
        .iter()
        .map(|r| DetailRow {
            location: r.loc_clean.clone(),
            problem: r.permasalahan.clone(),
            date: r.tanggal.format("%d-%m-%Y").to_string(),
            start_time: r.jam_mulai.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

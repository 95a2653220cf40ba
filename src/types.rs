use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One row of the uploaded incident log, exactly as it arrived. Every field
/// is optional; the cleaner decides what survives.
#[derive(Debug, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Tanggal")]
    pub tanggal: Option<String>,
    #[serde(rename = "Jam Mulai")]
    pub jam_mulai: Option<String>,
    #[serde(rename = "Permasalahan")]
    pub permasalahan: Option<String>,
    #[serde(rename = "Lokasi")]
    pub lokasi: Option<String>,
}

/// A cleaned incident record. Immutable once built: date, year, month and the
/// canonical problem/location are always present; the start hour may be
/// absent (no time recorded). The original free-text fields are kept so the
/// detail listing can show what the reporter actually wrote.
#[derive(Debug, Clone)]
pub struct CleanRecord {
    pub tanggal: NaiveDate,
    pub tahun: i32,
    pub bulan: u32,
    pub bulan_nama: &'static str,
    pub permasalahan: String,
    pub problem_clean: String,
    pub lokasi: String,
    pub loc_clean: String,
    pub jam_mulai: Option<String>,
    pub hour: Option<u32>,
}

/// Per-load diagnostics: how many rows came in and why the rest fell out.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub cleaned_rows: usize,
    pub unparseable_rows: usize,
    pub dropped_bad_date: usize,
    pub dropped_empty_problem: usize,
    pub dropped_empty_location: usize,
}

/// Month choice for a report run. `NotSelected` is the "no selection yet"
/// state of the month dropdown and short-circuits the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthSelection {
    NotSelected,
    AllMonths,
    /// 1-based calendar month.
    Month(u32),
}

/// A location and how many incidents were reported there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Incident count for one calendar day of the selected month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub day: u32,
    pub count: usize,
}

/// Incident count for one calendar month of the selected year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: &'static str,
    pub count: usize,
}

/// Summary statistics for one filtered period.
///
/// `top_location` (the single most frequent location) and `top_locations`
/// (the top three) are computed independently and may disagree near ties.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub top_location: String,
    pub top_problem: String,
    /// Most frequent recorded hour; 0 when no record has an hour at all.
    pub peak_hour: u32,
    pub top_locations: Vec<LocationCount>,
    /// Incident count per hour 0–23, zero-filled.
    pub hourly: Vec<usize>,
    /// Zero-filled across the month's calendar days; single-month view only.
    pub daily: Option<Vec<DailyCount>>,
    /// Months with data, in calendar order; full-year view only.
    pub monthly: Option<Vec<MonthlyCount>>,
}

/// Direction of a month-over-month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Increase,
    Decrease,
    Unchanged,
}

/// Outcome of comparing the selected month against its calendar predecessor
/// within the same year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum MonthComparison {
    /// Earliest month with data in the year; nothing to compare against.
    FirstMonthOfData,
    Delta {
        previous_month: &'static str,
        previous_total: usize,
        change: i64,
        trend: Trend,
    },
}

/// Structured narrative facts for the selected period. The console layer
/// turns these into prose; nothing here is pre-formatted.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode")]
pub enum Insight {
    FullYear {
        year: i32,
        peak_month: &'static str,
        peak_month_count: usize,
        top_location: String,
        peak_hour: u32,
    },
    SingleMonth {
        year: i32,
        month: &'static str,
        total: usize,
        top_location: String,
        peak_hour: u32,
        comparison: MonthComparison,
    },
}

/// Result of one filter selection against the cleaned dataset.
#[derive(Debug, Clone)]
pub enum PeriodReport {
    /// No month chosen yet; nothing was aggregated.
    AwaitingSelection,
    /// Valid selection, zero matching records. Not an error.
    NoData,
    Report {
        stats: SummaryStats,
        insight: Insight,
        records: Vec<CleanRecord>,
    },
}

// Display rows for console previews and CSV export.

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct LocationRow {
    #[serde(rename = "Lokasi")]
    #[tabled(rename = "Lokasi")]
    pub location: String,
    #[serde(rename = "JumlahKasus")]
    #[tabled(rename = "JumlahKasus")]
    pub cases: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HourlyRow {
    #[serde(rename = "Jam")]
    #[tabled(rename = "Jam")]
    pub hour: String,
    #[serde(rename = "JumlahKasus")]
    #[tabled(rename = "JumlahKasus")]
    pub cases: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DailyRow {
    #[serde(rename = "Tanggal")]
    #[tabled(rename = "Tanggal")]
    pub day: u32,
    #[serde(rename = "JumlahKasus")]
    #[tabled(rename = "JumlahKasus")]
    pub cases: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonthlyRow {
    #[serde(rename = "Bulan")]
    #[tabled(rename = "Bulan")]
    pub month: String,
    #[serde(rename = "JumlahKasus")]
    #[tabled(rename = "JumlahKasus")]
    pub cases: usize,
}

/// One incident at a top location, shown with the reporter's own wording.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DetailRow {
    #[serde(rename = "Lokasi")]
    #[tabled(rename = "Lokasi")]
    pub location: String,
    #[serde(rename = "Permasalahan")]
    #[tabled(rename = "Permasalahan")]
    pub problem: String,
    #[serde(rename = "Tanggal")]
    #[tabled(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "JamMulai")]
    #[tabled(rename = "JamMulai")]
    pub start_time: String,
}

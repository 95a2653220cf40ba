// Period filtering, aggregation and insight derivation.
//
// Everything here takes the cleaned dataset (or a view of it) as an
// argument and returns a new value; no stage reaches into shared state or
// mutates its input. Calendar-order computations (previous month, peak
// month) index into the fixed `MONTHS` table, never into map iteration
// order.
use crate::types::{
    CleanRecord, DailyCount, Insight, LocationCount, MonthComparison, MonthSelection,
    MonthlyCount, PeriodReport, SummaryStats, Trend,
};
use crate::util::{month_name, MONTHS};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Distinct years present in the dataset, ascending. Drives the year menu.
pub fn years_present(data: &[CleanRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = data.iter().map(|r| r.tahun).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Records of one year, in original row order.
pub fn filter_year(data: &[CleanRecord], year: i32) -> Vec<CleanRecord> {
    data.iter().filter(|r| r.tahun == year).cloned().collect()
}

/// Records of one calendar month within an already year-filtered view.
pub fn filter_month(year_view: &[CleanRecord], month: u32) -> Vec<CleanRecord> {
    match month_name(month) {
        Some(name) => year_view
            .iter()
            .filter(|r| r.bulan_nama == name)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// Run one filter selection end to end: year view, optional month cut,
/// aggregation, insight. The "no selection yet" sentinel short-circuits
/// before any aggregation happens; an empty match is reported as `NoData`
/// rather than an error.
pub fn build_report(data: &[CleanRecord], year: i32, selection: &MonthSelection) -> PeriodReport {
    let year_view = filter_year(data, year);
    let filtered = match selection {
        MonthSelection::NotSelected => return PeriodReport::AwaitingSelection,
        MonthSelection::AllMonths => year_view.clone(),
        MonthSelection::Month(m) => filter_month(&year_view, *m),
    };
    if filtered.is_empty() {
        return PeriodReport::NoData;
    }
    let stats = summarize(&filtered, year, selection);
    let insight = derive_insight(&year_view, &stats, year, selection);
    PeriodReport::Report {
        stats,
        insight,
        records: filtered,
    }
}

/// Summary statistics over one filtered subset.
pub fn summarize(filtered: &[CleanRecord], year: i32, selection: &MonthSelection) -> SummaryStats {
    let top_location = mode(filtered.iter().map(|r| r.loc_clean.clone()))
        .unwrap_or_else(|| "-".to_string());
    let top_problem = mode(filtered.iter().map(|r| r.problem_clean.clone()))
        .unwrap_or_else(|| "-".to_string());
    // Peak hour only considers records with a recorded hour; 0 is the
    // documented fallback when none have one.
    let peak_hour = mode(filtered.iter().filter_map(|r| r.hour)).unwrap_or(0);

    let mut hourly = vec![0usize; 24];
    for r in filtered {
        if let Some(h) = r.hour {
            hourly[h as usize] += 1;
        }
    }

    let daily = match selection {
        MonthSelection::Month(m) => Some(daily_counts(filtered, year, *m)),
        _ => None,
    };
    let monthly = match selection {
        MonthSelection::AllMonths => Some(monthly_counts(filtered)),
        _ => None,
    };

    SummaryStats {
        total: filtered.len(),
        top_location,
        top_problem,
        peak_hour,
        top_locations: top_locations(filtered, 3),
        hourly,
        daily,
        monthly,
    }
}

/// Narrative facts for the selected period. Needs the full year view so the
/// month-over-month comparison can see months outside the current cut.
pub fn derive_insight(
    year_view: &[CleanRecord],
    stats: &SummaryStats,
    year: i32,
    selection: &MonthSelection,
) -> Insight {
    match selection {
        MonthSelection::Month(m) => Insight::SingleMonth {
            year,
            month: month_name(*m).unwrap_or(MONTHS[0]),
            total: stats.total,
            top_location: stats.top_location.clone(),
            peak_hour: stats.peak_hour,
            comparison: month_comparison(year_view, *m),
        },
        _ => {
            // Walk months in calendar order; only a strictly higher count
            // displaces the peak, so ties go to the earlier month.
            let monthly = monthly_counts(year_view);
            let mut peak: Option<(&'static str, usize)> = None;
            for mc in &monthly {
                if peak.map_or(true, |(_, count)| mc.count > count) {
                    peak = Some((mc.month, mc.count));
                }
            }
            let (peak_month, peak_month_count) = peak.unwrap_or((MONTHS[0], 0));
            Insight::FullYear {
                year,
                peak_month,
                peak_month_count,
                top_location: stats.top_location.clone(),
                peak_hour: stats.peak_hour,
            }
        }
    }
}

/// Compare the selected month against its calendar predecessor within the
/// same year. The earliest month with data has no in-year predecessor and is
/// flagged instead of compared; a predecessor with zero records still
/// compares, yielding a delta equal to the full current total.
fn month_comparison(year_view: &[CleanRecord], month: u32) -> MonthComparison {
    let first_with_data = year_view.iter().map(|r| r.bulan).min().unwrap_or(month);
    if month <= first_with_data {
        return MonthComparison::FirstMonthOfData;
    }
    let prev = month - 1;
    let previous_total = year_view.iter().filter(|r| r.bulan == prev).count();
    let current_total = year_view.iter().filter(|r| r.bulan == month).count();
    let change = current_total as i64 - previous_total as i64;
    let trend = match change.cmp(&0) {
        Ordering::Greater => Trend::Increase,
        Ordering::Less => Trend::Decrease,
        Ordering::Equal => Trend::Unchanged,
    };
    MonthComparison::Delta {
        previous_month: MONTHS[prev as usize - 1],
        previous_total,
        change,
        trend,
    }
}

/// Incidents at the top locations, for the detail listing. Sorted by
/// location then date so each location's incidents read consecutively.
pub fn top_location_details(
    records: &[CleanRecord],
    top: &[LocationCount],
) -> Vec<CleanRecord> {
    let names: Vec<&str> = top.iter().map(|l| l.location.as_str()).collect();
    let mut rows: Vec<CleanRecord> = records
        .iter()
        .filter(|r| names.contains(&r.loc_clean.as_str()))
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.loc_clean.cmp(&b.loc_clean).then(a.tanggal.cmp(&b.tanggal)));
    rows
}

/// Most frequent value. Ties on the maximum count resolve to the value
/// first encountered in row order, which keeps the result stable across
/// runs regardless of hash iteration order.
fn mode<T: Eq + Hash>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (seen_at, value) in values.enumerate() {
        let entry = counts.entry(value).or_insert((0, seen_at));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
            count_a.cmp(count_b).then(seen_b.cmp(seen_a))
        })
        .map(|(value, _)| value)
}

/// Top `n` locations by count; ties resolve to the earlier-seen location.
fn top_locations(records: &[CleanRecord], n: usize) -> Vec<LocationCount> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (seen_at, r) in records.iter().enumerate() {
        let entry = counts.entry(r.loc_clean.as_str()).or_insert((0, seen_at));
        entry.0 += 1;
    }
    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
        count_b.cmp(count_a).then(seen_a.cmp(seen_b))
    });
    ranked
        .into_iter()
        .take(n)
        .map(|(location, (count, _))| LocationCount {
            location: location.to_string(),
            count,
        })
        .collect()
}

/// Per-day counts across every calendar day of the month, zero-filled.
fn daily_counts(records: &[CleanRecord], year: i32, month: u32) -> Vec<DailyCount> {
    let mut by_day: HashMap<u32, usize> = HashMap::new();
    for r in records {
        *by_day.entry(r.tanggal.day()).or_insert(0) += 1;
    }
    (1..=days_in_month(year, month))
        .map(|day| DailyCount {
            day,
            count: by_day.get(&day).copied().unwrap_or(0),
        })
        .collect()
}

/// Per-month counts in calendar order; months without data are omitted.
fn monthly_counts(records: &[CleanRecord]) -> Vec<MonthlyCount> {
    let mut by_month = [0usize; 12];
    for r in records {
        by_month[r.bulan as usize - 1] += 1;
    }
    MONTHS
        .iter()
        .copied()
        .zip(by_month)
        .filter(|(_, count)| *count > 0)
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

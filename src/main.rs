// Entry point and high-level CLI flow.
//
// - Option [1] loads and cleans an incident log (CSV or spreadsheet),
//   printing load diagnostics.
// - Option [2] asks for a year and a month selection, renders the period
//   report (KPIs, tables, insight narrative) on the console, and exports
//   the tables as CSV plus a combined JSON summary.
// - After generating a report, the user can go back to the menu or exit.
mod classify;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{
    CleanRecord, Insight, MonthComparison, MonthSelection, PeriodReport, SummaryStats, Trend,
};
use util::{format_int, MONTHS};

// Simple in-memory app state so we only load/clean the file once but can
// generate reports for several periods in a single run. The pipeline itself
// only ever sees the data as an argument.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<CleanRecord>>,
}

/// Print a prompt and read one trimmed line of input.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the menu after generating a report.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and clean the incident log.
///
/// On success the cleaned records are stored in `APP_STATE` and a short
/// summary of what was kept and dropped is printed.
fn handle_load() {
    let input = read_line("Incident log path [incident_log.csv]: ");
    let path = if input.is_empty() {
        "incident_log.csv".to_string()
    } else {
        input
    };
    match loader::load_and_clean(&path) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} rows read, {} records cleaned)",
                format_int(report.total_rows as i64),
                format_int(report.cleaned_rows as i64)
            );
            println!(
                "Note: {} rows dropped for unparseable dates, {} for empty problems, {} for missing locations.",
                format_int(report.dropped_bad_date as i64),
                format_int(report.dropped_empty_problem as i64),
                format_int(report.dropped_empty_location as i64)
            );
            if report.unparseable_rows > 0 {
                println!(
                    "Note: {} rows could not be read at all.",
                    format_int(report.unparseable_rows as i64)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn prompt_year(years: &[i32]) -> Option<i32> {
    let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    println!("Years with data: {}", listed.join(", "));
    match read_line("Report year: ").parse::<i32>() {
        Ok(y) if years.contains(&y) => Some(y),
        _ => {
            println!("Invalid year.\n");
            None
        }
    }
}

/// Month menu in fixed calendar order, with "all months" at [0]. Accepts a
/// number or a month name; pressing Enter (or anything unrecognized) leaves
/// the month unselected, which short-circuits the report.
fn prompt_month() -> MonthSelection {
    println!("Report period:");
    println!("  [ 0] Semua Bulan");
    for (i, month) in MONTHS.iter().enumerate() {
        println!("  [{:2}] {}", i + 1, month);
    }
    let input = read_line("Month (Enter to skip): ");
    if input.is_empty() {
        return MonthSelection::NotSelected;
    }
    match input.parse::<u32>() {
        Ok(0) => MonthSelection::AllMonths,
        Ok(m) if (1..=12).contains(&m) => MonthSelection::Month(m),
        _ => match util::month_index(&input) {
            Some(m) => MonthSelection::Month(m),
            None => MonthSelection::NotSelected,
        },
    }
}

/// Handle option [2]: filter, aggregate, render and export one period.
fn handle_generate_report() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the incident log first (option 1).\n");
        return;
    };
    let years = reports::years_present(&data);
    if years.is_empty() {
        println!("The loaded file has no usable records.\n");
        return;
    }
    let Some(year) = prompt_year(&years) else {
        return;
    };
    let selection = prompt_month();
    println!();

    match reports::build_report(&data, year, &selection) {
        PeriodReport::AwaitingSelection => {
            println!("Select a month (or Semua Bulan) to generate the report.\n");
        }
        PeriodReport::NoData => {
            println!("No data found for {} in the selected period.\n", year);
        }
        PeriodReport::Report {
            stats,
            insight,
            records,
        } => {
            render_report(year, &selection, &stats, &insight, &records);
        }
    }
}

fn period_label(selection: &MonthSelection) -> &'static str {
    match selection {
        MonthSelection::Month(m) => MONTHS[*m as usize - 1],
        _ => "Semua Bulan",
    }
}

fn render_report(
    year: i32,
    selection: &MonthSelection,
    stats: &SummaryStats,
    insight: &Insight,
    records: &[CleanRecord],
) {
    println!("Report period: {} {}\n", period_label(selection), year);
    println!("Total Gangguan   : {} kasus", format_int(stats.total as i64));
    println!("Lokasi Terpadat  : {}", stats.top_location);
    println!("Masalah Terbanyak: {}", stats.top_problem);
    println!("Jam Paling Rawan : {:02}:00\n", stats.peak_hour);

    println!("Top Locations");
    let locations = output::location_rows(stats);
    output::preview_table_rows(&locations, locations.len());
    if let Err(e) = output::write_csv("report_top_locations.csv", &locations) {
        eprintln!("Write error: {}", e);
    }

    println!("Incidents at Top Locations (first 10)");
    let details = output::detail_rows(&reports::top_location_details(records, &stats.top_locations));
    output::preview_table_rows(&details, 10);
    if let Err(e) = output::write_csv("report_top_location_details.csv", &details) {
        eprintln!("Write error: {}", e);
    }

    println!("Hourly Distribution");
    let hourly = output::hourly_rows(stats);
    output::preview_table_rows(&hourly, hourly.len());
    if let Err(e) = output::write_csv("report_hourly_distribution.csv", &hourly) {
        eprintln!("Write error: {}", e);
    }

    let monthly = output::monthly_rows(stats);
    if !monthly.is_empty() {
        println!("Monthly Trend");
        output::preview_table_rows(&monthly, monthly.len());
        if let Err(e) = output::write_csv("report_monthly_trend.csv", &monthly) {
            eprintln!("Write error: {}", e);
        }
    }
    let daily = output::daily_rows(stats);
    if !daily.is_empty() {
        println!("Daily Intensity");
        output::preview_table_rows(&daily, daily.len());
        if let Err(e) = output::write_csv("report_daily_intensity.csv", &daily) {
            eprintln!("Write error: {}", e);
        }
    }

    println!("Analisis Insight");
    render_insight(insight);

    let summary = serde_json::json!({ "stats": stats, "insight": insight });
    if let Err(e) = output::write_json("summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!("(Tables exported as CSV; combined summary in summary.json)\n");
}

/// Turn the structured insight facts into console prose.
fn render_insight(insight: &Insight) {
    match insight {
        Insight::FullYear {
            year,
            peak_month,
            peak_month_count,
            top_location,
            peak_hour,
        } => {
            println!(
                "- Bulan {} had the highest incident load of {}: {} kasus.",
                peak_month,
                year,
                format_int(*peak_month_count as i64)
            );
            println!(
                "- Across the year, {} needed technician attention most often.",
                top_location
            );
            println!("- Incidents clustered around {:02}:00.\n", peak_hour);
        }
        Insight::SingleMonth {
            month,
            total,
            top_location,
            peak_hour,
            comparison,
            ..
        } => {
            println!(
                "- Total incidents in {}: {} kasus.",
                month,
                format_int(*total as i64)
            );
            match comparison {
                MonthComparison::FirstMonthOfData => {
                    println!("- First month with data this year; nothing earlier to compare against.");
                }
                MonthComparison::Delta {
                    previous_month,
                    change,
                    trend,
                    ..
                } => match trend {
                    Trend::Increase => println!(
                        "- Up {} kasus compared with {}.",
                        format_int(*change),
                        previous_month
                    ),
                    Trend::Decrease => println!(
                        "- Down {} kasus compared with {}.",
                        format_int(change.abs()),
                        previous_month
                    ),
                    Trend::Unchanged => {
                        println!("- Level with {} (no change).", previous_month)
                    }
                },
            }
            println!("- {} reported the most incidents.", top_location);
            println!("- Incidents clustered around {:02}:00.\n", peak_hour);
        }
    }
}

fn main() {
    loop {
        println!("IT Support Incident Report");
        println!("[1] Load incident log");
        println!("[2] Generate period report\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!();
                handle_generate_report();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}

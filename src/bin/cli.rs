use duty_roster::{
    AppConfig, Period, Schedule, ShiftCode, extract_period, extract_roster,
    find_current_roster_file, load_grid, save_roster_to_csv, save_roster_to_json, telemetry,
};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn cell_text(av: &AnyValue<'_>) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(av) = col.get(row_idx) {
                widths[ci] = widths[ci].max(cell_text(&av).chars().count());
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, values: &[String]| {
        out.push('|');
        for (i, value) in values.iter().enumerate() {
            out.push(' ');
            out.push_str(value);
            out.push_str(&" ".repeat(widths[i].saturating_sub(value.chars().count())));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names);
    out.push_str(&sep);
    out.push('\n');
    for row_idx in 0..df.height() {
        let values: Vec<String> = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        push_row(&mut out, &values);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the whole roster\n  days                               List selectable days\n  day <n>                            Show shifts for a day\n  duty <n>                           Show who is on duty on a day\n  swap <day1> <day2> <user1> <user2> Swap user1's shift on day1 with user2's on day2\n  status <day> <user> <code>         Set a shift code (see 'codes')\n  codes                              List valid shift codes\n  save <json|csv> <path>             Export the roster\n  import                             Store the roster in the configured database\n  quit|exit                          Exit"
    );
}

fn print_codes() {
    println!("Valid shift codes:");
    for (letter, name) in ShiftCode::variants() {
        println!("  {:<4} {}", letter, name);
    }
}

fn print_day(schedule: &Schedule, day: i64) {
    match schedule.get_day_schedule(day) {
        Some(shifts) => {
            println!("Day {}:", day);
            let mut printed = Vec::new();
            for name in schedule.employees() {
                if printed.contains(&name) {
                    continue;
                }
                printed.push(name);
                let code = shifts.get(name).map(String::as_str).unwrap_or("");
                println!("  {:<24} {}", name, code);
            }
        }
        None => println!("No roster entry for day {}.", day),
    }
}

fn resolve_roster_path(config: &AppConfig) -> Result<PathBuf, String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(PathBuf::from(arg));
    }
    match find_current_roster_file(&config.roster_dir) {
        Ok(Some(path)) => Ok(path),
        Ok(None) => Err(format!(
            "No roster file for {} in {}.",
            Period::current(),
            config.roster_dir.display()
        )),
        Err(err) => Err(format!("Cannot read {}: {}", config.roster_dir.display(), err)),
    }
}

fn period_of(path: &Path) -> Option<Period> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|name| extract_period(name).ok())
}

#[cfg(feature = "sqlite")]
fn import_into_store(config: &AppConfig, period: Option<Period>, schedule: &Schedule) {
    use duty_roster::{RosterStore, SqliteRosterStore};

    let Some(period) = period else {
        println!("Roster file name does not name a month and year; cannot import.");
        return;
    };
    let result = SqliteRosterStore::new(&config.database_path)
        .and_then(|store| store.save_roster(period, schedule));
    match result {
        Ok(()) => println!(
            "Imported roster for {} into {}.",
            period,
            config.database_path.display()
        ),
        Err(err) => println!("Import failed: {}", err),
    }
}

#[cfg(not(feature = "sqlite"))]
fn import_into_store(_config: &AppConfig, _period: Option<Period>, _schedule: &Schedule) {
    println!("Rebuild with the `sqlite` feature to enable imports.");
}

fn parse_day(arg: &str) -> Option<i64> {
    arg.parse::<i64>().ok()
}

/// Splits the name tokens of a swap into two employees. Names may contain
/// spaces, so every cut is tried against the roster header; two plain tokens
/// are taken as-is.
fn split_names(tokens: &[&str], employees: &[String]) -> Option<(String, String)> {
    let known = |name: &str| employees.iter().any(|employee| employee == name);
    for cut in 1..tokens.len() {
        let first = tokens[..cut].join(" ");
        let second = tokens[cut..].join(" ");
        if known(&first) && known(&second) {
            return Some((first, second));
        }
    }
    match tokens {
        [first, second] => Some((first.to_string(), second.to_string())),
        _ => None,
    }
}

fn main() {
    telemetry::init();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let path = match resolve_roster_path(&config) {
        Ok(path) => path,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };
    let period = period_of(&path);

    let schedule = load_grid(&path)
        .map_err(|err| err.to_string())
        .and_then(|grid| extract_roster(&grid).map_err(|err| err.to_string()));
    let mut schedule = match schedule {
        Ok(schedule) => schedule,
        Err(err) => {
            eprintln!("Could not parse roster {}: {}", path.display(), err);
            std::process::exit(1);
        }
    };

    println!("Duty Roster (CLI) - type 'help' for commands\n");
    println!(
        "Loaded {} employees and {} days from {}.",
        schedule.employees().len(),
        schedule.get_full_schedule().len(),
        path.display()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,
            ["codes"] => print_codes(),
            ["show"] => match schedule.to_dataframe() {
                Ok(df) => println!("{}", render_df_as_text_table(&df)),
                Err(err) => println!("Cannot render roster: {}", err),
            },
            ["days"] => {
                let days = schedule
                    .day_numbers()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("Days: {}", days);
                if let Some(period) = period {
                    if let Some(length) = period.days_in_month() {
                        let covered = schedule.day_numbers().len();
                        if covered != length as usize {
                            println!("Roster covers {} of {} days in {}.", covered, length, period);
                        }
                    }
                }
            }
            ["day", day] => match parse_day(day) {
                Some(day) => print_day(&schedule, day),
                None => println!("Usage: day <n>"),
            },
            ["duty", day] => match parse_day(day) {
                Some(day) => match schedule.employees_with(day, ShiftCode::Duty) {
                    Some(names) if names.is_empty() => println!("Nobody is on duty on day {}.", day),
                    Some(names) => println!("On duty on day {}: {}", day, names.join(", ")),
                    None => println!("No roster entry for day {}.", day),
                },
                None => println!("Usage: duty <n>"),
            },
            ["swap", day1, day2, names @ ..] if names.len() >= 2 => {
                match (parse_day(day1), parse_day(day2), split_names(names, schedule.employees())) {
                    (Some(d1), Some(d2), Some((user1, user2))) => {
                        if schedule.swap_shifts(d1, d2, &user1, &user2) {
                            println!("Swapped {} (day {}) with {} (day {}).", user1, d1, user2, d2);
                        } else {
                            println!("Swap rejected: check days and employee names.");
                        }
                    }
                    (Some(_), Some(_), None) => println!("Swap rejected: check days and employee names."),
                    _ => println!("Usage: swap <day1> <day2> <user1> <user2>"),
                }
            }
            ["status", day, user @ .., code] if !user.is_empty() => match parse_day(day) {
                Some(d) => {
                    let user = user.join(" ");
                    if schedule.change_status(d, &user, code) {
                        println!("Set {} on day {} to {}.", user, d, code);
                    } else {
                        println!("Status change rejected: check day, employee and code.");
                    }
                }
                None => println!("Usage: status <day> <user> <code>"),
            },
            ["save", format, target] => {
                let result = match *format {
                    "json" => save_roster_to_json(&schedule, period, target),
                    "csv" => save_roster_to_csv(&schedule, target),
                    _ => {
                        println!("Unknown format '{}'; use json or csv.", format);
                        continue;
                    }
                };
                match result {
                    Ok(()) => println!("Roster saved to {}.", target),
                    Err(err) => println!("Save failed: {}", err),
                }
            }
            ["import"] => import_into_store(&config, period, &schedule),
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}

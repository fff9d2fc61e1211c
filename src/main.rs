use clap::{Parser, Subcommand};
use jde_date::{CalendarDate, Field, FieldUpdate, JdeCode, LinkedFields, from_jde_str, to_jde_date};
use log::LevelFilter;
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// Convert between Gregorian dates and JD Edwards CYYDDD Julian dates.
#[derive(Debug, Parser)]
#[command(name = "jde-convert", version, about)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a Gregorian date (YYYY-MM-DD or MM/DD/YYYY) to a JDE code.
    ToJde { date: String },
    /// Convert a 5 or 6 digit JDE code to a Gregorian date.
    FromJde { code: String },
    /// Check whether each value is a valid JDE code or Gregorian date.
    Validate {
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Print today's UTC date and its JDE code.
    Today,
    /// Read `g <date>` / `j <code>` edits from stdin and print both fields after each.
    Watch,
}

#[derive(Debug, Serialize)]
struct Conversion {
    gregorian: CalendarDate,
    jde: JdeCode,
}

#[derive(Debug, Serialize)]
struct Validation<'a> {
    input: &'a str,
    kind: Option<Field>,
    date: Option<CalendarDate>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::ToJde { date } => {
            let converted = date
                .parse::<CalendarDate>()
                .map_err(Into::into)
                .and_then(to_jde_date);
            match converted {
                Ok(jde) => print_conversion(&Conversion { gregorian: jde.date(), jde }, cli.json)?,
                Err(e) => fail(&format!("{date:?}: {e}")),
            }
        }
        Command::FromJde { code } => match from_jde_str(code.trim()) {
            Ok(gregorian) => {
                let jde = to_jde_date(gregorian)?;
                print_conversion(&Conversion { gregorian, jde }, cli.json)?;
            }
            Err(e) => fail(&format!("{code:?}: {e}")),
        },
        Command::Validate { values } => {
            let reports: Vec<Validation<'_>> = values.iter().map(|v| validate(v)).collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for r in &reports {
                    match (r.kind, r.date) {
                        (Some(kind), Some(date)) => println!("{}\tvalid {kind} ({date})", r.input),
                        _ => println!("{}\tinvalid", r.input),
                    }
                }
            }
            if reports.iter().any(|r| r.kind.is_none()) {
                std::process::exit(1);
            }
        }
        Command::Today => {
            let gregorian = CalendarDate::today()?;
            let jde = to_jde_date(gregorian)?;
            print_conversion(&Conversion { gregorian, jde }, cli.json)?;
        }
        Command::Watch => watch(cli.json)?,
    }

    Ok(())
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn print_conversion(conversion: &Conversion, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string(conversion)?);
    } else {
        println!("{}\t{}", conversion.gregorian, conversion.jde);
    }
    Ok(())
}

/// A value counts as JDE first, since digit strings never parse as dates.
/// Surrounding whitespace is ignored for both kinds.
fn validate(input: &str) -> Validation<'_> {
    let (kind, date) = if let Ok(date) = from_jde_str(input.trim()) {
        (Some(Field::Jde), Some(date))
    } else if let Ok(date) = input.parse::<CalendarDate>() {
        (Some(Field::Gregorian), Some(date))
    } else {
        (None, None)
    };
    Validation { input, kind, date }
}

fn watch(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut fields = LinkedFields::today()?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    print_fields(&mut out, &fields, None, json)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim_start();
        if line.is_empty() {
            continue;
        }
        let (tag, text) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let field = match tag {
            "g" | "gregorian" => Field::Gregorian,
            "j" | "jde" => Field::Jde,
            "q" | "quit" => break,
            other => {
                log::warn!("unknown field {other:?}, expected `g <date>` or `j <code>`");
                continue;
            }
        };
        let update = fields.set(field, text);
        print_fields(&mut out, &fields, Some(&update), json)?;
    }
    Ok(())
}

fn print_fields(
    out: &mut impl Write,
    fields: &LinkedFields,
    update: Option<&FieldUpdate>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let line = serde_json::json!({ "fields": fields, "update": update });
        writeln!(out, "{line}")?;
        return Ok(());
    }

    let mark = |field| if fields.is_invalid(field) { " (invalid)" } else { "" };
    write!(
        out,
        "gregorian: {}{}\tjde: {}{}",
        fields.gregorian(),
        mark(Field::Gregorian),
        fields.jde(),
        mark(Field::Jde)
    )?;
    if let Some(FieldUpdate::Rejected { reason, .. }) = update {
        write!(out, "\t[{reason}]")?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prefers_jde() {
        let report = validate("124366");
        assert_eq!(report.kind, Some(Field::Jde));
        assert_eq!(report.date, Some(CalendarDate::new(2024, 12, 31).unwrap()));

        let report = validate("99001");
        assert_eq!(report.kind, Some(Field::Jde));
        assert_eq!(report.date, Some(CalendarDate::new(1999, 1, 1).unwrap()));
    }

    #[test]
    fn test_validate_falls_back_to_gregorian() {
        let report = validate("2024-01-15");
        assert_eq!(report.kind, Some(Field::Gregorian));
        assert_eq!(report.date, Some(CalendarDate::new(2024, 1, 15).unwrap()));

        let report = validate("12/31/2024");
        assert_eq!(report.kind, Some(Field::Gregorian));
    }

    #[test]
    fn test_validate_ignores_surrounding_whitespace() {
        let report = validate(" 124015");
        assert_eq!(report.kind, Some(Field::Jde));
        assert_eq!(report.date, Some(CalendarDate::new(2024, 1, 15).unwrap()));
        assert_eq!(report.input, " 124015");

        let report = validate("  2024-01-15 ");
        assert_eq!(report.kind, Some(Field::Gregorian));
    }

    #[test]
    fn test_validate_rejects_invalid_values() {
        for bad in ["23366", "1234", "2023-02-29", "", "  "] {
            let report = validate(bad);
            assert_eq!(report.kind, None, "{bad:?} should be invalid");
            assert_eq!(report.date, None);
        }
    }
}

//! Command-line front end: resolve date phrases and list calendar buckets.

use std::fmt::Write as _;
use std::process;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use date_buckets::{
    iterate_range_at, parse_interval_spec, resolve_date_at, Interval, RangeOptions,
    ResolveOptions, WeekStartDay, DEFAULT_FORMAT,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "date-buckets",
    version,
    about = "Resolve date phrases and split date spans into calendar buckets"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a date expression (YYYY-MM-DD, today, last_week, 3_days_ago, ...)
    Resolve {
        expr: String,

        #[command(flatten)]
        anchor: AnchorArgs,

        /// strftime-style output format
        #[arg(long, default_value = DEFAULT_FORMAT)]
        format: String,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// List the buckets between two date expressions
    Range {
        start: String,
        end: String,
        /// Bucket size: day, weekly, monthly, yearly, <N>_<unit>
        interval: String,

        /// Report each bucket's last day instead of the first day after it
        #[arg(long)]
        end_inclusive: bool,

        #[command(flatten)]
        anchor: AnchorArgs,

        /// strftime-style output format
        #[arg(long, default_value = DEFAULT_FORMAT)]
        format: String,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show how an interval spec is parsed
    Interval {
        spec: String,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct AnchorArgs {
    /// Date to treat as today (YYYY-MM-DD); defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// First day of the week for week buckets
    #[arg(long, value_enum, default_value_t = WeekStart::Sunday)]
    week_start: WeekStart,
}

impl AnchorArgs {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn week_start(&self) -> WeekStartDay {
        match self.week_start {
            WeekStart::Sunday => WeekStartDay::Sunday,
            WeekStart::Monday => WeekStartDay::Monday,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WeekStart {
    Sunday,
    Monday,
}

#[derive(Serialize)]
struct ResolvedOutput<'a> {
    input: &'a str,
    date: String,
}

#[derive(Serialize)]
struct RangeOutput {
    start: String,
    end: String,
}

#[derive(Serialize)]
struct IntervalOutput {
    cadence: u32,
    bucket: String,
    unit: date_buckets::Unit,
    aligned: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Resolve {
            expr,
            anchor,
            format,
            json,
        } => resolve(&expr, &anchor, &format, json),
        Command::Range {
            start,
            end,
            interval,
            end_inclusive,
            anchor,
            format,
            json,
        } => {
            let options = RangeOptions {
                end_inclusive,
                format,
                week_start: anchor.week_start(),
            };
            range(&start, &end, &interval, anchor.today(), &options, json)
        }
        Command::Interval { spec, json } => interval(&spec, json),
    }
}

fn resolve(expr: &str, anchor: &AnchorArgs, format: &str, json: bool) -> Result<()> {
    let options = ResolveOptions {
        week_start: anchor.week_start(),
    };
    let date = resolve_date_at(anchor.today(), expr, &options)
        .with_context(|| format!("failed to resolve '{expr}'"))?;

    let mut rendered = String::new();
    write!(rendered, "{}", date.format(format))
        .map_err(|_| anyhow::anyhow!("invalid format '{format}'"))?;

    if json {
        let out = ResolvedOutput {
            input: expr,
            date: rendered,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{rendered}");
    }
    Ok(())
}

fn range(
    start: &str,
    end: &str,
    interval: &str,
    today: NaiveDate,
    options: &RangeOptions,
    json: bool,
) -> Result<()> {
    let ranges = iterate_range_at(today, start, end, interval, options).with_context(|| {
        format!("failed to build '{interval}' buckets from '{start}' to '{end}'")
    })?;

    if json {
        let out: Vec<RangeOutput> = ranges
            .map(|(start, end)| RangeOutput { start, end })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (start, end) in ranges {
            println!("{start}\t{end}");
        }
    }
    Ok(())
}

fn interval(spec: &str, json: bool) -> Result<()> {
    let parsed =
        parse_interval_spec(spec).with_context(|| format!("failed to parse interval '{spec}'"))?;
    let resolved = Interval::resolve(&parsed.bucket, parsed.cadence, WeekStartDay::default())
        .with_context(|| format!("failed to parse interval '{spec}'"))?;

    let out = IntervalOutput {
        cadence: resolved.cadence(),
        bucket: resolved.bucket().to_string(),
        unit: resolved.unit(),
        aligned: resolved.aligns(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("cadence: {}", out.cadence);
        println!("bucket: {}", out.bucket);
        println!("unit: {}", out.unit);
        println!("aligned: {}", out.aligned);
    }
    Ok(())
}

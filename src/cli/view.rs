use std::{fmt::Display, path::PathBuf};

use anyhow::Result;
use chrono::Local;
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use serde::Serialize;
use tracing::warn;

use crate::{
    activity::{
        filter::{DaySelector, SelectionMode},
        summary::Summary,
        timeline::TimelineEntry,
    },
    config::{ConfigFile, SegmentationKind, ViewConfig},
    source::csv_file::CsvFileSource,
    utils::{
        clock::{Clock, DefaultClock},
        time::{format_local_clock, format_minutes},
    },
    view::{ActivityView, context::ViewContext, refresh},
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct ViewArgs {
    #[arg(
        long,
        short,
        default_value = "activity_log.csv",
        help = "Activity log written by the tracker"
    )]
    file: PathBuf,
    #[arg(
        long,
        short,
        help = "Day to show. Examples are \"today\", \"yesterday\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(
        long,
        short,
        conflicts_with = "date",
        help = "Show a weekday instead of a date. 0 is Sunday, 6 is Saturday"
    )]
    weekday: Option<u32>,
    #[arg(long, help = "Whether the day is matched by date or by weekday of --date")]
    mode: Option<SelectionMode>,
    #[arg(long, short, help = "JSON file with view options")]
    config: Option<PathBuf>,
    #[arg(
        long = "threshold-ms",
        allow_negative_numbers = true,
        help = "Largest gap in milliseconds bridged between samples of the same window"
    )]
    merge_threshold_ms: Option<i64>,
    #[arg(
        long = "top",
        allow_negative_numbers = true,
        help = "Number of top activities in the summary"
    )]
    top_activity_limit: Option<i64>,
    #[arg(long, help = "Treat every sample as its own interval")]
    no_merge: bool,
    #[arg(
        long = "min-minutes",
        allow_negative_numbers = true,
        help = "Hide timeline blocks shorter than this many minutes"
    )]
    min_display_minutes: Option<f64>,
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        help = "Zoom steps applied to the reported hour height"
    )]
    zoom: i32,
    #[arg(long, help = "Print JSON instead of text")]
    json: bool,
}

impl ViewArgs {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            merge_threshold_ms: self.merge_threshold_ms,
            top_activity_limit: self.top_activity_limit,
            selection_mode: self.mode,
            segmentation: self.no_merge.then_some(SegmentationKind::PerEvent),
            min_display_minutes: self.min_display_minutes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutput {
    Summary,
    Timeline,
    Report,
}

struct ViewParams {
    file: PathBuf,
    config: ViewConfig,
    context: ViewContext,
    selector: DaySelector,
    json: bool,
}

/// Validates arguments and provides sensible defaults for view commands. Nothing here touches
/// the activity log.
async fn resolve_params(args: ViewArgs, clock: &dyn Clock) -> Result<ViewParams> {
    let file_config = match &args.config {
        Some(path) => ConfigFile::load(path).await?,
        None => ConfigFile::default(),
    };
    let config = ViewConfig::try_from(file_config.merge(args.overrides()))?;

    let now = clock.now();
    let mut context = match &args.date {
        Some(text) => match parse_date_string(text, now, args.date_style.into()) {
            Ok(v) => ViewContext::new(v.with_timezone(&Local).date_naive()),
            Err(e) => {
                return Err(Args::command()
                    .error(
                        clap::error::ErrorKind::ValueValidation,
                        format!("Failed to validate date {e}"),
                    )
                    .into());
            }
        },
        None => ViewContext::today(clock),
    };
    for _ in 0..args.zoom.unsigned_abs() {
        if args.zoom > 0 {
            context.zoom_in();
        } else {
            context.zoom_out();
        }
    }

    let selector = match args.weekday {
        Some(ordinal) => DaySelector::weekday_ordinal(ordinal)?,
        None => context.selector(config.selection_mode),
    };

    Ok(ViewParams {
        file: args.file,
        config,
        context,
        selector,
        json: args.json,
    })
}

/// Command to process `summary`, `timeline` and `report`. Each run reads the whole log once and
/// derives the requested view from it.
pub async fn process_view_command(args: ViewArgs, output: ViewOutput) -> Result<()> {
    let params = resolve_params(args, &DefaultClock).await?;

    let log = refresh(&CsvFileSource::new(&params.file), &Local).await?;
    if log.is_empty() {
        warn!("Activity log {:?} has no usable events", params.file);
    }
    let view = log.view(&params.config, params.selector);

    match output {
        ViewOutput::Report => print_json(&Report::new(&params, &view))?,
        ViewOutput::Summary if params.json => print_json(&view.summary)?,
        ViewOutput::Timeline if params.json => print_json(&view.timeline)?,
        ViewOutput::Summary => print_summary(&params.selector, &view.summary),
        ViewOutput::Timeline => print_timeline(&params.selector, &view.timeline),
    }
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    day: String,
    mode: SelectionMode,
    hour_height: f64,
    #[serde(flatten)]
    view: &'a ActivityView,
}

impl<'a> Report<'a> {
    fn new(params: &ViewParams, view: &'a ActivityView) -> Self {
        Self {
            day: params.selector.to_string(),
            mode: params.selector.mode(),
            hour_height: params.context.hour_height(),
            view,
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(selector: &DaySelector, summary: &Summary) {
    println!("{selector}");
    println!("Total\t{}", format_minutes(summary.total_minutes));
    match (summary.start_time, summary.end_time) {
        (Some(start), Some(end)) => println!(
            "Range\t{} - {}",
            format_local_clock(start),
            format_local_clock(end)
        ),
        _ => println!("Range\tno activity"),
    }
    if !summary.top_activities.is_empty() {
        println!();
        for entry in &summary.top_activities {
            println!("{}\t{}", format_minutes(entry.minutes), entry.title);
        }
    }
}

fn print_timeline(selector: &DaySelector, timeline: &[TimelineEntry]) {
    println!("{selector}");
    for entry in timeline {
        match &entry.additional_info {
            Some(info) => println!(
                "{}\t{}m\t{}\t{info}",
                entry.time, entry.duration_minutes, entry.title
            ),
            None => println!("{}\t{}m\t{}", entry.time, entry.duration_minutes, entry.title),
        }
    }
}

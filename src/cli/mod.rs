pub mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use view::{ViewArgs, ViewOutput, process_view_command};

use crate::utils::{
    dir::create_application_default_path,
    logging::{CLI_PREFIX, enable_logging},
};

#[derive(Parser, Debug)]
#[command(name = "focuslog", version, long_about = None)]
#[command(about = "Timeline and summary of a window focus log", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Show total tracked time, active span and top activities of a day")]
    Summary {
        #[command(flatten)]
        args: ViewArgs,
    },
    #[command(about = "Show the segmented timeline of a day")]
    Timeline {
        #[command(flatten)]
        args: ViewArgs,
    },
    #[command(about = "Print both summary and timeline of a day as JSON")]
    Report {
        #[command(flatten)]
        args: ViewArgs,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log,
    )?;

    match args.commands {
        Commands::Summary { args } => process_view_command(args, ViewOutput::Summary).await,
        Commands::Timeline { args } => process_view_command(args, ViewOutput::Timeline).await,
        Commands::Report { args } => process_view_command(args, ViewOutput::Report).await,
    }
}

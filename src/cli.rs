use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Play a health recap slideshow from a metrics file", long_about = None)]
pub struct Args {
    /// JSON file holding one metric snapshot
    #[arg(short, long)]
    pub metrics: PathBuf,

    /// Year to recap; defaults to the current one
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month to recap, 1-12; omit for the full year
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Unlock past periods
    #[arg(long, default_value_t = false)]
    pub pro: bool,

    /// Restore a subscription bought earlier instead of starting entitled
    #[arg(long, default_value_t = false, conflicts_with = "pro")]
    pub restore: bool,

    #[arg(short, long, default_value = "settings.json")]
    pub settings: PathBuf,

    /// Write the summary card and caption here once the slideshow finishes
    #[arg(long)]
    pub share_dir: Option<PathBuf>,
}

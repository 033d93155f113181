//! Bubble Chart - GDP vs Life Expectancy
//!
//! Loads two per-country indicator tables, joins them by country and writes
//! an interactive bubble chart for one year.

mod charts;
mod config;
mod data;

use anyhow::{Context, Result};
use charts::{BubbleLayout, ChartRenderer};
use clap::Parser;
use config::{ChartConfig, ColorMode};
use data::{join_tables, load_both, unmatched};
use log::{debug, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bubble-chart", version, about = "Render a GDP vs life expectancy bubble chart")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV with the first indicator (x axis and bubble size)
    #[arg(long)]
    first: Option<PathBuf>,

    /// CSV with the second indicator (y axis)
    #[arg(long)]
    second: Option<PathBuf>,

    /// Year column used for every encoding
    #[arg(short, long)]
    year: Option<i32>,

    /// Column holding the entity name in both tables
    #[arg(long)]
    key_column: Option<String>,

    /// Output file (.html, .svg or .png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Derive colours from country names instead of picking them at random
    #[arg(long)]
    stable_colors: bool,

    /// Open the written chart with the default application
    #[arg(long)]
    open: bool,
}

impl Cli {
    fn into_config(self) -> Result<(ChartConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_file(path)?,
            None => ChartConfig::default(),
        };

        if let Some(first) = self.first {
            config.first_dataset = first;
        }
        if let Some(second) = self.second {
            config.second_dataset = second;
        }
        if let Some(year) = self.year {
            config.year = year;
        }
        if let Some(key_column) = self.key_column {
            config.key_column = key_column;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.stable_colors {
            config.color_mode = ColorMode::Stable;
        }

        config.validate()?;
        Ok((config, self.open))
    }
}

fn run(config: &ChartConfig) -> Result<PathBuf> {
    let (first, second) = load_both(config).context("Loading indicator tables")?;

    let records = join_tables(&first, &second);
    let missing = unmatched(&records);
    if !missing.is_empty() {
        warn!(
            "{} of {} entities have no match in {}",
            missing.len(),
            records.len(),
            config.second_dataset.display()
        );
    }

    let layout = BubbleLayout::compute(&records, config);
    debug!(
        "Year {}: {}x{} plot, x domain {:?}, y domain {:?}",
        config.year, layout.plot_width, layout.plot_height, layout.x.domain, layout.y.domain
    );

    let path = ChartRenderer::write(&layout, config).context("Rendering chart")?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();

    let (config, open_after) = Cli::parse().into_config()?;
    let path = run(&config)?;

    if open_after {
        if let Err(err) = open::that(&path) {
            warn!("Could not open {}: {}", path.display(), err);
        }
    }

    Ok(())
}

//! The export pipeline: resolve holidays, compute the grid, render and save.
//!
//! Each phase runs to completion before the next one starts. A failed phase
//! stops the run and is returned to the caller with context attached.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::models::holiday::HolidaySet;
use crate::models::settings::Settings;
use crate::services::calendar::compute_fortnight;
use crate::services::export::{
    default_output_dir, encode_png, export_filename, render_svg, save_image, Rasterizer,
    RenderStyle,
};
use crate::services::holiday::HolidaySource;

pub struct SnapshotService {
    style: RenderStyle,
    rasterizer: Rasterizer,
    output_dir: PathBuf,
}

impl SnapshotService {
    pub fn new(settings: &Settings) -> Self {
        Self::with_rasterizer(settings, Rasterizer::new(settings.raster_attempts))
    }

    pub fn with_rasterizer(settings: &Settings, rasterizer: Rasterizer) -> Self {
        Self {
            style: RenderStyle::from_settings(settings),
            rasterizer,
            output_dir: settings
                .output_dir
                .clone()
                .unwrap_or_else(default_output_dir),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run all phases for `today` and return the written file.
    pub fn run(&self, source: &dyn HolidaySource, today: NaiveDate) -> Result<PathBuf> {
        log::info!("Resolving holidays");
        let holidays = source
            .fetch_holidays()
            .context("Failed to load public holidays")?;

        self.export(&holidays, today)
    }

    /// Render and save the grid for `today` against an already resolved set.
    pub fn export(&self, holidays: &HolidaySet, today: NaiveDate) -> Result<PathBuf> {
        let grid = compute_fortnight(today)
            .ok_or_else(|| anyhow!("{} is outside the supported date range", today))?;
        log::debug!(
            "Computed {} week rows from {:?} to {:?}, {} holidays in range",
            grid.week_count(),
            grid.dates().next().map(|d| d.date()),
            grid.dates().last().map(|d| d.date()),
            grid.dates().filter(|d| holidays.contains(d.date())).count()
        );

        log::info!("Rendering calendar for {}", today);
        let svg = render_svg(&grid, holidays, &self.style);
        let pixmap = self
            .rasterizer
            .rasterize(&svg)
            .context("Failed to rasterize calendar")?;
        let bytes = encode_png(&pixmap).context("Failed to encode calendar image")?;

        let filename = export_filename(today);
        let path = save_image(&self.output_dir, &filename, &bytes)
            .with_context(|| format!("Failed to save {} to {:?}", filename, self.output_dir))?;

        log::info!("Saved calendar image to {:?}", path);
        Ok(path)
    }
}

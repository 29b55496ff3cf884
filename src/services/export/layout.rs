//! Fixed-size SVG layout of the calendar grid.
//!
//! Every day gets a 320×400 cell; the label sits centered near the top edge.
//! Rows and columns are separated by 1px slate dividers on a white page.

use std::fmt::Write as _;

use crate::models::calendar::{CalendarGrid, DayKind, DAYS_PER_WEEK};
use crate::models::holiday::HolidaySet;
use crate::models::settings::{Settings, DEFAULT_FONT_FAMILY};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub cell_width: u32,
    pub cell_height: u32,
    pub font_family: String,
    pub font_size: f32,
    /// Distance from the cell top to the label baseline
    pub label_baseline: f32,
    pub background: &'static str,
    pub divider: &'static str,
    pub holiday_text: &'static str,
    pub saturday_text: &'static str,
    pub plain_text: &'static str,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cell_width: 320,
            cell_height: 400,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 16.0,
            label_baseline: 18.0,
            background: "#ffffff",
            divider: "#e2e8f0",
            holiday_text: "#dc2626",
            saturday_text: "#2563eb",
            plain_text: "#000000",
        }
    }
}

impl RenderStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            font_family: settings.font_family.clone(),
            ..Default::default()
        }
    }

    pub fn text_color(&self, kind: DayKind) -> &'static str {
        match kind {
            DayKind::SundayOrHoliday => self.holiday_text,
            DayKind::Saturday => self.saturday_text,
            DayKind::Plain => self.plain_text,
        }
    }

    /// Pixel size of the whole block for `weeks` rows.
    pub fn canvas_size(&self, weeks: usize) -> (u32, u32) {
        (
            self.cell_width * DAYS_PER_WEEK as u32,
            self.cell_height * weeks as u32,
        )
    }
}

/// Lay out `grid` as a standalone SVG document.
pub fn render_svg(grid: &CalendarGrid, holidays: &HolidaySet, style: &RenderStyle) -> String {
    let (width, height) = style.canvas_size(grid.week_count());
    let mut svg = String::with_capacity(4096);

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        width, height, style.background
    );

    let _ = writeln!(svg, r#"<g fill="{}">"#, style.divider);
    for row in 1..grid.week_count() as u32 {
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="{}" width="{}" height="1"/>"#,
            row * style.cell_height,
            width
        );
    }
    for col in 1..DAYS_PER_WEEK as u32 {
        let _ = writeln!(
            svg,
            r#"<rect x="{}" y="0" width="1" height="{}"/>"#,
            col * style.cell_width,
            height
        );
    }
    svg.push_str("</g>\n");

    let _ = writeln!(
        svg,
        r#"<g font-family="{}" font-size="{}" font-weight="bold" text-anchor="middle">"#,
        escape_xml(&style.font_family),
        style.font_size
    );
    for (row_index, row) in grid.cells(holidays).iter().enumerate() {
        let top = row_index as u32 * style.cell_height;
        for (col_index, cell) in row.iter().enumerate() {
            let center = col_index as f32 * style.cell_width as f32 + style.cell_width as f32 / 2.0;
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" fill="{}">{}</text>"#,
                center,
                top as f32 + style.label_baseline,
                style.text_color(cell.kind),
                escape_xml(&cell.label)
            );
        }
    }
    svg.push_str("</g>\n</svg>\n");

    svg
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

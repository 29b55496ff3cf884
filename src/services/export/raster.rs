//! SVG to pixmap rasterization with a bounded placeholder retry.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::sync::Arc;

use super::ExportError;

pub struct Rasterizer {
    options: usvg::Options<'static>,
    max_attempts: u32,
}

impl Rasterizer {
    /// Rasterizer backed by the fonts installed on this machine.
    pub fn new(max_attempts: u32) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} font faces for rasterization", db.len());
        ensure_sans_serif(&mut db);
        Self::with_fonts(db, max_attempts)
    }

    pub fn with_fonts(db: fontdb::Database, max_attempts: u32) -> Self {
        let options = usvg::Options {
            fontdb: Arc::new(db),
            ..Default::default()
        };
        Self {
            options,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn font_count(&self) -> usize {
        self.options.fontdb.len()
    }

    /// Rasterize `svg`, retrying while the result is a placeholder.
    ///
    /// Fails with [`ExportError::MissingText`] when a `<text>` element could
    /// not be shaped with the loaded fonts, since the image would otherwise be
    /// saved without those labels.
    pub fn rasterize(&self, svg: &str) -> Result<Pixmap, ExportError> {
        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|e| ExportError::Svg(e.to_string()))?;

        let expected = svg.matches("<text").count();
        let rendered = rendered_text_count(tree.root());
        if rendered < expected {
            return Err(ExportError::MissingText { rendered, expected });
        }

        let size = tree.size().to_int_size();

        for attempt in 1..=self.max_attempts {
            let mut pixmap = Pixmap::new(size.width(), size.height()).ok_or(
                ExportError::EmptyCanvas {
                    width: size.width(),
                    height: size.height(),
                },
            )?;
            resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

            if !is_placeholder(&pixmap) {
                return Ok(pixmap);
            }
            log::warn!(
                "Raster attempt {}/{} produced a blank image",
                attempt,
                self.max_attempts
            );
        }

        Err(ExportError::PlaceholderRaster {
            attempts: self.max_attempts,
        })
    }
}

/// A pixmap nothing was painted on.
pub fn is_placeholder(pixmap: &Pixmap) -> bool {
    pixmap.pixels().iter().all(|p| p.alpha() == 0)
}

/// Text nodes under `group` that produced at least one glyph outline.
/// usvg drops text it cannot lay out, so unshaped labels are simply absent.
fn rendered_text_count(group: &usvg::Group) -> usize {
    group
        .children()
        .iter()
        .map(|node| match node {
            usvg::Node::Group(child) => rendered_text_count(child),
            usvg::Node::Text(text) => usize::from(!text.flattened().children().is_empty()),
            _ => 0,
        })
        .sum()
}

/// fontdb maps the generic `sans-serif` family to Arial, which many Linux
/// installs lack. Point it at the first installed face in that case.
fn ensure_sans_serif(db: &mut fontdb::Database) {
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    if db.query(&query).is_some() {
        return;
    }

    let fallback = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
    if let Some(name) = fallback {
        log::debug!("Using {} as the sans-serif fallback", name);
        db.set_sans_serif_family(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterizer(attempts: u32) -> Rasterizer {
        Rasterizer::with_fonts(fontdb::Database::new(), attempts)
    }

    #[test]
    fn test_rasterize_filled_rect() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"><rect width="8" height="4" fill="#2563eb"/></svg>"##;
        let pixmap = rasterizer(1).rasterize(svg).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (8, 4));
        let px = pixmap.pixel(0, 0).unwrap();
        assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (0x25, 0x63, 0xeb, 0xff));
    }

    #[test]
    fn test_blank_svg_fails_after_bounded_attempts() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"></svg>"#;
        match rasterizer(3).rasterize(svg) {
            Err(ExportError::PlaceholderRaster { attempts }) => assert_eq!(attempts, 3),
            other => panic!("expected placeholder error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_svg_is_reported() {
        assert!(matches!(
            rasterizer(1).rasterize("not svg"),
            Err(ExportError::Svg(_))
        ));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        assert_eq!(rasterizer(0).max_attempts(), 1);
    }

    #[test]
    fn test_text_without_fonts_is_an_error() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32"><rect width="64" height="32" fill="#ffffff"/><text x="4" y="20">3/1</text><text x="34" y="20">3/2</text></svg>"##;
        match rasterizer(2).rasterize(svg) {
            Err(ExportError::MissingText { rendered, expected }) => {
                assert_eq!((rendered, expected), (0, 2));
            }
            other => panic!("expected missing text error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_system_fonts_draw_label_colors() {
        use crate::models::holiday::HolidaySet;
        use crate::services::calendar::compute_fortnight;
        use crate::services::export::{render_svg, RenderStyle};
        use chrono::NaiveDate;

        let rasterizer = Rasterizer::new(1);
        if rasterizer.font_count() == 0 {
            eprintln!("No system fonts installed; skipping label color check");
            return;
        }

        let style = RenderStyle::default();
        let grid = compute_fortnight(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
        let svg = render_svg(&grid, &HolidaySet::new(), &style);
        let pixmap = rasterizer.rasterize(&svg).unwrap();

        // Label band at the top of a cell in the first row
        let band = |col: u32, pick: fn(u8, u8, u8) -> bool| {
            let x0 = col * style.cell_width;
            (x0..x0 + style.cell_width).any(|x| {
                (0..30).any(|y| {
                    let px = pixmap.pixel(x, y).unwrap();
                    pick(px.red(), px.green(), px.blue())
                })
            })
        };
        let reddish = |r: u8, g: u8, b: u8| r as i32 - g as i32 > 100 && r as i32 - b as i32 > 100;
        let bluish = |r: u8, g: u8, b: u8| b as i32 - r as i32 > 100 && b as i32 - g as i32 > 50;
        let dark = |r: u8, g: u8, b: u8| r < 100 && g < 100 && b < 100;

        assert!(band(0, reddish), "Sunday label should be drawn in red");
        assert!(band(6, bluish), "Saturday label should be drawn in blue");
        assert!(band(1, dark), "Weekday label should be drawn in black");
        assert!(!band(1, reddish));
    }
}

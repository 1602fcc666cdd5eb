//! Certificate text rendering.
//!
//! Draws horizontally centered text lines onto a copy of a template image
//! and encodes the result as PNG. The template asset itself is never
//! modified.
//!
//! For each line the rendered bounding box is measured at the configured
//! font and size, and the horizontal origin is `(template_width −
//! text_width) / 2`. Vertical offsets are design constants supplied by the
//! caller, not computed.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::error::{Error, Result};

/// Scale divisor for the verification line relative to the main font size.
const VERIFY_SCALE_DIV: f32 = 3.0;

/// Fixed text placement for a template family.
///
/// Vertical offsets are measured against the template artwork; the
/// horizontal position is always computed from the rendered text width.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Vertical offset of the name line, in pixels from the top
    pub name_y: i32,
    /// Vertical offset of the team line
    pub team_y: i32,
    /// Vertical offset of the verification line, if the template has one
    pub verify_y: Option<i32>,
    /// Point size for the name and team lines
    pub font_size: f32,
    /// Fill color for all text
    pub color: Rgba<u8>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name_y: 628,
            team_y: 974,
            verify_y: None,
            font_size: 93.0,
            color: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Renders personalized text onto certificate templates.
pub struct Renderer {
    font: Font<'static>,
    layout: Layout,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Create a renderer by loading a TTF/OTF font from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FontLoad`] when the file is missing or not a valid
    /// font. There is no fallback font; certificate production halts rather
    /// than degrading silently.
    pub fn from_file(path: &Path, layout: Layout) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = Font::try_from_vec(bytes).ok_or_else(|| Error::FontLoad {
            path: path.to_path_buf(),
            reason: "not a valid font file".to_string(),
        })?;
        Ok(Self { font, layout })
    }

    /// The layout this renderer draws with.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Render a certificate.
    ///
    /// `name` is drawn in title case; `team` keeps its stored casing; the
    /// optional `verification` line is drawn at one third of the main font
    /// size, and only when the layout has a `verify_y` offset. Every line is
    /// horizontally centered. Returns the PNG-encoded result; the input
    /// template is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn render(
        &self,
        template: &RgbaImage,
        name: &str,
        team: &str,
        verification: Option<&str>,
    ) -> Result<Vec<u8>> {
        let mut canvas = template.clone();
        let main_px = self.layout.font_size;

        self.draw_centered(&mut canvas, &title_case(name), main_px, self.layout.name_y);
        self.draw_centered(&mut canvas, team, main_px, self.layout.team_y);

        if let (Some(line), Some(y)) = (verification, self.layout.verify_y) {
            self.draw_centered(&mut canvas, line, main_px / VERIFY_SCALE_DIV, y);
        }

        encode_png(&canvas)
    }

    fn draw_centered(&self, canvas: &mut RgbaImage, text: &str, px: f32, y: i32) {
        let width = text_width(&self.font, px, text);
        let x = centered_x(canvas.width(), width);
        draw_text(
            canvas,
            &self.font,
            px,
            x.round() as i32,
            y,
            self.layout.color,
            text,
        );
    }
}

/// Horizontal origin that centers a run of text of width `text_width` on an
/// image `image_width` pixels wide.
#[must_use]
pub fn centered_x(image_width: u32, text_width: f32) -> f32 {
    (image_width as f32 - text_width) / 2.0
}

/// Measure the rendered width of `text` at `px` pixels.
#[must_use]
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut width: f32 = 0.0;
    for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
    }
    width
}

/// Title-case a display name: first letter of each word uppercased, the
/// rest lowercased.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a `#rrggbb` hex color into an opaque RGBA pixel.
///
/// # Errors
///
/// Returns [`Error::InvalidColor`] for anything but 6 hex digits with an
/// optional `#` prefix.
pub fn parse_hex_color(input: &str) -> Result<Rgba<u8>> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(input.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(input.to_string()))
    };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;
    let mut caret = x as f32;

    for ch in text.chars() {
        let glyph = font.glyph(ch).scaled(scale).positioned(point(caret, baseline));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px_x = gx as i32 + bb.min.x;
                let px_y = gy as i32 + bb.min.y;
                if px_x < 0 || px_y < 0 {
                    return;
                }
                let (px_x, px_y) = (px_x as u32, px_y as u32);
                if px_x >= img.width() || px_y >= img.height() {
                    return;
                }
                let alpha = coverage.clamp(0.0, 1.0);
                if alpha <= 0.0 {
                    return;
                }
                let dst = img.get_pixel_mut(px_x, px_y);
                let inv = 1.0 - alpha;
                dst.0[0] = (f32::from(color.0[0]) * alpha + f32::from(dst.0[0]) * inv) as u8;
                dst.0[1] = (f32::from(color.0[1]) * alpha + f32::from(dst.0[1]) * inv) as u8;
                dst.0[2] = (f32::from(color.0[2]) * alpha + f32::from(dst.0[2]) * inv) as u8;
                dst.0[3] = 255;
            });
        }
        caret += glyph.unpositioned().h_metrics().advance_width;
    }
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(img, img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];

    fn system_font() -> Option<&'static Path> {
        FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
    }

    fn test_layout() -> Layout {
        Layout {
            name_y: 40,
            team_y: 100,
            verify_y: Some(160),
            font_size: 24.0,
            ..Layout::default()
        }
    }

    #[test]
    fn test_centered_x_halves_the_margin() {
        assert!((centered_x(1000, 400.0) - 300.0).abs() < f32::EPSILON);
        assert!((centered_x(401, 100.0) - 150.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("asha roy"), "Asha Roy");
        assert_eq!(title_case("ASHA ROY"), "Asha Roy");
        assert_eq!(title_case("  asha   roy "), "Asha Roy");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_hex_color("1A2b3C").unwrap(), Rgba([26, 43, 60, 255]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }

    #[test]
    fn test_missing_font_fails() {
        let err = Renderer::from_file(Path::new("/no/such/font.ttf"), Layout::default());
        assert!(matches!(err.unwrap_err(), Error::FontLoad { .. }));
    }

    #[test]
    fn test_malformed_font_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bogus.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = Renderer::from_file(&path, Layout::default());
        assert!(matches!(err.unwrap_err(), Error::FontLoad { .. }));
    }

    #[test]
    fn test_render_preserves_dimensions() {
        let Some(font_path) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let renderer = Renderer::from_file(font_path, test_layout()).unwrap();
        let template = RgbaImage::from_pixel(400, 220, Rgba([10, 20, 30, 255]));

        let png = renderer
            .render(&template, "asha roy", "Byte Busters", Some("ID: a1b2c"))
            .unwrap();

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 400);
        assert_eq!(decoded.height(), 220);
    }

    #[test]
    fn test_render_does_not_mutate_template() {
        let Some(font_path) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let renderer = Renderer::from_file(font_path, test_layout()).unwrap();
        let template = RgbaImage::from_pixel(400, 220, Rgba([10, 20, 30, 255]));
        let before = template.clone();

        renderer
            .render(&template, "Asha Roy", "Byte Busters", None)
            .unwrap();

        assert_eq!(template, before);
    }

    #[test]
    fn test_drawn_text_is_horizontally_centered() {
        let Some(font_path) = system_font() else {
            eprintln!("no system font found, skipping");
            return;
        };
        let layout = Layout {
            team_y: 1000,
            verify_y: None,
            ..test_layout()
        };
        let renderer = Renderer::from_file(font_path, layout).unwrap();
        let background = Rgba([0, 0, 0, 255]);
        let template = RgbaImage::from_pixel(600, 120, background);

        let png = renderer.render(&template, "Centered", "", None).unwrap();
        let drawn = image::load_from_memory(&png).unwrap().to_rgba8();

        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for (x, _, pixel) in drawn.enumerate_pixels() {
            if *pixel != background {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        assert!(min_x < max_x, "no text was drawn");

        // The ink midpoint should sit on the image centerline, give or take
        // rounding and the first glyph's side bearing.
        let midpoint = f64::from(min_x + max_x) / 2.0;
        assert!(
            (midpoint - 300.0).abs() <= 3.0,
            "ink centered at {midpoint}, expected ~300"
        );
    }
}

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use thiserror::Error;

pub const CARD_WIDTH: u32 = 800;
pub const CARD_HEIGHT: u32 = 1200;

const BACKGROUND: Rgba<u8> = Rgba([0x2a, 0x2a, 0x2a, 0xff]);
const ROSE_GOLD: Rgba<u8> = Rgba([0xc9, 0x93, 0x83, 0xff]);
const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

const LOGO_SIZE: u32 = 80;
const LOGO_X: u32 = 60;
const LOGO_Y: u32 = 40;
const ARTWORK_MAX_WIDTH: u32 = 500;
const ARTWORK_MAX_HEIGHT: u32 = 400;
const ARTWORK_TOP: u32 = 180;
const FRAME_WIDTH: u32 = 6;
const BODY_LEFT: f32 = 40.0;
const BODY_TOP: f32 = 750.0;
const BODY_PX: f32 = 16.0;
const LINE_HEIGHT: f32 = 22.0;
const PARAGRAPH_GAP: f32 = 10.0;
const BODY_BOTTOM: f32 = (CARD_HEIGHT - 50) as f32;

pub const WORDMARK: &str = "ARTL";
pub const SITE_URL: &str = "https://artl.app";
pub const FOOTER: &str = "Generated by ARTL - Instant AI Art Analysis";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("artwork image could not be decoded: {0}")]
    DecodeArtwork(#[source] image::ImageError),
    #[error("font could not be parsed")]
    InvalidFont,
    #[error("font could not be read: {0}")]
    ReadFont(#[from] std::io::Error),
    #[error("png encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Horizontal extent of a run of text at a pixel size.
pub trait TextMeasure {
    fn width(&self, text: &str, px: f32) -> f32;
}

/// Every character advances by `em * px`. Useful when no font is loaded.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub em: f32,
}

impl TextMeasure for FixedAdvance {
    fn width(&self, text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * px * self.em
    }
}

pub struct FontFace {
    font: FontVec,
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ComposeError> {
        let font = FontVec::try_from_vec(bytes).map_err(|_| ComposeError::InvalidFont)?;
        Ok(Self { font })
    }

    pub fn load(path: &Path) -> Result<Self, ComposeError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    fn draw(&self, canvas: &mut RgbaImage, text: &str, px: f32, x: f32, baseline: f32, color: Rgba<u8>) {
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let mut caret = x;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px_x = bounds.min.x as i64 + i64::from(gx);
                let px_y = bounds.min.y as i64 + i64::from(gy);
                if px_x < 0 || px_y < 0 || px_x >= i64::from(canvas.width()) || px_y >= i64::from(canvas.height()) {
                    return;
                }
                blend(canvas.get_pixel_mut(px_x as u32, px_y as u32), color, coverage);
            });
        }
    }

    fn draw_centered(&self, canvas: &mut RgbaImage, text: &str, px: f32, baseline: f32, color: Rgba<u8>) {
        let x = (CARD_WIDTH as f32 - self.width(text, px)) / 2.0;
        self.draw(canvas, text, px, x.max(0.0), baseline, color);
    }
}

impl TextMeasure for FontFace {
    fn width(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }
}

/// Optional decorations loaded once at startup.
#[derive(Clone, Default)]
pub struct CardAssets {
    pub font: Option<Arc<FontFace>>,
    pub logo: Option<Arc<Vec<u8>>>,
}

/// What the exported card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    pub artwork: Vec<u8>,
    pub title: Option<String>,
    pub byline: Option<String>,
    pub body: String,
}

/// Largest size with the source aspect ratio that fits the box.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max_width, max_height);
    }
    let ratio = width as f64 / height as f64;
    let (w, h) = if ratio > max_width as f64 / max_height as f64 {
        (max_width as f64, max_width as f64 / ratio)
    } else {
        (max_height as f64 * ratio, max_height as f64)
    };
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

/// Wraps each non-blank paragraph into lines no wider than `max_width`.
///
/// Words are separated by whitespace. A single word wider than a line is
/// broken between characters, which is what keeps unspaced CJK text inside
/// the card.
pub fn wrap_paragraphs(
    text: &str,
    max_width: f32,
    px: f32,
    measure: &dyn TextMeasure,
) -> Vec<Vec<String>> {
    text.split('\n')
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| wrap_paragraph(paragraph, max_width, px, measure))
        .collect()
}

fn wrap_paragraph(paragraph: &str, max_width: f32, px: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in paragraph.split_whitespace() {
        for piece in split_overlong(word, max_width, px, measure) {
            let candidate = if line.is_empty() {
                piece.clone()
            } else {
                format!("{line} {piece}")
            };
            if !line.is_empty() && measure.width(&candidate, px) > max_width {
                lines.push(std::mem::replace(&mut line, piece));
            } else {
                line = candidate;
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_overlong(word: &str, max_width: f32, px: f32, measure: &dyn TextMeasure) -> Vec<String> {
    if measure.width(word, px) <= max_width {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if measure.width(&current, px) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Renders the shareable analysis card as PNG bytes.
pub fn compose_analysis_card(
    content: &CardContent,
    assets: &CardAssets,
    date: &str,
) -> Result<Vec<u8>, ComposeError> {
    let mut canvas = RgbaImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, BACKGROUND);

    if let Some(logo) = &assets.logo {
        match image::load_from_memory(logo) {
            Ok(logo) => {
                let logo = imageops::resize(&logo.to_rgba8(), LOGO_SIZE, LOGO_SIZE, FilterType::Triangle);
                imageops::overlay(&mut canvas, &logo, i64::from(LOGO_X), i64::from(LOGO_Y));
            }
            Err(err) => critic_logging::critic_warn!("compose: logo skipped: {err}"),
        }
    }

    let artwork = image::load_from_memory(&content.artwork).map_err(ComposeError::DecodeArtwork)?;
    let (width, height) = fit_within(
        artwork.width(),
        artwork.height(),
        ARTWORK_MAX_WIDTH,
        ARTWORK_MAX_HEIGHT,
    );
    let artwork = artwork.resize_exact(width, height, FilterType::Triangle).to_rgba8();
    let left = (CARD_WIDTH - width) / 2;
    fill_rect(
        &mut canvas,
        left - FRAME_WIDTH,
        ARTWORK_TOP - FRAME_WIDTH,
        width + FRAME_WIDTH * 2,
        height + FRAME_WIDTH * 2,
        ROSE_GOLD,
    );
    imageops::overlay(&mut canvas, &artwork, i64::from(left), i64::from(ARTWORK_TOP));

    match &assets.font {
        Some(font) => draw_text(&mut canvas, font, content, date, (ARTWORK_TOP + height) as f32),
        None => critic_logging::critic_warn!("compose: no font configured, card has no text"),
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(ComposeError::Encode)?;
    Ok(png)
}

fn draw_text(canvas: &mut RgbaImage, font: &FontFace, content: &CardContent, date: &str, artwork_bottom: f32) {
    let wordmark_x = (LOGO_X + LOGO_SIZE + 20) as f32;
    font.draw(canvas, WORDMARK, 64.0, wordmark_x, (LOGO_Y + 50) as f32, ROSE_GOLD);
    font.draw_centered(canvas, SITE_URL, 20.0, (LOGO_Y + LOGO_SIZE + 50) as f32, ROSE_GOLD);

    let info_y = artwork_bottom + 50.0;
    if let Some(title) = &content.title {
        font.draw_centered(canvas, title, 32.0, info_y, ROSE_GOLD);
    }
    if let Some(byline) = &content.byline {
        font.draw_centered(canvas, byline, 24.0, info_y + 40.0, ROSE_GOLD);
    }

    let max_width = CARD_WIDTH as f32 - 2.0 * BODY_LEFT;
    let mut y = BODY_TOP;
    'paragraphs: for paragraph in wrap_paragraphs(&content.body, max_width, BODY_PX, font) {
        for line in paragraph {
            if y > BODY_BOTTOM {
                critic_logging::critic_debug!("compose: body truncated at y={y}");
                break 'paragraphs;
            }
            font.draw(canvas, &line, BODY_PX, BODY_LEFT, y, WHITE);
            y += LINE_HEIGHT;
        }
        y += PARAGRAPH_GAP;
    }

    font.draw_centered(canvas, FOOTER, 12.0, (CARD_HEIGHT - 30) as f32, ROSE_GOLD);
    font.draw_centered(canvas, date, 12.0, (CARD_HEIGHT - 15) as f32, ROSE_GOLD);
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let right = (x + width).min(canvas.width());
    let bottom = (y + height).min(canvas.height());
    for py in y..bottom {
        for px in x..right {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn blend(pixel: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0);
    for channel in 0..3 {
        let under = f32::from(pixel.0[channel]);
        let over = f32::from(color.0[channel]);
        pixel.0[channel] = (under * (1.0 - alpha) + over * alpha).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_images_fill_the_width() {
        assert_eq!(fit_within(1000, 500, 500, 400), (500, 250));
    }

    #[test]
    fn tall_images_fill_the_height() {
        assert_eq!(fit_within(300, 600, 500, 400), (200, 400));
    }

    #[test]
    fn small_images_are_scaled_up() {
        assert_eq!(fit_within(50, 40, 500, 400), (500, 400));
    }

    #[test]
    fn blend_full_coverage_takes_color() {
        let mut pixel = BACKGROUND;
        blend(&mut pixel, WHITE, 1.0);
        assert_eq!(pixel, WHITE);
    }
}

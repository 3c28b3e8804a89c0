use std::io::Cursor;

use anyhow::{bail, Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::Serialize;

use crate::{formatter::thresholds::table, slides::accent_color};

use super::SummaryCard;

pub const CARD_WIDTH: u32 = 540;
pub const CARD_HEIGHT: u32 = 960;
pub const PNG_MIME: &str = "image/png";

const TOP_COLOR: [u8; 3] = [0x12, 0x12, 0x12];
const BOTTOM_COLOR: [u8; 3] = [0x2C, 0x3E, 0x50];
const HEADER_COLOR: [u8; 3] = [0x4E, 0xCD, 0xC4];

/// Encoded summary card ready to hand to a share sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
}

pub fn capture(card: &SummaryCard, width: u32, height: u32) -> Result<ShareImage> {
    let canvas = render(card, width, height)?;
    let mut bytes = Cursor::new(Vec::new());
    canvas
        .write_to(&mut bytes, ImageFormat::Png)
        .context("failed to encode summary card as PNG")?;

    Ok(ShareImage {
        bytes: bytes.into_inner(),
        width,
        height,
        mime: PNG_MIME,
    })
}

/// Paints the card: gradient backdrop, header accent, a translucent panel
/// and one bar per metric scaled against that metric's top quote tier.
pub fn render(card: &SummaryCard, width: u32, height: u32) -> Result<RgbaImage> {
    if width < 64 || height < 64 {
        bail!("summary card of {width}x{height} is too small to render");
    }

    let mut canvas = RgbaImage::new(width, height);
    for y in 0..height {
        let t = y as f64 / (height - 1) as f64;
        let color = lerp(TOP_COLOR, BOTTOM_COLOR, t);
        for x in 0..width {
            canvas.put_pixel(x, y, opaque(color));
        }
    }

    let pad = width / 12;
    let header_top = height / 12;
    fill_rect(
        &mut canvas,
        (width * 3 / 10, header_top),
        (width * 7 / 10, header_top + (height / 100).max(2)),
        HEADER_COLOR,
        1.0,
    );

    let panel_top = height / 5;
    let panel_bottom = height * 17 / 20;
    fill_rect(
        &mut canvas,
        (pad, panel_top),
        (width - pad, panel_bottom),
        [0xFF, 0xFF, 0xFF],
        0.1,
    );

    let bars: Vec<_> = card.rows.iter().filter(|row| !row.derived).collect();
    if bars.is_empty() {
        return Ok(canvas);
    }

    let is_month = card.period.is_month();
    let row_height = (panel_bottom - panel_top) / bars.len() as u32;
    let inner_left = pad * 2;
    let inner_width = width - pad * 4;

    for (i, row) in bars.iter().enumerate() {
        let top_bound = table(row.kind).bounds(is_month)[3];
        let share = (row.raw_value / top_bound).clamp(0.05, 1.0);
        let bar_width = ((inner_width as f64) * share).round() as u32;

        let row_top = panel_top + row_height * i as u32;
        let thickness = (row_height * 7 / 20).max(1);
        let bar_top = row_top + (row_height - thickness) / 2;
        let accent = parse_hex(accent_color(row.kind)).unwrap_or(HEADER_COLOR);
        fill_rect(
            &mut canvas,
            (inner_left, bar_top),
            (inner_left + bar_width.max(1), bar_top + thickness),
            accent,
            1.0,
        );

        if i + 1 < bars.len() {
            let rule = row_top + row_height - 1;
            fill_rect(
                &mut canvas,
                (pad, rule),
                (width - pad, rule + 1),
                [0xFF, 0xFF, 0xFF],
                0.1,
            );
        }
    }

    Ok(canvas)
}

/// `#RRGGBB` to channels.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn lerp(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    [mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])]
}

fn opaque(color: [u8; 3]) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 0xFF])
}

/// Blends `color` over the half-open rectangle `[from, to)`.
fn fill_rect(canvas: &mut RgbaImage, from: (u32, u32), to: (u32, u32), color: [u8; 3], alpha: f64) {
    let x_end = to.0.min(canvas.width());
    let y_end = to.1.min(canvas.height());
    for y in from.1..y_end {
        for x in from.0..x_end {
            let pixel = canvas.get_pixel_mut(x, y);
            let under = [pixel[0], pixel[1], pixel[2]];
            *pixel = opaque(lerp(under, color, alpha));
        }
    }
}

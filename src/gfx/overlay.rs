use image::{Rgba, RgbaImage};

use crate::gfx::Camera;
use crate::math::{CpuScalar, GpuScalar};
use crate::scene::Label;

const GLYPH_WIDTH: i64 = 5;
const GLYPH_HEIGHT: i64 = 7;
const GLYPH_ADVANCE: i64 = GLYPH_WIDTH + 1;

/// Text anchored at a pixel: `x` is the left edge, `y` the vertical centre.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenLabel {
    pub x: CpuScalar,
    pub y: CpuScalar,
    pub text: String,
}

/// Projects world labels into a `width` x `height` image. Labels behind the
/// camera are dropped.
pub fn project_labels(labels: &[Label],
                      camera: &Camera,
                      width: u32,
                      height: u32)
                      -> Vec<ScreenLabel> {
    labels.iter()
        .filter_map(|label| {
            camera.project(&label.position, width, height).map(|[x, y]| {
                ScreenLabel {
                    x: x,
                    y: y,
                    text: label.text.clone(),
                }
            })
        })
        .collect()
}

pub fn draw_labels(image: &mut RgbaImage,
                   labels: &[ScreenLabel],
                   font_size: u32,
                   color: [GpuScalar; 4]) {
    let color = to_rgba8(color);
    for label in labels {
        draw_text(image, label.x, label.y, &label.text, font_size, color);
    }
}

/// Pixel size of one font cell. The 7 row font is drawn at roughly
/// `font_size` pixels per line including spacing.
pub fn pixel_scale(font_size: u32) -> i64 {
    ((font_size / 8) as i64).max(1)
}

pub fn text_width(text: &str, font_size: u32) -> i64 {
    let count = text.chars().count() as i64;
    if count == 0 {
        0
    } else {
        (count * GLYPH_ADVANCE - 1) * pixel_scale(font_size)
    }
}

pub fn draw_text(image: &mut RgbaImage,
                 x: CpuScalar,
                 y: CpuScalar,
                 text: &str,
                 font_size: u32,
                 color: Rgba<u8>) {
    let scale = pixel_scale(font_size);
    let left = x.round() as i64;
    let top = (y - 0.5 * (GLYPH_HEIGHT * scale) as CpuScalar).round() as i64;

    for (index, character) in text.chars().enumerate() {
        let rows = match glyph_rows(character) {
            Some(rows) => rows,
            None => {
                debug!("No bitmap for {:?}, leaving a blank.", character);
                continue;
            }
        };
        let origin = left + index as i64 * GLYPH_ADVANCE * scale;
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (0x10 >> column) != 0 {
                    fill_cell(image,
                              origin + column * scale,
                              top + row as i64 * scale,
                              scale,
                              color);
                }
            }
        }
    }
}

fn fill_cell(image: &mut RgbaImage, x: i64, y: i64, size: i64, color: Rgba<u8>) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    for py in y.max(0)..(y + size).min(height) {
        for px in x.max(0)..(x + size).min(width) {
            image.put_pixel(px as u32, py as u32, color);
        }
    }
}

fn to_rgba8(color: [GpuScalar; 4]) -> Rgba<u8> {
    let channel = |value: GpuScalar| (value.max(0.0).min(1.0) * 255.0).round() as u8;
    Rgba([channel(color[0]), channel(color[1]), channel(color[2]), channel(color[3])])
}

/// 5 x 7 bitmaps, one byte per row, bit 4 is the leftmost column.
fn glyph_rows(character: char) -> Option<[u8; 7]> {
    Some(match character {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' | '–' | '−' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        'x' | 'X' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        'y' | 'Y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        'z' | 'Z' => [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F],
        ' ' => [0x00; 7],
        _ => return None,
    })
}

//! PNG image captcha renderer
//!
//! Draws the answer with the bitmap font onto a noisy background, encodes
//! it as PNG and returns it as a base64 data URI.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use rand::rngs::OsRng;
use rand::Rng;

use tg_core::domain::ImageCode;
use tg_core::errors::RenderError;
use tg_core::services::CaptchaRenderer;
use tg_shared::config::CaptchaConfig;

use super::font::{glyph, ALPHABET, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::InfrastructureError;

/// Prefix of every rendered image payload
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

const MAX_LENGTH: usize = 12;

/// Renders image captchas on a blocking worker thread
#[derive(Debug, Clone)]
pub struct ImageCaptchaRenderer {
    config: CaptchaConfig,
}

impl ImageCaptchaRenderer {
    /// Create a renderer, rejecting sizes the answer cannot fit in
    pub fn new(config: CaptchaConfig) -> Result<Self, InfrastructureError> {
        if config.length == 0 || config.length > MAX_LENGTH {
            return Err(InfrastructureError::Captcha(format!(
                "captcha length must be between 1 and {}",
                MAX_LENGTH
            )));
        }
        let min_width = (config.length as u32) * (GLYPH_WIDTH + 1);
        if config.width < min_width || config.height < GLYPH_HEIGHT + 2 {
            return Err(InfrastructureError::Captcha(format!(
                "captcha image {}x{} is too small for {} characters",
                config.width, config.height, config.length
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }
}

#[async_trait]
impl CaptchaRenderer for ImageCaptchaRenderer {
    async fn render(&self) -> Result<ImageCode, RenderError> {
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || -> Result<ImageCode, RenderError> {
            let answer = random_answer(config.length);
            let png = render_png(&answer, &config)?;
            Ok(ImageCode::new(
                format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(png)),
                answer,
            ))
        })
        .await
        .map_err(|e| RenderError::Failed(format!("render task failed: {}", e)))?
    }
}

/// Draw `length` characters uniformly from the captcha alphabet
pub fn random_answer(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Render `answer` as a PNG image
pub fn render_png(answer: &str, config: &CaptchaConfig) -> Result<Vec<u8>, RenderError> {
    let mut rng = rand::thread_rng();
    let (width, height) = (config.width, config.height);
    let mut img = RgbImage::from_pixel(width, height, Rgb([245, 245, 240]));

    let count = answer.chars().count().max(1) as u32;
    let cell = width / count;
    let scale = ((cell * 4 / 5) / GLYPH_WIDTH)
        .min((height * 7 / 10) / GLYPH_HEIGHT)
        .max(1);
    let glyph_w = GLYPH_WIDTH * scale;
    let glyph_h = GLYPH_HEIGHT * scale;

    for (i, c) in answer.chars().enumerate() {
        let rows = glyph(c).ok_or_else(|| {
            RenderError::Failed(format!("character '{}' has no glyph", c))
        })?;

        let slack_x = cell.saturating_sub(glyph_w);
        let x0 = i as u32 * cell + rng.gen_range(0..=slack_x);
        let y0 = rng.gen_range(0..=height.saturating_sub(glyph_h));
        let color = Rgb([
            rng.gen_range(20..110),
            rng.gen_range(20..110),
            rng.gen_range(20..110),
        ]);

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = x0 + col * scale;
                let py = y0 + row as u32 * scale;
                fill_block(&mut img, px, py, scale, color);
            }
        }
    }

    for _ in 0..config.noise_lines {
        let from = (rng.gen_range(0..width) as i64, rng.gen_range(0..height) as i64);
        let to = (rng.gen_range(0..width) as i64, rng.gen_range(0..height) as i64);
        let color = Rgb([
            rng.gen_range(90..200),
            rng.gen_range(90..200),
            rng.gen_range(90..200),
        ]);
        draw_line(&mut img, from, to, color);
    }

    for _ in 0..config.noise_dots {
        let x = rng.gen_range(0..width);
        let y = rng.gen_range(0..height);
        img.put_pixel(
            x,
            y,
            Rgb([rng.gen(), rng.gen(), rng.gen()]),
        );
    }

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| RenderError::Failed(format!("PNG encoding failed: {}", e)))?;
    Ok(buf)
}

fn fill_block(img: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = (x + dx, y + dy);
            if px < img.width() && py < img.height() {
                img.put_pixel(px, py, color);
            }
        }
    }
}

// Bresenham
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

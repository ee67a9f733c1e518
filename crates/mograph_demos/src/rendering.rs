use std::path::Path;

use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use mograph::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How elements are drawn.
#[derive(Debug, Clone, Copy)]
pub enum ElementStyle {
    /// Filled disc using the element color, radius scaled by the element's X scale.
    Disc { radius_px: f32 },
    /// Disc plus a short line pointing along the element's local +X axis.
    Heading { radius_px: f32 },
}

/// Top-down (XY plane) view configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World-space point at the image centre.
    pub center: Vec2,
    /// World-space size covered by the image.
    pub extent: Vec2,
    pub background: [u8; 3],
    pub style: ElementStyle,
    /// Overrides element colors by variant index.
    pub variant_palette: Vec<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), extent: Vec2) -> Self {
        Self {
            image_size,
            center: Vec2::ZERO,
            extent,
            background: [250, 250, 250],
            style: ElementStyle::Heading { radius_px: 6.0 },
            variant_palette: Vec::new(),
        }
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_variant_palette(mut self, palette: Vec<[u8; 3]>) -> Self {
        self.variant_palette = palette;
        self
    }

    fn to_pixel(&self, p: Vec2) -> Vec2 {
        let (w, h) = self.image_size;
        let uv = (p - self.center) / self.extent + Vec2::splat(0.5);
        // Image rows grow downwards, world Y grows upwards.
        Vec2::new(uv.x * w as f32, (1.0 - uv.y) * h as f32)
    }

    fn to_world(&self, px: u32, py: u32) -> Vec2 {
        let (w, h) = self.image_size;
        let uv = Vec2::new(
            (px as f32 + 0.5) / w as f32,
            1.0 - (py as f32 + 0.5) / h as f32,
        );
        self.center + (uv - Vec2::splat(0.5)) * self.extent
    }
}

/// Draws elements seen from above and writes a PNG.
pub fn render_elements_to_png(
    elements: &[Element],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    draw_elements(&mut img, elements, config);
    img.save(path.as_ref())?;
    info!(
        "Wrote {} elements to {}.",
        elements.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Draws a field's weight in the XY plane at height `z` as grayscale and
/// overlays `elements`.
pub fn render_field_to_png(
    field: &SphereField,
    z: f32,
    elements: &[Element],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::new(w, h);
    for (px, py, pixel) in img.enumerate_pixels_mut() {
        let p = config.to_world(px, py);
        let v = (field.weight(p.extend(z)) * 255.0).round() as u8;
        *pixel = Rgb([v, v, v]);
    }
    draw_elements(&mut img, elements, config);
    img.save(path.as_ref())?;
    info!("Wrote field preview to {}.", path.as_ref().display());
    Ok(())
}

fn draw_elements(img: &mut RgbImage, elements: &[Element], config: &RenderConfig) {
    for e in elements {
        let color = element_color(e, config);
        let center = config.to_pixel(e.transform.translation.truncate());
        let size = e.transform.scale.x.abs();
        match config.style {
            ElementStyle::Disc { radius_px } => {
                fill_disc(img, center, radius_px * size, color);
            }
            ElementStyle::Heading { radius_px } => {
                let r = radius_px * size;
                fill_disc(img, center, r, color);
                let dir = (e.transform.quat() * Vec3::X).truncate();
                let tip = center + Vec2::new(dir.x, -dir.y) * (r * 2.0);
                draw_line(img, center, tip, [20, 20, 20]);
            }
        }
    }
}

fn element_color(e: &Element, config: &RenderConfig) -> [u8; 3] {
    if let Some(c) = e
        .variant
        .and_then(|v| config.variant_palette.get(v))
    {
        return *c;
    }
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [to_u8(e.color.x), to_u8(e.color.y), to_u8(e.color.z)]
}

fn fill_disc(img: &mut RgbImage, center: Vec2, radius: f32, color: [u8; 3]) {
    let r = radius.max(1.0);
    let (w, h) = img.dimensions();
    let x0 = (center.x - r).floor().max(0.0) as u32;
    let y0 = (center.y - r).floor().max(0.0) as u32;
    let x1 = ((center.x + r).ceil().max(0.0) as u32).min(w);
    let y1 = ((center.y + r).ceil().max(0.0) as u32).min(h);
    for y in y0..y1 {
        for x in x0..x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if d.length_squared() <= r * r {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

fn draw_line(img: &mut RgbImage, from: Vec2, to: Vec2, color: [u8; 3]) {
    let (w, h) = img.dimensions();
    let steps = (to - from).abs().max_element().ceil().max(1.0) as u32;
    for i in 0..=steps {
        let p = from.lerp(to, i as f32 / steps as f32);
        if p.x >= 0.0 && p.y >= 0.0 && (p.x as u32) < w && (p.y as u32) < h {
            img.put_pixel(p.x as u32, p.y as u32, Rgb(color));
        }
    }
}

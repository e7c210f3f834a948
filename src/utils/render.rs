use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use log::warn;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use nanoid::nanoid;
use qrcode::{EcLevel, QrCode};

use crate::models::style::{
    CornerDotType, CornerSquareType, DotType, ErrorCorrection, ExportFormat, StyleConfig,
};
use crate::utils::color::{parse_hex_color, to_hex};

const QUIET_ZONE: usize = 4;
const FINDER_SIZE: usize = 7;
// Share of the side taken by an embedded logo.
const LOGO_RATIO: f64 = 0.2;
const LOGO_PADDING: f64 = 0.5;

/// Render `data` as a styled matrix code in the requested format.
///
/// Empty data is replaced by a single space. `size` is the pixel side of the
/// raster formats and the nominal width/height of the SVG.
pub fn render(
    data: &str,
    style: &StyleConfig,
    format: ExportFormat,
    size: u32,
) -> Result<Vec<u8>> {
    let scene = Scene::build(data, style)?;
    if format != ExportFormat::Svg && scene.pixels_per_module(size) < 1.0 {
        warn!(
            "Rendering {} modules into {}px leaves {:.2}px per module, the code will not scan",
            scene.side,
            size,
            scene.pixels_per_module(size)
        );
    }
    match format {
        ExportFormat::Svg => Ok(scene.to_svg(size).into_bytes()),
        ExportFormat::Png => encode(scene.to_raster(size), ImageFormat::Png),
        ExportFormat::Webp => encode(scene.to_raster(size), ImageFormat::WebP),
    }
}

/// Download name for an exported code, e.g. `qr-wifi-V1StGXR8.png`.
pub fn export_filename(kind: &str, format: ExportFormat) -> String {
    format!("qr-{}-{}.{}", kind, nanoid!(8), format.extension())
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

fn parse_color(field: &str, value: &str) -> Result<[u8; 3]> {
    parse_hex_color(value).ok_or_else(|| anyhow!("Invalid {}: {:?}", field, value))
}

/// Axis-aligned rectangle in module units with per-corner radii
/// (top-left, top-right, bottom-right, bottom-left).
#[derive(Debug, Clone, Copy)]
struct RoundedRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radii: [f64; 4],
}

impl RoundedRect {
    fn new(x: f64, y: f64, side: f64, radii: [f64; 4]) -> Self {
        Self {
            x,
            y,
            w: side,
            h: side,
            radii,
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        let (x0, y0, x1, y1) = (self.x, self.y, self.x + self.w, self.y + self.h);
        if px < x0 || py < y0 || px > x1 || py > y1 {
            return false;
        }

        let [tl, tr, br, bl] = self.radii;
        let corners = [
            (tl, x0 + tl, y0 + tl, px < x0 + tl && py < y0 + tl),
            (tr, x1 - tr, y0 + tr, px > x1 - tr && py < y0 + tr),
            (br, x1 - br, y1 - br, px > x1 - br && py > y1 - br),
            (bl, x0 + bl, y1 - bl, px < x0 + bl && py > y1 - bl),
        ];
        for (r, cx, cy, in_corner) in corners {
            if r > 0.0 && in_corner {
                let (dx, dy) = (px - cx, py - cy);
                return dx * dx + dy * dy <= r * r;
            }
        }
        true
    }

    fn svg_path(&self) -> String {
        let (x0, y0, x1, y1) = (self.x, self.y, self.x + self.w, self.y + self.h);
        let [tl, tr, br, bl] = self.radii;
        format!(
            "M{} {}H{}A{} {} 0 0 1 {} {}V{}A{} {} 0 0 1 {} {}\
             H{}A{} {} 0 0 1 {} {}V{}A{} {} 0 0 1 {} {}Z",
            num(x0 + tl),
            num(y0),
            num(x1 - tr),
            num(tr),
            num(tr),
            num(x1),
            num(y0 + tr),
            num(y1 - br),
            num(br),
            num(br),
            num(x1 - br),
            num(y1),
            num(x0 + bl),
            num(bl),
            num(bl),
            num(x0),
            num(y1 - bl),
            num(y0 + tl),
            num(tl),
            num(tl),
            num(x0 + tl),
            num(y0),
        )
    }
}

fn num(value: f64) -> String {
    format!("{}", (value * 1000.0).round() / 1000.0)
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Fill(RoundedRect),
    Ring {
        outer: RoundedRect,
        inner: RoundedRect,
    },
}

impl Shape {
    fn bounds(&self) -> RoundedRect {
        match self {
            Shape::Fill(rect) => *rect,
            Shape::Ring { outer, .. } => *outer,
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        match self {
            Shape::Fill(rect) => rect.contains(px, py),
            Shape::Ring { outer, inner } => outer.contains(px, py) && !inner.contains(px, py),
        }
    }

    fn svg_path(&self) -> String {
        match self {
            Shape::Fill(rect) => rect.svg_path(),
            Shape::Ring { outer, inner } => format!("{}{}", outer.svg_path(), inner.svg_path()),
        }
    }
}

fn dot_shape(dot_type: DotType, x: f64, y: f64) -> Shape {
    let radii = match dot_type {
        DotType::Square => [0.0; 4],
        DotType::Dots => [0.5; 4],
        DotType::Rounded => [0.25; 4],
        DotType::ExtraRounded => [0.4; 4],
        DotType::Classy => [0.5, 0.0, 0.5, 0.0],
        DotType::ClassyRounded => [0.5, 0.15, 0.5, 0.15],
    };
    Shape::Fill(RoundedRect::new(x, y, 1.0, radii))
}

fn corner_square_shape(square_type: CornerSquareType, x: f64, y: f64) -> Shape {
    let (outer, inner) = match square_type {
        CornerSquareType::Square => (0.0, 0.0),
        CornerSquareType::Dot => (3.5, 2.5),
        CornerSquareType::ExtraRounded => (2.0, 1.0),
    };
    Shape::Ring {
        outer: RoundedRect::new(x, y, 7.0, [outer; 4]),
        inner: RoundedRect::new(x + 1.0, y + 1.0, 5.0, [inner; 4]),
    }
}

fn corner_dot_shape(dot_type: CornerDotType, x: f64, y: f64) -> Shape {
    let radius = match dot_type {
        CornerDotType::Square => 0.0,
        CornerDotType::Dot => 1.5,
    };
    Shape::Fill(RoundedRect::new(x, y, 3.0, [radius; 4]))
}

fn in_finder(x: usize, y: usize, width: usize) -> bool {
    let near = |v: usize| v < FINDER_SIZE;
    let far = |v: usize| v >= width - FINDER_SIZE;
    (near(x) && near(y)) || (far(x) && near(y)) || (near(x) && far(y))
}

struct Layer {
    color: [u8; 3],
    shapes: Vec<Shape>,
}

struct Logo {
    image: DynamicImage,
    data_uri: String,
}

/// Resolution-independent drawing of one code: everything in module units,
/// quiet zone included.
struct Scene {
    side: f64,
    background: [u8; 3],
    layers: Vec<Layer>,
    logo: Option<Logo>,
}

impl Scene {
    fn build(data: &str, style: &StyleConfig) -> Result<Self> {
        let data = if data.is_empty() { " " } else { data };
        let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level(style.error_level))
            .context("Payload does not fit in a QR code")?;

        let width = code.width();
        let modules = code.to_colors();
        let quiet = if style.margin { QUIET_ZONE } else { 0 };
        let offset = quiet as f64;

        let mut dots = Vec::new();
        for y in 0..width {
            for x in 0..width {
                if modules[y * width + x] != qrcode::Color::Dark || in_finder(x, y, width) {
                    continue;
                }
                dots.push(dot_shape(style.dot_type, offset + x as f64, offset + y as f64));
            }
        }

        let far = (width - FINDER_SIZE) as f64;
        let origins = [(0.0, 0.0), (far, 0.0), (0.0, far)];
        let squares = origins
            .iter()
            .map(|(x, y)| corner_square_shape(style.corner_square_type, offset + x, offset + y))
            .collect();
        let centers = origins
            .iter()
            .map(|(x, y)| {
                corner_dot_shape(style.corner_dot_type, offset + x + 2.0, offset + y + 2.0)
            })
            .collect();

        let logo = match style.logo.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(decode_logo(value)?),
            _ => None,
        };

        Ok(Self {
            side: (width + 2 * quiet) as f64,
            background: parse_color("bgColor", &style.bg_color)?,
            layers: vec![
                Layer {
                    color: parse_color("fgColor", &style.fg_color)?,
                    shapes: dots,
                },
                Layer {
                    color: parse_color("cornerSquareColor", &style.corner_square_color)?,
                    shapes: squares,
                },
                Layer {
                    color: parse_color("cornerDotColor", &style.corner_dot_color)?,
                    shapes: centers,
                },
            ],
            logo,
        })
    }

    /// Output pixels available to one module at `size`.
    fn pixels_per_module(&self, size: u32) -> f64 {
        size.max(1) as f64 / self.side
    }

    // Top-left offset (same on both axes) and side of the logo box, in module units.
    fn logo_box(&self) -> (f64, f64) {
        let side = self.side * LOGO_RATIO;
        ((self.side - side) / 2.0, side)
    }

    fn to_svg(&self, size: u32) -> String {
        let side = num(self.side);
        let mut svg = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
             width=\"{size}\" height=\"{size}\" \
             viewBox=\"0 0 {side} {side}\" shape-rendering=\"geometricPrecision\">\
             <rect width=\"{side}\" height=\"{side}\" fill=\"{bg}\"/>",
            size = size,
            side = side,
            bg = to_hex(self.background),
        );

        for layer in &self.layers {
            let d: String = layer.shapes.iter().map(Shape::svg_path).collect();
            svg.push_str(&format!(
                "<path fill=\"{}\" fill-rule=\"evenodd\" d=\"{}\"/>",
                to_hex(layer.color),
                d
            ));
        }

        if let Some(logo) = &self.logo {
            let (at, logo_side) = self.logo_box();
            let plate = logo_side + 2.0 * LOGO_PADDING;
            svg.push_str(&format!(
                "<rect x=\"{p}\" y=\"{p}\" width=\"{ps}\" height=\"{ps}\" fill=\"{bg}\"/>\
                 <image x=\"{at}\" y=\"{at}\" width=\"{ls}\" height=\"{ls}\" \
                 preserveAspectRatio=\"xMidYMid meet\" href=\"{uri}\"/>",
                p = num(at - LOGO_PADDING),
                ps = num(plate),
                bg = to_hex(self.background),
                at = num(at),
                ls = num(logo_side),
                uri = logo.data_uri,
            ));
        }

        svg.push_str("</svg>");
        svg
    }

    fn to_raster(&self, size: u32) -> RgbaImage {
        let size = size.max(1);
        let scale = self.pixels_per_module(size);
        let mut canvas = RgbaImage::from_pixel(size, size, rgba(self.background));

        for layer in &self.layers {
            let color = rgba(layer.color);
            for shape in &layer.shapes {
                paint(&mut canvas, shape, scale, color);
            }
        }

        if let Some(logo) = &self.logo {
            let (at, logo_side) = self.logo_box();
            let plate = RoundedRect::new(
                at - LOGO_PADDING,
                at - LOGO_PADDING,
                logo_side + 2.0 * LOGO_PADDING,
                [0.0; 4],
            );
            paint(&mut canvas, &Shape::Fill(plate), scale, rgba(self.background));

            let target = ((logo_side * scale).round() as u32).max(1);
            let resized = logo.image.resize(target, target, FilterType::Lanczos3).to_rgba8();
            let x = (size as i64 - resized.width() as i64) / 2;
            let y = (size as i64 - resized.height() as i64) / 2;
            imageops::overlay(&mut canvas, &resized, x, y);
        }

        canvas
    }
}

fn rgba([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

fn paint(canvas: &mut RgbaImage, shape: &Shape, scale: f64, color: Rgba<u8>) {
    let bounds = shape.bounds();
    let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as u32;
    let x0 = clamp((bounds.x * scale).floor(), canvas.width());
    let x1 = clamp(((bounds.x + bounds.w) * scale).ceil(), canvas.width());
    let y0 = clamp((bounds.y * scale).floor(), canvas.height());
    let y1 = clamp(((bounds.y + bounds.h) * scale).ceil(), canvas.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let (mx, my) = ((px as f64 + 0.5) / scale, (py as f64 + 0.5) / scale);
            if shape.contains(mx, my) {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

fn encode(image: RgbaImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .with_context(|| format!("Failed to encode {:?} image", format))?;
    Ok(bytes)
}

/// Accepts `data:<mime>;base64,<data>` or bare base64.
fn decode_logo(value: &str) -> Result<Logo> {
    let encoded = match value.strip_prefix("data:") {
        Some(rest) => {
            rest.split_once(";base64,")
                .map(|(_, data)| data)
                .context("Logo data URI must be base64 encoded")?
        }
        None => value,
    };
    let encoded: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD.decode(encoded.as_bytes()).context("Logo is not valid base64")?;
    let format = image::guess_format(&bytes).context("Logo is not a supported image")?;
    let image = image::load_from_memory_with_format(&bytes, format)
        .context("Failed to decode logo image")?;

    Ok(Logo {
        image,
        data_uri: format!("data:{};base64,{}", format.to_mime_type(), encoded),
    })
}

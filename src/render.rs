use crate::config::{Config, RenderConfig};
use crate::error::RenderError;
use crate::scene::{
    Arrow, Circle, FontFamily, FontWeight, Instruction, Label, Line, Paint, Point, Polygon, Rect, Scene, Stroke,
    Text, TextAnchor, TextStyle, VerticalAlign,
};
use crate::text_metrics;
use crate::theme::Theme;
use std::path::Path;

/// Cap height approximation used to place the first baseline.
const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = scene.width;
    let height = scene.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&scene.background)
    ));

    for instruction in scene.instructions() {
        match instruction {
            Instruction::Rect(rect) => rect_svg(&mut svg, rect, theme),
            Instruction::Line(line) => line_svg(&mut svg, line, theme),
            Instruction::Arrow(arrow) => arrow_svg(&mut svg, arrow, theme),
            Instruction::Circle(circle) => circle_svg(&mut svg, circle, theme),
            Instruction::Polygon(polygon) => polygon_svg(&mut svg, polygon),
            Instruction::Text(text) => text_svg(&mut svg, text, theme),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn rect_svg(svg: &mut String, rect: &Rect, theme: &Theme) {
    let radius = if rect.corner_radius > 0.0 {
        format!(" rx=\"{r:.2}\" ry=\"{r:.2}\"", r = rect.corner_radius)
    } else {
        String::new()
    };
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"{radius}{}/>",
        rect.origin.x,
        rect.origin.y,
        rect.width,
        rect.height,
        paint_attrs(&rect.paint)
    ));
    if let Some(label) = &rect.label {
        label_svg(svg, rect.center(), label, theme);
    }
}

fn circle_svg(svg: &mut String, circle: &Circle, theme: &Theme) {
    svg.push_str(&format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"{}/>",
        circle.center.x,
        circle.center.y,
        circle.radius,
        paint_attrs(&circle.paint)
    ));
    if let Some(label) = &circle.label {
        label_svg(svg, circle.center, label, theme);
    }
}

fn polygon_svg(svg: &mut String, polygon: &Polygon) {
    if polygon.points.len() < 3 {
        return;
    }
    svg.push_str(&format!(
        "<polygon points=\"{}\"{} stroke-linejoin=\"round\"/>",
        points_attr(&polygon.points),
        paint_attrs(&polygon.paint)
    ));
}

fn line_svg(svg: &mut String, line: &Line, theme: &Theme) {
    svg.push_str(&segment_svg(line.from, line.to, &line.stroke));
    if let Some(label) = &line.label {
        label_svg(svg, line.from.midpoint(line.to), label, theme);
    }
}

fn arrow_svg(svg: &mut String, arrow: &Arrow, theme: &Theme) {
    let dx = arrow.to.x - arrow.from.x;
    let dy = arrow.to.y - arrow.from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length > f32::EPSILON {
        let (ux, uy) = (dx / length, dy / length);
        let head_length = arrow.head.length.min(length);
        let base = Point::new(arrow.to.x - ux * head_length, arrow.to.y - uy * head_length);
        if length > head_length {
            svg.push_str(&segment_svg(arrow.from, base, &arrow.stroke));
        }
        let half = arrow.head.width / 2.0;
        let head = [
            arrow.to,
            Point::new(base.x - uy * half, base.y + ux * half),
            Point::new(base.x + uy * half, base.y - ux * half),
        ];
        svg.push_str(&format!(
            "<polygon points=\"{}\" fill=\"{}\"/>",
            points_attr(&head),
            escape_xml(&arrow.stroke.color)
        ));
    }
    if let Some(label) = &arrow.label {
        label_svg(svg, arrow.from.midpoint(arrow.to), label, theme);
    }
}

fn segment_svg(from: Point, to: Point, stroke: &Stroke) -> String {
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"butt\"/>",
        from.x,
        from.y,
        to.x,
        to.y,
        escape_xml(&stroke.color),
        stroke.width
    )
}

fn label_svg(svg: &mut String, center: Point, label: &Label, theme: &Theme) {
    let style = TextStyle {
        anchor: TextAnchor::Middle,
        align: VerticalAlign::Center,
        ..label.style.clone()
    };
    let text = Text {
        position: center,
        content: label.text.clone(),
        style,
        background: None,
    };
    text_svg(svg, &text, theme);
}

fn text_svg(svg: &mut String, text: &Text, theme: &Theme) {
    let style = &text.style;
    let family = font_family(style.family, theme);
    let lines: Vec<&str> = text.lines().collect();
    let advance = style.size * theme.line_height;
    let block_height = style.size + advance * (lines.len().saturating_sub(1)) as f32;
    let x = text.position.x;
    let y = text.position.y;
    let top = match style.align {
        VerticalAlign::Top => y,
        VerticalAlign::Center => y - block_height / 2.0,
        VerticalAlign::Baseline => y - style.size * ASCENT,
        VerticalAlign::Bottom => y - block_height,
    };
    let first_baseline = top + style.size * ASCENT;

    let rotated = style.rotation.abs() > f32::EPSILON;
    if rotated {
        svg.push_str(&format!(
            "<g transform=\"rotate({:.2} {x:.2} {y:.2})\">",
            -style.rotation
        ));
    }

    if let Some(background) = &text.background {
        let width = lines
            .iter()
            .map(|line| text_metrics::text_width(line, style.size, family, style.weight))
            .fold(0.0f32, f32::max);
        let left = match style.anchor {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - width / 2.0,
            TextAnchor::End => x - width,
        };
        let pad = background.padding;
        let paint = Paint {
            fill: Some(background.fill.clone()),
            stroke: background.stroke.clone(),
            opacity: background.opacity,
        };
        let rect = Rect {
            origin: Point::new(left - pad, top - pad),
            width: width + pad * 2.0,
            height: block_height + pad * 2.0,
            corner_radius: background.corner_radius,
            paint,
            label: None,
        };
        rect_svg(svg, &rect, theme);
    }

    let anchor = match style.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let weight = match style.weight {
        FontWeight::Normal => "",
        FontWeight::Bold => " font-weight=\"bold\"",
    };
    let italic = if style.italic { " font-style=\"italic\"" } else { "" };
    svg.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{first_baseline:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{:.2}\"{weight}{italic} fill=\"{}\">",
        escape_xml(family),
        style.size,
        escape_xml(&style.color)
    ));
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { advance };
        svg.push_str(&format!(
            "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    svg.push_str("</text>");

    if rotated {
        svg.push_str("</g>");
    }
}

fn font_family(family: FontFamily, theme: &Theme) -> &str {
    match family {
        FontFamily::Sans => &theme.font_family,
        FontFamily::Mono => &theme.mono_font_family,
    }
}

fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = String::new();
    match &paint.fill {
        Some(fill) => attrs.push_str(&format!(" fill=\"{}\"", escape_xml(fill))),
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = &paint.stroke {
        attrs.push_str(&format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_xml(&stroke.color),
            stroke.width
        ));
    }
    if paint.opacity < 1.0 {
        attrs.push_str(&format!(" opacity=\"{:.2}\"", paint.opacity.max(0.0)));
    }
    attrs
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{:.2},{:.2}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders `scene` and writes it to `path`, creating missing parent
/// directories first.
pub fn write_scene(
    scene: &Scene,
    path: &Path,
    format: OutputFormat,
    config: &Config,
) -> Result<(), RenderError> {
    if !(scene.width > 0.0 && scene.height > 0.0) {
        return Err(RenderError::InvalidCanvas {
            width: scene.width,
            height: scene.height,
        });
    }
    text_metrics::load_font_dirs(&config.render.font_dirs);
    if config.render.strict_fonts {
        for family in [&config.theme.font_family, &config.theme.mono_font_family] {
            if !text_metrics::font_available(family) {
                return Err(RenderError::FontUnavailable(family.clone()));
            }
        }
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| RenderError::io(parent, err))?;
    }

    log::debug!(
        "rendering {} instructions onto {}x{} canvas",
        scene.len(),
        scene.width,
        scene.height
    );
    let svg = render_svg(scene, &config.theme);
    match format {
        OutputFormat::Svg => write_output_svg(&svg, path)?,
        OutputFormat::Png => write_output_png(&svg, path, &config.render)?,
    }
    log::debug!("wrote {}", path.display());
    Ok(())
}

pub fn write_output_svg(svg: &str, path: &Path) -> Result<(), RenderError> {
    std::fs::write(path, svg).map_err(|err| RenderError::io(path, err))
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, path: &Path, render_cfg: &RenderConfig) -> Result<(), RenderError> {
    let bytes = rasterize_png(svg, render_cfg)?;
    std::fs::write(path, bytes).map_err(|err| RenderError::io(path, err))
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _path: &Path, _render_cfg: &RenderConfig) -> Result<(), RenderError> {
    Err(RenderError::PngDisabled)
}

/// Encodes the SVG as PNG bytes at `render_cfg.scale`.
#[cfg(feature = "png")]
pub fn rasterize_png(svg: &str, render_cfg: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let mut opt = usvg::Options::default();
    {
        let fontdb = opt.fontdb_mut();
        for dir in &render_cfg.font_dirs {
            fontdb.load_fonts_dir(dir);
        }
        fontdb.load_system_fonts();
    }

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|err| RenderError::Rasterize(err.to_string()))?;
    let scale = if render_cfg.scale > 0.0 { render_cfg.scale } else { 1.0 };
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        RenderError::Rasterize(format!("failed to allocate {width}x{height} pixmap"))
    })?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap
        .encode_png()
        .map_err(|err| RenderError::Rasterize(err.to_string()))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::TextBox;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(200.0, 120.0, "#FFFFFF");
        scene.push(Rect::new(10.0, 10.0, 80.0, 40.0).fill("#3498DB").stroke("#000000", 2.0));
        scene.push(Circle::new(Point::new(60.0, 60.0), 20.0).fill("#8BC34A").opacity(0.5));
        scene.push(
            Text::new(100.0, 100.0, "A & B\nsecond", TextStyle::new(12.0, "#000000").centered())
                .boxed(TextBox::new("#C5E1A5", 4.0).rounded(3.0)),
        );
        scene
    }

    #[test]
    fn render_svg_paints_in_instruction_order() {
        let svg = render_svg(&sample_scene(), &Theme::default());
        let rect = svg.find("fill=\"#3498DB\"").unwrap();
        let circle = svg.find("<circle").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < circle && circle < text);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn render_svg_escapes_and_splits_lines() {
        let svg = render_svg(&sample_scene(), &Theme::default());
        assert!(svg.contains("A &amp; B"));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("opacity=\"0.50\""));
    }

    #[test]
    fn arrow_head_tip_touches_end_point() {
        let mut scene = Scene::new(100.0, 100.0, "#FFFFFF");
        scene.push(
            Arrow::new(Point::new(10.0, 50.0), Point::new(90.0, 50.0), Stroke::new("#000000", 2.0))
                .head(10.0, 8.0),
        );
        let svg = render_svg(&scene, &Theme::default());
        assert!(svg.contains("x2=\"80.00\""));
        assert!(svg.contains("points=\"90.00,50.00 80.00,54.00 80.00,46.00\""));
    }

    #[test]
    fn rotated_text_is_wrapped_in_group() {
        let mut scene = Scene::new(100.0, 100.0, "#FFFFFF");
        scene.push(Text::new(20.0, 50.0, "Tuples", TextStyle::new(12.0, "#000").rotate(90.0)));
        let svg = render_svg(&scene, &Theme::default());
        assert!(svg.contains("<g transform=\"rotate(-90.00 20.00 50.00)\">"));
    }

    #[test]
    fn write_scene_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("scene.svg");
        write_scene(&sample_scene(), &path, OutputFormat::Svg, &Config::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }

    #[test]
    fn write_scene_rejects_empty_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let scene = Scene::new(0.0, 10.0, "#FFFFFF");
        let err = write_scene(&scene, &dir.path().join("x.svg"), OutputFormat::Svg, &Config::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidCanvas { .. }));
    }

    #[test]
    fn write_scene_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("scene.svg");
        let err = write_scene(&sample_scene(), &path, OutputFormat::Svg, &Config::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn strict_fonts_rejects_unknown_family() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.render.strict_fonts = true;
        config.theme.font_family = "No Such Family 91c2".to_string();
        let err = write_scene(&sample_scene(), &dir.path().join("x.svg"), OutputFormat::Svg, &config)
            .unwrap_err();
        assert!(matches!(err, RenderError::FontUnavailable(family) if family.contains("91c2")));
    }

    #[test]
    fn unknown_family_still_writes_svg_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.theme.font_family = "No Such Family 4e7a".to_string();
        assert!(!config.render.strict_fonts);
        let path = dir.path().join("fallback.svg");
        write_scene(&sample_scene(), &path, OutputFormat::Svg, &config).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("No Such Family 4e7a"));
        assert!(written.ends_with("</svg>"));
    }

    #[cfg(feature = "png")]
    #[test]
    fn unknown_family_still_writes_png_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.theme.font_family = "No Such Family 4e7a".to_string();
        config.theme.mono_font_family = "No Such Mono 4e7a".to_string();
        let path = dir.path().join("fallback.png");
        write_scene(&sample_scene(), &path, OutputFormat::Png, &config).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(feature = "png")]
    #[test]
    fn rasterize_png_honors_scale() {
        let svg = render_svg(&sample_scene(), &Theme::default());
        let render_cfg = RenderConfig {
            scale: 2.0,
            ..RenderConfig::default()
        };
        let bytes = rasterize_png(&svg, &render_cfg).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!((width, height), (400, 240));
    }
}

//! Drawing instructions and the scene that orders them.
//!
//! A [`Scene`] is a canvas plus an ordered list of [`Instruction`]s. The
//! renderer paints instructions strictly in list order, so an instruction
//! pushed later covers earlier ones where they overlap.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Fill, outline and opacity shared by the closed shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
    pub opacity: f32,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Sans,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Which part of the text block sits on the anchor's y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    Center,
    /// Baseline of the first line.
    #[default]
    Baseline,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: String,
    pub family: FontFamily,
    pub weight: FontWeight,
    pub italic: bool,
    pub anchor: TextAnchor,
    pub align: VerticalAlign,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: impl Into<String>) -> Self {
        Self {
            size,
            color: color.into(),
            family: FontFamily::Sans,
            weight: FontWeight::Normal,
            italic: false,
            anchor: TextAnchor::Start,
            align: VerticalAlign::Baseline,
            rotation: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn mono(mut self) -> Self {
        self.family = FontFamily::Mono;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn align(mut self, align: VerticalAlign) -> Self {
        self.align = align;
        self
    }

    /// Middle anchor, centered vertically.
    pub fn centered(self) -> Self {
        self.anchor(TextAnchor::Middle).align(VerticalAlign::Center)
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Text drawn centered on the shape it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub style: TextStyle,
}

/// Background box behind a text block, sized from the measured text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub fill: String,
    pub stroke: Option<Stroke>,
    pub padding: f32,
    pub corner_radius: f32,
    pub opacity: f32,
}

impl TextBox {
    pub fn new(fill: impl Into<String>, padding: f32) -> Self {
        Self {
            fill: fill.into(),
            stroke: None,
            padding,
            corner_radius: 0.0,
            opacity: 1.0,
        }
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.stroke = Some(Stroke::new(color, width));
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub paint: Paint,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub length: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
    pub head: ArrowHead,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
    pub paint: Paint,
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub style: TextStyle,
    pub background: Option<TextBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Rect(Rect),
    Line(Line),
    Arrow(Arrow),
    Circle(Circle),
    Polygon(Polygon),
    Text(Text),
}

impl Instruction {
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Rect(_) => "rect",
            Instruction::Line(_) => "line",
            Instruction::Arrow(_) => "arrow",
            Instruction::Circle(_) => "circle",
            Instruction::Polygon(_) => "polygon",
            Instruction::Text(_) => "text",
        }
    }

    /// Label text carried by the instruction, or the content of a text run.
    pub fn label_text(&self) -> Option<&str> {
        match self {
            Instruction::Rect(rect) => rect.label.as_ref().map(|l| l.text.as_str()),
            Instruction::Line(line) => line.label.as_ref().map(|l| l.text.as_str()),
            Instruction::Arrow(arrow) => arrow.label.as_ref().map(|l| l.text.as_str()),
            Instruction::Circle(circle) => circle.label.as_ref().map(|l| l.text.as_str()),
            Instruction::Polygon(_) => None,
            Instruction::Text(text) => Some(text.content.as_str()),
        }
    }

    /// Axis-aligned bounds as `(x, y, width, height)`. Text reports its anchor
    /// point with zero size since its extent depends on font metrics.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            Instruction::Rect(rect) => (rect.origin.x, rect.origin.y, rect.width, rect.height),
            Instruction::Line(Line { from, to, .. }) | Instruction::Arrow(Arrow { from, to, .. }) => {
                segment_bounds(*from, *to)
            }
            Instruction::Circle(circle) => (
                circle.center.x - circle.radius,
                circle.center.y - circle.radius,
                circle.radius * 2.0,
                circle.radius * 2.0,
            ),
            Instruction::Polygon(polygon) => {
                let mut min_x = f32::MAX;
                let mut min_y = f32::MAX;
                let mut max_x = f32::MIN;
                let mut max_y = f32::MIN;
                for point in &polygon.points {
                    min_x = min_x.min(point.x);
                    min_y = min_y.min(point.y);
                    max_x = max_x.max(point.x);
                    max_y = max_y.max(point.y);
                }
                if polygon.points.is_empty() {
                    (0.0, 0.0, 0.0, 0.0)
                } else {
                    (min_x, min_y, max_x - min_x, max_y - min_y)
                }
            }
            Instruction::Text(text) => (text.position.x, text.position.y, 0.0, 0.0),
        }
    }
}

fn segment_bounds(from: Point, to: Point) -> (f32, f32, f32, f32) {
    let x = from.x.min(to.x);
    let y = from.y.min(to.y);
    (x, y, (from.x - to.x).abs(), (from.y - to.y).abs())
}

macro_rules! into_instruction {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Instruction {
                fn from(value: $variant) -> Self {
                    Instruction::$variant(value)
                }
            }
        )*
    };
}

into_instruction!(Rect, Line, Arrow, Circle, Polygon, Text);

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
            corner_radius: 0.0,
            paint: Paint::default(),
            label: None,
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.paint.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.paint.stroke = Some(Stroke::new(color, width));
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.paint.opacity = opacity;
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn label(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.label = Some(Label {
            text: text.into(),
            style,
        });
        self
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
}

impl Line {
    pub fn new(from: Point, to: Point, stroke: Stroke) -> Self {
        Self {
            from,
            to,
            stroke,
            label: None,
        }
    }

    pub fn label(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.label = Some(Label {
            text: text.into(),
            style,
        });
        self
    }
}

impl Arrow {
    pub fn new(from: Point, to: Point, stroke: Stroke) -> Self {
        let head = ArrowHead {
            length: (stroke.width * 4.0).max(8.0),
            width: (stroke.width * 4.0).max(8.0),
        };
        Self {
            from,
            to,
            stroke,
            head,
            label: None,
        }
    }

    pub fn head(mut self, length: f32, width: f32) -> Self {
        self.head = ArrowHead { length, width };
        self
    }

    pub fn label(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.label = Some(Label {
            text: text.into(),
            style,
        });
        self
    }
}

impl Circle {
    pub fn new(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius,
            paint: Paint::default(),
            label: None,
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.paint.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.paint.stroke = Some(Stroke::new(color, width));
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.paint.opacity = opacity;
        self
    }

    pub fn label(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.label = Some(Label {
            text: text.into(),
            style,
        });
        self
    }
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            paint: Paint::default(),
        }
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.paint.fill = Some(color.into());
        self
    }

    pub fn stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.paint.stroke = Some(Stroke::new(color, width));
        self
    }
}

impl Text {
    pub fn new(x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            position: Point::new(x, y),
            content: content.into(),
            style,
            background: None,
        }
    }

    pub fn boxed(mut self, background: TextBox) -> Self {
        self.background = Some(background);
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: String,
    instructions: Vec<Instruction>,
}

impl Scene {
    pub fn new(width: f32, height: f32, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background: background.into(),
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, instruction: impl Into<Instruction>) {
        self.instructions.push(instruction.into());
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Rect(rect) => Some(rect),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_paint_order() {
        let mut scene = Scene::new(100.0, 100.0, "#FFFFFF");
        scene.push(Rect::new(0.0, 0.0, 10.0, 10.0).fill("#FF0000"));
        scene.push(Circle::new(Point::new(5.0, 5.0), 3.0));
        scene.push(Text::new(1.0, 1.0, "hi", TextStyle::new(12.0, "#000000")));
        let kinds: Vec<&str> = scene.instructions().iter().map(Instruction::kind).collect();
        assert_eq!(kinds, ["rect", "circle", "text"]);
    }

    #[test]
    fn arrow_bounds_ignore_direction() {
        let arrow: Instruction =
            Arrow::new(Point::new(10.0, 40.0), Point::new(2.0, 8.0), Stroke::new("#000", 2.0)).into();
        assert_eq!(arrow.bounds(), (2.0, 8.0, 8.0, 32.0));
    }

    #[test]
    fn label_text_reads_shape_labels() {
        let rect: Instruction = Rect::new(0.0, 0.0, 4.0, 4.0)
            .label("Leaf", TextStyle::new(10.0, "#000"))
            .into();
        assert_eq!(rect.label_text(), Some("Leaf"));
        let polygon: Instruction = Polygon::new(vec![Point::default(); 3]).into();
        assert_eq!(polygon.label_text(), None);
    }
}

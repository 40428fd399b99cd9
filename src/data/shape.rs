use crate::data::{Color, LineStyle, Path2D, Rect};
use cgmath::Vector2;
use std::ops::RangeInclusive;

/// Line widths accepted by [Shape::set_line_width].
pub const LINE_WIDTH_RANGE: RangeInclusive<f64> = 1.0..=10.0;

/// Default line width for new shapes.
pub const DEFAULT_LINE_WIDTH: f64 = 2.;

/// Shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangle,
    Rectangle,
    Oval,
}

impl ShapeKind {
    /// All shape kinds.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Triangle, ShapeKind::Rectangle, ShapeKind::Oval];

    /// Returns the numeric tag used by command surfaces to name this kind.
    pub fn tag(self) -> isize {
        match self {
            ShapeKind::Triangle => 101,
            ShapeKind::Rectangle => 102,
            ShapeKind::Oval => 103,
        }
    }

    /// Looks up a kind by its tag.
    pub fn from_tag(tag: isize) -> Option<ShapeKind> {
        ShapeKind::ALL.iter().cloned().find(|kind| kind.tag() == tag)
    }

    /// Creates the outline for a shape of this kind.
    fn outline(self, position: Vector2<f64>, size: Vector2<f64>, frame: &Rect) -> Path2D {
        match self {
            ShapeKind::Triangle => {
                let half = size / 2.;
                Path2D::polygon(&[
                    Vector2::new(position.x - half.x, position.y - half.y),
                    Vector2::new(position.x + half.x, position.y - half.y),
                    Vector2::new(position.x, position.y + half.y),
                ])
            }
            ShapeKind::Rectangle => Path2D::rect(frame),
            ShapeKind::Oval => Path2D::ellipse(frame),
        }
    }
}

impl Default for ShapeKind {
    fn default() -> ShapeKind {
        ShapeKind::Triangle
    }
}

/// A 2D shape with position, size and visual style.
///
/// The outline is derived from the geometry and kept up to date by the geometry setters, so it is
/// never stale when read.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    position: Vector2<f64>,
    size: Vector2<f64>,
    fill: Option<Color>,
    stroke: Option<Color>,
    line_width: f64,
    line_style: LineStyle,
    opacity: f64,
    outline: Path2D,
}

impl Shape {
    /// Creates a new shape centered at `position` with default style: red fill, black stroke,
    /// line width 2, solid, opaque.
    pub fn new(kind: ShapeKind, position: Vector2<f64>, size: Vector2<f64>) -> Shape {
        let mut shape = Shape {
            kind,
            position,
            size,
            fill: Some(Color::RED),
            stroke: Some(Color::BLACK),
            line_width: DEFAULT_LINE_WIDTH,
            line_style: LineStyle::solid(),
            opacity: 1.,
            outline: Path2D::new(),
        };
        shape.invalidate_outline();
        shape
    }

    fn invalidate_outline(&mut self) {
        let frame = self.frame();
        self.outline = self.kind.outline(self.position, self.size, &frame);
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The center point.
    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<Color> {
        self.stroke
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Returns the outline path.
    pub fn outline(&self) -> &Path2D {
        &self.outline
    }

    /// Returns the bounding frame: the geometry rect grown by half the line width on each side.
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.position, self.size).outset(self.line_width / 2.)
    }

    /// True if the shape has no area to hit, or its frame is out of f32 range.
    pub fn is_degenerate(&self) -> bool {
        let frame = self.frame();
        let fits = |x: f64, y: f64| (x as f32).is_finite() && (y as f32).is_finite();
        !(self.size.x > 0. && self.size.y > 0.)
            || !fits(frame.min_x(), frame.min_y())
            || !fits(frame.max_x(), frame.max_y())
    }

    /// Returns true if the point lies within the outline.
    pub fn contains_point(&self, point: Vector2<f64>) -> bool {
        if self.is_degenerate() || !self.frame().contains(point) {
            return false;
        }
        self.outline.contains(point)
    }

    pub fn set_position(&mut self, position: Vector2<f64>) {
        self.position = position;
        self.invalidate_outline();
    }

    /// Moves the shape by an offset.
    pub fn translate(&mut self, offset: Vector2<f64>) {
        self.set_position(self.position + offset);
    }

    pub fn set_size(&mut self, size: Vector2<f64>) {
        self.size = size;
        self.invalidate_outline();
    }

    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    pub fn set_stroke(&mut self, stroke: Option<Color>) {
        self.stroke = stroke;
    }

    /// Sets the line width, clamped to [LINE_WIDTH_RANGE]. Non-finite values are ignored.
    pub fn set_line_width(&mut self, line_width: f64) {
        if !line_width.is_finite() {
            return;
        }
        self.line_width = line_width
            .max(*LINE_WIDTH_RANGE.start())
            .min(*LINE_WIDTH_RANGE.end());
        // rect and oval outlines follow the frame
        self.invalidate_outline();
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.line_style = line_style;
    }

    /// Sets the opacity, clamped to [0, 1]. Non-finite values are ignored.
    pub fn set_opacity(&mut self, opacity: f64) {
        if !opacity.is_finite() {
            return;
        }
        self.opacity = opacity.max(0.).min(1.);
    }

    /// Returns the stroke dash pattern for the current line style and width.
    pub fn dash_pattern(&self) -> Vec<f64> {
        self.line_style.dash_pattern(self.line_width)
    }
}

#[test]
fn frame_follows_geometry() {
    let mut shape = Shape::new(
        ShapeKind::Rectangle,
        Vector2::new(50., 50.),
        Vector2::new(100., 100.),
    );
    assert_eq!(shape.frame().origin, Vector2::new(-1., -1.));
    assert_eq!(shape.frame().size, Vector2::new(102., 102.));

    shape.set_position(Vector2::new(10., 20.));
    shape.set_size(Vector2::new(40., 60.));
    shape.set_line_width(4.);
    assert_eq!(shape.frame().origin, Vector2::new(-12., -12.));
    assert_eq!(shape.frame().size, Vector2::new(44., 64.));
    assert_eq!(shape.outline().control_bounds(), Some(shape.frame()));

    shape.translate(Vector2::new(5., -5.));
    assert_eq!(shape.frame().origin, Vector2::new(-7., -17.));
    assert_eq!(shape.outline().control_bounds(), Some(shape.frame()));
}

#[test]
fn triangle_outline() {
    let mut shape = Shape::new(
        ShapeKind::Triangle,
        Vector2::new(50., 50.),
        Vector2::new(100., 100.),
    );
    assert_eq!(
        shape.outline().commands()[..3],
        [
            crate::data::Path2DCmd::JumpTo(Vector2::new(0., 0.)),
            crate::data::Path2DCmd::LineTo(Vector2::new(100., 0.)),
            crate::data::Path2DCmd::LineTo(Vector2::new(50., 100.)),
        ]
    );
    assert!(shape.contains_point(Vector2::new(50., 50.)));
    // inside the frame but outside the slanted edges
    assert!(!shape.contains_point(Vector2::new(5., 95.)));

    shape.set_position(Vector2::new(250., 50.));
    assert!(!shape.contains_point(Vector2::new(50., 50.)));
    assert!(shape.contains_point(Vector2::new(250., 50.)));
}

#[test]
fn oval_hit_test_is_precise() {
    let shape = Shape::new(ShapeKind::Oval, Vector2::new(0., 0.), Vector2::new(100., 100.));
    assert!(shape.contains_point(Vector2::new(0., 0.)));
    assert!(shape.frame().contains(Vector2::new(48., 48.)));
    assert!(!shape.contains_point(Vector2::new(48., 48.)));
}

#[test]
fn zero_size_never_hits() {
    for &kind in &ShapeKind::ALL {
        let shape = Shape::new(kind, Vector2::new(10., 10.), Vector2::new(0., 0.));
        assert!(!shape.contains_point(Vector2::new(10., 10.)));
    }
}

#[test]
fn out_of_range_geometry_never_hits() {
    for &kind in &ShapeKind::ALL {
        let huge = Shape::new(kind, Vector2::new(0., 0.), Vector2::new(1e39, 1e39));
        assert!(huge.is_degenerate());
        assert!(!huge.contains_point(Vector2::new(0., 0.)));

        let far = Shape::new(kind, Vector2::new(1e39, 0.), Vector2::new(10., 10.));
        assert!(far.is_degenerate());
        assert!(!far.contains_point(Vector2::new(1e39, 0.)));

        let nan = Shape::new(kind, Vector2::new(std::f64::NAN, 0.), Vector2::new(10., 10.));
        assert!(nan.is_degenerate());
    }
}

#[test]
fn style_clamping() {
    let mut shape = Shape::new(ShapeKind::Oval, Vector2::new(0., 0.), Vector2::new(10., 10.));
    assert_eq!(shape.fill(), Some(Color::RED));
    assert_eq!(shape.stroke(), Some(Color::BLACK));
    assert_eq!(shape.line_width(), 2.);
    assert_eq!(shape.opacity(), 1.);

    shape.set_opacity(1.5);
    assert_eq!(shape.opacity(), 1.);
    shape.set_opacity(-0.5);
    assert_eq!(shape.opacity(), 0.);
    shape.set_opacity(std::f64::NAN);
    assert_eq!(shape.opacity(), 0.);

    shape.set_line_width(40.);
    assert_eq!(shape.line_width(), 10.);
    shape.set_line_width(0.);
    assert_eq!(shape.line_width(), 1.);

    shape.set_line_style(LineStyle::get(2).unwrap());
    shape.set_line_width(3.);
    assert_eq!(shape.dash_pattern(), vec![12., 12.]);
}

#[test]
fn kind_tags() {
    for &kind in &ShapeKind::ALL {
        assert_eq!(ShapeKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(ShapeKind::from_tag(7), None);
}

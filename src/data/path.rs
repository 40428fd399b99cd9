use crate::data::Rect;
use cgmath::Vector2;
use lyon::math::Point;
use lyon::path::builder::{FlatPathBuilder, PathBuilder};
use lyon::path::{self, PathEvent};
use std::mem;

const CURVE_TOLERANCE: f32 = 0.1;

/// Control point distance for approximating a quarter ellipse with a cubic Bézier curve.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Two-dimensional path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D(Vec<Path2DCmd>);

/// Path2D commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Path2DCmd {
    /// Jump to a point (analogous to SVG M).
    JumpTo(Vector2<f64>),

    /// Line to a point (analogous to SVG L).
    LineTo(Vector2<f64>),

    /// Quadratic Bézier curve (analogous to SVG Q).
    QuadTo(Vector2<f64>, Vector2<f64>),

    /// Cubic bézier curve (analogous to SVG C).
    CubicTo(Vector2<f64>, Vector2<f64>, Vector2<f64>),

    /// Close the current shape (analogous to SVG Z).
    CloseShape,
}

impl Path2D {
    /// Creates a new empty path.
    pub fn new() -> Path2D {
        Path2D(Vec::new())
    }

    /// Creates a closed polygon through the given points.
    pub fn polygon(points: &[Vector2<f64>]) -> Path2D {
        let mut cmds = Vec::with_capacity(points.len() + 1);
        for (i, point) in points.iter().enumerate() {
            cmds.push(if i == 0 {
                Path2DCmd::JumpTo(*point)
            } else {
                Path2DCmd::LineTo(*point)
            });
        }
        if !cmds.is_empty() {
            cmds.push(Path2DCmd::CloseShape);
        }
        Path2D(cmds)
    }

    /// Creates a closed rectangle path.
    pub fn rect(rect: &Rect) -> Path2D {
        Path2D::polygon(&[
            Vector2::new(rect.min_x(), rect.min_y()),
            Vector2::new(rect.max_x(), rect.min_y()),
            Vector2::new(rect.max_x(), rect.max_y()),
            Vector2::new(rect.min_x(), rect.max_y()),
        ])
    }

    /// Creates a closed ellipse inscribed in a rectangle, made of four cubic arcs.
    pub fn ellipse(rect: &Rect) -> Path2D {
        let c = rect.center();
        let rx = rect.size.x / 2.;
        let ry = rect.size.y / 2.;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;
        let v = Vector2::new;

        Path2D(vec![
            Path2DCmd::JumpTo(v(c.x + rx, c.y)),
            Path2DCmd::CubicTo(v(c.x + rx, c.y + ky), v(c.x + kx, c.y + ry), v(c.x, c.y + ry)),
            Path2DCmd::CubicTo(v(c.x - kx, c.y + ry), v(c.x - rx, c.y + ky), v(c.x - rx, c.y)),
            Path2DCmd::CubicTo(v(c.x - rx, c.y - ky), v(c.x - kx, c.y - ry), v(c.x, c.y - ry)),
            Path2DCmd::CubicTo(v(c.x + kx, c.y - ry), v(c.x + rx, c.y - ky), v(c.x + rx, c.y)),
            Path2DCmd::CloseShape,
        ])
    }

    /// Returns a reference to the list of path commands.
    pub fn commands(&self) -> &[Path2DCmd] {
        &self.0
    }

    /// Returns true if there are no commands.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the bounding rectangle of all points, including control points.
    pub fn control_bounds(&self) -> Option<Rect> {
        let mut points = self.0.iter().flat_map(|cmd| cmd.points());
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Vector2::new(min.x.min(p.x), min.y.min(p.y)),
                Vector2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rect::new(min, max - min))
    }

    /// Returns true if every point is representable as a finite f32.
    pub fn fits_f32(&self) -> bool {
        self.0.iter().flat_map(|cmd| cmd.points()).all(fits_f32)
    }

    /// Flattens this path to vertices. Each embedded Vec is one contiguous shape separated by jump
    /// commands.
    ///
    /// Paths that don’t fit in f32 (see [Path2D::fits_f32]) flatten to nothing.
    pub fn flatten_to_verts(&self) -> Vec<Vec<Vector2<f32>>> {
        if !self.fits_f32() {
            return Vec::new();
        }
        let mut builder = path::default::Path::builder().flattened(CURVE_TOLERANCE);
        let mut needs_move = true;

        for command in &self.0 {
            // ensure M exists before command
            if needs_move && command.needs_move_if_first() {
                if let Some(point) = command.start_hint() {
                    builder.move_to(to_point(point));
                }
            }
            if let Path2DCmd::CloseShape = command {
                if needs_move {
                    // nothing to close
                    continue;
                }
            }
            needs_move = command.next_will_need_move();

            match command {
                Path2DCmd::JumpTo(v) => {
                    builder.move_to(to_point(*v));
                }
                Path2DCmd::LineTo(v) => {
                    builder.line_to(to_point(*v));
                }
                Path2DCmd::QuadTo(c, p) => {
                    builder.quadratic_bezier_to(to_point(*c), to_point(*p));
                }
                Path2DCmd::CubicTo(c1, c2, p) => {
                    builder.cubic_bezier_to(to_point(*c1), to_point(*c2), to_point(*p));
                }
                Path2DCmd::CloseShape => {
                    builder.close();
                }
            }
        }

        let path = builder.build();

        let mut groups = Vec::new();
        let mut group = Vec::new();
        let mut group_start = None;

        for event in path.path_iter() {
            match event {
                PathEvent::MoveTo(p) => {
                    group_start = Some(p);
                    let old_group = mem::replace(&mut group, Vec::new());
                    if !old_group.is_empty() {
                        groups.push(old_group);
                    }
                    group.push((p.x, p.y).into());
                }
                PathEvent::LineTo(p) => group.push((p.x, p.y).into()),
                PathEvent::Close => {
                    if let Some(p) = group_start {
                        group.push((p.x, p.y).into());
                        group_start = None;
                        groups.push(mem::replace(&mut group, Vec::new()));
                    }
                }
                // a flattened builder only emits line segments
                _ => (),
            }
        }

        if !group.is_empty() {
            groups.push(group);
        }

        groups
    }

    /// Returns true if the point lies in the interior of this path under the non-zero winding
    /// rule. Open subpaths are treated as implicitly closed.
    pub fn contains(&self, point: Vector2<f64>) -> bool {
        if !fits_f32(point) {
            return false;
        }
        let p = Vector2::new(point.x as f32, point.y as f32);
        let winding: i32 = self
            .flatten_to_verts()
            .iter()
            .map(|verts| winding_number(verts, p))
            .sum();
        winding != 0
    }
}

impl Default for Path2D {
    fn default() -> Path2D {
        Path2D::new()
    }
}

impl From<Vec<Path2DCmd>> for Path2D {
    fn from(t: Vec<Path2DCmd>) -> Path2D {
        Path2D(t)
    }
}

impl Path2DCmd {
    fn needs_move_if_first(&self) -> bool {
        match self {
            Path2DCmd::JumpTo(_) | Path2DCmd::CloseShape => false,
            _ => true,
        }
    }

    fn next_will_need_move(&self) -> bool {
        match self {
            Path2DCmd::CloseShape => true,
            _ => false,
        }
    }

    /// Point to start from if this command has no preceding jump.
    fn start_hint(&self) -> Option<Vector2<f64>> {
        match self {
            Path2DCmd::JumpTo(v)
            | Path2DCmd::LineTo(v)
            | Path2DCmd::QuadTo(v, _)
            | Path2DCmd::CubicTo(v, _, _) => Some(*v),
            _ => None,
        }
    }

    fn points(&self) -> Vec<Vector2<f64>> {
        match self {
            Path2DCmd::JumpTo(v) | Path2DCmd::LineTo(v) => vec![*v],
            Path2DCmd::QuadTo(a, b) => vec![*a, *b],
            Path2DCmd::CubicTo(a, b, c) => vec![*a, *b, *c],
            Path2DCmd::CloseShape => Vec::new(),
        }
    }
}

fn fits_f32(v: Vector2<f64>) -> bool {
    (v.x as f32).is_finite() && (v.y as f32).is_finite()
}

fn to_point(v: Vector2<f64>) -> Point {
    Point::new(v.x as f32, v.y as f32)
}

/// > 0 if `p` is left of the line through `a` and `b`, < 0 if right, 0 if on the line.
fn is_left(a: Vector2<f32>, b: Vector2<f32>, p: Vector2<f32>) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Winding number of a closed polygon around a point.
fn winding_number(verts: &[Vector2<f32>], p: Vector2<f32>) -> i32 {
    if verts.len() < 3 {
        return 0;
    }
    let mut wn = 0;
    let edges = verts
        .iter()
        .zip(verts.iter().skip(1).chain(verts.first()));
    for (&a, &b) in edges {
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b, p) > 0. {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(a, b, p) < 0. {
            wn -= 1;
        }
    }
    wn
}

#[test]
fn polygon_containment() {
    let triangle = Path2D::polygon(&[
        Vector2::new(0., 0.),
        Vector2::new(10., 0.),
        Vector2::new(5., 10.),
    ]);
    assert!(triangle.contains(Vector2::new(5., 5.)));
    assert!(!triangle.contains(Vector2::new(1., 9.)));
    assert!(!triangle.contains(Vector2::new(-1., 1.)));

    // winding direction does not matter under the non-zero rule
    let reversed = Path2D::polygon(&[
        Vector2::new(5., 10.),
        Vector2::new(10., 0.),
        Vector2::new(0., 0.),
    ]);
    assert!(reversed.contains(Vector2::new(5., 5.)));
}

#[test]
fn ellipse_containment() {
    let ellipse = Path2D::ellipse(&Rect::new(Vector2::new(0., 0.), Vector2::new(100., 50.)));
    assert!(ellipse.contains(Vector2::new(50., 25.)));
    assert!(ellipse.contains(Vector2::new(95., 25.)));
    // corners of the bounding rect are outside the ellipse
    assert!(!ellipse.contains(Vector2::new(3., 3.)));
    assert!(!ellipse.contains(Vector2::new(97., 47.)));

    let bounds = ellipse.control_bounds().unwrap();
    assert_eq!(bounds.origin, Vector2::new(0., 0.));
    assert_eq!(bounds.size, Vector2::new(100., 50.));
}

#[test]
fn degenerate_paths() {
    assert!(!Path2D::new().contains(Vector2::new(0., 0.)));
    assert!(Path2D::new().control_bounds().is_none());

    // finite in f64 but infinite in f32
    let huge = Path2D::ellipse(&Rect::from_center(
        Vector2::new(0., 0.),
        Vector2::new(1e39, 1e39),
    ));
    assert!(!huge.fits_f32());
    assert!(huge.flatten_to_verts().is_empty());
    assert!(!huge.contains(Vector2::new(0., 0.)));

    let unit = Path2D::rect(&Rect::new(Vector2::new(0., 0.), Vector2::new(1., 1.)));
    assert!(unit.fits_f32());
    assert!(!unit.contains(Vector2::new(1e39, 0.5)));

    let flat = Path2D::rect(&Rect::new(Vector2::new(0., 0.), Vector2::new(0., 0.)));
    assert!(!flat.contains(Vector2::new(0., 0.)));
}

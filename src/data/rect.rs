use cgmath::Vector2;

/// An axis-aligned rectangle in canvas coordinates (y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// The corner with the smallest coordinates.
    pub origin: Vector2<f64>,

    /// Width (x) and height (y).
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle from an origin and a size.
    pub fn new(origin: Vector2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a rectangle of the given size centered on a point.
    pub fn from_center(center: Vector2<f64>, size: Vector2<f64>) -> Rect {
        Rect {
            origin: center - size / 2.,
            size,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// The center point.
    pub fn center(&self) -> Vector2<f64> {
        self.origin + self.size / 2.
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.size.x > 0. && self.size.y > 0.)
    }

    /// Insets every edge by `dx` horizontally and `dy` vertically. Negative values grow the
    /// rectangle.
    pub fn inset(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            origin: Vector2::new(self.origin.x + dx, self.origin.y + dy),
            size: Vector2::new(self.size.x - 2. * dx, self.size.y - 2. * dy),
        }
    }

    /// Grows every edge by `margin`.
    pub fn outset(&self, margin: f64) -> Rect {
        self.inset(-margin, -margin)
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect {
            origin: Vector2::new(min_x, min_y),
            size: Vector2::new(max_x - min_x, max_y - min_y),
        }
    }

    /// True if the two rectangles overlap with nonzero area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// True if the point lies inside or on the edge of the rectangle.
    pub fn contains(&self, point: Vector2<f64>) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

#[test]
fn rect_algebra() {
    let a = Rect::new(Vector2::new(0., 0.), Vector2::new(10., 10.));
    let b = Rect::from_center(Vector2::new(20., 5.), Vector2::new(4., 4.));

    assert_eq!(b.origin, Vector2::new(18., 3.));
    assert!(!a.intersects(&b));

    let u = a.union(&b);
    assert_eq!(u.origin, Vector2::new(0., 0.));
    assert_eq!(u.size, Vector2::new(22., 10.));
    assert!(u.intersects(&a) && u.intersects(&b));

    let grown = a.outset(8.);
    assert_eq!(grown.origin, Vector2::new(-8., -8.));
    assert_eq!(grown.size, Vector2::new(26., 26.));
    assert_eq!(grown.inset(8., 8.), a);

    // touching edges do not count as overlap
    let c = Rect::new(Vector2::new(10., 0.), Vector2::new(5., 5.));
    assert!(!a.intersects(&c));
    assert!(a.contains(Vector2::new(10., 10.)));
    assert!(!a.contains(Vector2::new(10.5, 10.)));

    assert!(Rect::new(Vector2::new(0., 0.), Vector2::new(0., 3.)).is_empty());
}

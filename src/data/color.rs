//! Colors.

/// A straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const CLEAR: Color = Color {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 0.,
    };

    /// Opaque black.
    pub const BLACK: Color = Color {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 1.,
    };

    /// Opaque white.
    pub const WHITE: Color = Color {
        r: 1.,
        g: 1.,
        b: 1.,
        a: 1.,
    };

    /// Opaque red.
    pub const RED: Color = Color {
        r: 1.,
        g: 0.,
        b: 0.,
        a: 1.,
    };

    /// Returns this color with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Color {
        Color {
            a: self.a * opacity as f32,
            ..self
        }
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from(i: (f32, f32, f32, f32)) -> Color {
        Color {
            r: i.0,
            g: i.1,
            b: i.2,
            a: i.3,
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from(i: [f32; 4]) -> Color {
        Color {
            r: i[0],
            g: i[1],
            b: i[2],
            a: i[3],
        }
    }
}

impl Into<[f32; 4]> for Color {
    fn into(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[test]
fn opacity() {
    let c: Color = [0.2, 0.4, 0.6, 0.5].into();
    let faded = c.with_opacity(0.5);
    assert_eq!(faded.a, 0.25);
    assert_eq!((faded.r, faded.g, faded.b), (c.r, c.g, c.b));

    let floats: [f32; 4] = Color::RED.into();
    assert_eq!(floats, [1., 0., 0., 1.]);
}

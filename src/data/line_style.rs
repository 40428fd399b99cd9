//! Stroke dash styles.

use lazy_static::lazy_static;
use std::fmt;

lazy_static! {
    /// Every available line style, in picker order.
    static ref ALL_STYLES: [LineStyle; 4] = [
        LineStyle::new("Solid", &[]),
        LineStyle::new("Fine Dash", &[1., 1.]),
        LineStyle::new("Medium Dash", &[4., 4.]),
        LineStyle::new("Dash Dot", &[3., 2., 1., 2., 3.]),
    ];
}

/// A line dash style.
///
/// The dash pattern is given in units of line width; see [LineStyle::dash_pattern].
#[derive(Clone, Copy, PartialEq)]
pub struct LineStyle {
    name: &'static str,
    pattern: &'static [f64],
}

impl LineStyle {
    const fn new(name: &'static str, pattern: &'static [f64]) -> LineStyle {
        LineStyle { name, pattern }
    }

    /// Returns the catalog of line styles.
    pub fn all() -> &'static [LineStyle] {
        &ALL_STYLES[..]
    }

    /// Returns the line style at a catalog index.
    pub fn get(index: usize) -> Option<LineStyle> {
        ALL_STYLES.get(index).cloned()
    }

    /// The solid (undashed) style.
    pub fn solid() -> LineStyle {
        ALL_STYLES[0]
    }

    /// Returns this style’s position in [LineStyle::all].
    pub fn index(&self) -> usize {
        ALL_STYLES
            .iter()
            .position(|style| style == self)
            .unwrap_or(0)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if this style does not dash.
    pub fn is_solid(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Returns the dash pattern scaled to the given line width.
    pub fn dash_pattern(&self, line_width: f64) -> Vec<f64> {
        self.pattern.iter().map(|len| len * line_width).collect()
    }
}

impl Default for LineStyle {
    fn default() -> LineStyle {
        LineStyle::solid()
    }
}

impl fmt::Debug for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LineStyle({})", self.name)
    }
}

#[test]
fn catalog() {
    assert_eq!(LineStyle::all().len(), 4);
    assert!(LineStyle::solid().is_solid());
    assert!(LineStyle::solid().dash_pattern(5.).is_empty());

    let dash_dot = LineStyle::get(3).unwrap();
    assert_eq!(dash_dot.name(), "Dash Dot");
    assert_eq!(dash_dot.index(), 3);
    assert_eq!(dash_dot.dash_pattern(2.), vec![6., 4., 2., 4., 6.]);

    assert_eq!(LineStyle::get(1).unwrap().dash_pattern(3.), vec![3., 3.]);
    assert!(LineStyle::get(4).is_none());
}

//! What a renderer needs to repaint a region.

use crate::data::{Color, Path2D, Rect};
use crate::scene::{Canvas, ShapeRef};

/// Selection halo dash pattern.
const HALO_DASH: [f64; 2] = [5., 5.];

/// Selection halo line width.
const HALO_LINE_WIDTH: f64 = 2.;

/// Stroke parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,

    /// Dash lengths, alternating on and off. Empty for a solid line.
    pub dash: Vec<f64>,
    pub dash_phase: f64,
}

/// A shape to paint: fill first, then stroke, all at the given opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem<'a> {
    pub shape: ShapeRef,
    pub outline: &'a Path2D,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
    pub opacity: f64,
}

/// The selection indicator, painted on top of all shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionHalo {
    pub rect: Rect,
    pub stroke: StrokeStyle,
}

/// Everything intersecting a dirty region, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList<'a> {
    /// Color to clear the region with.
    pub background: Color,
    pub items: Vec<DrawItem<'a>>,
    pub halo: Option<SelectionHalo>,
}

impl Canvas {
    /// Returns the draw list for repainting `dirty`.
    pub fn draw_list(&self, dirty: &Rect) -> DrawList {
        let items = self
            .shapes()
            .filter(|(_, shape)| shape.frame().intersects(dirty))
            .map(|(shape_ref, shape)| DrawItem {
                shape: shape_ref,
                outline: shape.outline(),
                fill: shape.fill(),
                stroke: shape.stroke().map(|color| StrokeStyle {
                    color,
                    width: shape.line_width(),
                    dash: shape.dash_pattern(),
                    dash_phase: 0.,
                }),
                opacity: shape.opacity(),
            })
            .collect();

        let halo = self
            .selected_shape()
            .map(|shape| shape.frame().outset(self.settings().halo_margin))
            .filter(|rect| rect.intersects(dirty))
            .map(|rect| SelectionHalo {
                rect,
                stroke: StrokeStyle {
                    color: Color::BLACK,
                    width: HALO_LINE_WIDTH,
                    dash: HALO_DASH.to_vec(),
                    dash_phase: self.halo_phase(),
                },
            });

        DrawList {
            background: Color::WHITE,
            items,
            halo,
        }
    }
}

#[test]
fn draw_list_filters_by_region() {
    use crate::data::{LineStyle, ShapeKind};
    use cgmath::Vector2;

    let mut canvas = Canvas::new();
    let size = Vector2::new(100., 100.);
    let a = canvas.add_shape(ShapeKind::Rectangle, Vector2::new(50., 50.), size);
    let b = canvas.add_shape(ShapeKind::Oval, Vector2::new(300., 50.), size);
    let c = canvas.add_shape(ShapeKind::Triangle, Vector2::new(80., 80.), size);
    canvas
        .edit(a)
        .unwrap()
        .set_stroke(None)
        .set_line_style(LineStyle::get(1).unwrap());
    canvas
        .edit(c)
        .unwrap()
        .set_line_style(LineStyle::get(2).unwrap())
        .set_opacity(0.25);

    let dirty = Rect::new(Vector2::new(0., 0.), Vector2::new(120., 120.));
    let list = canvas.draw_list(&dirty);
    assert_eq!(list.background, Color::WHITE);
    let shapes: Vec<_> = list.items.iter().map(|item| item.shape).collect();
    assert_eq!(shapes, vec![a, c]);
    assert!(!shapes.contains(&b));

    assert_eq!(list.items[0].stroke, None);
    let stroke = list.items[1].stroke.as_ref().unwrap();
    assert_eq!(stroke.dash, vec![8., 8.]);
    assert_eq!(stroke.color, Color::BLACK);
    assert_eq!(list.items[1].opacity, 0.25);
    assert_eq!(list.items[1].outline, canvas.shape(c).unwrap().outline());

    // c is selected; its halo sits 4 outside its frame
    let halo = list.halo.unwrap();
    assert_eq!(halo.rect, canvas.shape(c).unwrap().frame().outset(4.));
    assert_eq!(halo.stroke.dash, vec![5., 5.]);

    let far = Rect::new(Vector2::new(1000., 1000.), Vector2::new(10., 10.));
    let list = canvas.draw_list(&far);
    assert!(list.items.is_empty());
    assert!(list.halo.is_none());
}

use crate::data::{Color, LineStyle, Shape};
use crate::scene::{Canvas, CanvasEvent, ShapeRef};
use cgmath::Vector2;

/// Edits a shape on a canvas.
///
/// Every setter applies the change, then reports the old and new frames as damage and emits
/// [CanvasEvent::ShapeChanged].
pub struct ShapeEdit<'a> {
    canvas: &'a mut Canvas,
    shape: ShapeRef,
}

impl<'a> ShapeEdit<'a> {
    pub(super) fn new(canvas: &'a mut Canvas, shape: ShapeRef) -> ShapeEdit<'a> {
        ShapeEdit { canvas, shape }
    }

    /// The shape being edited.
    pub fn shape_ref(&self) -> ShapeRef {
        self.shape
    }

    fn apply<F: FnOnce(&mut Shape)>(&mut self, f: F) -> &mut Self {
        let margin = self.canvas.settings().damage_margin;
        let damage = self.canvas.shape_mut(self.shape).map(|shape| {
            let before = shape.frame().outset(margin);
            f(shape);
            before.union(&shape.frame().outset(margin))
        });
        if let Some(damage) = damage {
            self.canvas.notify(CanvasEvent::Invalidate(damage));
            self.canvas.notify(CanvasEvent::ShapeChanged(self.shape));
        }
        self
    }

    pub fn set_position(&mut self, position: Vector2<f64>) -> &mut Self {
        self.apply(|shape| shape.set_position(position))
    }

    pub fn translate(&mut self, offset: Vector2<f64>) -> &mut Self {
        self.apply(|shape| shape.translate(offset))
    }

    pub fn set_size(&mut self, size: Vector2<f64>) -> &mut Self {
        self.apply(|shape| shape.set_size(size))
    }

    pub fn set_fill(&mut self, fill: Option<Color>) -> &mut Self {
        self.apply(|shape| shape.set_fill(fill))
    }

    pub fn set_stroke(&mut self, stroke: Option<Color>) -> &mut Self {
        self.apply(|shape| shape.set_stroke(stroke))
    }

    /// See [Shape::set_line_width].
    pub fn set_line_width(&mut self, line_width: f64) -> &mut Self {
        self.apply(|shape| shape.set_line_width(line_width))
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) -> &mut Self {
        self.apply(|shape| shape.set_line_style(line_style))
    }

    /// See [Shape::set_opacity].
    pub fn set_opacity(&mut self, opacity: f64) -> &mut Self {
        self.apply(|shape| shape.set_opacity(opacity))
    }
}

#[test]
fn edits_notify_after_applying() {
    use crate::data::ShapeKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut canvas = Canvas::new();
    let shape = canvas.add_shape(
        ShapeKind::Rectangle,
        Vector2::new(50., 50.),
        Vector2::new(100., 100.),
    );
    let before = canvas.damage_rect(shape).unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    canvas.observe(move |event| sink.borrow_mut().push(*event));

    canvas
        .edit(shape)
        .unwrap()
        .set_line_width(6.)
        .set_fill(None)
        .set_opacity(0.5);

    let edited = canvas.shape(shape).unwrap();
    assert_eq!(edited.line_width(), 6.);
    assert_eq!(edited.fill(), None);
    assert_eq!(edited.opacity(), 0.5);
    // outline follows the wider frame
    assert_eq!(edited.outline().control_bounds(), Some(edited.frame()));

    let after = canvas.damage_rect(shape).unwrap();
    let events = events.borrow();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0], CanvasEvent::Invalidate(before.union(&after)));
    assert_eq!(events[1], CanvasEvent::ShapeChanged(shape));
    assert_eq!(events[2], CanvasEvent::Invalidate(after));
}

#[test]
fn edit_unknown_shape() {
    let mut canvas = Canvas::new();
    assert!(canvas.edit(ShapeRef(42)).is_none());
}

//! User actions and the interaction state that applies them to a canvas.
//!
//! Actions are platform-neutral: whatever receives pointer and key events translates them into
//! [Action]s. Coordinates are canvas coordinates with y pointing up.

use crate::data::{Rect, ShapeKind};
use crate::scene::{Canvas, CanvasError, CanvasResult, ReorderAction};
use cgmath::Vector2;

/// Nudge directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the offset for moving `amount` units in this direction.
    pub fn offset(self, amount: f64) -> Vector2<f64> {
        match self {
            Direction::Left => Vector2::new(-amount, 0.),
            Direction::Right => Vector2::new(amount, 0.),
            Direction::Up => Vector2::new(0., amount),
            Direction::Down => Vector2::new(0., -amount),
        }
    }
}

/// User actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// The primary pointer button was pressed.
    PointerDown(Vector2<f64>),

    /// The pointer moved while pressed.
    PointerDragged(Vector2<f64>),

    /// The primary pointer button was released.
    PointerUp,

    /// Move the selection by one nudge step.
    Nudge(Direction),

    /// Delete the selected shape.
    Delete,

    /// Deselect.
    Cancel,

    /// Change the selected shape’s paint order.
    Reorder(ReorderAction),

    /// Add a new shape in the middle of the viewport.
    AddShape(ShapeKind),
}

impl Action {
    /// Creates an add-shape action from a command tag, falling back to a triangle for unknown
    /// tags.
    pub fn add_shape_with_tag(tag: isize) -> Action {
        Action::AddShape(ShapeKind::from_tag(tag).unwrap_or_default())
    }
}

/// Applies actions to a canvas and tracks pointer drags.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    viewport: Rect,
    drag_point: Option<Vector2<f64>>,
}

impl Interaction {
    /// Creates a new interaction for a viewport in canvas coordinates.
    pub fn new(viewport: Rect) -> Interaction {
        Interaction {
            viewport,
            drag_point: None,
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Sets the viewport, e.g. when the view was resized.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// True while a shape is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag_point.is_some()
    }

    /// Applies an action.
    ///
    /// Errors are rejected actions that changed nothing, such as deleting with no selection.
    pub fn handle(&mut self, canvas: &mut Canvas, action: Action) -> CanvasResult<()> {
        let result = self.apply(canvas, action);
        if let Err(err) = &result {
            debug!(target: "easel", "rejected {:?}: {}", action, err);
        }
        result
    }

    fn apply(&mut self, canvas: &mut Canvas, action: Action) -> CanvasResult<()> {
        match action {
            Action::PointerDown(point) => {
                self.drag_point = canvas.select_at(point).map(|_| point);
                Ok(())
            }
            Action::PointerDragged(point) => match self.drag_point {
                Some(last) => {
                    if let Err(err) = canvas.translate_selection(point - last) {
                        self.drag_point = None;
                        return Err(err);
                    }
                    self.drag_point = Some(point);
                    Ok(())
                }
                None => Ok(()),
            },
            Action::PointerUp => {
                self.drag_point = None;
                Ok(())
            }
            Action::Nudge(direction) => {
                let offset = direction.offset(canvas.settings().nudge_amount);
                canvas.translate_selection(offset)
            }
            Action::Delete => {
                let selection = canvas.selection().ok_or(CanvasError::NoSelection)?;
                self.drag_point = None;
                canvas.remove_shape(selection);
                Ok(())
            }
            Action::Cancel => {
                if canvas.selection().is_none() {
                    return Err(CanvasError::NoSelection);
                }
                self.drag_point = None;
                canvas.set_selection(None)
            }
            Action::Reorder(reorder) => canvas.reorder_selection(reorder),
            Action::AddShape(kind) => {
                let size = canvas.settings().new_shape_size;
                canvas.add_shape(kind, self.viewport.center(), size);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
fn viewport() -> Interaction {
    Interaction::new(Rect::new(Vector2::new(0., 0.), Vector2::new(400., 300.)))
}

#[test]
fn add_shape_centered() {
    let mut canvas = Canvas::new();
    let mut interaction = viewport();

    interaction
        .handle(&mut canvas, Action::add_shape_with_tag(103))
        .unwrap();
    interaction
        .handle(&mut canvas, Action::add_shape_with_tag(0))
        .unwrap();

    let kinds: Vec<_> = canvas.shapes().map(|(_, shape)| shape.kind()).collect();
    assert_eq!(kinds, vec![ShapeKind::Oval, ShapeKind::Triangle]);

    let selected = canvas.selected_shape().unwrap();
    assert_eq!(selected.position(), Vector2::new(200., 150.));
    assert_eq!(selected.size(), Vector2::new(100., 100.));
}

#[test]
fn drag_moves_hit_shape() {
    let mut canvas = Canvas::new();
    let mut interaction = viewport();
    let shape = canvas.add_shape(
        ShapeKind::Rectangle,
        Vector2::new(50., 50.),
        Vector2::new(100., 100.),
    );
    canvas.set_selection(None).unwrap();

    interaction
        .handle(&mut canvas, Action::PointerDown(Vector2::new(40., 40.)))
        .unwrap();
    assert!(interaction.is_dragging());
    assert_eq!(canvas.selection(), Some(shape));

    interaction
        .handle(&mut canvas, Action::PointerDragged(Vector2::new(45., 50.)))
        .unwrap();
    interaction
        .handle(&mut canvas, Action::PointerDragged(Vector2::new(60., 70.)))
        .unwrap();
    interaction.handle(&mut canvas, Action::PointerUp).unwrap();
    assert!(!interaction.is_dragging());
    assert_eq!(canvas.shape(shape).unwrap().position(), Vector2::new(70., 80.));

    // dragging after release changes nothing
    interaction
        .handle(&mut canvas, Action::PointerDragged(Vector2::new(0., 0.)))
        .unwrap();
    assert_eq!(canvas.shape(shape).unwrap().position(), Vector2::new(70., 80.));

    // pressing on empty space deselects and does not drag
    interaction
        .handle(&mut canvas, Action::PointerDown(Vector2::new(390., 290.)))
        .unwrap();
    assert!(!interaction.is_dragging());
    assert_eq!(canvas.selection(), None);
}

#[test]
fn keyboard_actions() {
    let mut canvas = Canvas::new();
    let mut interaction = viewport();

    assert_eq!(
        interaction.handle(&mut canvas, Action::Delete),
        Err(CanvasError::NoSelection)
    );
    assert_eq!(
        interaction.handle(&mut canvas, Action::Cancel),
        Err(CanvasError::NoSelection)
    );
    assert_eq!(
        interaction.handle(&mut canvas, Action::Nudge(Direction::Left)),
        Err(CanvasError::NoSelection)
    );

    interaction
        .handle(&mut canvas, Action::AddShape(ShapeKind::Rectangle))
        .unwrap();
    let shape = canvas.selection().unwrap();
    interaction
        .handle(&mut canvas, Action::Nudge(Direction::Left))
        .unwrap();
    interaction
        .handle(&mut canvas, Action::Nudge(Direction::Up))
        .unwrap();
    assert_eq!(canvas.shape(shape).unwrap().position(), Vector2::new(190., 160.));

    assert_eq!(
        interaction.handle(&mut canvas, Action::Reorder(ReorderAction::BringToFront)),
        Err(CanvasError::AlreadyFrontmost)
    );

    interaction.handle(&mut canvas, Action::Cancel).unwrap();
    assert_eq!(canvas.selection(), None);
    assert_eq!(canvas.len(), 1);

    canvas.set_selection(Some(shape)).unwrap();
    interaction.handle(&mut canvas, Action::Delete).unwrap();
    assert!(canvas.is_empty());
    assert_eq!(canvas.selection(), None);
}

#[test]
fn reorder_through_actions() {
    let mut canvas = Canvas::new();
    let mut interaction = viewport();
    for &kind in &ShapeKind::ALL {
        interaction
            .handle(&mut canvas, Action::AddShape(kind))
            .unwrap();
    }
    let order = canvas.order().to_vec();

    for &action in &[ReorderAction::SendToBack, ReorderAction::BringForward] {
        interaction
            .handle(&mut canvas, Action::Reorder(action))
            .unwrap();
    }
    assert_eq!(canvas.order(), &[order[0], order[2], order[1]]);
}

use crate::data::{Rect, Shape, ShapeKind};
use crate::scene::ShapeEdit;
use crate::util::BSMap;
use cgmath::Vector2;
use fnv::FnvHashMap;
use std::fmt;

/// A reference to a shape on a canvas.
///
/// Shapes are located by reference, never by value, so two identical shapes are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeRef(pub(crate) u64);

/// A handle for a registered canvas observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// Canvas change events.
///
/// Events are delivered after the change has been fully applied and before the mutating call
/// returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// A region needs to be redrawn.
    Invalidate(Rect),

    /// The selection changed.
    SelectionChanged(Option<ShapeRef>),

    /// A shape was added (at the front).
    ShapeAdded(ShapeRef),

    /// A shape was removed.
    ShapeRemoved(ShapeRef),

    /// An attribute of a shape was changed.
    ShapeChanged(ShapeRef),

    /// The paint order changed.
    OrderChanged,
}

/// Canvas operations that were rejected and did nothing.
///
/// None of these are failures; callers usually surface them as a “rejected” cue.
#[derive(Fail, Debug, Clone, Copy, PartialEq)]
pub enum CanvasError {
    /// The shape is already in front of all others.
    #[fail(display = "shape is already frontmost")]
    AlreadyFrontmost,

    /// The shape is already behind all others.
    #[fail(display = "shape is already backmost")]
    AlreadyBackmost,

    /// The operation needs a selection but there is none.
    #[fail(display = "nothing is selected")]
    NoSelection,

    /// The shape is not on this canvas.
    #[fail(display = "shape {:?} is not on the canvas", _0)]
    UnknownShape(ShapeRef),
}

pub type CanvasResult<T> = Result<T, CanvasError>;

/// Z-order operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderAction {
    BringToFront,
    BringForward,
    SendBackward,
    SendToBack,
}

impl ReorderAction {
    /// All reorder actions, front-most first.
    pub const ALL: [ReorderAction; 4] = [
        ReorderAction::BringToFront,
        ReorderAction::BringForward,
        ReorderAction::SendBackward,
        ReorderAction::SendToBack,
    ];

    /// Command label.
    pub fn label(self) -> &'static str {
        match self {
            ReorderAction::BringToFront => "Bring to Front",
            ReorderAction::BringForward => "Bring Forward",
            ReorderAction::SendBackward => "Send Backward",
            ReorderAction::SendToBack => "Send to Back",
        }
    }
}

/// Canvas tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    /// How far damage regions extend past a shape’s frame, so the selection halo is covered.
    pub damage_margin: f64,

    /// Distance between a selected shape’s frame and its halo.
    pub halo_margin: f64,

    /// Halo dash phase advance per animation tick.
    pub halo_phase_step: f64,

    /// Distance a nudge moves the selection.
    pub nudge_amount: f64,

    /// Size of shapes added from commands.
    pub new_shape_size: Vector2<f64>,
}

impl Default for CanvasSettings {
    fn default() -> CanvasSettings {
        CanvasSettings {
            damage_margin: 8.,
            halo_margin: 4.,
            halo_phase_step: 0.1,
            nudge_amount: 10.,
            new_shape_size: Vector2::new(100., 100.),
        }
    }
}

type Observer = Box<dyn FnMut(&CanvasEvent)>;

/// A canvas: shapes in paint order (back to front) and at most one selected shape.
pub struct Canvas {
    settings: CanvasSettings,
    shapes: FnvHashMap<ShapeRef, Shape>,
    order: Vec<ShapeRef>,
    selection: Option<ShapeRef>,
    next_shape: u64,
    next_observer: u64,
    halo_phase: f64,
    observers: BSMap<ObserverId, Observer>,
}

impl Canvas {
    /// Creates a new empty canvas with default settings.
    pub fn new() -> Canvas {
        Canvas::with_settings(CanvasSettings::default())
    }

    /// Creates a new empty canvas.
    pub fn with_settings(settings: CanvasSettings) -> Canvas {
        Canvas {
            settings,
            shapes: FnvHashMap::default(),
            order: Vec::new(),
            selection: None,
            next_shape: 1,
            next_observer: 1,
            halo_phase: 0.,
            observers: BSMap::new(),
        }
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Registers an observer. Observers are called in registration order.
    ///
    /// Ids are never reused, so a stale id can’t remove a later observer.
    pub fn observe<F: FnMut(&CanvasEvent) + 'static>(&mut self, observer: F) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Removes an observer. Returns false if it wasn’t registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub(super) fn notify(&mut self, event: CanvasEvent) {
        trace!(target: "easel", "{:?}", event);
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if the shape is on this canvas.
    pub fn contains(&self, shape: ShapeRef) -> bool {
        self.shapes.contains_key(&shape)
    }

    /// Returns a reference to a shape.
    pub fn shape(&self, shape: ShapeRef) -> Option<&Shape> {
        self.shapes.get(&shape)
    }

    pub(super) fn shape_mut(&mut self, shape: ShapeRef) -> Option<&mut Shape> {
        self.shapes.get_mut(&shape)
    }

    /// Returns the paint order, back to front.
    pub fn order(&self) -> &[ShapeRef] {
        &self.order
    }

    /// Iterates over all shapes back to front.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeRef, &Shape)> {
        let shapes = &self.shapes;
        self.order
            .iter()
            .filter_map(move |r| shapes.get(r).map(|shape| (*r, shape)))
    }

    /// Returns the selected shape reference.
    pub fn selection(&self) -> Option<ShapeRef> {
        self.selection
    }

    /// Returns the selected shape.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|r| self.shapes.get(&r))
    }

    /// Returns the region covered by a shape and its selection halo.
    pub fn damage_rect(&self, shape: ShapeRef) -> Option<Rect> {
        self.shape(shape)
            .map(|shape| shape.frame().outset(self.settings.damage_margin))
    }

    /// Creates a new shape with default style, puts it in front and selects it.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        position: Vector2<f64>,
        size: Vector2<f64>,
    ) -> ShapeRef {
        self.insert_shape(Shape::new(kind, position, size))
    }

    /// Puts a shape in front and selects it.
    pub fn insert_shape(&mut self, shape: Shape) -> ShapeRef {
        let shape_ref = ShapeRef(self.next_shape);
        self.next_shape += 1;

        debug!(target: "easel", "adding {:?} {:?}", shape.kind(), shape_ref);
        self.shapes.insert(shape_ref, shape);
        self.order.push(shape_ref);
        self.notify(CanvasEvent::ShapeAdded(shape_ref));
        self.replace_selection(Some(shape_ref));
        shape_ref
    }

    /// Removes a shape and returns it. If it was selected, the selection is cleared.
    ///
    /// Removing a shape that isn’t on the canvas does nothing.
    pub fn remove_shape(&mut self, shape_ref: ShapeRef) -> Option<Shape> {
        let index = self.order.iter().position(|r| *r == shape_ref)?;
        let damage = self.damage_rect(shape_ref);

        self.order.remove(index);
        let shape = self.shapes.remove(&shape_ref);
        let was_selected = self.selection == Some(shape_ref);
        if was_selected {
            self.selection = None;
        }

        debug!(target: "easel", "removed {:?}", shape_ref);
        if let Some(damage) = damage {
            self.notify(CanvasEvent::Invalidate(damage));
        }
        if was_selected {
            self.notify(CanvasEvent::SelectionChanged(None));
        }
        self.notify(CanvasEvent::ShapeRemoved(shape_ref));
        shape
    }

    /// Sets the selection.
    ///
    /// Selecting a shape that isn’t on the canvas is rejected.
    pub fn set_selection(&mut self, selection: Option<ShapeRef>) -> CanvasResult<()> {
        if let Some(shape) = selection {
            if !self.contains(shape) {
                debug!(target: "easel", "cannot select {:?}: not on canvas", shape);
                return Err(CanvasError::UnknownShape(shape));
            }
        }
        self.replace_selection(selection);
        Ok(())
    }

    fn replace_selection(&mut self, selection: Option<ShapeRef>) {
        if self.selection == selection {
            return;
        }
        let old_damage = self.selection.and_then(|r| self.damage_rect(r));
        self.selection = selection;
        let new_damage = selection.and_then(|r| self.damage_rect(r));

        let damage = match (old_damage, new_damage) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        };
        if let Some(damage) = damage {
            self.notify(CanvasEvent::Invalidate(damage));
        }
        self.notify(CanvasEvent::SelectionChanged(selection));
    }

    /// Returns the frontmost shape whose outline contains the point.
    pub fn shape_at(&self, point: Vector2<f64>) -> Option<ShapeRef> {
        self.order
            .iter()
            .rev()
            .find(|r| {
                self.shapes
                    .get(*r)
                    .map_or(false, |shape| shape.contains_point(point))
            })
            .cloned()
    }

    /// Selects the frontmost shape at the point, or clears the selection if there is none.
    pub fn select_at(&mut self, point: Vector2<f64>) -> Option<ShapeRef> {
        let hit = self.shape_at(point);
        self.replace_selection(hit);
        hit
    }

    /// Returns a handle for editing a shape’s attributes with change notification.
    pub fn edit(&mut self, shape: ShapeRef) -> Option<ShapeEdit> {
        if self.contains(shape) {
            Some(ShapeEdit::new(self, shape))
        } else {
            None
        }
    }

    /// Moves the selection by an offset.
    pub fn translate_selection(&mut self, offset: Vector2<f64>) -> CanvasResult<()> {
        let selection = self.selection.ok_or(CanvasError::NoSelection)?;
        if let Some(mut edit) = self.edit(selection) {
            edit.translate(offset);
        }
        Ok(())
    }

    /// Changes a shape’s position in the paint order.
    pub fn reorder(&mut self, shape: ShapeRef, action: ReorderAction) -> CanvasResult<()> {
        let index = self
            .order
            .iter()
            .position(|r| *r == shape)
            .ok_or(CanvasError::UnknownShape(shape))?;
        let last = self.order.len() - 1;

        match action {
            ReorderAction::BringToFront | ReorderAction::BringForward if index == last => {
                debug!(target: "easel", "{:?} is already frontmost", shape);
                return Err(CanvasError::AlreadyFrontmost);
            }
            ReorderAction::SendToBack | ReorderAction::SendBackward if index == 0 => {
                debug!(target: "easel", "{:?} is already backmost", shape);
                return Err(CanvasError::AlreadyBackmost);
            }
            ReorderAction::BringToFront => {
                self.order.remove(index);
                self.order.push(shape);
            }
            ReorderAction::BringForward => self.order.swap(index, index + 1),
            ReorderAction::SendBackward => self.order.swap(index, index - 1),
            ReorderAction::SendToBack => {
                self.order.remove(index);
                self.order.insert(0, shape);
            }
        }

        debug!(target: "easel", "{}: {:?}", action.label(), shape);
        if let Some(damage) = self.damage_rect(shape) {
            self.notify(CanvasEvent::Invalidate(damage));
        }
        self.notify(CanvasEvent::OrderChanged);
        Ok(())
    }

    /// Moves a shape to the front.
    pub fn bring_to_front(&mut self, shape: ShapeRef) -> CanvasResult<()> {
        self.reorder(shape, ReorderAction::BringToFront)
    }

    /// Moves a shape one step toward the front.
    pub fn bring_forward(&mut self, shape: ShapeRef) -> CanvasResult<()> {
        self.reorder(shape, ReorderAction::BringForward)
    }

    /// Moves a shape one step toward the back.
    pub fn send_backward(&mut self, shape: ShapeRef) -> CanvasResult<()> {
        self.reorder(shape, ReorderAction::SendBackward)
    }

    /// Moves a shape to the back.
    pub fn send_to_back(&mut self, shape: ShapeRef) -> CanvasResult<()> {
        self.reorder(shape, ReorderAction::SendToBack)
    }

    /// Reorders the selected shape.
    pub fn reorder_selection(&mut self, action: ReorderAction) -> CanvasResult<()> {
        let selection = self.selection.ok_or(CanvasError::NoSelection)?;
        self.reorder(selection, action)
    }

    /// The current selection halo dash phase.
    pub fn halo_phase(&self) -> f64 {
        self.halo_phase
    }

    /// Advances the selection halo animation by one tick. Returns false once there is no
    /// selection to animate.
    pub fn tick_halo(&mut self) -> bool {
        let selection = match self.selection {
            Some(selection) => selection,
            None => return false,
        };
        self.halo_phase += self.settings.halo_phase_step;
        if let Some(damage) = self.damage_rect(selection) {
            self.notify(CanvasEvent::Invalidate(damage));
        }
        true
    }
}

impl Default for Canvas {
    fn default() -> Canvas {
        Canvas::new()
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("settings", &self.settings)
            .field("order", &self.order)
            .field("selection", &self.selection)
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
fn unit_shape(canvas: &mut Canvas, kind: ShapeKind, x: f64, y: f64) -> ShapeRef {
    canvas.add_shape(kind, Vector2::new(x, y), Vector2::new(100., 100.))
}

#[test]
fn scenario() {
    let mut canvas = Canvas::new();

    let t1 = unit_shape(&mut canvas, ShapeKind::Triangle, 50., 50.);
    assert_eq!(canvas.order(), &[t1]);
    assert_eq!(canvas.selection(), Some(t1));

    let o1 = unit_shape(&mut canvas, ShapeKind::Oval, 60., 60.);
    assert_eq!(canvas.order(), &[t1, o1]);
    assert_eq!(canvas.selection(), Some(o1));

    canvas.set_selection(Some(t1)).unwrap();
    canvas.bring_to_front(t1).unwrap();
    assert_eq!(canvas.order(), &[o1, t1]);

    assert!(canvas.remove_shape(o1).is_some());
    assert_eq!(canvas.order(), &[t1]);
    assert_eq!(canvas.selection(), Some(t1));
}

#[test]
fn hit_test_uses_outline() {
    let mut canvas = Canvas::new();

    // the frames overlap in [49, 101] x [49, 101]
    let a = unit_shape(&mut canvas, ShapeKind::Oval, 50., 50.);
    let b = unit_shape(&mut canvas, ShapeKind::Triangle, 100., 100.);

    let gap = Vector2::new(70., 98.);
    assert!(canvas.shape(a).unwrap().frame().contains(gap));
    assert!(canvas.shape(b).unwrap().frame().contains(gap));
    assert_eq!(canvas.shape_at(gap), None);

    // inside a’s outline and b’s frame, but not b’s outline
    let p = Vector2::new(55., 95.);
    assert!(canvas.shape(b).unwrap().frame().contains(p));
    assert_eq!(canvas.select_at(p), Some(a));
    assert_eq!(canvas.selection(), Some(a));

    // empty space clears the selection
    assert_eq!(canvas.select_at(Vector2::new(-500., -500.)), None);
    assert_eq!(canvas.selection(), None);
}

#[test]
fn frontmost_wins() {
    let mut canvas = Canvas::new();
    unit_shape(&mut canvas, ShapeKind::Rectangle, 50., 50.);
    let b = unit_shape(&mut canvas, ShapeKind::Oval, 55., 55.);
    let c = unit_shape(&mut canvas, ShapeKind::Triangle, 60., 60.);
    assert_eq!(canvas.shape_at(Vector2::new(58., 58.)), Some(c));

    canvas.send_to_back(c).unwrap();
    assert_eq!(canvas.shape_at(Vector2::new(58., 58.)), Some(b));
}

#[test]
fn reorder_at_extremes() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Rectangle, 0., 0.);
    let b = unit_shape(&mut canvas, ShapeKind::Rectangle, 10., 0.);

    assert_eq!(canvas.bring_to_front(b), Err(CanvasError::AlreadyFrontmost));
    assert_eq!(canvas.bring_forward(b), Err(CanvasError::AlreadyFrontmost));
    assert_eq!(canvas.send_to_back(a), Err(CanvasError::AlreadyBackmost));
    assert_eq!(canvas.send_backward(a), Err(CanvasError::AlreadyBackmost));
    assert_eq!(canvas.order(), &[a, b]);
}

#[test]
fn forward_then_backward_round_trips() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Rectangle, 0., 0.);
    let b = unit_shape(&mut canvas, ShapeKind::Oval, 0., 0.);
    let c = unit_shape(&mut canvas, ShapeKind::Triangle, 0., 0.);

    canvas.bring_forward(a).unwrap();
    assert_eq!(canvas.order(), &[b, a, c]);
    canvas.send_backward(a).unwrap();
    assert_eq!(canvas.order(), &[a, b, c]);

    canvas.send_to_back(c).unwrap();
    assert_eq!(canvas.order(), &[c, a, b]);
}

#[test]
fn selection_never_dangles() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Rectangle, 0., 0.);
    let b = unit_shape(&mut canvas, ShapeKind::Oval, 0., 0.);

    canvas.remove_shape(b);
    assert_eq!(canvas.selection(), None);
    assert_eq!(canvas.remove_shape(b), None);

    assert_eq!(canvas.set_selection(Some(b)), Err(CanvasError::UnknownShape(b)));
    assert_eq!(canvas.selection(), None);
    assert_eq!(canvas.reorder_selection(ReorderAction::BringToFront), Err(CanvasError::NoSelection));
    assert_eq!(canvas.bring_forward(b), Err(CanvasError::UnknownShape(b)));

    canvas.set_selection(Some(a)).unwrap();
    let c = unit_shape(&mut canvas, ShapeKind::Triangle, 0., 0.);
    canvas.send_to_back(c).unwrap();
    canvas.remove_shape(a);
    assert_eq!(canvas.selection(), Some(c));
    assert!(canvas.selection().map_or(true, |s| canvas.order().contains(&s)));
    assert_eq!(canvas.len(), 1);
}

#[test]
fn identical_shapes_are_distinct() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Oval, 0., 0.);
    let b = unit_shape(&mut canvas, ShapeKind::Oval, 0., 0.);
    assert_ne!(a, b);
    assert_eq!(canvas.shape(a), canvas.shape(b));

    canvas.send_to_back(b).unwrap();
    assert_eq!(canvas.order(), &[b, a]);
    canvas.remove_shape(a);
    assert_eq!(canvas.order(), &[b]);
}

#[cfg(test)]
type EventLog = std::rc::Rc<std::cell::RefCell<Vec<CanvasEvent>>>;

#[cfg(test)]
fn recorder() -> (impl FnMut(&CanvasEvent), EventLog) {
    let events = EventLog::default();
    let sink = std::rc::Rc::clone(&events);
    (move |event: &CanvasEvent| sink.borrow_mut().push(*event), events)
}

#[cfg(test)]
fn record_events(canvas: &mut Canvas) -> EventLog {
    let (observer, events) = recorder();
    canvas.observe(observer);
    events
}

#[test]
fn selection_damage() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Rectangle, 50., 50.);
    let b = unit_shape(&mut canvas, ShapeKind::Rectangle, 250., 50.);
    let events = record_events(&mut canvas);

    canvas.set_selection(Some(a)).unwrap();
    let expected = canvas
        .damage_rect(a)
        .unwrap()
        .union(&canvas.damage_rect(b).unwrap());
    assert_eq!(
        *events.borrow(),
        vec![
            CanvasEvent::Invalidate(expected),
            CanvasEvent::SelectionChanged(Some(a)),
        ]
    );

    // reselecting is not a change
    events.borrow_mut().clear();
    canvas.set_selection(Some(a)).unwrap();
    assert!(events.borrow().is_empty());
}

#[test]
fn translate_reports_old_and_new_frames() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Triangle, 50., 50.);
    let before = canvas.damage_rect(a).unwrap();
    let events = record_events(&mut canvas);

    canvas.translate_selection(Vector2::new(30., -10.)).unwrap();
    let after = canvas.damage_rect(a).unwrap();
    assert_eq!(canvas.shape(a).unwrap().position(), Vector2::new(80., 40.));
    assert_eq!(
        *events.borrow(),
        vec![
            CanvasEvent::Invalidate(before.union(&after)),
            CanvasEvent::ShapeChanged(a),
        ]
    );

    canvas.set_selection(None).unwrap();
    assert_eq!(canvas.translate_selection(Vector2::new(1., 1.)), Err(CanvasError::NoSelection));
    assert_eq!(canvas.shape(a).unwrap().position(), Vector2::new(80., 40.));
}

#[test]
fn observers_in_order_and_unobserve() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Rectangle, 0., 0.);
    let _b = unit_shape(&mut canvas, ShapeKind::Rectangle, 0., 0.);

    let calls = Rc::new(RefCell::new(Vec::new()));
    let (first_calls, second_calls) = (Rc::clone(&calls), Rc::clone(&calls));
    let (mut record_first, first) = recorder();
    let first_id = canvas.observe(move |event| {
        first_calls.borrow_mut().push(1);
        record_first(event);
    });
    canvas.observe(move |_| second_calls.borrow_mut().push(2));

    canvas.bring_to_front(a).unwrap();
    let damage = canvas.damage_rect(a).unwrap();
    assert_eq!(
        *first.borrow(),
        vec![CanvasEvent::Invalidate(damage), CanvasEvent::OrderChanged]
    );
    assert_eq!(*calls.borrow(), vec![1, 2, 1, 2]);

    assert!(canvas.unobserve(first_id));
    assert!(!canvas.unobserve(first_id));
    canvas.remove_shape(a);
    assert_eq!(first.borrow().len(), 2);
    assert_eq!(*calls.borrow(), vec![1, 2, 1, 2, 2, 2]);
}

#[test]
fn observer_ids_are_not_reused() {
    let mut canvas = Canvas::new();
    let (observer, _) = recorder();
    let _a = canvas.observe(observer);
    let (observer, _) = recorder();
    let b = canvas.observe(observer);
    assert!(canvas.unobserve(b));

    let (observer, events) = recorder();
    let c = canvas.observe(observer);
    assert_ne!(b, c);
    assert!(!canvas.unobserve(b));

    unit_shape(&mut canvas, ShapeKind::Oval, 0., 0.);
    assert!(!events.borrow().is_empty());
    assert!(canvas.unobserve(c));
}

#[test]
fn remove_shape_events() {
    let mut canvas = Canvas::new();
    let a = unit_shape(&mut canvas, ShapeKind::Rectangle, 50., 50.);
    let b = unit_shape(&mut canvas, ShapeKind::Oval, 250., 50.);
    let events = record_events(&mut canvas);

    // selected: damage is taken before the shape goes away
    let damage = canvas.damage_rect(b).unwrap();
    assert!(canvas.remove_shape(b).is_some());
    assert_eq!(
        *events.borrow(),
        vec![
            CanvasEvent::Invalidate(damage),
            CanvasEvent::SelectionChanged(None),
            CanvasEvent::ShapeRemoved(b),
        ]
    );

    events.borrow_mut().clear();
    let damage = canvas.damage_rect(a).unwrap();
    assert!(canvas.remove_shape(a).is_some());
    assert_eq!(
        *events.borrow(),
        vec![CanvasEvent::Invalidate(damage), CanvasEvent::ShapeRemoved(a)]
    );

    events.borrow_mut().clear();
    assert!(canvas.remove_shape(a).is_none());
    assert!(events.borrow().is_empty());
}

#[test]
fn huge_shapes_are_not_hit() {
    let mut canvas = Canvas::new();
    let huge = canvas.add_shape(
        ShapeKind::Oval,
        Vector2::new(0., 0.),
        Vector2::new(1e39, 1e39),
    );
    assert!(canvas.contains(huge));
    assert_eq!(canvas.shape_at(Vector2::new(0., 0.)), None);
    assert_eq!(canvas.select_at(Vector2::new(0., 0.)), None);
}

#[test]
fn halo_animation() {
    let mut canvas = Canvas::new();
    assert!(!canvas.tick_halo());

    let a = unit_shape(&mut canvas, ShapeKind::Oval, 0., 0.);
    let events = record_events(&mut canvas);
    assert!(canvas.tick_halo());
    assert!(canvas.tick_halo());
    assert!((canvas.halo_phase() - 0.2).abs() < 1e-9);
    let damage = CanvasEvent::Invalidate(canvas.damage_rect(a).unwrap());
    assert_eq!(*events.borrow(), vec![damage, damage]);

    canvas.set_selection(None).unwrap();
    events.borrow_mut().clear();
    assert!(!canvas.tick_halo());
    assert!(events.borrow().is_empty());
}

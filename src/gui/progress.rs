use super::render;
use arcus_core::geometry::PREFERRED_SIZE;
use arcus_core::{ProgressState, RingColor, StateChange};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

type Handler = Rc<dyn Fn(i32)>;

struct Inner {
    state: RefCell<ProgressState>,
    ticking: Cell<bool>,
    value_changed: RefCell<Vec<Handler>>,
    maximum_changed: RefCell<Vec<Handler>>,
}

/// Circular progress ring backed by a [`gtk::DrawingArea`].
///
/// With a maximum of 0 the ring spins; otherwise it fills clockwise from the
/// top in proportion to `value / maximum`, easing towards each new value.
/// Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct CircleProgress {
    area: gtk::DrawingArea,
    inner: Rc<Inner>,
}

impl CircleProgress {
    pub fn new() -> Self {
        Self::from_state(ProgressState::new(Instant::now()))
    }

    pub fn with_timing(value_transition: Duration, spin_period: Duration) -> Self {
        Self::from_state(ProgressState::with_timing(
            value_transition,
            spin_period,
            Instant::now(),
        ))
    }

    fn from_state(state: ProgressState) -> Self {
        let area = gtk::DrawingArea::new();
        let (width, height) = Self::size_hint();
        area.set_content_width(width);
        area.set_content_height(height);
        area.set_hexpand(true);
        area.set_vexpand(true);
        area.add_css_class("arcus-progress");

        let inner = Rc::new(Inner {
            state: RefCell::new(state),
            ticking: Cell::new(false),
            value_changed: RefCell::new(Vec::new()),
            maximum_changed: RefCell::new(Vec::new()),
        });

        let draw_inner = Rc::downgrade(&inner);
        area.set_draw_func(move |_, cr, width, height| {
            let Some(inner) = draw_inner.upgrade() else {
                return;
            };
            if let Err(e) = render::paint(cr, &inner.state.borrow(), width, height) {
                log::error!("Drawing error: {}", e);
            }
        });

        let progress = Self { area, inner };
        progress.ensure_ticking();
        progress
    }

    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    pub fn size_hint() -> (i32, i32) {
        PREFERRED_SIZE
    }

    pub fn value(&self) -> i32 {
        self.inner.state.borrow().value()
    }

    pub fn maximum(&self) -> i32 {
        self.inner.state.borrow().maximum()
    }

    pub fn visible_value(&self) -> i32 {
        self.inner.state.borrow().visible_value()
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner.state.borrow().inner_radius()
    }

    pub fn outer_radius(&self) -> f64 {
        self.inner.state.borrow().outer_radius()
    }

    pub fn infinite_animation_value(&self) -> f64 {
        self.inner.state.borrow().infinite_animation_value()
    }

    pub fn color(&self) -> RingColor {
        self.inner.state.borrow().color()
    }

    pub fn set_value(&self, value: i32) {
        let change = self.inner.state.borrow_mut().set_value(value, Instant::now());
        self.apply(change);
    }

    pub fn set_maximum(&self, maximum: i32) {
        let change = self
            .inner
            .state
            .borrow_mut()
            .set_maximum(maximum, Instant::now());
        self.apply(change);
    }

    pub fn set_inner_radius(&self, radius: f64) {
        let change = self.inner.state.borrow_mut().set_inner_radius(radius);
        self.apply(change);
    }

    pub fn set_outer_radius(&self, radius: f64) {
        let change = self.inner.state.borrow_mut().set_outer_radius(radius);
        self.apply(change);
    }

    pub fn set_color(&self, color: RingColor) {
        let change = self.inner.state.borrow_mut().set_color(color);
        self.apply(change);
    }

    pub fn set_visible_value(&self, value: i32) {
        let change = self.inner.state.borrow_mut().set_visible_value(value);
        self.apply(change);
    }

    pub fn set_infinite_animation_value(&self, phase: f64) {
        let change = self
            .inner
            .state
            .borrow_mut()
            .set_infinite_animation_value(phase);
        self.apply(change);
    }

    pub fn connect_value_changed<F: Fn(i32) + 'static>(&self, f: F) {
        self.inner.value_changed.borrow_mut().push(Rc::new(f));
    }

    pub fn connect_maximum_changed<F: Fn(i32) + 'static>(&self, f: F) {
        self.inner.maximum_changed.borrow_mut().push(Rc::new(f));
    }

    fn apply(&self, change: StateChange) {
        if change.redraw {
            self.area.queue_draw();
        }
        self.ensure_ticking();

        if let Some(value) = change.value_changed {
            emit(&self.inner.value_changed, value);
        }
        if let Some(maximum) = change.maximum_changed {
            emit(&self.inner.maximum_changed, maximum);
        }
    }

    /// Installs a frame-clock callback while any animation runs. The callback
    /// removes itself once both animations are idle.
    fn ensure_ticking(&self) {
        if self.inner.ticking.get() || !self.inner.state.borrow().is_animating() {
            return;
        }
        self.inner.ticking.set(true);

        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        self.area.add_tick_callback(move |area, _clock| {
            let Some(inner) = weak.upgrade() else {
                return glib::ControlFlow::Break;
            };
            let mut state = inner.state.borrow_mut();
            if state.tick(Instant::now()).redraw {
                area.queue_draw();
            }
            if state.is_animating() {
                glib::ControlFlow::Continue
            } else {
                inner.ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}

impl Default for CircleProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(handlers: &RefCell<Vec<Handler>>, value: i32) {
    // snapshot so handlers may connect further handlers
    let handlers: Vec<Handler> = handlers.borrow().clone();
    for handler in handlers {
        handler(value);
    }
}

use crate::animation::{LoopAnimation, SPIN_PERIOD, VALUE_TRANSITION, ValueAnimation};
use crate::cache::CacheKey;
use crate::color::RingColor;
use crate::geometry::ArcSpan;
use std::time::{Duration, Instant};
use strum::Display as StrumDisplay;

pub const DEFAULT_INNER_RADIUS: f64 = 0.6;
pub const DEFAULT_OUTER_RADIUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Determinate,
    Indeterminate,
}

/// What a mutation asks of the widget hosting the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateChange {
    pub redraw: bool,
    pub value_changed: Option<i32>,
    pub maximum_changed: Option<i32>,
}

impl StateChange {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            redraw: self.redraw || other.redraw,
            value_changed: other.value_changed.or(self.value_changed),
            maximum_changed: other.maximum_changed.or(self.maximum_changed),
        }
    }
}

fn clamp_unit(r: f64) -> f64 {
    if r.is_nan() { 0.0 } else { r.clamp(0.0, 1.0) }
}

/// Paint parameters of one progress ring plus the two animations driving it.
///
/// A fresh state has no maximum, so it starts out spinning.
#[derive(Debug, Clone)]
pub struct ProgressState {
    value: i32,
    maximum: i32,
    visible_value: i32,
    inner_radius: f64,
    outer_radius: f64,
    phase: f64,
    color: RingColor,
    value_animation: ValueAnimation,
    spin: LoopAnimation,
}

impl ProgressState {
    pub fn new(now: Instant) -> Self {
        Self::with_timing(VALUE_TRANSITION, SPIN_PERIOD, now)
    }

    pub fn with_timing(value_transition: Duration, spin_period: Duration, now: Instant) -> Self {
        let mut spin = LoopAnimation::new(spin_period);
        spin.start(now);
        Self {
            value: 0,
            maximum: 0,
            visible_value: 0,
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_radius: DEFAULT_OUTER_RADIUS,
            phase: 0.0,
            color: RingColor::default(),
            value_animation: ValueAnimation::new(value_transition),
            spin,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn visible_value(&self) -> i32 {
        self.visible_value
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn infinite_animation_value(&self) -> f64 {
        self.phase
    }

    pub fn color(&self) -> RingColor {
        self.color
    }

    pub fn mode(&self) -> Mode {
        if self.maximum == 0 {
            Mode::Indeterminate
        } else {
            Mode::Determinate
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_running()
    }

    pub fn is_animating(&self) -> bool {
        self.spin.is_running() || self.value_animation.is_running()
    }

    pub fn set_value(&mut self, value: i32, now: Instant) -> StateChange {
        let value = value.max(0);
        if self.value == value {
            return StateChange::none();
        }

        self.value_animation.stop();
        self.value_animation.start(self.visible_value, value, now);
        self.value = value;

        StateChange {
            redraw: true,
            value_changed: Some(value),
            maximum_changed: None,
        }
    }

    pub fn set_maximum(&mut self, maximum: i32, now: Instant) -> StateChange {
        let maximum = maximum.max(0);
        if self.maximum == maximum {
            return StateChange::none();
        }

        self.maximum = maximum;
        if maximum == 0 {
            self.spin.start(now);
        } else {
            self.spin.stop();
        }
        log::debug!("progress ring switched to {} mode", self.mode());

        StateChange {
            redraw: true,
            value_changed: None,
            maximum_changed: Some(maximum),
        }
    }

    pub fn set_inner_radius(&mut self, radius: f64) -> StateChange {
        let radius = clamp_unit(radius);
        if self.inner_radius == radius {
            return StateChange::none();
        }
        self.inner_radius = radius;
        StateChange::redraw()
    }

    pub fn set_outer_radius(&mut self, radius: f64) -> StateChange {
        let radius = clamp_unit(radius);
        if self.outer_radius == radius {
            return StateChange::none();
        }
        self.outer_radius = radius;
        StateChange::redraw()
    }

    pub fn set_color(&mut self, color: RingColor) -> StateChange {
        if self.color == color {
            return StateChange::none();
        }
        self.color = color;
        StateChange::redraw()
    }

    pub fn set_visible_value(&mut self, value: i32) -> StateChange {
        let value = value.max(0);
        if self.visible_value == value {
            return StateChange::none();
        }
        self.visible_value = value;
        StateChange::redraw()
    }

    pub fn set_infinite_animation_value(&mut self, phase: f64) -> StateChange {
        self.phase = if phase.is_nan() {
            0.0
        } else {
            phase.rem_euclid(1.0)
        };
        StateChange::redraw()
    }

    /// Advances both animations to `now`.
    pub fn tick(&mut self, now: Instant) -> StateChange {
        let mut change = StateChange::none();
        if let Some(visible) = self.value_animation.sample(now) {
            change = change.merge(self.set_visible_value(visible));
        }
        if let Some(phase) = self.spin.sample(now) {
            change = change.merge(self.set_infinite_animation_value(phase));
        }
        change
    }

    /// The foreground slice for the current mode.
    pub fn arc(&self) -> ArcSpan {
        match self.mode() {
            Mode::Indeterminate => ArcSpan::indeterminate(self.phase),
            Mode::Determinate => ArcSpan::determinate(self.visible_value, self.maximum),
        }
    }

    pub fn cache_key(&self, width: i32, height: i32) -> CacheKey {
        CacheKey::new(format!(
            "{},{},{},{},{},{},{},{}",
            self.phase,
            self.visible_value,
            self.maximum,
            self.inner_radius,
            self.outer_radius,
            width,
            height,
            self.color.argb()
        ))
    }
}

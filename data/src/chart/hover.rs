//! Pointer/touch state machine of the price chart.
//!
//! [`transition`] is pure: it takes the current [`HoverState`] and one
//! [`Input`] and returns the next state plus the [`Effect`]s the caller must
//! run, in order. Nothing here draws, vibrates or talks to the parent view.

use super::geometry::Geometry;
use crate::haptics::Intensity;
use crate::series::Series;

use iced_core::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// In contact with the draw region, no sample resolved.
    Tracking,
    Resolved(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    phase: Phase,
    last_notified: Option<usize>,
}

impl HoverState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn index(&self) -> Option<usize> {
        match self.phase {
            Phase::Resolved(index) => Some(index),
            _ => None,
        }
    }

    pub fn last_notified(&self) -> Option<usize> {
        self.last_notified
    }
}

/// Canvas-local pointer and touch lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Entered(Point),
    Moved(Point),
    Pressed(Point),
    Released,
    Cancelled,
    Left,
    FocusLost,
}

impl Input {
    fn position(&self) -> Option<Point> {
        match self {
            Input::Entered(p) | Input::Moved(p) | Input::Pressed(p) => Some(*p),
            Input::Released | Input::Cancelled | Input::Left | Input::FocusLost => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Redraw,
    Pulse(Intensity),
    Price(f32),
}

pub fn transition(
    state: HoverState,
    series: &Series,
    geometry: &Geometry,
    input: Input,
    intensity: Intensity,
) -> (HoverState, Vec<Effect>) {
    if series.is_empty() {
        let effects = if state.is_active() {
            vec![Effect::Redraw]
        } else {
            vec![]
        };
        return (HoverState::default(), effects);
    }

    let Some(position) = input.position().filter(|p| geometry.contains(*p)) else {
        return release(state, series);
    };

    match geometry.nearest(position.x) {
        Some(index) if index < series.len() => resolve(state, series, index, intensity),
        _ => track(state, series),
    }
}

fn resolve(
    state: HoverState,
    series: &Series,
    index: usize,
    intensity: Intensity,
) -> (HoverState, Vec<Effect>) {
    let next = HoverState {
        phase: Phase::Resolved(index),
        last_notified: Some(index),
    };

    if state.last_notified == Some(index) {
        return (next, vec![]);
    }

    log::trace!("chart hover resolved index {index}");

    let mut effects = vec![Effect::Redraw, Effect::Pulse(intensity)];
    if let Some(sample) = series.get(index) {
        effects.push(Effect::Price(sample.price()));
    }
    (next, effects)
}

fn track(state: HoverState, series: &Series) -> (HoverState, Vec<Effect>) {
    let effects = match state.phase {
        Phase::Resolved(_) => fallback_effects(series),
        Phase::Idle | Phase::Tracking => vec![],
    };
    let next = HoverState {
        phase: Phase::Tracking,
        last_notified: None,
    };
    (next, effects)
}

fn release(state: HoverState, series: &Series) -> (HoverState, Vec<Effect>) {
    if !state.is_active() {
        return (HoverState::default(), vec![]);
    }
    log::trace!("chart hover released");
    (HoverState::default(), fallback_effects(series))
}

/// Back to the baseline drawing with the label showing the latest price.
fn fallback_effects(series: &Series) -> Vec<Effect> {
    let mut effects = vec![Effect::Redraw];
    if let Some(price) = series.last_price() {
        effects.push(Effect::Price(price));
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced_core::Rectangle;

    const SOFT: Intensity = Intensity::Soft;

    fn area() -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
        }
    }

    fn series() -> Series {
        Series::from_pairs([("12:00", 1.70), ("12:05", 1.72), ("12:10", 1.74)]).unwrap()
    }

    fn at(x: f32) -> Point {
        Point::new(x, 50.0)
    }

    fn pulses(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Pulse(_)))
            .count()
    }

    #[test]
    fn hovering_second_point_notifies_once() {
        let series = series();
        let geometry = Geometry::new(&series, area(), false);

        let (state, effects) = transition(
            HoverState::default(),
            &series,
            &geometry,
            Input::Moved(at(95.0)),
            SOFT,
        );

        assert_eq!(state.index(), Some(1));
        assert_eq!(
            effects,
            vec![Effect::Redraw, Effect::Pulse(SOFT), Effect::Price(1.72)]
        );
    }

    #[test]
    fn same_index_is_silent() {
        let series = series();
        let geometry = Geometry::new(&series, area(), false);

        let (state, first) = transition(
            HoverState::default(),
            &series,
            &geometry,
            Input::Pressed(at(100.0)),
            SOFT,
        );
        let (state, second) = transition(state, &series, &geometry, Input::Moved(at(104.0)), SOFT);

        assert_eq!(pulses(&first) + pulses(&second), 1);
        assert!(second.is_empty());
        assert_eq!(state.phase(), Phase::Resolved(1));
    }

    #[test]
    fn release_falls_back_to_latest_price() {
        let series = series();
        let geometry = Geometry::new(&series, area(), false);

        for end in [
            Input::Released,
            Input::Cancelled,
            Input::Left,
            Input::FocusLost,
        ] {
            let (state, _) = transition(
                HoverState::default(),
                &series,
                &geometry,
                Input::Moved(at(0.0)),
                SOFT,
            );
            let (state, effects) = transition(state, &series, &geometry, end, SOFT);

            assert_eq!(state, HoverState::default());
            assert_eq!(effects, vec![Effect::Redraw, Effect::Price(1.74)]);
        }
    }

    #[test]
    fn leaving_while_idle_does_nothing() {
        let series = series();
        let geometry = Geometry::new(&series, area(), false);

        let (state, effects) =
            transition(HoverState::default(), &series, &geometry, Input::Left, SOFT);
        assert_eq!(state, HoverState::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn moving_outside_the_area_acts_like_leaving() {
        let series = series();
        let geometry = Geometry::new(&series, area(), false);

        let (state, _) = transition(
            HoverState::default(),
            &series,
            &geometry,
            Input::Moved(at(10.0)),
            SOFT,
        );
        let (state, effects) = transition(
            state,
            &series,
            &geometry,
            Input::Moved(Point::new(10.0, 140.0)),
            SOFT,
        );

        assert!(!state.is_active());
        assert_eq!(effects, vec![Effect::Redraw, Effect::Price(1.74)]);
    }

    #[test]
    fn pulse_rearms_after_idle() {
        let series = series();
        let geometry = Geometry::new(&series, area(), false);

        let mut state = HoverState::default();
        let mut total = 0;
        for input in [
            Input::Entered(at(200.0)),
            Input::Released,
            Input::Pressed(at(200.0)),
        ] {
            let (next, effects) = transition(state, &series, &geometry, input, SOFT);
            total += pulses(&effects);
            state = next;
        }
        assert_eq!(total, 2);
    }

    #[test]
    fn empty_series_never_resolves() {
        let series = Series::empty();
        let geometry = Geometry::new(&series, area(), false);

        let mut state = HoverState::default();
        for input in [
            Input::Entered(at(10.0)),
            Input::Moved(at(100.0)),
            Input::Pressed(at(150.0)),
            Input::Released,
        ] {
            let (next, effects) = transition(state, &series, &geometry, input, SOFT);
            assert_eq!(next, HoverState::default());
            assert!(!effects.iter().any(|e| matches!(e, Effect::Price(_))));
            state = next;
        }
    }

    #[test]
    fn collapsed_area_tracks_without_resolving() {
        let series = series();
        let collapsed = Rectangle {
            width: 0.0,
            ..area()
        };
        let geometry = Geometry::new(&series, collapsed, false);

        let (state, effects) = transition(
            HoverState::default(),
            &series,
            &geometry,
            Input::Moved(Point::new(0.0, 10.0)),
            SOFT,
        );
        assert_eq!(state.phase(), Phase::Tracking);
        assert!(state.is_active());
        assert!(effects.is_empty());
    }
}

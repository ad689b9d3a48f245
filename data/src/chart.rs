pub mod geometry;
pub mod hover;
pub mod scene;

pub use geometry::{CurvePath, Geometry, Segment, YScale, split_fraction};
pub use hover::{Effect, HoverState, Input, Phase};
pub use scene::{DrawCommand, Paint, RenderSurface};

use crate::config::theme::hex;
use crate::haptics::Intensity;
use crate::series::Series;

use iced_core::{Color, Rectangle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartStyle {
    #[serde(with = "hex")]
    pub line: Color,
    /// Stroke left of the hovered sample
    #[serde(with = "hex")]
    pub hover_before: Color,
    /// Stroke right of the hovered sample
    #[serde(with = "hex")]
    pub hover_after: Color,
    #[serde(with = "hex")]
    pub fill: Color,
    pub fill_alpha: f32,
    pub fill_alpha_active: f32,
    #[serde(with = "hex")]
    pub guide: Color,
    #[serde(with = "hex")]
    pub label: Color,
    pub line_width: f32,
    pub tension: f32,
    pub begin_at_zero: bool,
    pub show_axes: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line: Color::from_rgb8(0x4C, 0xAF, 0x50),
            hover_before: Color::from_rgb8(0xFF, 0x40, 0x81),
            hover_after: Color::from_rgba8(0xFF, 0x40, 0x81, 0x30 as f32 / 255.0),
            fill: Color::from_rgb8(0x4C, 0xAF, 0x50),
            fill_alpha: 0.25,
            fill_alpha_active: 0.55,
            guide: Color::WHITE,
            label: Color::from_rgb8(0x9E, 0x9E, 0x9E),
            line_width: 2.0,
            tension: 0.4,
            begin_at_zero: true,
            show_axes: true,
        }
    }
}

/// One interactive price chart: its series, its own hover memo, and how it
/// is painted. Every instance tracks hover independently.
#[derive(Debug, Clone)]
pub struct Surface {
    series: Series,
    hover: HoverState,
    style: ChartStyle,
    intensity: Intensity,
}

impl Surface {
    pub fn new(series: Series, style: ChartStyle, intensity: Intensity) -> Self {
        Self {
            series,
            hover: HoverState::default(),
            style,
            intensity,
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn geometry(&self, area: Rectangle) -> Geometry {
        Geometry::new(&self.series, area, self.style.begin_at_zero)
    }

    /// Feeds one input through the hover state machine. The returned effects
    /// must be executed in order by the caller.
    pub fn handle(&mut self, input: Input, area: Rectangle) -> Vec<Effect> {
        let geometry = self.geometry(area);
        let (next, effects) =
            hover::transition(self.hover, &self.series, &geometry, input, self.intensity);
        self.hover = next;
        effects
    }

    /// Swaps in a new series and drops any hover made against the old one.
    pub fn replace_series(&mut self, series: Series) -> Vec<Effect> {
        self.series = series;
        self.hover = HoverState::default();

        let mut effects = vec![Effect::Redraw];
        if let Some(price) = self.series.last_price() {
            effects.push(Effect::Price(price));
        }
        effects
    }

    pub fn scene(&self, area: Rectangle) -> Vec<DrawCommand> {
        scene::build(&self.series, self.hover, &self.geometry(area), &self.style)
    }
}

/// Compute a "nice" step close to range/target using 1/2/5*10^k
fn nice_step(range: f32, target: usize) -> f32 {
    let target = target.max(2) as f32;
    let raw = (range / target).max(f32::EPSILON);
    let power = raw.log10().floor();
    let base = 10f32.powf(power);
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

pub fn ticks(min: f32, max: f32, target: usize) -> (Vec<f32>, f32) {
    let span = (max - min).abs().max(1e-6);
    let step = nice_step(span, target);
    let start = (min / step).ceil() * step;

    let mut v = Vec::new();
    let mut i = 0;
    while i < 100 {
        let t = start + step * i as f32;
        if t > max + step * 1e-3 {
            break;
        }
        v.push(t);
        i += 1;
    }
    (v, step)
}

pub fn tick_label(value: f32, step: f32) -> String {
    let decimals = if step > 0.0 {
        ((-step.log10()) - 1e-4).ceil().clamp(0.0, 6.0) as usize
    } else {
        2
    };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced_core::Point;

    fn area() -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: 240.0,
            height: 120.0,
        }
    }

    fn surface() -> Surface {
        let series =
            Series::from_pairs([("12:00", 1.70), ("12:05", 1.72), ("12:10", 1.74)]).unwrap();
        Surface::new(series, ChartStyle::default(), Intensity::Soft)
    }

    #[test]
    fn replacing_series_forces_idle() {
        let mut chart = surface();
        chart.handle(Input::Moved(Point::new(240.0, 10.0)), area());
        assert_eq!(chart.hover().index(), Some(2));

        let effects = chart.replace_series(Series::from_pairs([("Mon", 2.0)]).unwrap());

        assert_eq!(chart.hover(), HoverState::default());
        assert_eq!(effects, vec![Effect::Redraw, Effect::Price(2.0)]);
    }

    #[test]
    fn instances_keep_separate_memos() {
        let mut a = surface();
        let mut b = surface();
        let p = Point::new(120.0, 10.0);

        let first = a.handle(Input::Moved(p), area());
        let second = b.handle(Input::Moved(p), area());

        assert!(first.contains(&Effect::Pulse(Intensity::Soft)));
        assert!(second.contains(&Effect::Pulse(Intensity::Soft)));
        assert_eq!(a.hover().last_notified(), Some(1));
        assert_eq!(b.hover().last_notified(), Some(1));
    }

    #[test]
    fn style_parses_hex_colors() {
        let style: ChartStyle =
            serde_json::from_str(r##"{ "hover_after": "#FF408130", "show_axes": false }"##)
                .unwrap();
        assert_eq!(style.hover_after, ChartStyle::default().hover_after);
        assert!(!style.show_axes);
        assert!(serde_json::from_str::<ChartStyle>(r#"{ "line": "green" }"#).is_err());
    }

    #[test]
    fn ticks_use_nice_steps_inside_bounds() {
        let (values, step) = ticks(1.65, 2.1, 5);
        assert!((step - 0.1).abs() < 1e-6);
        assert!(values.iter().all(|v| *v >= 1.65 && *v <= 2.1 + 1e-4));
        assert_eq!(tick_label(1.7, step), "1.7");
        assert_eq!(tick_label(2.0, 0.05), "2.00");
    }
}

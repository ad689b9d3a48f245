use pulse_chart_data::chart::{ChartStyle, Effect, Input, Surface};
use pulse_chart_data::series::{Anchor, Band};
use pulse_chart_data::{Intensity, Range, Series, SeriesStore, UserTimezone};

use chrono::{TimeZone, Utc};
use iced_core::{Point, Rectangle};

const AREA: Rectangle = Rectangle {
    x: 0.0,
    y: 0.0,
    width: 480.0,
    height: 200.0,
};

fn store() -> SeriesStore {
    let anchor = Utc.with_ymd_and_hms(2024, 3, 14, 14, 2, 31).unwrap();
    SeriesStore::new(Band::seeded(1.70, 2.05, 42), UserTimezone::Utc)
        .with_anchor(Anchor::Fixed(anchor))
}

fn surface(series: Series) -> Surface {
    Surface::new(series, ChartStyle::default(), Intensity::Medium)
}

fn pulses(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Pulse(_)))
        .count()
}

#[test]
fn every_sample_is_reachable_at_its_own_x() {
    let series = store().generate(Range::Week);
    let chart = surface(series.clone());
    let geometry = chart.geometry(AREA);

    for index in 0..series.len() {
        let x = geometry.x_at(index).unwrap();
        assert_eq!(geometry.nearest(x), Some(index));
    }
}

#[test]
fn slow_sweep_pulses_once_per_sample() {
    let series = store().generate(Range::Day);
    let n = series.len();
    let mut chart = surface(series);

    let mut total = 0;
    // several events per sample spacing
    let steps = n * 7;
    for step in 0..=steps {
        let x = AREA.width * step as f32 / steps as f32;
        total += pulses(&chart.handle(Input::Moved(Point::new(x, 100.0)), AREA));
    }

    assert_eq!(total, n);
}

#[test]
fn ending_contact_reports_latest_price() {
    let series = store().generate(Range::Month);
    let latest = series.last_price();

    for end in [Input::Released, Input::Cancelled, Input::Left, Input::FocusLost] {
        let mut chart = surface(series.clone());
        chart.handle(Input::Pressed(Point::new(90.0, 50.0)), AREA);

        let effects = chart.handle(end, AREA);
        assert_eq!(effects.first(), Some(&Effect::Redraw));
        assert_eq!(effects.last().copied(), latest.map(Effect::Price));
    }
}

#[test]
fn range_switch_mid_hover_starts_clean() {
    let mut store = store();
    let mut chart = surface(store.generate(Range::Month));

    chart.handle(Input::Moved(Point::new(AREA.width, 20.0)), AREA);
    assert_eq!(chart.hover().index(), Some(29));

    let day = store.generate(Range::Day);
    let effects = chart.replace_series(day.clone());
    assert_eq!(effects, vec![Effect::Redraw, Effect::Price(day.last_price().unwrap())]);
    assert_eq!(chart.hover().index(), None);

    // the next move is evaluated against the new series only
    let effects = chart.handle(Input::Moved(Point::new(AREA.width, 20.0)), AREA);
    assert_eq!(chart.hover().index(), Some(24));
    assert_eq!(pulses(&effects), 1);
}

#[test]
fn empty_series_never_reports_a_price() {
    let mut chart = surface(Series::empty());
    for input in [
        Input::Entered(Point::new(10.0, 10.0)),
        Input::Pressed(Point::new(10.0, 10.0)),
        Input::Moved(Point::new(20.0, 10.0)),
        Input::Released,
    ] {
        let effects = chart.handle(input, AREA);
        assert!(!effects.iter().any(|e| matches!(e, Effect::Price(_))));
        assert!(!chart.hover().is_active());
    }
    assert!(chart.scene(AREA).is_empty());
}

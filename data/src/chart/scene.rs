//! Frame description of the price chart.
//!
//! [`build`] turns (series, hover state, geometry) into a list of
//! [`DrawCommand`]s; [`render`] hands them to any [`RenderSurface`].
//! Building a scene never touches the series or the hover state.

use super::geometry::{CurvePath, Geometry};
use super::hover::HoverState;
use super::{ChartStyle, tick_label, ticks};
use crate::series::Series;
use crate::util::format_price;

use iced_core::{Color, Point};

pub const LABEL_SIZE: f32 = 11.0;
const AXIS_GAP: f32 = 4.0;
const MAX_X_LABELS: usize = 5;
const Y_TICK_SPACING: f32 = 36.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<(f32, Color)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub content: String,
    pub position: Point,
    pub color: Color,
    pub size: f32,
    pub align_x: Align,
    pub align_y: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: CurvePath,
        paint: Paint,
    },
    Stroke {
        path: CurvePath,
        paint: Paint,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
        dashed: bool,
    },
    Text(TextLabel),
}

pub trait RenderSurface {
    fn fill_path(&mut self, path: &CurvePath, paint: &Paint);

    fn stroke_path(&mut self, path: &CurvePath, paint: &Paint, width: f32);

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32, dashed: bool);

    fn text(&mut self, label: &TextLabel);
}

pub fn render(commands: &[DrawCommand], surface: &mut impl RenderSurface) {
    for command in commands {
        match command {
            DrawCommand::Fill { path, paint } => surface.fill_path(path, paint),
            DrawCommand::Stroke { path, paint, width } => surface.stroke_path(path, paint, *width),
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                dashed,
            } => surface.line(*from, *to, *color, *width, *dashed),
            DrawCommand::Text(label) => surface.text(label),
        }
    }
}

pub fn build(
    series: &Series,
    hover: HoverState,
    geometry: &Geometry,
    style: &ChartStyle,
) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    if series.is_empty() || geometry.is_empty() {
        return commands;
    }

    let area = geometry.area();
    let last = geometry.len() - 1;

    if style.show_axes {
        axis_labels(&mut commands, series, geometry, style);
    }

    commands.push(DrawCommand::Fill {
        path: geometry.area_under(style.tension, last),
        paint: vertical_fade(geometry, style.fill, style.fill_alpha),
    });

    let hovered = hover
        .index()
        .filter(|index| *index < geometry.len())
        .and_then(|index| Some((index, geometry.point(index)?)));

    let Some((index, point)) = hovered else {
        commands.push(DrawCommand::Stroke {
            path: geometry.curve(style.tension, last),
            paint: Paint::Solid(style.line),
            width: style.line_width,
        });
        return commands;
    };

    commands.push(DrawCommand::Fill {
        path: geometry.area_under(style.tension, index),
        paint: vertical_fade(geometry, style.fill, style.fill_alpha_active),
    });

    let fraction = geometry.split_fraction(point.x);
    commands.push(DrawCommand::Stroke {
        path: geometry.curve(style.tension, last),
        paint: Paint::Linear(LinearGradient {
            start: Point::new(area.x, area.y),
            end: Point::new(area.x + area.width, area.y),
            stops: split_stops(fraction, style.hover_before, style.hover_after),
        }),
        width: style.line_width,
    });

    commands.push(DrawCommand::Line {
        from: Point::new(point.x, area.y),
        to: Point::new(point.x, area.y + area.height),
        color: style.guide,
        width: 1.0,
        dashed: true,
    });

    if let Some(sample) = series.get(index) {
        let align_x = if fraction < 0.15 {
            Align::Start
        } else if fraction > 0.85 {
            Align::End
        } else {
            Align::Center
        };
        commands.push(DrawCommand::Text(TextLabel {
            content: format!("{}  {}", sample.label(), format_price(sample.price())),
            position: Point::new(point.x, area.y),
            color: style.guide,
            size: LABEL_SIZE,
            align_x,
            align_y: Align::End,
        }));
    }

    commands
}

/// Hard color change at `fraction`; a split on either edge is one solid tone.
fn split_stops(fraction: f32, before: Color, after: Color) -> Vec<(f32, Color)> {
    if fraction >= 1.0 {
        vec![(0.0, before), (1.0, before)]
    } else if fraction <= 0.0 {
        vec![(0.0, after), (1.0, after)]
    } else {
        vec![
            (0.0, before),
            (fraction, before),
            (fraction, after),
            (1.0, after),
        ]
    }
}

fn vertical_fade(geometry: &Geometry, color: Color, alpha: f32) -> Paint {
    let area = geometry.area();
    Paint::Linear(LinearGradient {
        start: Point::new(area.x, area.y),
        end: Point::new(area.x, area.y + area.height),
        stops: vec![(0.0, color.scale_alpha(alpha)), (1.0, Color::TRANSPARENT)],
    })
}

fn axis_labels(
    commands: &mut Vec<DrawCommand>,
    series: &Series,
    geometry: &Geometry,
    style: &ChartStyle,
) {
    let area = geometry.area();

    if let Some(scale) = geometry.scale() {
        let target = (area.height / Y_TICK_SPACING).floor() as usize;
        let (values, step) = ticks(scale.min, scale.max, target);
        for value in values
            .into_iter()
            .filter(|v| *v >= scale.min && *v <= scale.max)
        {
            commands.push(DrawCommand::Text(TextLabel {
                content: tick_label(value, step),
                position: Point::new(area.x + area.width + AXIS_GAP, scale.to_y(value, area)),
                color: style.label,
                size: LABEL_SIZE,
                align_x: Align::Start,
                align_y: Align::Center,
            }));
        }
    }

    let n = geometry.len();
    let every = n.div_ceil(MAX_X_LABELS).max(1);
    for (index, sample) in series.samples().iter().enumerate().step_by(every) {
        let Some(x) = geometry.x_at(index) else {
            continue;
        };
        let align_x = if index == 0 {
            Align::Start
        } else {
            Align::Center
        };
        commands.push(DrawCommand::Text(TextLabel {
            content: sample.label().to_string(),
            position: Point::new(x, area.y + area.height + AXIS_GAP),
            color: style.label,
            size: LABEL_SIZE,
            align_x,
            align_y: Align::Start,
        }));
    }
}

use crate::style;

use data::chart::scene::{self, Align, TextLabel};
use data::chart::{CurvePath, Effect, Input, Paint, RenderSurface, Segment, Surface};
use data::Series;

use iced::widget::canvas::{self, Cache, Canvas, Event, Frame, Path, Stroke};
use iced::{
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme, mouse, touch,
    window,
};

pub const Y_AXIS_GUTTER: f32 = 44.0;
pub const X_AXIS_HEIGHT: f32 = 20.0;
/// Room above the plot for the hovered sample label
const TOP_PAD: f32 = 18.0;

pub const CHART_HEIGHT: f32 = 240.0;

/// Minimum distance between gradient stops sharing one offset.
const STOP_NUDGE: f32 = 1e-4;

/// A pointer/touch input in canvas-local pixels, with the plot rectangle it
/// was measured against.
#[derive(Debug, Clone, Copy)]
pub struct ChartEvent {
    pub input: Input,
    pub area: Rectangle,
}

#[derive(Debug, Default)]
pub struct Contact {
    pointer_inside: bool,
    finger: Option<touch::Finger>,
}

pub struct PriceChart {
    surface: Surface,
    cache: Cache,
}

impl PriceChart {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            cache: Cache::new(),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn handle(&mut self, event: ChartEvent) -> Vec<Effect> {
        self.surface.handle(event.input, event.area)
    }

    pub fn replace_series(&mut self, series: Series) -> Vec<Effect> {
        self.surface.replace_series(series)
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn view(&self) -> Element<'_, ChartEvent> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(CHART_HEIGHT))
            .into()
    }
}

/// Plot rectangle inside the canvas, leaving room for both axes.
pub fn plot_area(bounds: Size) -> Rectangle {
    Rectangle {
        x: 0.0,
        y: TOP_PAD,
        width: (bounds.width - Y_AXIS_GUTTER).max(0.0),
        height: (bounds.height - TOP_PAD - X_AXIS_HEIGHT).max(0.0),
    }
}

fn local(position: Point, bounds: Rectangle) -> Point {
    Point::new(position.x - bounds.x, position.y - bounds.y)
}

fn contact_input(
    contact: &mut Contact,
    event: &Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
) -> Option<Input> {
    match event {
        Event::Mouse(mouse_event) => match mouse_event {
            mouse::Event::CursorMoved { .. } => match cursor.position_in(bounds) {
                Some(p) if contact.pointer_inside => Some(Input::Moved(p)),
                Some(p) => {
                    contact.pointer_inside = true;
                    Some(Input::Entered(p))
                }
                None if contact.pointer_inside => {
                    contact.pointer_inside = false;
                    Some(Input::Left)
                }
                None => None,
            },
            mouse::Event::CursorLeft if contact.pointer_inside => {
                contact.pointer_inside = false;
                Some(Input::Left)
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                cursor.position_in(bounds).map(Input::Pressed)
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                cursor.position_in(bounds).map(|_| Input::Released)
            }
            _ => None,
        },
        Event::Touch(touch_event) => match *touch_event {
            touch::Event::FingerPressed { id, position } if bounds.contains(position) => {
                contact.finger = Some(id);
                Some(Input::Pressed(local(position, bounds)))
            }
            touch::Event::FingerMoved { id, position } if contact.finger == Some(id) => {
                Some(Input::Moved(local(position, bounds)))
            }
            touch::Event::FingerLifted { id, .. } if contact.finger == Some(id) => {
                contact.finger = None;
                Some(Input::Released)
            }
            touch::Event::FingerLost { id, .. } if contact.finger == Some(id) => {
                contact.finger = None;
                Some(Input::Cancelled)
            }
            _ => None,
        },
        Event::Window(window::Event::Unfocused)
            if contact.pointer_inside || contact.finger.is_some() =>
        {
            *contact = Contact::default();
            Some(Input::FocusLost)
        }
        _ => None,
    }
}

impl canvas::Program<ChartEvent> for PriceChart {
    type State = Contact;

    fn update(
        &self,
        contact: &mut Contact,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<ChartEvent>> {
        let input = contact_input(contact, event, bounds, cursor)?;

        Some(canvas::Action::publish(ChartEvent {
            input,
            area: plot_area(bounds.size()),
        }))
    }

    fn draw(
        &self,
        _contact: &Contact,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let commands = self.surface.scene(plot_area(bounds.size()));
            scene::render(&commands, &mut FrameSurface { frame });
        });

        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        _contact: &Contact,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let over_plot = cursor
            .position_in(bounds)
            .is_some_and(|p| plot_area(bounds.size()).contains(p));

        if over_plot && !self.surface.series().is_empty() {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Issues scene commands onto an iced canvas frame.
struct FrameSurface<'a> {
    frame: &'a mut Frame,
}

impl RenderSurface for FrameSurface<'_> {
    fn fill_path(&mut self, path: &CurvePath, paint: &Paint) {
        self.frame.fill(
            &to_path(path),
            canvas::Fill {
                style: to_style(paint),
                ..Default::default()
            },
        );
    }

    fn stroke_path(&mut self, path: &CurvePath, paint: &Paint, width: f32) {
        self.frame.stroke(
            &to_path(path),
            Stroke {
                style: to_style(paint),
                width,
                line_cap: canvas::LineCap::Round,
                line_join: canvas::LineJoin::Round,
                ..Stroke::default()
            },
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f32, dashed: bool) {
        let stroke = if dashed {
            style::dashed_line(color, width)
        } else {
            Stroke::default().with_color(color).with_width(width)
        };
        self.frame.stroke(&Path::line(from, to), stroke);
    }

    fn text(&mut self, label: &TextLabel) {
        self.frame.fill_text(canvas::Text {
            content: label.content.clone(),
            position: label.position,
            color: label.color,
            size: label.size.into(),
            align_x: alignment(label.align_x).into(),
            align_y: alignment(label.align_y).into(),
            ..Default::default()
        });
    }
}

fn to_path(curve: &CurvePath) -> Path {
    Path::new(|builder| {
        for segment in curve.segments() {
            match *segment {
                Segment::MoveTo(p) => builder.move_to(p),
                Segment::LineTo(p) => builder.line_to(p),
                Segment::CubicTo { c1, c2, to } => builder.bezier_curve_to(c1, c2, to),
                Segment::Close => builder.close(),
            }
        }
    })
}

fn to_style(paint: &Paint) -> canvas::Style {
    match paint {
        Paint::Solid(color) => canvas::Style::Solid(*color),
        Paint::Linear(gradient) => {
            let linear = separated_stops(&gradient.stops).into_iter().fold(
                canvas::gradient::Linear::new(gradient.start, gradient.end),
                |linear, (offset, color)| linear.add_stop(offset, color),
            );
            canvas::Style::Gradient(linear.into())
        }
    }
}

/// iced replaces a stop whose offset is already taken, so repeats move
/// forward by [`STOP_NUDGE`]. A repeat with no room left before 1.0 is
/// dropped and the earlier stop keeps its color.
fn separated_stops(stops: &[(f32, Color)]) -> Vec<(f32, Color)> {
    let mut out: Vec<(f32, Color)> = Vec::with_capacity(stops.len());
    for &(offset, color) in stops {
        let offset = match out.last() {
            Some(&(prev, _)) if offset <= prev => {
                let nudged = prev + STOP_NUDGE;
                if nudged > 1.0 {
                    continue;
                }
                nudged
            }
            _ => offset.clamp(0.0, 1.0),
        };
        out.push((offset, color));
    }
    out
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Start => Alignment::Start,
        Align::Center => Alignment::Center,
        Align::End => Alignment::End,
    }
}

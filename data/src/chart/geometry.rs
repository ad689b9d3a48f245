use crate::series::Series;

use iced_core::{Point, Rectangle};

/// Price domain of the plot with 5% headroom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YScale {
    pub min: f32,
    pub max: f32,
}

impl YScale {
    pub fn fit(series: &Series, begin_at_zero: bool) -> Option<Self> {
        let (lo, hi) = series.price_bounds()?;

        let (mut min, mut max) = if begin_at_zero { (0.0, hi) } else { (lo, hi) };

        if (max - min).abs() < f32::EPSILON {
            let pad = (max.abs() * 0.01).max(0.01);
            min -= pad;
            max += pad;
        }

        let pad = (max - min) * 0.05;
        if !begin_at_zero {
            min -= pad;
        }
        max += pad;

        Some(Self { min, max })
    }

    pub fn to_y(&self, price: f32, area: Rectangle) -> f32 {
        let span = (self.max - self.min).max(1e-6);
        let t = ((price - self.min) / span).clamp(0.0, 1.0);
        area.y + area.height - t * area.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePath {
    segments: Vec<Segment>,
}

impl CurvePath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }
}

/// Pixel layout of one series inside a draw area, rebuilt every frame.
#[derive(Debug, Clone)]
pub struct Geometry {
    area: Rectangle,
    points: Vec<Point>,
    scale: Option<YScale>,
}

impl Geometry {
    pub fn new(series: &Series, area: Rectangle, begin_at_zero: bool) -> Self {
        let scale = YScale::fit(series, begin_at_zero);
        let n = series.len();

        let points = match scale {
            Some(scale) => series
                .samples()
                .iter()
                .enumerate()
                .map(|(i, s)| Point::new(x_for(i, n, area), scale.to_y(s.price(), area)))
                .collect(),
            None => Vec::new(),
        };

        Self {
            area,
            points,
            scale,
        }
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    pub fn scale(&self) -> Option<YScale> {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn x_at(&self, index: usize) -> Option<f32> {
        self.point(index).map(|p| p.x)
    }

    pub fn baseline(&self) -> f32 {
        self.area.y + self.area.height
    }

    /// Inclusive on every edge, so the first and last samples stay reachable.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.area.x
            && p.x <= self.area.x + self.area.width
            && p.y >= self.area.y
            && p.y <= self.area.y + self.area.height
    }

    /// Index of the sample nearest to `x` along the x-axis; ties go to the
    /// earlier index and `x` is clamped into the area.
    pub fn nearest(&self, x: f32) -> Option<usize> {
        let n = self.points.len();
        if n == 0 || !x.is_finite() || !(self.area.width > 0.0) {
            return None;
        }
        if n == 1 {
            return Some(0);
        }

        let last = (n - 1) as f32;
        let step = self.area.width / last;
        let t = ((x - self.area.x) / step).clamp(0.0, last);
        let base = t.floor();
        let index = if t - base > 0.5 { base + 1.0 } else { base };

        Some((index as usize).min(n - 1))
    }

    /// Gradient stop offset for an absolute x inside the area.
    pub fn split_fraction(&self, x: f32) -> f32 {
        split_fraction(x - self.area.x, self.area.width)
    }

    /// The series curve from the first sample through `upto`.
    pub fn curve(&self, tension: f32, upto: usize) -> CurvePath {
        let mut path = CurvePath::default();
        let Some(first) = self.points.first() else {
            return path;
        };
        let upto = upto.min(self.points.len() - 1);

        path.push(Segment::MoveTo(*first));

        if tension <= 0.0 {
            for p in &self.points[1..=upto] {
                path.push(Segment::LineTo(*p));
            }
            return path;
        }

        let controls = self.control_points(tension);
        for i in 0..upto {
            path.push(Segment::CubicTo {
                c1: controls[i].1,
                c2: controls[i + 1].0,
                to: self.points[i + 1],
            });
        }
        path
    }

    /// Closed region between the curve (through `upto`) and the baseline.
    pub fn area_under(&self, tension: f32, upto: usize) -> CurvePath {
        let mut path = self.curve(tension, upto);
        if path.is_empty() {
            return path;
        }
        let upto = upto.min(self.points.len() - 1);
        let baseline = self.baseline();

        path.push(Segment::LineTo(Point::new(self.points[upto].x, baseline)));
        path.push(Segment::LineTo(Point::new(self.points[0].x, baseline)));
        path.push(Segment::Close);
        path
    }

    /// Cardinal-spline style (previous, next) control points per sample,
    /// kept inside the area so the curve never overshoots the plot.
    fn control_points(&self, tension: f32) -> Vec<(Point, Point)> {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let cur = self.points[i];
                let prev = self.points[i.saturating_sub(1)];
                let next = self.points[(i + 1).min(n - 1)];

                let d01 = prev.distance(cur);
                let d12 = cur.distance(next);
                let total = d01 + d12;
                let (s01, s12) = if total > 0.0 {
                    (d01 / total, d12 / total)
                } else {
                    (0.0, 0.0)
                };

                let fa = tension * s01;
                let fb = tension * s12;
                let dx = next.x - prev.x;
                let dy = next.y - prev.y;

                let before = Point::new(cur.x - fa * dx, cur.y - fa * dy);
                let after = Point::new(cur.x + fb * dx, cur.y + fb * dy);

                (self.clamp(before), self.clamp(after))
            })
            .collect()
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.area.x, self.area.x + self.area.width),
            p.y.clamp(self.area.y, self.area.y + self.area.height),
        )
    }
}

fn x_for(index: usize, n: usize, area: Rectangle) -> f32 {
    if n <= 1 {
        area.x + area.width / 2.0
    } else {
        area.x + index as f32 * area.width / (n - 1) as f32
    }
}

/// Offset of a hover at `x` (relative to the area's left edge) in an area
/// `width` pixels wide, clamped to `[0, 1]`.
pub fn split_fraction(x: f32, width: f32) -> f32 {
    if !(width > 0.0) || !x.is_finite() {
        return 0.0;
    }
    (x / width).clamp(0.0, 1.0)
}

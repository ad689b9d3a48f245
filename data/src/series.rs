use crate::config::UserTimezone;

use chrono::{DateTime, TimeDelta, Utc};
use enum_map::{Enum, EnumMap, enum_map};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Band the reference data set moves in.
pub const DEFAULT_BAND: (f32, f32) = (1.70, 2.05);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("Sample '{label}' has an invalid price: {price}")]
    InvalidPrice { label: String, price: f32 },
    #[error("Duplicate sample label: {0}")]
    DuplicateLabel(String),
}

/// One (label, price) point of a chart. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    label: String,
    price: f32,
}

impl Sample {
    pub fn new(label: impl Into<String>, price: f32) -> Result<Self, SeriesError> {
        let label = label.into();
        if !price.is_finite() || price <= 0.0 {
            return Err(SeriesError::InvalidPrice { label, price });
        }
        Ok(Self { label, price })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn price(&self) -> f32 {
        self.price
    }
}

/// Chronologically ordered samples; position is the x-axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Result<Self, SeriesError> {
        let mut seen = FxHashSet::default();
        for sample in &samples {
            if !seen.insert(sample.label()) {
                return Err(SeriesError::DuplicateLabel(sample.label.clone()));
            }
        }
        Ok(Self { samples })
    }

    /// Convenience for literal data, e.g. `[("12:00", 1.70), ("12:05", 1.72)]`.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, f32)>,
    ) -> Result<Self, SeriesError> {
        let samples = pairs
            .into_iter()
            .map(|(label, price)| Sample::new(label, price))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(samples)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn last_price(&self) -> Option<f32> {
        self.last().map(Sample::price)
    }

    /// Percent change of `price` relative to the first sample.
    pub fn change_pct(&self, price: f32) -> Option<f32> {
        let first = self.first()?.price();
        Some(((price / first) - 1.0) * 100.0)
    }

    pub fn price_bounds(&self) -> Option<(f32, f32)> {
        self.samples.iter().fold(None, |acc, s| {
            let p = s.price();
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
            })
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Enum, Deserialize, Serialize)]
pub enum Range {
    #[default]
    Day,
    Week,
    Month,
}

impl Range {
    pub const ALL: [Range; 3] = [Range::Day, Range::Week, Range::Month];
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Range::Day => "1D",
                Range::Week => "1W",
                Range::Month => "1M",
            }
        )
    }
}

/// Label schedule of a [`Range`]: how many buckets, how wide, how labelled.
#[derive(Debug, Clone, Copy)]
pub struct RangeSpec {
    pub samples: usize,
    pub bucket: TimeDelta,
    pub label_format: &'static str,
}

fn default_specs() -> EnumMap<Range, RangeSpec> {
    enum_map! {
        Range::Day => RangeSpec {
            samples: 25,
            bucket: TimeDelta::minutes(5),
            label_format: "%H:%M",
        },
        Range::Week => RangeSpec {
            samples: 28,
            bucket: TimeDelta::hours(6),
            label_format: "%a %H:%M",
        },
        Range::Month => RangeSpec {
            samples: 30,
            bucket: TimeDelta::days(1),
            label_format: "%b %d",
        },
    }
}

/// Supplies one price per bucket. Only finite positive values are usable.
pub trait PriceStrategy {
    fn next_price(&mut self, index: usize, count: usize) -> f32;
}

impl<F> PriceStrategy for F
where
    F: FnMut(usize, usize) -> f32,
{
    fn next_price(&mut self, index: usize, count: usize) -> f32 {
        self(index, count)
    }
}

/// Uniformly random prices inside `[low, high]`, rounded to cents.
pub struct Band {
    low: f32,
    high: f32,
    rng: StdRng,
}

impl Band {
    pub fn new(low: f32, high: f32) -> Self {
        Self::with_rng(low, high, StdRng::from_entropy())
    }

    pub fn seeded(low: f32, high: f32, seed: u64) -> Self {
        Self::with_rng(low, high, StdRng::seed_from_u64(seed))
    }

    fn with_rng(low: f32, high: f32, rng: StdRng) -> Self {
        let low = low.max(0.01);
        let high = high.max(low);
        Self { low, high, rng }
    }
}

impl Default for Band {
    fn default() -> Self {
        Self::new(DEFAULT_BAND.0, DEFAULT_BAND.1)
    }
}

impl PriceStrategy for Band {
    fn next_price(&mut self, _index: usize, _count: usize) -> f32 {
        let raw = self.rng.gen_range(self.low..=self.high);
        ((raw * 100.0).round() / 100.0).clamp(self.low, self.high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Latest bucket ends at the wall clock at generation time.
    Now,
    Fixed(DateTime<Utc>),
}

pub struct SeriesStore {
    strategy: Box<dyn PriceStrategy>,
    specs: EnumMap<Range, RangeSpec>,
    timezone: UserTimezone,
    anchor: Anchor,
}

impl SeriesStore {
    pub fn new(strategy: impl PriceStrategy + 'static, timezone: UserTimezone) -> Self {
        Self {
            strategy: Box::new(strategy),
            specs: default_specs(),
            timezone,
            anchor: Anchor::Now,
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn spec(&self, range: Range) -> &RangeSpec {
        &self.specs[range]
    }

    /// Builds a fresh series for `range`. Never returns an empty series.
    pub fn generate(&mut self, range: Range) -> Series {
        let spec = self.specs[range];
        let timestamps = schedule(&spec, self.anchor_time());

        let mut fallback = DEFAULT_BAND.0;
        let mut prices = Vec::with_capacity(spec.samples);
        for index in 0..spec.samples {
            let price = self.strategy.next_price(index, spec.samples);
            let price = if price.is_finite() && price > 0.0 {
                price
            } else {
                log::warn!("Price strategy produced {price} at bucket {index}, reusing {fallback}");
                fallback
            };
            fallback = price;
            prices.push(price);
        }

        match build(&timestamps, &prices, spec.label_format, self.timezone) {
            Ok(series) => series,
            Err(err) => {
                // local clock transitions can repeat wall-clock labels
                log::warn!("Falling back to UTC labels for {range}: {err}");
                build(&timestamps, &prices, spec.label_format, UserTimezone::Utc)
                    .unwrap_or_else(|_| indexed(&prices))
            }
        }
    }

    fn anchor_time(&self) -> DateTime<Utc> {
        match self.anchor {
            Anchor::Now => Utc::now(),
            Anchor::Fixed(at) => at,
        }
    }
}

fn align_floor(at: DateTime<Utc>, bucket: TimeDelta) -> DateTime<Utc> {
    let step = bucket.num_seconds().max(1);
    let secs = at.timestamp();
    let aligned = secs - secs.rem_euclid(step);
    DateTime::from_timestamp(aligned, 0).unwrap_or(at)
}

fn schedule(spec: &RangeSpec, anchor: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let last = align_floor(anchor, spec.bucket);
    (0..spec.samples)
        .map(|i| {
            let back = (spec.samples - 1 - i) as i32;
            last - spec.bucket * back
        })
        .collect()
}

fn build(
    timestamps: &[DateTime<Utc>],
    prices: &[f32],
    format: &str,
    timezone: UserTimezone,
) -> Result<Series, SeriesError> {
    let samples = timestamps
        .iter()
        .zip(prices)
        .map(|(ts, price)| Sample::new(timezone.format(*ts, format), *price))
        .collect::<Result<Vec<_>, _>>()?;
    Series::new(samples)
}

fn indexed(prices: &[f32]) -> Series {
    let samples = prices
        .iter()
        .enumerate()
        .filter_map(|(i, price)| Sample::new(format!("#{i}"), *price).ok())
        .collect();
    Series { samples }
}

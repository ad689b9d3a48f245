pub mod chart;
pub mod config;
pub mod haptics;
pub mod series;
pub mod util;

pub use config::{Config, ConfigError, Theme, UserTimezone};
pub use haptics::{HapticSink, HapticsCfg, Intensity};
pub use series::{Range, Sample, Series, SeriesError, SeriesStore};

use crate::util::ok_or_default;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Strength of a feedback pulse, mirroring the impact styles mobile
/// containers expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Medium,
    Heavy,
    Rigid,
    #[default]
    Soft,
}

impl Intensity {
    pub const ALL: [Intensity; 5] = [
        Intensity::Light,
        Intensity::Medium,
        Intensity::Heavy,
        Intensity::Rigid,
        Intensity::Soft,
    ];

    /// Relative strength in `(0, 1]`.
    pub fn level(self) -> f32 {
        match self {
            Intensity::Soft => 0.35,
            Intensity::Light => 0.5,
            Intensity::Medium => 0.7,
            Intensity::Rigid => 0.85,
            Intensity::Heavy => 1.0,
        }
    }

    /// Rigid and light impacts feel sharper than soft or heavy ones.
    pub fn sharpness(self) -> f32 {
        match self {
            Intensity::Soft | Intensity::Heavy => 0.3,
            Intensity::Medium => 0.5,
            Intensity::Light => 0.7,
            Intensity::Rigid => 1.0,
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Intensity::Light => "light",
                Intensity::Medium => "medium",
                Intensity::Heavy => "heavy",
                Intensity::Rigid => "rigid",
                Intensity::Soft => "soft",
            }
        )
    }
}

/// Receiver of feedback pulses. Fire-and-forget: implementations swallow
/// their own failures.
pub trait HapticSink {
    fn pulse(&mut self, intensity: Intensity);
}

/// No haptic capability.
impl HapticSink for () {
    fn pulse(&mut self, _intensity: Intensity) {}
}

impl<S: HapticSink> HapticSink for Option<S> {
    fn pulse(&mut self, intensity: Intensity) {
        if let Some(sink) = self {
            sink.pulse(intensity);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HapticsCfg {
    pub enabled: bool,
    #[serde(deserialize_with = "ok_or_default")]
    pub intensity: Intensity,
    /// 0..=100, `None` mutes the pulse entirely
    #[serde(deserialize_with = "ok_or_default")]
    pub volume: Option<f32>,
    /// Optional wav file played instead of the synthesized click
    pub sound: Option<PathBuf>,
}

impl Default for HapticsCfg {
    fn default() -> Self {
        HapticsCfg {
            enabled: true,
            intensity: Intensity::default(),
            volume: Some(40.0),
            sound: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter(Vec<Intensity>);

    impl HapticSink for Counter {
        fn pulse(&mut self, intensity: Intensity) {
            self.0.push(intensity);
        }
    }

    #[test]
    fn missing_sink_is_a_no_op() {
        let mut none: Option<Counter> = None;
        none.pulse(Intensity::Heavy);
        ().pulse(Intensity::Heavy);

        let mut some = Some(Counter::default());
        some.pulse(Intensity::Rigid);
        assert_eq!(some.unwrap().0, vec![Intensity::Rigid]);
    }

    #[test]
    fn levels_are_ordered_soft_to_heavy() {
        assert!(Intensity::Soft.level() < Intensity::Light.level());
        assert!(Intensity::Rigid.level() < Intensity::Heavy.level());
        assert!(Intensity::ALL.iter().all(|i| i.level() > 0.0 && i.level() <= 1.0));
    }

    #[test]
    fn bad_fields_fall_back_to_defaults() {
        let cfg: HapticsCfg =
            serde_json::from_str(r#"{"enabled": false, "intensity": "buzz", "volume": "loud"}"#)
                .unwrap();

        assert!(!cfg.enabled);
        assert_eq!(cfg.intensity, Intensity::Soft);
        assert_eq!(cfg.volume, None);
    }
}

use super::theme::Theme;
use super::timezone::UserTimezone;
use crate::chart::ChartStyle;
use crate::haptics::HapticsCfg;
use crate::series::Range;
use crate::util::ok_or_default;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenCfg {
    pub symbol: String,
    pub balance_value: f32,
}

impl Default for TokenCfg {
    fn default() -> Self {
        TokenCfg {
            symbol: "$WIF".to_string(),
            balance_value: 77.79,
        }
    }
}

/// Read-only user settings; the app never writes this back.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "ok_or_default")]
    pub theme: Theme,
    #[serde(deserialize_with = "ok_or_default")]
    pub timezone: UserTimezone,
    #[serde(deserialize_with = "ok_or_default")]
    pub default_range: Range,
    pub token: TokenCfg,
    pub chart: ChartStyle,
    pub haptics: HapticsCfg,
    pub verbose_logging: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haptics::Intensity;

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.token.symbol, "$WIF");
        assert_eq!(cfg.default_range, Range::Day);
        assert!(cfg.haptics.enabled);
        assert_eq!(cfg.chart, ChartStyle::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg: Config = serde_json::from_str(
            r##"{
                "theme": "nord",
                "default_range": "Week",
                "token": { "symbol": "$TON" },
                "chart": { "tension": 0.0, "line": "#00FF00" },
                "haptics": { "intensity": "heavy" }
            }"##,
        )
        .unwrap();

        assert_eq!(cfg.theme.0, iced_core::Theme::Nord);
        assert_eq!(cfg.default_range, Range::Week);
        assert_eq!(cfg.token.symbol, "$TON");
        assert_eq!(cfg.token.balance_value, 77.79);
        assert_eq!(cfg.chart.tension, 0.0);
        assert_eq!(cfg.chart.line, iced_core::Color::from_rgb8(0, 255, 0));
        assert_eq!(cfg.haptics.intensity, Intensity::Heavy);
    }

    #[test]
    fn unknown_theme_and_range_fall_back() {
        let cfg: Config =
            serde_json::from_str(r#"{ "theme": "neon", "default_range": "Year" }"#).unwrap();
        assert_eq!(cfg.default_range, Range::Day);
        assert!(matches!(cfg.theme.0, iced_core::Theme::Custom(_)));
    }
}

//! Theme persistence and color helpers.
//! Based on <https://github.com/iced-rs/iced/blob/master/core/src/theme/palette.rs>

use iced_core::{
    Color,
    theme::{Custom, Palette},
};
use palette::{
    FromColor, Hsva,
    rgb::{Rgb, Rgba},
};
use serde::{Deserialize, Serialize};

pub const PULSE: &str = "pulse";

#[derive(Debug, Clone)]
pub struct Theme(pub iced_core::Theme);

#[derive(Serialize, Deserialize)]
struct SerTheme {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    palette: Option<Palette>,
}

impl Default for Theme {
    fn default() -> Self {
        Self(iced_core::Theme::Custom(pulse_theme().into()))
    }
}

impl From<Theme> for iced_core::Theme {
    fn from(val: Theme) -> Self {
        val.0
    }
}

/// Dark mini-app look: near black background, green for gains, pink accent.
pub fn pulse_theme() -> Custom {
    Custom::new(
        "Pulse".to_string(),
        Palette {
            background: Color::from_rgb8(17, 17, 20),
            text: Color::from_rgb8(240, 240, 240),
            primary: Color::from_rgb8(255, 64, 129),
            success: Color::from_rgb8(76, 175, 80),
            danger: Color::from_rgb8(239, 83, 80),
            warning: Color::from_rgb8(255, 193, 7),
        },
    )
}

fn builtin(name: &str) -> Option<iced_core::Theme> {
    Some(match name {
        PULSE => Theme::default().0,
        "dark" => iced_core::Theme::Dark,
        "light" => iced_core::Theme::Light,
        "dracula" => iced_core::Theme::Dracula,
        "nord" => iced_core::Theme::Nord,
        "tokyo_night" => iced_core::Theme::TokyoNight,
        "catppuccino_mocha" => iced_core::Theme::CatppuccinMocha,
        "gruvbox_dark" => iced_core::Theme::GruvboxDark,
        _ => return None,
    })
}

fn builtin_name(theme: &iced_core::Theme) -> Option<&'static str> {
    Some(match theme {
        iced_core::Theme::Dark => "dark",
        iced_core::Theme::Light => "light",
        iced_core::Theme::Dracula => "dracula",
        iced_core::Theme::Nord => "nord",
        iced_core::Theme::TokyoNight => "tokyo_night",
        iced_core::Theme::CatppuccinMocha => "catppuccino_mocha",
        iced_core::Theme::GruvboxDark => "gruvbox_dark",
        iced_core::Theme::Custom(custom) if custom.to_string() == "Pulse" => PULSE,
        _ => return None,
    })
}

impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(name) = builtin_name(&self.0) {
            return name.serialize(serializer);
        }
        SerTheme {
            name: "custom".to_string(),
            palette: Some(self.0.palette()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value =
            serde_json::Value::deserialize(deserializer).map_err(serde::de::Error::custom)?;

        if let Some(s) = value.as_str() {
            return builtin(s)
                .map(Theme)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid theme: {s}")));
        }

        let serialized = SerTheme::deserialize(value).map_err(serde::de::Error::custom)?;

        let theme = match (serialized.name.as_str(), serialized.palette) {
            ("custom", Some(palette)) => {
                iced_core::Theme::Custom(Custom::new("Custom".to_string(), palette).into())
            }
            ("custom", None) => {
                return Err(serde::de::Error::custom(
                    "Custom theme missing palette data",
                ));
            }
            (name, _) => builtin(name).ok_or_else(|| serde::de::Error::custom("Invalid theme"))?,
        };

        Ok(Theme(theme))
    }
}

/// Serde adapter storing colors as `#RRGGBB` / `#RRGGBBAA`.
pub mod hex {
    use iced_core::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::color_to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::hex_to_color(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid hex color: {s}")))
    }
}

pub fn hex_to_color(hex: &str) -> Option<Color> {
    if hex.len() == 7 || hex.len() == 9 {
        let hash = &hex[0..1];
        let r = u8::from_str_radix(&hex[1..3], 16);
        let g = u8::from_str_radix(&hex[3..5], 16);
        let b = u8::from_str_radix(&hex[5..7], 16);
        let a = (hex.len() == 9)
            .then(|| u8::from_str_radix(&hex[7..9], 16).ok())
            .flatten();

        return match (hash, r, g, b, a) {
            ("#", Ok(r), Ok(g), Ok(b), None) => Some(Color::from_rgb8(r, g, b)),
            ("#", Ok(r), Ok(g), Ok(b), Some(a)) => {
                Some(Color::from_rgba8(r, g, b, f32::from(a) / 255.0))
            }
            _ => None,
        };
    }

    None
}

pub fn color_to_hex(color: Color) -> String {
    use std::fmt::Write;

    let mut hex = String::with_capacity(9);

    let [r, g, b, a] = color.into_rgba8();

    let _ = write!(&mut hex, "#{r:02X}{g:02X}{b:02X}");
    if a < u8::MAX {
        let _ = write!(&mut hex, "{a:02X}");
    }

    hex
}

/// Raises HSV value (and a little saturation) by `amount`.
pub fn brighten(color: Color, amount: f32) -> Color {
    let mut hsva = to_hsva(color);
    hsva.value = (hsva.value + amount).min(1.0);
    hsva.saturation = (hsva.saturation + amount * 0.2).min(1.0);
    from_hsva(hsva)
}

pub fn from_hsva(color: Hsva) -> Color {
    let rgba = palette::Srgba::from_color(color);
    Color {
        r: rgba.color.red,
        g: rgba.color.green,
        b: rgba.color.blue,
        a: rgba.alpha,
    }
}

pub fn to_hsva(color: Color) -> Hsva {
    Hsva::from_color(Rgba {
        alpha: color.a,
        color: Rgb {
            red: color.r,
            green: color.g,
            blue: color.b,
            ..Rgb::default()
        },
    })
}

pub fn darken(color: Color, amount: f32) -> Color {
    let mut hsl = to_hsl(color);
    hsl.l = (hsl.l - amount).max(0.0);
    from_hsl(hsl)
}

pub fn lighten(color: Color, amount: f32) -> Color {
    let mut hsl = to_hsl(color);
    hsl.l = (hsl.l + amount).min(1.0);
    from_hsl(hsl)
}

pub fn is_dark(color: Color) -> bool {
    let brightness = (color.r * 299.0 + color.g * 587.0 + color.b * 114.0) / 1000.0;
    brightness < 0.5
}

struct Hsl {
    h: f32,
    s: f32,
    l: f32,
    a: f32,
}

fn to_hsl(color: Color) -> Hsl {
    let x_max = color.r.max(color.g).max(color.b);
    let x_min = color.r.min(color.g).min(color.b);
    let c = x_max - x_min;
    let l = x_max.midpoint(x_min);

    let h = if c == 0.0 {
        0.0
    } else if x_max == color.r {
        60.0 * ((color.g - color.b) / c).rem_euclid(6.0)
    } else if x_max == color.g {
        60.0 * (((color.b - color.r) / c) + 2.0)
    } else {
        60.0 * (((color.r - color.g) / c) + 4.0)
    };

    let s = if l == 0.0 || l == 1.0 {
        0.0
    } else {
        (x_max - l) / l.min(1.0 - l)
    };

    Hsl {
        h,
        s,
        l,
        a: color.a,
    }
}

// https://en.wikipedia.org/wiki/HSL_and_HSV#HSL_to_RGB
fn from_hsl(hsl: Hsl) -> Color {
    let c = (1.0 - (2.0 * hsl.l - 1.0).abs()) * hsl.s;
    let h = hsl.h / 60.0;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());

    let (r1, g1, b1) = match h {
        h if h < 1.0 => (c, x, 0.0),
        h if h < 2.0 => (x, c, 0.0),
        h if h < 3.0 => (0.0, c, x),
        h if h < 4.0 => (0.0, x, c),
        h if h < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = hsl.l - (c / 2.0);

    Color {
        r: r1 + m,
        g: g1 + m,
        b: b1 + m,
        a: hsl.a,
    }
}

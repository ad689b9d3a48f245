use data::config::theme::{brighten, darken, is_dark, lighten};

use iced::widget::canvas::{self, LineDash, Stroke};
use iced::widget::{button, container};
use iced::{Border, Color, Theme};

pub const DASH: [f32; 2] = [5.0, 5.0];

pub const CARD_RADIUS: f32 = 14.0;
pub const PILL_RADIUS: f32 = 999.0;

pub fn dashed_line(color: Color, width: f32) -> Stroke<'static> {
    Stroke {
        style: canvas::Style::Solid(color),
        width,
        line_dash: LineDash {
            segments: &DASH,
            offset: 0,
        },
        ..Stroke::default()
    }
}

/// Slightly raised surface relative to the window background.
fn raised(theme: &Theme) -> Color {
    let bg = theme.palette().background;
    if is_dark(bg) {
        lighten(bg, 0.05)
    } else {
        darken(bg, 0.04)
    }
}

pub fn screen(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.base.color.into()),
        text_color: Some(palette.background.base.text),
        ..Default::default()
    }
}

pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(raised(theme).into()),
        text_color: Some(palette.background.base.text),
        border: Border {
            radius: CARD_RADIUS.into(),
            width: 1.0,
            color: palette.background.strong.color.scale_alpha(0.4),
        },
        ..Default::default()
    }
}

pub fn nav_bar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(raised(theme).into()),
        border: Border {
            width: 1.0,
            color: palette.background.strong.color.scale_alpha(0.3),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn avatar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.primary.base.color.scale_alpha(0.2).into()),
        text_color: Some(palette.primary.base.color),
        border: Border {
            radius: PILL_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn muted_text(theme: &Theme) -> Color {
    theme.extended_palette().background.base.text.scale_alpha(0.6)
}

pub fn change_color(theme: &Theme, pct: f32) -> Color {
    let palette = theme.extended_palette();
    if pct < 0.0 {
        palette.danger.base.color
    } else {
        palette.success.base.color
    }
}

/// Flat text-like button, highlighted when it represents the current selection.
pub fn toggle_button(theme: &Theme, status: button::Status, is_active: bool) -> button::Style {
    let palette = theme.extended_palette();

    let (background, text_color) = if is_active {
        (
            Some(palette.success.base.color.into()),
            palette.success.base.text,
        )
    } else {
        match status {
            button::Status::Hovered => (
                Some(
                    brighten(palette.background.strong.color, 0.08)
                        .scale_alpha(0.35)
                        .into(),
                ),
                palette.background.base.text,
            ),
            button::Status::Pressed => (
                Some(palette.background.strong.color.scale_alpha(0.3).into()),
                palette.background.base.text,
            ),
            button::Status::Active | button::Status::Disabled => (None, muted_text(theme)),
        }
    };

    button::Style {
        background,
        text_color,
        border: Border {
            radius: PILL_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn icon_button(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();

    button::Style {
        background: match status {
            button::Status::Hovered | button::Status::Pressed => {
                Some(palette.background.strong.color.scale_alpha(0.4).into())
            }
            button::Status::Active | button::Status::Disabled => None,
        },
        text_color: palette.background.base.text,
        border: Border {
            radius: PILL_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn action_button(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();
    let base = palette.success.base.color;

    let background = match status {
        button::Status::Hovered => brighten(base, 0.08),
        button::Status::Pressed => darken(base, 0.08),
        button::Status::Active => base,
        button::Status::Disabled => base.scale_alpha(0.4),
    };

    button::Style {
        background: Some(background.into()),
        text_color: palette.success.base.text,
        border: Border {
            radius: PILL_RADIUS.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::config::theme::to_hsva;

    #[test]
    fn active_toggle_is_filled() {
        let theme = Theme::Dark;
        let active = toggle_button(&theme, button::Status::Active, true);
        let idle = toggle_button(&theme, button::Status::Active, false);

        assert_eq!(active.text_color, theme.extended_palette().success.base.text);
        assert!(active.background.is_some());
        assert!(idle.background.is_none());
    }

    #[test]
    fn hovered_action_button_is_brighter() {
        let theme = Theme::Dark;
        let base = theme.extended_palette().success.base.color;

        let hovered = action_button(&theme, button::Status::Hovered);
        let Some(iced::Background::Color(color)) = hovered.background else {
            panic!("expected a solid background");
        };
        assert!(to_hsva(color).value > to_hsva(base).value);
    }

    #[test]
    fn change_color_follows_sign() {
        let theme = Theme::Dark;
        let palette = theme.extended_palette();
        assert_eq!(change_color(&theme, -1.2), palette.danger.base.color);
        assert_eq!(change_color(&theme, 0.0), palette.success.base.color);
    }
}

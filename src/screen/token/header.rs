use crate::style;

use data::util::{format_pct, format_price};

use iced::widget::{button, column, container, row, space, text};
use iced::{Alignment, Element, Length, Theme};

const AVATAR_SIZE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Back,
    Share,
}

/// Header line shown under the symbol: price and change against the first sample.
pub fn price_line(price: Option<f32>, change: Option<f32>) -> (String, Option<String>) {
    let price = price.map_or_else(|| "--".to_string(), format_price);
    let change = change
        .filter(|pct| pct.is_finite())
        .map(|pct| format!("({})", format_pct(pct, 0.1)));
    (price, change)
}

pub fn view<'a>(symbol: &'a str, price: Option<f32>, change: Option<f32>) -> Element<'a, Message> {
    let back = button(text("←").size(20))
        .on_press(Message::Back)
        .style(style::icon_button);
    let share = button(text("⤴").size(20))
        .on_press(Message::Share)
        .style(style::icon_button);

    let initial = symbol
        .trim_start_matches('$')
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let avatar = container(text(initial).size(18))
        .center(AVATAR_SIZE)
        .style(style::avatar);

    let (price_text, change_text) = price_line(price, change);
    let pct = change.unwrap_or_default();

    let mut price_row = row![text(price_text).size(14).style(move |theme: &Theme| {
        text::Style {
            color: Some(style::change_color(theme, pct)),
        }
    })]
    .spacing(4)
    .align_y(Alignment::Center);

    if let Some(change_text) = change_text {
        price_row = price_row.push(text(change_text).size(11).style(move |theme: &Theme| {
            text::Style {
                color: Some(style::change_color(theme, pct)),
            }
        }));
    }

    let token = row![avatar, column![text(symbol).size(18), price_row].spacing(2)]
        .spacing(8)
        .align_y(Alignment::Center);

    row![back, space::horizontal(), token, space::horizontal(), share]
        .align_y(Alignment::Center)
        .width(Length::Fill)
        .padding(12)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_line_formats_price_and_change() {
        assert_eq!(
            price_line(Some(1.7254), Some(0.901)),
            ("$1.73".to_string(), Some("(+0.90%)".to_string()))
        );
        assert_eq!(price_line(None, None), ("--".to_string(), None));
        assert_eq!(price_line(Some(2.0), Some(f32::NAN)).1, None);
    }
}

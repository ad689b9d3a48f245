use crate::style;

use data::util::format_price;

use iced::widget::{button, column, container, row, space, text};
use iced::{Alignment, Element, Length, Theme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Rewards,
    Holdings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Rewards, Tab::Holdings];
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Tab::Home => "Home",
                Tab::Rewards => "Rewards",
                Tab::Holdings => "Holdings",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Buy,
    TabSelected(Tab),
}

pub enum Action {
    Buy,
}

pub struct Balance {
    value: f32,
    tab: Tab,
}

impl Balance {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            tab: Tab::default(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn update(&mut self, message: Message) -> Option<Action> {
        match message {
            Message::Buy => return Some(Action::Buy),
            Message::TabSelected(tab) => self.tab = tab,
        }
        None
    }

    pub fn view(&self) -> Element<'_, Message> {
        let summary = column![
            text("Your balance").size(16),
            text(format!("Value: {}", format_price(self.value)))
                .size(13)
                .style(|theme: &Theme| text::Style {
                    color: Some(style::muted_text(theme)),
                }),
        ]
        .spacing(2);

        let buy = button(text("Buy").size(16))
            .padding([10, 24])
            .on_press(Message::Buy)
            .style(style::action_button);

        let tabs = Tab::ALL.iter().fold(row![].spacing(4), |tabs, &tab| {
            let is_active = tab == self.tab;
            tabs.push(
                button(
                    text(tab.to_string())
                        .size(13)
                        .width(Length::Fill)
                        .align_x(Alignment::Center),
                )
                .width(Length::Fill)
                .on_press(Message::TabSelected(tab))
                .style(move |theme, status| style::toggle_button(theme, status, is_active)),
            )
        });

        container(
            column![
                row![summary, space::horizontal(), buy].align_y(Alignment::Center),
                tabs,
            ]
            .spacing(16),
        )
        .padding(16)
        .width(Length::Fill)
        .style(style::card)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_only_move_the_highlight() {
        let mut balance = Balance::new(77.79);
        assert_eq!(balance.tab(), Tab::Home);

        assert!(balance.update(Message::TabSelected(Tab::Rewards)).is_none());
        assert_eq!(balance.tab(), Tab::Rewards);
        assert!(matches!(balance.update(Message::Buy), Some(Action::Buy)));
        assert_eq!(balance.tab(), Tab::Rewards);
    }
}

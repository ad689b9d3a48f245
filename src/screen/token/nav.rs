use crate::style;

use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Length};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavItem {
    #[default]
    Home,
    Refer,
    Holdings,
}

impl NavItem {
    pub const ALL: [NavItem; 3] = [NavItem::Home, NavItem::Refer, NavItem::Holdings];
}

impl std::fmt::Display for NavItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NavItem::Home => "Home",
                NavItem::Refer => "Refer",
                NavItem::Holdings => "Holdings",
            }
        )
    }
}

pub fn view(selected: NavItem) -> Element<'static, NavItem> {
    let items = NavItem::ALL.iter().fold(row![], |items, &item| {
        let is_active = item == selected;
        items.push(
            button(
                text(item.to_string())
                    .size(14)
                    .width(Length::Fill)
                    .align_x(Alignment::Center),
            )
            .width(Length::Fill)
            .padding(10)
            .on_press(item)
            .style(move |theme, status| style::toggle_button(theme, status, is_active)),
        )
    });

    container(items.spacing(8).align_y(Alignment::Center))
        .padding([8, 16])
        .width(Length::Fill)
        .style(style::nav_bar)
        .into()
}

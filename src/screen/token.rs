pub mod balance;
pub mod header;
pub mod nav;

use crate::style;
use crate::widget::chart::{ChartEvent, PriceChart};
use balance::Balance;
use nav::NavItem;

use data::chart::{Effect, Surface};
use data::series::Band;
use data::{Config, HapticSink, Range, SeriesStore};

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

#[derive(Debug, Clone, Copy)]
pub enum Message {
    Header(header::Message),
    Chart(ChartEvent),
    RangeSelected(Range),
    Balance(balance::Message),
    Nav(NavItem),
}

pub enum Action {
    Exit,
}

/// The token page: header price label, interactive chart, range selector,
/// balance card and bottom navigation.
pub struct TokenScreen {
    symbol: String,
    store: SeriesStore,
    range: Range,
    chart: PriceChart,
    displayed_price: Option<f32>,
    balance: Balance,
    nav: NavItem,
}

impl TokenScreen {
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, SeriesStore::new(Band::default(), config.timezone))
    }

    pub fn with_store(config: &Config, mut store: SeriesStore) -> Self {
        let range = config.default_range;
        let series = store.generate(range);
        let displayed_price = series.last_price();

        Self {
            symbol: config.token.symbol.clone(),
            store,
            range,
            chart: PriceChart::new(Surface::new(
                series,
                config.chart,
                config.haptics.intensity,
            )),
            displayed_price,
            balance: Balance::new(config.token.balance_value),
            nav: NavItem::default(),
        }
    }

    pub fn displayed_price(&self) -> Option<f32> {
        self.displayed_price
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn update(&mut self, message: Message, haptics: &mut impl HapticSink) -> Option<Action> {
        match message {
            Message::Header(header::Message::Back) => return Some(Action::Exit),
            Message::Header(header::Message::Share) => {
                log::debug!("Share requested for {}", self.symbol);
            }
            Message::Chart(event) => {
                let effects = self.chart.handle(event);
                self.run_effects(effects, haptics);
            }
            Message::RangeSelected(range) => {
                if range == self.range {
                    return None;
                }
                log::info!("Range changed to {range}");

                self.range = range;
                let series = self.store.generate(range);
                let effects = self.chart.replace_series(series);
                self.run_effects(effects, haptics);
            }
            Message::Balance(message) => {
                if let Some(balance::Action::Buy) = self.balance.update(message) {
                    log::info!("Buy pressed for {}", self.symbol);
                }
            }
            Message::Nav(item) => {
                self.nav = item;
            }
        }
        None
    }

    /// Executes transition effects in the order they were produced.
    fn run_effects(&mut self, effects: Vec<Effect>, haptics: &mut impl HapticSink) {
        for effect in effects {
            match effect {
                Effect::Redraw => self.chart.invalidate(),
                Effect::Pulse(intensity) => haptics.pulse(intensity),
                Effect::Price(price) => self.displayed_price = Some(price),
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let series = self.chart.surface().series();
        let change = self
            .displayed_price
            .and_then(|price| series.change_pct(price));

        let header = header::view(&self.symbol, self.displayed_price, change).map(Message::Header);

        let ranges = Range::ALL.iter().fold(row![].spacing(8), |ranges, &range| {
            let is_active = range == self.range;
            ranges.push(
                button(text(range.to_string()).size(14))
                    .padding([6, 16])
                    .on_press(Message::RangeSelected(range))
                    .style(move |theme, status| style::toggle_button(theme, status, is_active)),
            )
        });

        let body = column![
            self.chart.view().map(Message::Chart),
            container(ranges).center_x(Length::Fill),
            self.balance.view().map(Message::Balance),
        ]
        .spacing(16)
        .padding([0, 16]);

        let content = column![
            header,
            scrollable(body).height(Length::Fill),
            nav::view(self.nav).map(Message::Nav),
        ]
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::screen)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::chart::plot_area;

    use chrono::{TimeZone, Utc};
    use data::chart::Input;
    use data::series::Anchor;
    use data::{Intensity, UserTimezone};
    use iced::{Point, Size};

    #[derive(Default)]
    struct Counter(Vec<Intensity>);

    impl HapticSink for Counter {
        fn pulse(&mut self, intensity: Intensity) {
            self.0.push(intensity);
        }
    }

    fn screen() -> TokenScreen {
        let anchor = Utc.with_ymd_and_hms(2024, 3, 14, 14, 0, 0).unwrap();
        let store = SeriesStore::new(Band::seeded(1.70, 2.05, 7), UserTimezone::Utc)
            .with_anchor(Anchor::Fixed(anchor));
        TokenScreen::with_store(&Config::default(), store)
    }

    fn event(input: Input) -> Message {
        Message::Chart(ChartEvent {
            input,
            area: plot_area(Size::new(344.0, 240.0)),
        })
    }

    fn last_price(screen: &TokenScreen) -> Option<f32> {
        screen.chart.surface().series().last_price()
    }

    #[test]
    fn starts_on_latest_price() {
        let screen = screen();
        assert_eq!(screen.range(), Range::Day);
        assert_eq!(screen.displayed_price(), last_price(&screen));
    }

    #[test]
    fn hover_drives_label_and_release_restores_it() {
        let mut screen = screen();
        let mut haptics = Counter::default();

        screen.update(event(Input::Pressed(Point::new(0.0, 100.0))), &mut haptics);
        let first = screen.chart.surface().series().first().map(|s| s.price());
        assert_eq!(screen.displayed_price(), first);
        assert_eq!(haptics.0, vec![Intensity::Soft]);

        screen.update(event(Input::Moved(Point::new(1.0, 100.0))), &mut haptics);
        assert_eq!(haptics.0.len(), 1);

        screen.update(event(Input::Released), &mut haptics);
        assert_eq!(screen.displayed_price(), last_price(&screen));
    }

    #[test]
    fn range_change_resets_hover_and_label() {
        let mut screen = screen();
        let mut haptics = Counter::default();

        screen.update(event(Input::Pressed(Point::new(0.0, 100.0))), &mut haptics);
        screen.update(Message::RangeSelected(Range::Month), &mut haptics);

        assert_eq!(screen.range(), Range::Month);
        assert_eq!(screen.chart.surface().series().len(), 30);
        assert!(!screen.chart.surface().hover().is_active());
        assert_eq!(screen.displayed_price(), last_price(&screen));
        assert_eq!(haptics.0.len(), 1);
    }

    #[test]
    fn back_exits() {
        let mut screen = screen();
        let action = screen.update(Message::Header(header::Message::Back), &mut ());
        assert!(matches!(action, Some(Action::Exit)));
    }
}

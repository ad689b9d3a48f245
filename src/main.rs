#![windows_subsystem = "windows"]

mod haptics;
mod logger;
mod screen;
mod style;
mod widget;

use haptics::SoundPulse;
use screen::token::{self, TokenScreen};

use iced::{Element, Size, Task, Theme};

fn main() -> iced::Result {
    let (config, config_error) = data::config::load();

    if let Err(err) = logger::setup(cfg!(debug_assertions), config.verbose_logging) {
        eprintln!("Failed to initialize logger: {err}");
    }
    if let Some(err) = config_error {
        log::error!("{err}, falling back to defaults");
    }

    iced::application(
        move || PulseChart::new(&config),
        PulseChart::update,
        PulseChart::view,
    )
    .title(PulseChart::title)
    .theme(PulseChart::theme)
    .window_size(Size::new(390.0, 780.0))
    .antialiasing(true)
    .run()
}

struct PulseChart {
    screen: TokenScreen,
    haptics: Option<SoundPulse>,
    theme: Theme,
    title: String,
}

#[derive(Debug, Clone)]
enum Message {
    Token(token::Message),
}

impl PulseChart {
    fn new(config: &data::Config) -> Self {
        log::info!(
            "Starting with range {}, timezone {}, haptics {}",
            config.default_range,
            config.timezone,
            config.haptics.intensity
        );

        Self {
            screen: TokenScreen::new(config),
            haptics: haptics::init(&config.haptics),
            theme: config.theme.clone().into(),
            title: format!("{} · Pulse", config.token.symbol),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Token(message) => {
                if let Some(token::Action::Exit) = self.screen.update(message, &mut self.haptics) {
                    log::info!("Closing");
                    return iced::exit();
                }
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(Message::Token)
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

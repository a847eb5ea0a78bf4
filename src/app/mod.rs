pub mod config;
pub mod gauge;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, prelude::*, style::palette::tailwind, widgets::*};
use std::{
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use crate::{
    app::{
        config::AppConfig,
        gauge::{Band, GaugeState, celsius_to_percent},
    },
    device::{
        self, Message,
        client::{DeviceClient, LedCommand},
    },
};

struct AppStyle {
    gauge_ok: Color,
    gauge_warn: Color,
    gauge_crit: Color,
    gauge_track: Color,
    temp_frame_fg: Color,
    led_frame_fg: Color,
    alert_fg: Color,
    help_fg: Color,
}

pub struct App {
    exit: bool,
    gauge: GaugeState,
    temperature: Option<f64>,
    led_status: String,
    alert: Option<String>,
    config: AppConfig,
    style: AppStyle,
    client: DeviceClient,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl App {
    const CONFIG_PATH: &str = "./config_example.yaml";

    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let app_style = AppStyle {
            gauge_ok: tailwind::LIME.c400,
            gauge_warn: tailwind::AMBER.c400,
            gauge_crit: tailwind::RED.c600,
            gauge_track: Color::DarkGray,
            temp_frame_fg: tailwind::YELLOW.c300,
            led_frame_fg: tailwind::PURPLE.c300,
            alert_fg: tailwind::RED.c400,
            help_fg: tailwind::ZINC.c400,
        };
        let config = AppConfig::new(Self::CONFIG_PATH);
        let client = DeviceClient::new(
            config.base_url.as_deref().unwrap(),
            config.temperature_metric.unwrap(),
            config.request_timeout,
        );
        Self {
            exit: false,
            gauge: GaugeState::default(),
            temperature: None,
            led_status: "--".to_string(),
            alert: None,
            config,
            style: app_style,
            client,
            tx,
            rx,
        }
    }

    pub async fn run(&mut self, mut terminal: DefaultTerminal) -> Result<(), std::io::Error> {
        device::poll_led_state(
            self.tx.clone(),
            self.client.clone(),
            self.config.led_poll_rate.unwrap(),
        );
        device::poll_temperature(
            self.tx.clone(),
            self.client.clone(),
            self.config.temperature_poll_rate.unwrap(),
        );
        while !self.exit {
            while let Ok(msg) = self.rx.try_recv() {
                self.apply(msg);
            }
            terminal.draw(|frame| self.ui(frame))?;
            self.handle_keyboard_events()?;
            tokio::time::sleep(self.config.tick_rate.unwrap()).await;
        }
        Ok(())
    }

    /// One state transition per fetched result. Whatever arrives last
    /// overwrites the displayed value; there is no ordering guard.
    fn apply(&mut self, msg: Message) {
        match msg {
            Message::Temperature(celsius) => {
                self.temperature = Some(celsius);
                self.gauge.set_value(celsius_to_percent(
                    celsius,
                    self.config.full_scale_celsius.unwrap(),
                ));
            }
            Message::LedState(led) => self.led_status = led,
            Message::CommandOutcome(Ok(led)) => {
                log::debug!("LED control successful: {led}");
                self.led_status = led;
                self.alert = None;
            }
            Message::CommandOutcome(Err(err)) => {
                log::error!("LED control failed: {err}");
                self.alert = Some(format!("Failed to control LED: {err}"));
            }
        }
    }

    fn handle_keyboard_events(&mut self) -> Result<(), std::io::Error> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // any key acknowledges a pending alert
                    self.alert = None;
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                        KeyCode::Char('o') => self.control_led(LedCommand::On),
                        KeyCode::Char('f') => self.control_led(LedCommand::Off),
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }

    fn control_led(&self, command: LedCommand) {
        device::dispatch_led_command(self.tx.clone(), self.client.clone(), command);
    }

    fn ui(&self, frame: &mut Frame) {
        let (gauge_area, reading_area, led_area, alert_area, help_area) =
            Self::create_layout(frame);
        self.render_gauge(frame, gauge_area);
        self.render_reading(frame, reading_area);
        self.render_led(frame, led_area);
        self.render_alert(frame, alert_area);
        self.render_help(frame, help_area);
    }

    fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Green => self.style.gauge_ok,
            Band::Orange => self.style.gauge_warn,
            Band::Red => self.style.gauge_crit,
        }
    }

    fn render_gauge(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from("Temperature").centered();
        let block = Block::new()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(2))
            .title(title);
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(
                Style::default()
                    .fg(self.band_color(self.gauge.band()))
                    .bg(self.style.gauge_track),
            )
            .use_unicode(true)
            .ratio(self.gauge.ratio())
            .label(self.gauge.label());
        frame.render_widget(gauge, area);
    }

    fn render_reading(&self, frame: &mut Frame, area: Rect) {
        let reading = match self.temperature {
            Some(celsius) => format!("{celsius:.2} °C"),
            None => "--".to_string(),
        };
        let paragraph = Paragraph::new(reading).centered().block(
            Block::new()
                .borders(Borders::ALL)
                .title("Reading")
                .fg(self.style.temp_frame_fg),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_led(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.led_status.clone()).centered().block(
            Block::new()
                .borders(Borders::ALL)
                .title("LED")
                .title_alignment(Alignment::Center)
                .fg(self.style.led_frame_fg),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_alert(&self, frame: &mut Frame, area: Rect) {
        let Some(alert) = &self.alert else { return };
        let paragraph = Paragraph::new(alert.as_str())
            .wrap(Wrap { trim: true })
            .style(
                Style::default()
                    .fg(self.style.alert_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::new().borders(Borders::ALL).title("Alert"));
        frame.render_widget(paragraph, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new("o: LED on   f: LED off   q: quit")
            .fg(self.style.help_fg)
            .block(Block::new().borders(Borders::ALL).title("Keys"));
        frame.render_widget(paragraph, area);
    }

    fn create_layout(frame: &mut Frame) -> (Rect, Rect, Rect, Rect, Rect) {
        let main_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(frame.area());
        let left_side = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(5), Constraint::Length(3)])
            .split(main_layout[0]);
        let right_side = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(5),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(main_layout[1]);
        (
            left_side[0],
            left_side[1],
            right_side[0],
            right_side[1],
            right_side[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::error::DeviceError;

    #[test]
    fn led_state_message_updates_status() {
        let mut app = App::new();
        app.apply(Message::LedState("ON".to_string()));
        assert_eq!(app.led_status, "ON");
        assert_eq!(app.alert, None);
    }

    #[test]
    fn failed_command_sets_alert_and_keeps_status() {
        let mut app = App::new();
        app.apply(Message::LedState("On".to_string()));
        app.apply(Message::CommandOutcome(Err(DeviceError::Rejected(
            "busy".to_string(),
        ))));
        assert_eq!(app.led_status, "On");
        let alert = app.alert.expect("failed command should raise an alert");
        assert!(alert.contains("busy"));
    }

    #[test]
    fn successful_command_updates_status_and_clears_alert() {
        let mut app = App::new();
        app.alert = Some("Failed to control LED: busy".to_string());
        app.apply(Message::CommandOutcome(Ok("Off".to_string())));
        assert_eq!(app.led_status, "Off");
        assert_eq!(app.alert, None);
    }

    #[test]
    fn temperature_message_drives_gauge() {
        let mut app = App::new();
        app.apply(Message::Temperature(25.0));
        assert_eq!(app.temperature, Some(25.0));
        assert_eq!(app.gauge.value(), 50.0);
        assert_eq!(app.gauge.band(), Band::Orange);
    }

    #[test]
    fn out_of_scale_temperature_clamps() {
        let mut app = App::new();
        app.apply(Message::Temperature(60.0));
        assert_eq!(app.gauge.value(), 100.0);
        app.apply(Message::Temperature(-10.0));
        assert_eq!(app.gauge.value(), 0.0);
    }

    #[test]
    fn last_applied_temperature_wins() {
        // Overlapping fetches resolve in arrival order; whichever result
        // is applied last is the one displayed.
        let mut app = App::new();
        app.apply(Message::Temperature(40.0));
        app.apply(Message::Temperature(10.0));
        assert_eq!(app.temperature, Some(10.0));
        assert_eq!(app.gauge.value(), 20.0);
    }
}

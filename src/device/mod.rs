pub mod client;
pub mod error;

use std::{sync::mpsc::Sender, thread, time::Duration};

use crate::device::{
    client::{DeviceClient, LedCommand},
    error::DeviceError,
};

/// Results flowing from the background fetchers into the app.
pub enum Message {
    Temperature(f64),
    LedState(String),
    CommandOutcome(Result<String, DeviceError>),
}

/// Poll the temperature endpoint forever. The first fetch happens
/// immediately; failed ticks are logged and dropped, the UI keeps its
/// last-known-good value until the next success.
pub fn poll_temperature(tx: Sender<Message>, client: DeviceClient, interval: Duration) {
    thread::spawn(move || {
        loop {
            match client.fetch_temperature() {
                Ok(celsius) => {
                    if tx.send(Message::Temperature(celsius)).is_err() {
                        break;
                    }
                }
                Err(err) => log::error!("temperature poll failed: {err}"),
            }
            thread::sleep(interval);
        }
    });
}

/// Poll the LED state endpoint forever, same discipline as the
/// temperature poller.
pub fn poll_led_state(tx: Sender<Message>, client: DeviceClient, interval: Duration) {
    thread::spawn(move || {
        loop {
            match client.fetch_led_state() {
                Ok(led) => {
                    if tx.send(Message::LedState(led)).is_err() {
                        break;
                    }
                }
                Err(err) => log::error!("LED state poll failed: {err}"),
            }
            thread::sleep(interval);
        }
    });
}

/// Fire one LED command off-thread. Unlike the pollers the outcome is
/// always reported, failures included, so the app can alert the user.
pub fn dispatch_led_command(tx: Sender<Message>, client: DeviceClient, command: LedCommand) {
    thread::spawn(move || {
        let outcome = client.send_led_command(command);
        let _ = tx.send(Message::CommandOutcome(outcome));
    });
}

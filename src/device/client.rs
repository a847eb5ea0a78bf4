use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::error::DeviceError;

/// LED command vocabulary understood by the device firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    On,
    Off,
}

impl LedCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedCommand::On => "On",
            LedCommand::Off => "Off",
        }
    }
}

/// Which backend temperature metric to poll. `tempvar` is a server-side
/// counter variable, `temperature` a live sensor read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureMetric {
    #[default]
    Tempvar,
    Temperature,
}

impl TemperatureMetric {
    fn path(&self) -> &'static str {
        match self {
            TemperatureMetric::Tempvar => "/device/metrics/tempvar",
            TemperatureMetric::Temperature => "/device/metrics/temperature",
        }
    }
}

#[derive(Serialize)]
struct CommandRequest<'a> {
    command: &'a str,
}

/// Reply shape shared by the LED state and command endpoints.
#[derive(Debug, Deserialize)]
struct LedReply {
    #[serde(default)]
    result: String,
    led: Option<String>,
    message: Option<String>,
}

impl LedReply {
    fn into_led(self) -> Result<String, DeviceError> {
        match (self.result.as_str(), self.led) {
            ("ok", Some(led)) => Ok(led),
            _ => Err(DeviceError::Rejected(
                self.message.unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TemperatureReply {
    #[serde(default)]
    result: String,
    temperature_c: Option<TempValue>,
    message: Option<String>,
}

/// The backend serializes `temperature_c` as a number or a string
/// depending on which path produced it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TempValue {
    Number(f64),
    Text(String),
}

impl TemperatureReply {
    fn into_celsius(self) -> Result<f64, DeviceError> {
        let value = match (self.result.as_str(), self.temperature_c) {
            ("ok", Some(value)) => value,
            _ => {
                return Err(DeviceError::Rejected(
                    self.message.unwrap_or_else(|| "unknown".to_string()),
                ));
            }
        };
        let celsius = match value {
            TempValue::Number(n) => n,
            TempValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| DeviceError::BadReading(text.clone()))?,
        };
        if celsius.is_nan() {
            return Err(DeviceError::BadReading("NaN".to_string()));
        }
        Ok(celsius)
    }
}

/// Synchronous HTTP client for the device backend. Cheap to clone; each
/// poller thread owns its own copy.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    base_url: String,
    metric: TemperatureMetric,
    timeout: Option<Duration>,
}

impl DeviceClient {
    pub fn new(base_url: &str, metric: TemperatureMetric, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            metric,
            timeout,
        }
    }

    /// POST an LED command. The backend acknowledges with the label it
    /// settled on; a non-ok result carries the backend's message.
    pub fn send_led_command(&self, command: LedCommand) -> Result<String, DeviceError> {
        let url = format!("{}/device/led/action", self.base_url);
        let mut request = ureq::post(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = match request.send_json(CommandRequest {
            command: command.as_str(),
        }) {
            Ok(response) => response,
            // Error statuses still carry a JSON body with the failure message.
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => return Err(err.into()),
        };
        let reply: LedReply = response.into_json()?;
        reply.into_led()
    }

    pub fn fetch_led_state(&self) -> Result<String, DeviceError> {
        let reply: LedReply = self.get_json("/device/led/state")?;
        reply.into_led()
    }

    pub fn fetch_temperature(&self) -> Result<f64, DeviceError> {
        let reply: TemperatureReply = self.get_json(self.metric.path())?;
        reply.into_celsius()
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, DeviceError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = ureq::get(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => return Err(err.into()),
        };
        Ok(response.into_json()?)
    }
}

use std::{fs, time::Duration};
use serde::Deserialize;

use crate::device::client::TemperatureMetric;

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub tick_rate: Option<Duration>,
    #[serde(default)]
    pub temperature_poll_rate: Option<Duration>,
    #[serde(default)]
    pub led_poll_rate: Option<Duration>,
    /// No timeout when unset; a hung request stalls only its own poller.
    #[serde(default)]
    pub request_timeout: Option<Duration>,
    #[serde(default)]
    pub full_scale_celsius: Option<f64>,
    #[serde(default)]
    pub temperature_metric: Option<TemperatureMetric>,
}

impl AppConfig {
    const BASE_URL: &str = "http://127.0.0.1:8080";
    const TICK_RATE: Duration = Duration::from_millis(100);
    const TEMPERATURE_POLL_RATE: Duration = Duration::from_secs(3);
    const LED_POLL_RATE: Duration = Duration::from_secs(6);
    const FULL_SCALE_CELSIUS: f64 = 50.0;

    pub fn new(config_path: &str) -> Self {
        let config_yml = Self::load_config(config_path);
        Self {
            base_url: Some(config_yml.base_url.unwrap_or_else(|| Self::BASE_URL.to_string())),
            tick_rate: Some(config_yml.tick_rate.unwrap_or(Self::TICK_RATE)),
            temperature_poll_rate: Some(config_yml.temperature_poll_rate.unwrap_or(Self::TEMPERATURE_POLL_RATE)),
            led_poll_rate: Some(config_yml.led_poll_rate.unwrap_or(Self::LED_POLL_RATE)),
            request_timeout: config_yml.request_timeout,
            full_scale_celsius: Some(config_yml.full_scale_celsius.unwrap_or(Self::FULL_SCALE_CELSIUS)),
            temperature_metric: Some(config_yml.temperature_metric.unwrap_or_default()),
        }
    }

    fn load_config(config_path: &str) -> Self {
        let config_str = match fs::read_to_string(config_path) {
            Ok(s) => s,
            Err(err) => {
                log::warn!("Error opening config file: {}", err);
                return AppConfig::default();
            }
        };
        match serde_yml::from_str(&config_str) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error deserializing config file: {}", err);
                return AppConfig::default();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::new("./no_such_config.yaml");
        assert_eq!(config.base_url.as_deref(), Some(AppConfig::BASE_URL));
        assert_eq!(config.temperature_poll_rate, Some(Duration::from_secs(3)));
        assert_eq!(config.led_poll_rate, Some(Duration::from_secs(6)));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.full_scale_celsius, Some(50.0));
        assert_eq!(config.temperature_metric, Some(TemperatureMetric::Tempvar));
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_keys() {
        let parsed: AppConfig =
            serde_yml::from_str("base_url: http://device.local:9000\ntemperature_metric: temperature\n")
                .expect("partial config should deserialize");
        assert_eq!(parsed.base_url.as_deref(), Some("http://device.local:9000"));
        assert_eq!(parsed.temperature_metric, Some(TemperatureMetric::Temperature));
        assert_eq!(parsed.tick_rate, None);
    }
}

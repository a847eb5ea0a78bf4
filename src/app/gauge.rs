/// Color band of the dial, selected by fixed thresholds on the
/// percentage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    Orange,
    Red,
}

/// The dial itself: one clamped percentage plus everything derived from
/// it. Nothing outside this type touches the stored value.
#[derive(Debug, Default)]
pub struct GaugeState {
    value: f64,
}

impl GaugeState {
    const WARN_THRESHOLD: f64 = 30.0;
    const CRIT_THRESHOLD: f64 = 60.0;

    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, 100.0);
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Filled portion and remainder of the ring.
    pub fn split(&self) -> [f64; 2] {
        [self.value, 100.0 - self.value]
    }

    pub fn ratio(&self) -> f64 {
        self.value / 100.0
    }

    pub fn band(&self) -> Band {
        if self.value < Self::WARN_THRESHOLD {
            Band::Green
        } else if self.value < Self::CRIT_THRESHOLD {
            Band::Orange
        } else {
            Band::Red
        }
    }

    pub fn label(&self) -> String {
        format!("{:.2}%", self.value)
    }
}

/// Map a Celsius reading into the gauge's percentage domain.
pub fn celsius_to_percent(celsius: f64, full_scale: f64) -> f64 {
    (celsius / full_scale * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut gauge = GaugeState::default();
        gauge.set_value(-5.0);
        let low = gauge.value();
        gauge.set_value(0.0);
        assert_eq!(low, gauge.value());
        assert_eq!(low, 0.0);
    }

    #[test]
    fn oversized_values_clamp_to_hundred() {
        let mut gauge = GaugeState::default();
        gauge.set_value(123.4);
        let high = gauge.value();
        gauge.set_value(100.0);
        assert_eq!(high, gauge.value());
        assert_eq!(high, 100.0);
    }

    #[test]
    fn band_boundaries() {
        let mut gauge = GaugeState::default();
        gauge.set_value(29.99);
        assert_eq!(gauge.band(), Band::Green);
        gauge.set_value(30.0);
        assert_eq!(gauge.band(), Band::Orange);
        gauge.set_value(59.99);
        assert_eq!(gauge.band(), Band::Orange);
        gauge.set_value(60.0);
        assert_eq!(gauge.band(), Band::Red);
    }

    #[test]
    fn split_partitions_the_ring() {
        let mut gauge = GaugeState::default();
        gauge.set_value(42.0);
        assert_eq!(gauge.split(), [42.0, 58.0]);
    }

    #[test]
    fn label_is_two_decimals_with_percent_suffix() {
        let mut gauge = GaugeState::default();
        gauge.set_value(42.0);
        assert_eq!(gauge.label(), "42.00%");
    }

    #[test]
    fn celsius_mapping_at_fifty_degree_scale() {
        assert_eq!(celsius_to_percent(25.0, 50.0), 50.0);
        assert_eq!(celsius_to_percent(60.0, 50.0), 100.0);
        assert_eq!(celsius_to_percent(-10.0, 50.0), 0.0);
    }
}

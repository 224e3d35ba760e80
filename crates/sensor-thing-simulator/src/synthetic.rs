//! Synthetic ambient readings for driving the screen without hardware.

use sensor_thing_core::sensors::{SensorEvent, SensorKind};

/// Generates slowly varying light and temperature readings.
pub struct SyntheticSensors {
    /// Simulated seconds since start.
    elapsed_secs: f64,
}

impl SyntheticSensors {
    pub fn new() -> Self {
        Self { elapsed_secs: 0.0 }
    }

    /// Advance the clock and return one event per sensor.
    pub fn next_events(&mut self, dt_secs: f64) -> [SensorEvent; 2] {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        // Light: sweeps 0–20000 lux every ~2 minutes with some flicker
        let lux = 10_000.0 - 10_000.0 * (t / 20.0).cos() + 150.0 * (t * 3.1).sin();

        // Temperature: 12–36 °C on a slower cycle
        let temp_c = 24.0 + 12.0 * (t / 45.0).sin() + 0.4 * (t / 7.0).cos();

        [
            SensorEvent::new(SensorKind::Light, lux.max(0.0) as f32),
            SensorEvent::new(SensorKind::AmbientTemperature, temp_c as f32),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_stay_in_sensor_ranges() {
        let mut sensors = SyntheticSensors::new();
        for _ in 0..2_000 {
            let [light, temp] = sensors.next_events(0.5);
            let lux = light.first().unwrap_or_default();
            let temp_c = temp.first().unwrap_or_default();
            assert!((0.0..=20_200.0).contains(&lux), "lux {lux} out of range");
            assert!((11.0..=37.0).contains(&temp_c), "temperature {temp_c} out of range");
        }
    }
}

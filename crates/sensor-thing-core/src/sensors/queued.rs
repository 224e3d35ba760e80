//! In-memory sensor source
//!
//! Holds a queue of pending events and hands them out on
//! [`dispatch`](SensorSource::dispatch). Used by the desktop simulator as its
//! platform adapter, and by tests to script readings.

use alloc::collections::VecDeque;

use log::{debug, warn};

use super::{SamplingRate, SensorError, SensorEvent, SensorKind, SensorListener, SensorSource};

/// Upper bound on queued events; older events are dropped first.
const QUEUE_CAPACITY: usize = 64;

pub struct QueuedSensorSource {
    has_light: bool,
    has_temperature: bool,
    registered: [Option<SamplingRate>; 2],
    pending: VecDeque<SensorEvent>,
}

impl QueuedSensorSource {
    /// Source exposing the given sensors.
    pub fn new(has_light: bool, has_temperature: bool) -> Self {
        Self {
            has_light,
            has_temperature,
            registered: [None; 2],
            pending: VecDeque::new(),
        }
    }

    /// Queue a reading.
    ///
    /// Readings for sensors that are absent or not registered are dropped,
    /// the same way a platform stops delivering after unregistration.
    pub fn push(&mut self, event: SensorEvent) {
        if self.registered_rate(event.kind).is_none() {
            debug!("Dropping {} event, sensor not registered", event.kind);
            return;
        }

        if self.pending.len() >= QUEUE_CAPACITY {
            warn!("Sensor queue full, dropping oldest event");
            self.pending.pop_front();
        }
        self.pending.push_back(event);
    }

    /// Rate the sensor is registered at, if any.
    pub fn registered_rate(&self, kind: SensorKind) -> Option<SamplingRate> {
        self.registered[slot(kind)]
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

fn slot(kind: SensorKind) -> usize {
    match kind {
        SensorKind::Light => 0,
        SensorKind::AmbientTemperature => 1,
    }
}

impl SensorSource for QueuedSensorSource {
    fn has_sensor(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::Light => self.has_light,
            SensorKind::AmbientTemperature => self.has_temperature,
        }
    }

    fn register(&mut self, kind: SensorKind, rate: SamplingRate) -> Result<(), SensorError> {
        if !self.has_sensor(kind) {
            return Err(SensorError::NotPresent { kind });
        }
        self.registered[slot(kind)] = Some(rate);
        Ok(())
    }

    fn unregister_all(&mut self) {
        self.registered = [None; 2];
        self.pending.clear();
    }

    fn dispatch<L: SensorListener>(&mut self, listener: &mut L) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.pending.pop_front() {
            listener.on_sensor_changed(&event);
            delivered += 1;
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        events: Vec<SensorEvent>,
    }

    impl SensorListener for Recorder {
        fn on_sensor_changed(&mut self, event: &SensorEvent) {
            self.events.push(event.clone());
        }
    }

    #[test]
    fn test_register_absent_sensor_fails() {
        let mut source = QueuedSensorSource::new(true, false);
        assert_eq!(
            source.register(SensorKind::AmbientTemperature, SamplingRate::Ui),
            Err(SensorError::NotPresent {
                kind: SensorKind::AmbientTemperature
            })
        );
        assert!(source.register(SensorKind::Light, SamplingRate::Ui).is_ok());
        assert_eq!(source.registered_rate(SensorKind::Light), Some(SamplingRate::Ui));
    }

    #[test]
    fn test_unregistered_events_are_dropped() {
        let mut source = QueuedSensorSource::new(true, true);
        source.push(SensorEvent::new(SensorKind::Light, 10.0));
        assert_eq!(source.pending(), 0);

        source.register(SensorKind::Light, SamplingRate::Ui).ok();
        source.push(SensorEvent::new(SensorKind::Light, 10.0));
        source.push(SensorEvent::new(SensorKind::AmbientTemperature, 20.0));
        assert_eq!(source.pending(), 1);
    }

    #[test]
    fn test_dispatch_delivers_in_order() {
        let mut source = QueuedSensorSource::new(true, true);
        source.register(SensorKind::Light, SamplingRate::Ui).ok();
        source.register(SensorKind::AmbientTemperature, SamplingRate::Ui).ok();
        source.push(SensorEvent::new(SensorKind::Light, 1.0));
        source.push(SensorEvent::new(SensorKind::AmbientTemperature, 2.0));
        source.push(SensorEvent::new(SensorKind::Light, 3.0));

        let mut recorder = Recorder::default();
        assert_eq!(source.dispatch(&mut recorder), 3);
        let firsts: Vec<_> = recorder.events.iter().filter_map(SensorEvent::first).collect();
        assert_eq!(firsts, [1.0, 2.0, 3.0]);
        assert_eq!(source.dispatch(&mut recorder), 0);
    }

    #[test]
    fn test_queue_drops_oldest_when_full() {
        let mut source = QueuedSensorSource::new(true, false);
        source.register(SensorKind::Light, SamplingRate::Fastest).ok();
        for i in 0..(QUEUE_CAPACITY + 5) {
            source.push(SensorEvent::new(SensorKind::Light, i as f32));
        }
        assert_eq!(source.pending(), QUEUE_CAPACITY);

        let mut recorder = Recorder::default();
        source.dispatch(&mut recorder);
        assert_eq!(recorder.events[0].first(), Some(5.0));
    }

    #[test]
    fn test_unregister_all_clears_pending() {
        let mut source = QueuedSensorSource::new(true, true);
        source.register(SensorKind::Light, SamplingRate::Ui).ok();
        source.push(SensorEvent::new(SensorKind::Light, 1.0));
        source.unregister_all();
        assert_eq!(source.pending(), 0);
        assert_eq!(source.registered_rate(SensorKind::Light), None);
    }
}

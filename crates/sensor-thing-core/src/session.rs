//! Foreground sensor session
//!
//! Ties a [`SensorSource`] to the screen state following the screen's
//! visibility: sensors are registered on [`resume`](SensorSession::resume)
//! and released on [`pause`](SensorSession::pause). While resumed,
//! [`pump`](SensorSession::pump) forwards pushed readings into the state.

use log::{error, info, warn};

use crate::config::Config;
use crate::screen::{ScreenModel, ScreenState};
use crate::sensors::{SensorKind, SensorSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Built, never shown.
    Created,
    /// Visible, sensors registered.
    Resumed,
    /// In the background, sensors released.
    Paused,
}

pub struct SensorSession<S: SensorSource> {
    source: S,
    config: Config,
    screen: ScreenState,
    state: SessionState,
}

impl<S: SensorSource> SensorSession<S> {
    /// Probe the source for its sensors and build the initial screen state.
    pub fn new(source: S, config: Config) -> Self {
        let has_light = source.has_sensor(SensorKind::Light);
        let has_temperature = source.has_sensor(SensorKind::AmbientTemperature);
        info!(
            "Sensor session: light={} temperature={}",
            has_light, has_temperature
        );

        let screen = ScreenState::new(has_light, has_temperature)
            .with_temperature_weight(config.temperature_weight);

        Self {
            source,
            config,
            screen,
            state: SessionState::Created,
        }
    }

    /// Register every available sensor at the configured rate.
    ///
    /// A sensor that fails to register is shown as unavailable from then on.
    pub fn resume(&mut self) {
        if self.state == SessionState::Resumed {
            return;
        }

        for kind in SensorKind::ALL {
            if !self.screen.reading(kind).is_available() {
                continue;
            }
            if let Err(e) = self.source.register(kind, self.config.sampling_rate) {
                error!("Failed to register {} sensor: {}", kind, e);
                self.screen.set_unavailable(kind);
            }
        }

        self.state = SessionState::Resumed;
    }

    /// Release all sensors.
    pub fn pause(&mut self) {
        if self.state != SessionState::Resumed {
            warn!("pause() called while {:?}", self.state);
            return;
        }
        self.source.unregister_all();
        self.state = SessionState::Paused;
    }

    /// Deliver pending readings into the screen state.
    ///
    /// Returns the number of events applied. Nothing is delivered unless
    /// the session is resumed.
    pub fn pump(&mut self) -> usize {
        if self.state != SessionState::Resumed {
            return 0;
        }
        self.source.dispatch(&mut self.screen)
    }

    pub fn model(&self) -> ScreenModel {
        self.screen.model(self.config.labels())
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

//! Desktop simulator for the sensor-thing screen.
//!
//! Renders the sensor-thing core screen with `embedded-graphics-simulator`,
//! fed by a queued sensor source standing in for the platform.
//!
//! # Usage
//!
//! ```text
//! sensor-thing-simulator [--snapshot <file.png>] [--lux <value>] [--temp <value>]
//!                        [--no-light] [--no-temp] [--config <file>]
//! ```
//!
//! With `--snapshot` (or when built without the `window` feature) one frame
//! is rendered with the given readings and saved as PNG. Otherwise an SDL2
//! window shows synthetic readings:
//!
//! | Key | Action                         |
//! |-----|--------------------------------|
//! | P   | Pause / resume the session     |
//! | Q   | Quit                           |
//!
//! Device config starts from the postcard blob given with `--config` (if it
//! exists), then takes overrides from the environment (a `.env` file is
//! honored): `SENSOR_THING_LOCALE` (`es`/`en`), `SENSOR_THING_RATE`
//! (`fastest`/`game`/`ui`/`normal`) and `SENSOR_THING_WEIGHT`. The resulting
//! config is written back to the `--config` file.

#[cfg_attr(not(feature = "window"), allow(dead_code))]
mod synthetic;

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::process::ExitCode;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{error, info, warn};

use sensor_thing_core::config::Config;
use sensor_thing_core::screen::Locale;
use sensor_thing_core::sensors::{QueuedSensorSource, SamplingRate, SensorEvent, SensorKind};
use sensor_thing_core::session::SensorSession;
use sensor_thing_core::ui::{
    DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable, FrameBuffer, SensorScreen,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window and snapshots.
const WINDOW_SCALE: u32 = 2;

/// Snapshot file used when no window is available.
#[cfg(not(feature = "window"))]
const DEFAULT_SNAPSHOT: &str = "sensor-thing.png";

// ---------------------------------------------------------------------------
// Command line and environment
// ---------------------------------------------------------------------------

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    snapshot: Option<String>,
    lux: Option<f32>,
    temp_c: Option<f32>,
    no_light: bool,
    no_temp: bool,
    config: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--snapshot" => {
                options.snapshot = Some(args.next().ok_or("--snapshot needs a file name")?);
            }
            "--lux" => options.lux = Some(parse_number(&arg, args.next())?),
            "--temp" => options.temp_c = Some(parse_number(&arg, args.next())?),
            "--no-light" => options.no_light = true,
            "--no-temp" => options.no_temp = true,
            "--config" => {
                options.config = Some(args.next().ok_or("--config needs a file name")?);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn parse_number(flag: &str, value: Option<String>) -> Result<f32, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: not a number: {value}"))
}

/// Build the device config: stored blob, then environment overrides.
///
/// When `path` is given the result is stored back there.
fn load_config(path: Option<&str>) -> Config {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        warn!("Ignoring unreadable .env file: {}", e);
    }

    let stored = path.map(read_config).unwrap_or_default();
    let config = apply_overrides(stored, |key| env::var(key).ok());

    if let Some(path) = path {
        write_config(path, &config);
    }

    config
}

fn read_config(path: &str) -> Config {
    match fs::read(path) {
        Ok(bytes) => match Config::from_bytes(&bytes) {
            Ok(config) => {
                info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                warn!("{} in {}, using defaults", e, path);
                Config::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path, e);
            Config::default()
        }
    }
}

fn write_config(path: &str, config: &Config) {
    let bytes = match config.to_bytes() {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    if let Err(e) = fs::write(path, bytes) {
        error!("Failed to write config {}: {}", path, e);
    }
}

/// Apply `SENSOR_THING_*` overrides looked up through `var`.
fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(locale) = var("SENSOR_THING_LOCALE") {
        match locale.to_ascii_lowercase().as_str() {
            "es" | "spanish" => config.locale = Locale::Spanish,
            "en" | "english" => config.locale = Locale::English,
            other => warn!("Unknown SENSOR_THING_LOCALE {:?}, keeping default", other),
        }
    }

    if let Some(rate) = var("SENSOR_THING_RATE") {
        match rate.to_ascii_lowercase().as_str() {
            "fastest" => config.sampling_rate = SamplingRate::Fastest,
            "game" => config.sampling_rate = SamplingRate::Game,
            "ui" => config.sampling_rate = SamplingRate::Ui,
            "normal" => config.sampling_rate = SamplingRate::Normal,
            other => warn!("Unknown SENSOR_THING_RATE {:?}, keeping default", other),
        }
    }

    if let Some(weight) = var("SENSOR_THING_WEIGHT") {
        match weight.parse::<f32>() {
            Ok(value) if value.is_finite() => config.temperature_weight = value,
            _ => warn!("Invalid SENSOR_THING_WEIGHT {:?}, keeping default", weight),
        }
    }

    config
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Full-screen bounding rectangle.
fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

/// Redraw the screen into the framebuffer and push changes to the display.
fn render(
    screen: &mut SensorScreen,
    framebuffer: &mut FrameBuffer,
    display: &mut SimulatorDisplay<Rgb565>,
) {
    if !screen.is_dirty() {
        return;
    }
    let _ = screen.draw(framebuffer);
    let _ = framebuffer.flush(display);
    screen.mark_clean();
}

/// Render a single frame with fixed readings and save it as PNG.
fn snapshot(options: &Options, config: Config, path: &str) -> ExitCode {
    let source = QueuedSensorSource::new(!options.no_light, !options.no_temp);
    let mut session = SensorSession::new(source, config);
    session.resume();

    if let Some(lux) = options.lux {
        session
            .source_mut()
            .push(SensorEvent::new(SensorKind::Light, lux));
    }
    if let Some(temp_c) = options.temp_c {
        session
            .source_mut()
            .push(SensorEvent::new(SensorKind::AmbientTemperature, temp_c));
    }
    session.pump();

    let model = session.model();
    info!(
        "Light: {}, temperature: {}, background: #{:06X}",
        model.light.value,
        model.temperature.value,
        model.background.to_argb() & 0x00FF_FFFF
    );

    let mut display = SimulatorDisplay::<Rgb565>::new(screen_bounds().size);
    let mut framebuffer = FrameBuffer::new();
    let mut screen = SensorScreen::new(screen_bounds(), model);
    render(&mut screen, &mut framebuffer, &mut display);

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    match display.to_rgb_output_image(&output_settings).save_png(path) {
        Ok(()) => {
            info!("Snapshot written to {}", path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to write snapshot {}: {}", path, e);
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive window
// ---------------------------------------------------------------------------

#[cfg(feature = "window")]
fn run_window(options: &Options, config: Config) -> ExitCode {
    use std::time::{Duration, Instant};

    use embedded_graphics_simulator::{SimulatorEvent, Window, sdl2::Keycode};
    use sensor_thing_core::session::SessionState;

    use crate::synthetic::SyntheticSensors;

    /// Target frame duration (~30 FPS).
    const FRAME_DURATION: Duration = Duration::from_millis(33);

    let source = QueuedSensorSource::new(!options.no_light, !options.no_temp);
    let sample_interval = config.sampling_rate.period().max(FRAME_DURATION);
    let mut session = SensorSession::new(source, config);
    session.resume();

    let mut display = SimulatorDisplay::<Rgb565>::new(screen_bounds().size);
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Sensor Thing", &output_settings);

    let mut framebuffer = FrameBuffer::new();
    let mut screen = SensorScreen::new(screen_bounds(), session.model());
    let mut sensors = SyntheticSensors::new();
    let mut last_sample = Instant::now();

    // The SDL window is created on the first `update()`, which must precede `events()`.
    render(&mut screen, &mut framebuffer, &mut display);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::P => {
                        if session.state() == SessionState::Resumed {
                            info!("Pausing session");
                            session.pause();
                        } else {
                            info!("Resuming session");
                            session.resume();
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if last_sample.elapsed() >= sample_interval {
            let dt = last_sample.elapsed().as_secs_f64();
            for event in sensors.next_events(dt) {
                session.source_mut().push(event);
            }
            last_sample = Instant::now();
        }

        if session.pump() > 0 {
            screen.set_model(session.model());
        }

        render(&mut screen, &mut framebuffer, &mut display);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
    ExitCode::SUCCESS
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            error!("{}", message);
            return ExitCode::from(2);
        }
    };

    let config = load_config(options.config.as_deref());
    info!(
        "Starting sensor-thing simulator ({:?}, {:?}, weight {})",
        config.locale, config.sampling_rate, config.temperature_weight
    );

    if let Some(path) = options.snapshot.as_deref() {
        return snapshot(&options, config, path);
    }

    run_default(&options, config)
}

#[cfg(feature = "window")]
fn run_default(options: &Options, config: Config) -> ExitCode {
    run_window(options, config)
}

#[cfg(not(feature = "window"))]
fn run_default(options: &Options, config: Config) -> ExitCode {
    info!("Built without the `window` feature, writing a snapshot instead");
    snapshot(options, config, DEFAULT_SNAPSHOT)
}

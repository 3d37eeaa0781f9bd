/*
 *  main.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use env_logger::Env;
use log::{error, info, warn};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use rigaclock::app::{self, ClockApp, WidgetEvent};
use rigaclock::config::{self, Settings};
use rigaclock::display::drivers::HeadlessDriver;
use rigaclock::display::traits::DisplayDriver;
use rigaclock::display::LayoutConfig;
use rigaclock::timer::RepeatingTimer;
use rigaclock::weather::WeatherClient;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
async fn signal_handler() -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Hands every second, weather immediately and then every interval.
fn start_timers(
    settings: &Settings,
    client: WeatherClient,
    events: UnboundedSender<WidgetEvent>,
) -> Vec<RepeatingTimer> {
    let hands_events = events.clone();
    let hands = RepeatingTimer::spawn("Hands", settings.hands_interval, move || {
        let events = hands_events.clone();
        async move {
            // receiver gone means the display loop is shutting down
            let _ = events.send(WidgetEvent::Tick);
        }
    });

    let client = Arc::new(client);
    let weather = RepeatingTimer::spawn("Weather", settings.weather_interval, move || {
        let client = client.clone();
        let events = events.clone();
        async move {
            let sample = client.sample().await;
            let _ = events.send(WidgetEvent::Weather(sample));
        }
    });

    vec![hands, weather]
}

async fn stop_timers(timers: &mut [RepeatingTimer]) {
    for timer in timers.iter_mut() {
        if !timer.is_running() {
            warn!("{} timer ended before shutdown", timer.name());
        }
        timer.stop().await;
    }
}

/// Render a single frame, weather included, and write it out.
async fn snapshot(
    settings: &Settings,
    mut app: ClockApp,
    client: WeatherClient,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    app.redraw_weather(client.sample().await);
    let mut driver = HeadlessDriver::new(settings.width, settings.height)?;
    driver.init()?;
    app::present(&app, &mut driver)?;
    driver.save_ppm(path)?;
    info!("Snapshot written to {}", path.display());
    Ok(())
}

async fn run_headless(
    settings: &Settings,
    app: ClockApp,
    client: WeatherClient,
) -> Result<(), Box<dyn Error>> {
    let mut driver = HeadlessDriver::new(settings.width, settings.height)?.without_title();
    let (tx, rx) = unbounded_channel();
    let mut timers = start_timers(settings, client, tx.clone());

    let display = tokio::spawn(async move { app::run_display_loop(app, &mut driver, rx).await });

    if let Err(e) = signal_handler().await {
        error!("Signal handler failed: {}", e);
    }
    let _ = tx.send(WidgetEvent::Shutdown);
    stop_timers(&mut timers).await;
    display.await??;
    Ok(())
}

#[cfg(feature = "emulator")]
async fn run_emulator(
    settings: &Settings,
    app: ClockApp,
    client: WeatherClient,
) -> Result<(), Box<dyn Error>> {
    use rigaclock::display::drivers::EmulatorDriver;
    use rigaclock::display::emulator_window::{EmulatorWindow, EmulatorWindowConfig};

    let mut driver = EmulatorDriver::new(settings.width, settings.height, app.title())?;
    let state = driver.state();
    let layout = app.layout().clone();

    let (tx, rx) = unbounded_channel();
    let mut timers = start_timers(settings, client, tx.clone());

    // Spawn display loop in background, the window owns the main thread
    let display = tokio::spawn(async move { app::run_display_loop(app, &mut driver, rx).await });

    let signal_tx = tx.clone();
    tokio::spawn(async move {
        match signal_handler().await {
            Ok(()) => {
                let _ = signal_tx.send(WidgetEvent::Shutdown);
            }
            Err(e) => error!("Signal handler failed: {}", e),
        }
    });

    let window_config = EmulatorWindowConfig {
        scale: settings.scale,
        ..Default::default()
    };
    let window = EmulatorWindow::new(state, window_config, layout, tx.clone());
    let result = window.run();

    let _ = tx.send(WidgetEvent::Shutdown);
    stop_timers(&mut timers).await;
    display.await??;
    result?;
    Ok(())
}

#[tokio::main] // Requires the `tokio` runtime with `macros` and `rt-multi-thread` features
async fn main() -> Result<(), Box<dyn Error>> {
    let (settings, _cli) = config::load()?;

    // Initialize the logger, RUST_LOG still wins when set
    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str()))
        .format_timestamp_secs()
        .init();

    info!("{} keeping time in {}", env!("CARGO_PKG_NAME"), settings.city);
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let client = WeatherClient::new(&settings.weather_url, &settings.api_key, &settings.city)?;
    let layout = LayoutConfig::for_canvas(settings.width, settings.height);
    let app = ClockApp::new(
        layout,
        settings.translations_dir.clone(),
        &settings.city,
        settings.language,
    );

    if let Some(path) = settings.snapshot.as_deref() {
        return snapshot(&settings, app, client, path).await;
    }

    #[cfg(feature = "emulator")]
    if !settings.headless {
        info!("Opening {}x{} window", settings.width, settings.height);
        run_emulator(&settings, app, client).await?;
        info!("Closed down.");
        return Ok(());
    }

    info!("Running headless, waiting for a signal");
    run_headless(&settings, app, client).await?;
    info!("Closed down.");
    Ok(())
}

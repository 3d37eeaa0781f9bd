/*
 *  tests/display_integration.rs
 *
 *  Integration tests for the widget pipeline
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 */

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::unbounded_channel;

use rigaclock::app::{present, run_display_loop, ClockApp, WidgetEvent};
use rigaclock::config::{Cli, Config, Settings};
use rigaclock::display::canvas::Layer;
use rigaclock::display::drivers::HeadlessDriver;
use rigaclock::display::traits::DisplayDriver;
use rigaclock::display::LayoutConfig;
use rigaclock::timer::RepeatingTimer;
use rigaclock::translate::Language;
use rigaclock::weather::{WeatherClient, WeatherSample, DEFAULT_CITY};

fn lang_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/lang")
}

fn stock_app(lang: Language) -> ClockApp {
    ClockApp::new(LayoutConfig::for_canvas(440, 640), lang_dir(), DEFAULT_CITY, lang)
}

fn direct_client(url: &str) -> WeatherClient {
    let client = Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    WeatherClient::with_client(client, url, "test-key", DEFAULT_CITY)
}

/// One canned HTTP response on a loopback port.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}/data/2.5/weather", addr)
}

#[test]
fn test_default_settings_give_stock_layout() {
    let settings = Settings::resolve(&Config::default(), &Cli::default());
    let layout = LayoutConfig::for_canvas(settings.width, settings.height);
    assert_eq!(layout.clock.radius, 190);
    assert_eq!(layout.clock.center.x, 220);
    assert_eq!(layout.clock.center.y, 250);
}

#[tokio::test]
async fn test_weather_timer_feeds_the_widget() {
    let url = serve_once(
        "200 OK",
        r#"{"main":{"temp":3.6},"weather":[{"description":"light rain"}],"name":"Riga"}"#,
    )
    .await;
    let client = direct_client(&url);
    let (tx, mut rx) = unbounded_channel();

    let mut timer = RepeatingTimer::spawn("Weather", Duration::from_secs(600), move || {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            let _ = tx.send(WidgetEvent::Weather(client.sample().await));
        }
    });

    let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .unwrap()
        .unwrap();
    timer.stop().await;

    let mut app = stock_app(Language::En);
    assert!(app.handle(event));
    assert_eq!(app.canvas().texts(Layer::Weather), vec!["4°C, Light rain"]);
}

#[tokio::test]
async fn test_unreachable_server_shows_unavailable() {
    // bind then drop so the port refuses connections
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sample = direct_client(&format!("http://{}/data/2.5/weather", addr))
        .sample()
        .await;
    assert_eq!(sample, WeatherSample::Unavailable);

    let mut app = stock_app(Language::Ru);
    app.redraw_weather(sample);
    assert_eq!(
        app.canvas().texts(Layer::Weather),
        vec!["Weather data unavailable"]
    );
}

#[test]
fn test_headless_frame_matches_canvas() {
    let app = stock_app(Language::En);
    let mut driver = HeadlessDriver::new(440, 640).unwrap();
    driver.init().unwrap();
    present(&app, &mut driver).unwrap();

    assert_eq!(driver.framebuffer(), &app.canvas().rasterize());
    assert_eq!(driver.state().lock().unwrap().flush_count, 1);
}

#[test]
fn test_snapshot_file_is_full_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.ppm");

    let app = stock_app(Language::Ru);
    let mut driver = HeadlessDriver::new(440, 640).unwrap();
    driver.init().unwrap();
    present(&app, &mut driver).unwrap();
    driver.save_ppm(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let header = b"P6\n440 640\n255\n";
    assert!(bytes.starts_with(header));
    assert_eq!(bytes.len(), header.len() + 440 * 640 * 3);
}

#[tokio::test]
async fn test_language_round_trip_through_display_loop() {
    let mut driver = HeadlessDriver::new(440, 640).unwrap();
    let state = driver.state();
    let (tx, rx) = unbounded_channel();

    let display = tokio::spawn(async move {
        run_display_loop(stock_app(Language::En), &mut driver, rx).await
    });

    tx.send(WidgetEvent::Language(Language::Ru)).unwrap();
    tx.send(WidgetEvent::Language(Language::En)).unwrap();
    tx.send(WidgetEvent::Shutdown).unwrap();
    display.await.unwrap().unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.flush_count, 3);
    assert_eq!(state.last_title.as_deref(), Some("Riga Analog Clock"));
    assert!(state.closed);
}

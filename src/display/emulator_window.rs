/*
 *  display/emulator_window.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *  (c) 2020-26 Stuart Hunter
 *
 *  Desktop window: shows published frames, turns keys and clicks into events
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::prelude::Point;
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use tokio::sync::mpsc::UnboundedSender;
use winit::{
    dpi::PhysicalSize,
    event::{Event, VirtualKeyCode},
    event_loop::{ControlFlow, EventLoop},
    platform::run_return::EventLoopExtRunReturn,
    window::WindowBuilder,
};
use winit_input_helper::WinitInputHelper;

use crate::app::WidgetEvent;
use crate::display::drivers::emulator::{lock_state, EmulatorState};
use crate::display::error::DisplayError;
use crate::display::layout::LayoutConfig;
use crate::translate::Language;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Emulator window configuration
#[derive(Debug, Clone)]
pub struct EmulatorWindowConfig {
    /// Pixel scale factor (canvas pixel → screen pixels)
    pub scale: u32,

    /// Where S-key screenshots go
    pub screenshot_dir: PathBuf,

    /// How often the window looks for a new frame
    pub frame_interval: Duration,
}

impl Default for EmulatorWindowConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            screenshot_dir: PathBuf::from("."),
            frame_interval: Duration::from_millis(33),
        }
    }
}

/// Emulator window manager
pub struct EmulatorWindow {
    state: Arc<Mutex<EmulatorState>>,
    config: EmulatorWindowConfig,
    layout: LayoutConfig,
    events: UnboundedSender<WidgetEvent>,
    last_frame: u64,
    screenshots: u32,
}

impl EmulatorWindow {
    pub fn new(
        state: Arc<Mutex<EmulatorState>>,
        config: EmulatorWindowConfig,
        layout: LayoutConfig,
        events: UnboundedSender<WidgetEvent>,
    ) -> Self {
        Self {
            state,
            config,
            layout,
            events,
            last_frame: u64::MAX,
            screenshots: 0,
        }
    }

    /// Run the window on the calling (main) thread until it is closed,
    /// either by the user or by the display loop clearing `running`.
    pub fn run(mut self) -> Result<(), DisplayError> {
        let (width, height, title) = {
            let state = lock_state(&self.state);
            (state.width, state.height, state.title.clone())
        };
        let scale = self.config.scale.max(1);

        let mut event_loop = EventLoop::new();
        let mut input = WinitInputHelper::new();

        let window = WindowBuilder::new()
            .with_title(&title)
            .with_inner_size(PhysicalSize::new(width * scale, height * scale))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(|e| DisplayError::Window(e.to_string()))?;

        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        let mut pixels = Pixels::new(width, height, surface_texture)
            .map_err(|e| DisplayError::Window(e.to_string()))?;

        info!("Window open: {}x{} at {}x scale", width, height, scale);
        info!("Keys: E English, R Russian, S screenshot, Esc/Q quit");

        let mut shown_title = title;

        event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::WaitUntil(Instant::now() + self.config.frame_interval);

            if let Event::RedrawRequested(_) = event {
                self.render(pixels.frame_mut());
                if let Err(err) = pixels.render() {
                    error!("pixels.render() failed: {}", err);
                    self.send(WidgetEvent::Shutdown);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            if input.update(&event) {
                if input.close_requested()
                    || input.destroyed()
                    || input.key_pressed(VirtualKeyCode::Escape)
                    || input.key_pressed(VirtualKeyCode::Q)
                {
                    self.send(WidgetEvent::Shutdown);
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                if input.key_pressed(VirtualKeyCode::E) {
                    self.send(WidgetEvent::Language(Language::En));
                }

                if input.key_pressed(VirtualKeyCode::R) {
                    self.send(WidgetEvent::Language(Language::Ru));
                }

                if input.key_pressed(VirtualKeyCode::S) {
                    self.screenshots += 1;
                    let path = self
                        .config
                        .screenshot_dir
                        .join(format!("rigaclock-{:03}.ppm", self.screenshots));
                    self.send(WidgetEvent::Screenshot(path));
                }

                if input.mouse_pressed(0) {
                    if let Some(pos) = input.mouse() {
                        if let Ok((x, y)) = pixels.window_pos_to_pixel(pos) {
                            let point = Point::new(x as i32, y as i32);
                            if let Some(lang) = self.layout.menu_entry_at(point) {
                                debug!("Menu click at {:?}: {}", point, lang);
                                self.send(WidgetEvent::Language(lang));
                            }
                        }
                    }
                }
            }

            let (running, frame, title) = {
                let state = lock_state(&self.state);
                (state.running, state.frame_count, state.title.clone())
            };
            if !running {
                *control_flow = ControlFlow::Exit;
                return;
            }
            if title != shown_title {
                window.set_title(&title);
                shown_title = title;
            }
            if frame != self.last_frame {
                window.request_redraw();
            }
        });

        lock_state(&self.state).running = false;
        info!("Window closed");
        Ok(())
    }

    fn send(&self, event: WidgetEvent) {
        if self.events.send(event).is_err() {
            debug!("Display loop gone, event dropped");
        }
    }

    fn render(&mut self, frame: &mut [u8]) {
        let state = lock_state(&self.state);
        let n = frame.len().min(state.rgba.len());
        frame[..n].copy_from_slice(&state.rgba[..n]);
        self.last_frame = state.frame_count;
    }
}

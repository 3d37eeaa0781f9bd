/*
 *  timer.rs
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

use log::{debug, error, info};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Background task that runs a callback every `period` until stopped.
///
/// The first run happens immediately. A late tick is run once and the
/// schedule shifts, so a slow callback never causes a burst of catch-up runs.
#[derive(Debug)]
pub struct RepeatingTimer {
    name: &'static str,
    stop_sender: Option<mpsc::Sender<()>>,
    poll_handle: Option<JoinHandle<()>>,
}

impl RepeatingTimer {
    /// Spawn on the current tokio runtime. The callback's future is awaited
    /// before the next tick is considered.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut callback: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);

        let poll_handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        callback().await;
                    }
                    _ = stop_rx.recv() => {
                        debug!("{} timer received stop signal. Exiting.", name);
                        break;
                    }
                }
            }
        });

        info!("{} timer started, every {:?}", name, period);
        Self {
            name,
            stop_sender: Some(stop_tx),
            poll_handle: Some(poll_handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.poll_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Signal the task and wait for it to finish.
    pub async fn stop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            // a closed channel means the task already ended
            let _ = sender.send(()).await;
        }
        if let Some(handle) = self.poll_handle.take() {
            handle
                .await
                .unwrap_or_else(|e| error!("{} timer failed to join: {}", self.name, e));
        }
        info!("{} timer stopped.", self.name);
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        // Drop is not async, so we can only try_send.
        if let Some(sender) = self.stop_sender.take() {
            if let Err(e) = sender.try_send(()) {
                debug!("{} timer stop on drop: {}", self.name, e);
            }
        }
    }
}

use bevy::prelude::*;
use std::fmt;
use std::time::Duration;

use crate::orbit::SimulationTime;

/// Playback state of the animation driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Running,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Stopped => f.write_str("stopped"),
            PlaybackState::Running => f.write_str("playing"),
        }
    }
}

#[derive(Resource, Debug)]
/// Fixed-cadence driver that advances the orbit while running.
///
/// The ticker is the only scheduled task. It exists exactly while the driver is
/// running, so there can never be two, and dropping it on stop discards any
/// partially elapsed period.
pub struct AnimationDriver {
    /// Period between model-update ticks.
    interval: Duration,
    /// Repeating timer present only while running.
    ticker: Option<Timer>,
}

impl AnimationDriver {
    /// Build a stopped driver ticking every `interval` once started.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ticker: None,
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        if self.ticker.is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }

    /// Return whether the driver is running.
    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    /// Start ticking. Returns `false` and keeps the existing ticker when already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.ticker = Some(Timer::new(self.interval, TimerMode::Repeating));
        info!("animation started ({} ms tick)", self.interval.as_millis());
        true
    }

    /// Stop ticking. Returns `false` when already stopped.
    pub fn stop(&mut self) -> bool {
        if self.ticker.take().is_none() {
            return false;
        }
        info!("animation stopped");
        true
    }

    /// Flip between running and stopped, returning the new state.
    pub fn toggle(&mut self) -> PlaybackState {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.state()
    }

    /// Stop and restore the initial simulation time.
    pub fn reset(&mut self, time: &mut SimulationTime) {
        self.stop();
        *time = SimulationTime::default();
        info!("simulation reset");
    }

    /// Advance the ticker by `delta` and return how many ticks fired.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        let Some(ticker) = self.ticker.as_mut() else {
            return 0;
        };
        ticker.tick(delta).times_finished_this_tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    /// Count ticks over one second of frames of `frame` length.
    fn ticks_over_one_second(driver: &mut AnimationDriver, frame: Duration) -> u32 {
        let frames = Duration::from_secs(1).as_millis() / frame.as_millis();
        (0..frames).map(|_| driver.tick(frame)).sum()
    }

    /// Verify a stopped driver never ticks.
    #[test]
    fn stopped_driver_does_not_tick() {
        let mut driver = AnimationDriver::new(TICK);
        assert_eq!(driver.state(), PlaybackState::Stopped);
        assert_eq!(ticks_over_one_second(&mut driver, Duration::from_millis(10)), 0);
    }

    /// Verify starting twice keeps a single 10 Hz ticker.
    #[test]
    fn double_start_keeps_single_ticker() {
        let mut driver = AnimationDriver::new(TICK);
        assert!(driver.start());
        assert!(!driver.start());
        assert_eq!(ticks_over_one_second(&mut driver, Duration::from_millis(10)), 10);
    }

    /// Verify stop cancels a period that was already partly elapsed.
    #[test]
    fn stop_cancels_pending_tick() {
        let mut driver = AnimationDriver::new(TICK);
        driver.start();
        assert_eq!(driver.tick(Duration::from_millis(90)), 0);
        assert!(driver.stop());
        assert!(!driver.stop());
        assert_eq!(driver.tick(Duration::from_millis(50)), 0);

        // Restarting begins a fresh period.
        driver.start();
        assert_eq!(driver.tick(Duration::from_millis(50)), 0);
        assert_eq!(driver.tick(Duration::from_millis(50)), 1);
    }

    /// Verify a long frame reports every elapsed period.
    #[test]
    fn long_frame_reports_all_elapsed_ticks() {
        let mut driver = AnimationDriver::new(TICK);
        driver.start();
        assert_eq!(driver.tick(Duration::from_millis(350)), 3);
    }

    /// Verify toggle alternates state.
    #[test]
    fn toggle_alternates() {
        let mut driver = AnimationDriver::new(TICK);
        assert_eq!(driver.toggle(), PlaybackState::Running);
        assert_eq!(driver.toggle(), PlaybackState::Stopped);
    }

    /// Verify reset yields day 0, noon and stopped from any prior state.
    #[test]
    fn reset_restores_initial_state() {
        let mut driver = AnimationDriver::new(TICK);
        driver.start();
        let mut time = SimulationTime::new(21.3, 4.0);
        driver.reset(&mut time);
        assert_eq!(driver.state(), PlaybackState::Stopped);
        assert_eq!(time, SimulationTime::new(0.0, 12.0));

        driver.reset(&mut time);
        assert_eq!(driver.state(), PlaybackState::Stopped);
        assert_eq!(time, SimulationTime::new(0.0, 12.0));
    }
}

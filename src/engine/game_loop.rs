/// Frame timing for the driver loop
///
/// The controller is ticked exactly once per rendered frame with the real
/// elapsed time. This clock measures that time, keeps it strictly positive
/// and bounded, and tracks FPS for diagnostics.
use std::time::{Duration, Instant};

/// Longest step handed to a tick; a stalled frame (debugger, window drag) is clamped to this
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Shortest step handed to a tick; ticks always see a positive delta
pub const MIN_FRAME_DELTA: f32 = 1.0e-4;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Clamp a raw frame duration into the range a tick accepts
pub fn clamp_delta(raw: f32) -> f32 {
    if raw.is_finite() {
        raw.clamp(MIN_FRAME_DELTA, MAX_FRAME_DELTA)
    } else {
        MIN_FRAME_DELTA
    }
}

pub struct FrameClock {
    last_frame_time: Instant,
    start_time: Instant,
    paused: bool,
    frame_times: Vec<Duration>,
    frame_count: u64,
    current_fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame. Returns the delta to tick with, or `None` while paused.
    pub fn begin_frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return None;
        }

        Some(clamp_delta(frame_time.as_secs_f32()))
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(0.016), 0.016);
        assert_eq!(clamp_delta(0.0), MIN_FRAME_DELTA);
        assert_eq!(clamp_delta(-1.0), MIN_FRAME_DELTA);
        assert_eq!(clamp_delta(3.0), MAX_FRAME_DELTA);
        assert_eq!(clamp_delta(f32::NAN), MIN_FRAME_DELTA);
    }

    #[test]
    fn test_begin_frame_is_positive() {
        let mut clock = FrameClock::new();
        let dt = clock.begin_frame().unwrap();
        assert!(dt > 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(150));
        assert_eq!(clock.begin_frame(), Some(MAX_FRAME_DELTA));
    }

    #[test]
    fn test_paused_frames_do_not_tick() {
        let mut clock = FrameClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        assert_eq!(clock.begin_frame(), None);
        clock.toggle_pause();
        assert!(clock.begin_frame().is_some());
    }
}

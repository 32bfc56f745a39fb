// frame_stats.rs - Frame timing statistics for the headless playback loop

use std::collections::VecDeque;
use std::time::Duration;

/// Frame timing statistics with sliding window
#[derive(Debug)]
pub struct FrameStats {
    frame_times: VecDeque<Duration>,
    window_size: usize,
    total_frames: u64,
}

impl FrameStats {
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            frame_times: VecDeque::with_capacity(window_size),
            window_size,
            total_frames: 0,
        }
    }

    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.window_size {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.total_frames += 1;
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn average_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        self.frame_times.iter().sum::<Duration>() / self.frame_times.len() as u32
    }

    pub fn average_fps(&self) -> f64 {
        let avg = self.average_frame_time().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn percentile(&self, p: f64) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }

        let mut sorted: Vec<_> = self.frame_times.iter().copied().collect();
        sorted.sort();

        let index = ((sorted.len() as f64 - 1.0) * p.clamp(0.0, 1.0)).round() as usize;
        sorted[index.min(sorted.len() - 1)]
    }

    pub fn report(&self) -> String {
        if self.frame_times.is_empty() {
            return "No frame data".to_string();
        }

        format!(
            "FPS: {:.1} | Frame: {:.2}ms (p99: {:.2}ms) | Frames: {}",
            self.average_fps(),
            self.average_frame_time().as_secs_f64() * 1000.0,
            self.percentile(0.99).as_secs_f64() * 1000.0,
            self.total_frames
        )
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_window() {
        let mut stats = FrameStats::new(2);
        stats.record_frame(Duration::from_millis(100));
        stats.record_frame(Duration::from_millis(20));
        stats.record_frame(Duration::from_millis(20));

        assert_eq!(stats.total_frames(), 3);
        assert_eq!(stats.average_frame_time(), Duration::from_millis(20));
        assert!((stats.average_fps() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = FrameStats::default();
        assert_eq!(stats.average_fps(), 0.0);
        assert_eq!(stats.percentile(0.99), Duration::ZERO);
        assert_eq!(stats.report(), "No frame data");
    }

    #[test]
    fn test_percentile() {
        let mut stats = FrameStats::new(10);
        for ms in 1..=10 {
            stats.record_frame(Duration::from_millis(ms));
        }
        assert_eq!(stats.percentile(0.0), Duration::from_millis(1));
        assert_eq!(stats.percentile(1.0), Duration::from_millis(10));
        assert!(stats.report().starts_with("FPS: "));
    }
}

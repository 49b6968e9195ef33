use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::style::Rgba;

pub const WAVE_LIFETIME: Duration = Duration::from_millis(4100);
pub const WAVE_PRUNE_PERIOD: Duration = Duration::from_secs(1);

/// Older waves kept alongside the newest one.
pub const WAVES_RETAINED: usize = 8;

pub const WAVE_PALETTE: [Rgba; 5] = [
    [0.40, 0.85, 1.00, 1.0],
    [0.75, 0.50, 1.00, 1.0],
    [1.00, 0.55, 0.75, 1.0],
    [1.00, 0.82, 0.40, 1.0],
    [0.45, 1.00, 0.70, 1.0],
];

#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub id: u64,
    pub color: Rgba,
    pub started: Instant,
}

impl Wave {
    /// 0 at start, 1 once the wave has lived its full lifetime.
    pub fn progress(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.started);
        (age.as_secs_f32() / WAVE_LIFETIME.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Default)]
pub struct WaveQueue {
    waves: VecDeque<Wave>,
    next_id: u64,
}

impl WaveQueue {
    pub fn push(&mut self, now: Instant) -> Wave {
        while self.waves.len() > WAVES_RETAINED {
            self.waves.pop_front();
        }
        let id = self.next_id;
        self.next_id += 1;
        let wave = Wave {
            id,
            color: WAVE_PALETTE[(id % WAVE_PALETTE.len() as u64) as usize],
            started: now,
        };
        self.waves.push_back(wave.clone());
        wave
    }

    /// Drops waves older than [`WAVE_LIFETIME`]. Returns how many went.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.waves.len();
        self.waves
            .retain(|w| now.saturating_duration_since(w.started) <= WAVE_LIFETIME);
        before - self.waves.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wave> {
        self.waves.iter()
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn clear(&mut self) {
        self.waves.clear();
    }
}

/// Fixed-period trigger for [`WaveQueue::prune`], independent of frame rate.
#[derive(Debug)]
pub struct PruneTicker {
    last: Instant,
    period: Duration,
}

impl PruneTicker {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            period: WAVE_PRUNE_PERIOD,
        }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.period {
            return false;
        }
        self.last = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_eight_most_recent_plus_newest() {
        let mut q = WaveQueue::default();
        let t0 = Instant::now();
        for i in 0..20 {
            q.push(t0 + Duration::from_millis(i));
        }
        assert_eq!(q.len(), WAVES_RETAINED + 1);
        let ids: Vec<u64> = q.iter().map(|w| w.id).collect();
        assert_eq!(ids, (11..20).collect::<Vec<_>>());
    }

    #[test]
    fn color_cycles_through_palette_by_id() {
        let mut q = WaveQueue::default();
        let now = Instant::now();
        for _ in 0..7 {
            q.push(now);
        }
        let colors: Vec<Rgba> = q.iter().map(|w| w.color).collect();
        assert_eq!(colors[0], WAVE_PALETTE[0]);
        assert_eq!(colors[5], WAVE_PALETTE[0]);
        assert_eq!(colors[6], WAVE_PALETTE[1]);
    }

    #[test]
    fn prune_drops_only_expired_waves() {
        let mut q = WaveQueue::default();
        let t0 = Instant::now();
        q.push(t0);
        q.push(t0 + Duration::from_secs(2));

        assert_eq!(q.prune(t0 + Duration::from_millis(4000)), 0);
        assert_eq!(q.prune(t0 + Duration::from_millis(4200)), 1);
        assert_eq!(q.iter().next().map(|w| w.id), Some(1));
        assert_eq!(q.prune(t0 + Duration::from_secs(7)), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn ticker_fires_once_per_period() {
        let t0 = Instant::now();
        let mut ticker = PruneTicker::new(t0);
        assert!(!ticker.due(t0 + Duration::from_millis(500)));
        assert!(ticker.due(t0 + Duration::from_millis(1000)));
        assert!(!ticker.due(t0 + Duration::from_millis(1500)));
        assert!(ticker.due(t0 + Duration::from_millis(2100)));
    }

    #[test]
    fn progress_saturates_at_one() {
        let mut q = WaveQueue::default();
        let t0 = Instant::now();
        let w = q.push(t0);
        assert_eq!(w.progress(t0), 0.0);
        assert!((w.progress(t0 + WAVE_LIFETIME / 2) - 0.5).abs() < 1e-3);
        assert_eq!(w.progress(t0 + Duration::from_secs(60)), 1.0);
    }
}

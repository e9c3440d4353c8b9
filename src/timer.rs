use crate::models::Fast;
use chrono::{DateTime, Utc};

pub const DEFAULT_TARGET_HOURS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Active,
    PendingStop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSnapshot {
    pub elapsed_seconds: i64,
    pub progress: f64,
    pub percent: u32,
    pub completed: bool,
}

pub fn progress(elapsed_seconds: i64, target_hours: u32) -> f64 {
    let target = f64::from(target_hours) * 3600.0;
    (elapsed_seconds.max(0) as f64 / target).min(1.0)
}

#[derive(Debug)]
pub struct TimerController {
    phase: TimerPhase,
    active: Option<Fast>,
    selected_hours: u32,
    generation: u64,
}

impl TimerController {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            active: None,
            selected_hours: DEFAULT_TARGET_HOURS,
            generation: 0,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_hours(&self) -> u32 {
        self.selected_hours
    }

    pub fn active_fast(&self) -> Option<&Fast> {
        self.active.as_ref()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TimerPhase::Active | TimerPhase::PendingStop)
    }

    pub fn select_hours(&mut self, hours: u32) -> bool {
        if self.phase != TimerPhase::Idle || hours == 0 {
            return false;
        }
        self.selected_hours = hours;
        true
    }

    pub fn adopt(&mut self, generation: u64, fast: Fast) -> bool {
        if generation != self.generation || self.phase != TimerPhase::Idle {
            return false;
        }
        self.active = Some(fast);
        self.phase = TimerPhase::Active;
        true
    }

    pub fn request_stop(&mut self) -> bool {
        if self.phase != TimerPhase::Active {
            return false;
        }
        self.phase = TimerPhase::PendingStop;
        true
    }

    pub fn decline_stop(&mut self) -> bool {
        if self.phase != TimerPhase::PendingStop {
            return false;
        }
        self.phase = TimerPhase::Active;
        true
    }

    pub fn clear(&mut self) {
        self.phase = TimerPhase::Idle;
        self.active = None;
        self.generation += 1;
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Option<TimerSnapshot> {
        let fast = self.active.as_ref()?;
        let elapsed = (now - fast.started_at).num_seconds().max(0);
        let target_seconds = i64::from(fast.target_hours) * 3600;
        let progress = progress(elapsed, fast.target_hours);
        Some(TimerSnapshot {
            elapsed_seconds: elapsed,
            progress,
            percent: (progress * 100.0).round() as u32,
            completed: elapsed >= target_seconds,
        })
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}

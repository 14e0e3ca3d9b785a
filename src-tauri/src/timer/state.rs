use serde::{Deserialize, Serialize};

use crate::synced::Document;

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const WORK_MINUTES_RANGE: (u32, u32) = (1, 60);
pub const BREAK_MINUTES_RANGE: (u32, u32) = (1, 30);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FocusPhase {
    Working,
    OnBreak,
}

/// The persisted focus-timer document. `running` is session-only: a reload
/// always comes back paused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusSession {
    #[serde(alias = "timeLeft")]
    pub remaining_seconds: u32,
    #[serde(alias = "isBreak")]
    pub is_break_phase: bool,
    pub sessions_completed: u32,
    pub work_minutes: u32,
    pub break_minutes: u32,
    #[serde(skip)]
    pub running: bool,
}

impl Default for FocusSession {
    fn default() -> Self {
        Self {
            remaining_seconds: DEFAULT_WORK_MINUTES * 60,
            is_break_phase: false,
            sessions_completed: 0,
            work_minutes: DEFAULT_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            running: false,
        }
    }
}

fn clamp_minutes(minutes: i64, (min, max): (u32, u32)) -> u32 {
    minutes.clamp(min as i64, max as i64) as u32
}

impl FocusSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FocusPhase {
        if self.is_break_phase {
            FocusPhase::OnBreak
        } else {
            FocusPhase::Working
        }
    }

    /// Full length of the current phase in seconds.
    pub fn phase_seconds(&self) -> u32 {
        match self.phase() {
            FocusPhase::Working => self.work_minutes * 60,
            FocusPhase::OnBreak => self.break_minutes * 60,
        }
    }

    /// One elapsed second. The last second of a phase rolls straight into
    /// the next one.
    pub fn tick(&mut self) {
        if self.remaining_seconds <= 1 {
            self.advance_phase();
        } else {
            self.remaining_seconds -= 1;
        }
    }

    /// End the current phase now. Stops the timer.
    pub fn skip(&mut self) {
        self.running = false;
        self.advance_phase();
    }

    /// Back to the start of a work phase. Completed sessions are kept.
    pub fn reset(&mut self) {
        self.running = false;
        self.is_break_phase = false;
        self.remaining_seconds = self.work_minutes * 60;
    }

    /// Everything back to defaults, including the session count.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Clamp to 1..=60. An idle work phase restarts at the new length; a
    /// running or break phase keeps its countdown unless it now exceeds the
    /// phase length.
    pub fn set_work_minutes(&mut self, minutes: i64) {
        self.work_minutes = clamp_minutes(minutes, WORK_MINUTES_RANGE);
        if !self.running && !self.is_break_phase {
            self.remaining_seconds = self.work_minutes * 60;
        }
        self.clamp_remaining();
    }

    /// Clamp to 1..=30. Never restarts the countdown.
    pub fn set_break_minutes(&mut self, minutes: i64) {
        self.break_minutes = clamp_minutes(minutes, BREAK_MINUTES_RANGE);
        self.clamp_remaining();
    }

    /// `MM:SS` of the remaining time.
    pub fn clock(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// Share of the current phase already elapsed, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        let total = self.phase_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(total) * 100.0
    }

    fn advance_phase(&mut self) {
        if self.is_break_phase {
            self.is_break_phase = false;
            self.sessions_completed = self.sessions_completed.saturating_add(1);
            self.remaining_seconds = self.work_minutes * 60;
        } else {
            self.is_break_phase = true;
            self.remaining_seconds = self.break_minutes * 60;
        }
    }

    fn clamp_remaining(&mut self) {
        self.remaining_seconds = self.remaining_seconds.min(self.phase_seconds());
    }
}

impl Document for FocusSession {
    /// Zero minutes (older saves, hand edits) fall back to the defaults
    /// before clamping; a zero countdown restarts the phase.
    fn normalized(mut self) -> Self {
        if self.work_minutes == 0 {
            self.work_minutes = DEFAULT_WORK_MINUTES;
        }
        if self.break_minutes == 0 {
            self.break_minutes = DEFAULT_BREAK_MINUTES;
        }
        self.work_minutes = clamp_minutes(self.work_minutes.into(), WORK_MINUTES_RANGE);
        self.break_minutes = clamp_minutes(self.break_minutes.into(), BREAK_MINUTES_RANGE);
        if self.remaining_seconds == 0 {
            self.remaining_seconds = self.phase_seconds();
        }
        self.clamp_remaining();
        self.running = false;
        self
    }
}

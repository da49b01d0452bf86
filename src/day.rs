use serde::{Deserialize, Serialize};

use crate::clock;

pub const MAX_GOALS: usize = 3;

#[derive(Serialize, Deserialize, Clone)]
pub struct Goal {
    pub title: String,
    pub done: bool,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionRecord {
    pub start_ts: String,
    pub end_ts: String,
    pub minutes: u32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Distraction {
    pub ts: String,
    pub note: String,
}

// One calendar day of tracking: goals, recorded focus sessions, and
// distraction one-liners. Resets itself when the date rolls over.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DayLog {
    pub date: String,
    pub goals: Vec<Goal>,
    pub sessions: Vec<SessionRecord>,
    pub distractions: Vec<Distraction>,
}

impl Default for DayLog {
    fn default() -> Self {
        Self {
            date: clock::today(),
            goals: Vec::new(),
            sessions: Vec::new(),
            distractions: Vec::new(),
        }
    }
}

impl DayLog {
    pub fn roll_over(&mut self) {
        let today = clock::today();
        if self.date != today {
            *self = Self::default();
            self.date = today;
        }
    }

    pub fn add_goal(&mut self, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() || self.goals.len() >= MAX_GOALS {
            return false;
        }
        self.goals.push(Goal { title: title.into(), done: false });
        true
    }

    pub fn toggle_goal(&mut self, index: usize) {
        if let Some(goal) = self.goals.get_mut(index) {
            goal.done = !goal.done;
        }
    }

    pub fn remove_goal(&mut self, index: usize) {
        if index < self.goals.len() {
            self.goals.remove(index);
        }
    }

    pub fn log_distraction(&mut self, note: &str) -> bool {
        let note = note.trim();
        if note.is_empty() {
            return false;
        }
        self.distractions.push(Distraction { ts: clock::now_iso(), note: note.into() });
        true
    }

    pub fn record_session(&mut self, record: SessionRecord) {
        self.sessions.push(record);
    }

    pub fn total_minutes(&self) -> u32 {
        self.sessions.iter().map(|s| s.minutes).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================

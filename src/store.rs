use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fs, path::PathBuf};

// ============================================================================
// Persisted Settings
// ============================================================================

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub notify_enabled: bool,
    pub auto_break: bool,
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notify_enabled: false,
            auto_break: false,
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl Settings {
    // Out-of-range values from a hand-edited file snap back to defaults.
    fn sanitize(mut self) -> Self {
        if !(1..=240).contains(&self.focus_minutes) {
            self.focus_minutes = 25;
        }
        if !(1..=60).contains(&self.break_minutes) {
            self.break_minutes = 5;
        }
        self
    }
}

// ============================================================================
// Persisted Timer State
// ============================================================================

// Mirrors what survives a quit: the current mode plus, while a break is
// pending or underway, enough to rebuild its countdown on the next launch.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SavedTimer {
    pub mode: String,
    pub pending_break: bool,
    pub break_start_ms: Option<i64>,
    pub break_total_sec: Option<u32>,
    pub break_ready_sec: Option<u32>,
}

impl Default for SavedTimer {
    fn default() -> Self {
        Self {
            mode: "focus".into(),
            pending_break: false,
            break_start_ms: None,
            break_total_sec: None,
            break_ready_sec: None,
        }
    }
}

impl SavedTimer {
    pub fn focus() -> Self {
        Self::default()
    }

    // Break awaiting a manual Start; only the displayed remaining survives.
    pub fn break_pending(ready_sec: u32) -> Self {
        Self {
            mode: "break".into(),
            pending_break: false,
            break_start_ms: None,
            break_total_sec: None,
            break_ready_sec: Some(ready_sec),
        }
    }

    // Auto-start break: the start instant and total let the next launch
    // recompute how much of the break already elapsed while we were gone.
    pub fn break_auto(start_ms: i64, total_sec: u32) -> Self {
        Self {
            mode: "break".into(),
            pending_break: true,
            break_start_ms: Some(start_ms),
            break_total_sec: Some(total_sec),
            break_ready_sec: Some(total_sec),
        }
    }

    pub fn is_break(&self) -> bool {
        self.mode == "break"
    }

    pub fn auto_pending(&self) -> Option<(i64, u32)> {
        if !self.pending_break {
            return None;
        }
        match (self.break_start_ms, self.break_total_sec) {
            (Some(start), Some(total)) if start > 0 && total > 0 => Some((start, total)),
            _ => None,
        }
    }
}

// ============================================================================
// Store
// ============================================================================

pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let _ = fs::create_dir_all(&dir);
        Self { dir }
    }

    pub fn default_dir() -> PathBuf {
        let mut path = PathBuf::from(".");
        path.push("ftimer");
        path
    }

    fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn load_settings(&self) -> Settings {
        self.load_json::<Settings>("config.json").sanitize()
    }

    pub fn save_settings(&self, settings: &Settings) {
        self.save_json("config.json", settings);
    }

    pub fn load_timer(&self) -> SavedTimer {
        self.load_json("timer_state.json")
    }

    pub fn save_timer(&self, saved: &SavedTimer) {
        self.save_json("timer_state.json", saved);
    }

    pub fn load_day(&self) -> crate::day::DayLog {
        let mut day: crate::day::DayLog = self.load_json("day.json");
        day.roll_over();
        day
    }

    pub fn save_day(&self, day: &crate::day::DayLog) {
        self.save_json("day.json", day);
    }

    fn load_json<T: DeserializeOwned + Default>(&self, filename: &str) -> T {
        fs::read_to_string(self.path(filename))
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    // Persistence is best-effort: a failed write costs one save, never a crash.
    fn save_json<T: Serialize>(&self, filename: &str, data: &T) {
        if let Ok(json) = serde_json::to_string_pretty(data) {
            let _ = fs::write(self.path(filename), json);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn settings_round_trip() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let mut settings = Settings::default();
        settings.sound_enabled = false;
        settings.auto_break = true;
        settings.focus_minutes = 50;
        store.save_settings(&settings);

        let loaded = store.load_settings();
        assert!(!loaded.sound_enabled);
        assert!(loaded.auto_break);
        assert!(!loaded.notify_enabled);
        assert_eq!(loaded.focus_minutes, 50);
        assert_eq!(loaded.break_minutes, 5);
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let settings = store.load_settings();
        assert!(settings.sound_enabled);
        assert!(!settings.notify_enabled);
        assert!(!settings.auto_break);
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.break_minutes, 5);

        let saved = store.load_timer();
        assert_eq!(saved.mode, "focus");
        assert!(!saved.is_break());
        assert!(saved.auto_pending().is_none());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        fs::write(dir.path().join("config.json"), "{not json").unwrap();
        fs::write(dir.path().join("timer_state.json"), "[1,2,3]").unwrap();

        let settings = store.load_settings();
        assert!(settings.sound_enabled);
        assert_eq!(settings.focus_minutes, 25);

        let saved = store.load_timer();
        assert_eq!(saved.mode, "focus");
    }

    #[test]
    fn out_of_range_minutes_are_reset() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        fs::write(
            dir.path().join("config.json"),
            r#"{"focus_minutes": 0, "break_minutes": 9999}"#,
        )
        .unwrap();

        let settings = store.load_settings();
        assert_eq!(settings.focus_minutes, 25);
        assert_eq!(settings.break_minutes, 5);
    }

    #[test]
    fn saved_break_states() {
        let pending = SavedTimer::break_pending(180);
        assert!(pending.is_break());
        assert!(pending.auto_pending().is_none());
        assert_eq!(pending.break_ready_sec, Some(180));

        let auto = SavedTimer::break_auto(1_700_000_000_000, 300);
        assert!(auto.is_break());
        assert_eq!(auto.auto_pending(), Some((1_700_000_000_000, 300)));

        // A pending flag without its timing fields is not auto-startable.
        let mut partial = SavedTimer::break_pending(60);
        partial.pending_break = true;
        assert!(partial.auto_pending().is_none());
    }

    #[test]
    fn timer_state_round_trip() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        store.save_timer(&SavedTimer::break_auto(42_000, 300));
        let saved = store.load_timer();
        assert_eq!(saved.auto_pending(), Some((42_000, 300)));

        store.save_timer(&SavedTimer::focus());
        let saved = store.load_timer();
        assert!(!saved.is_break());
        assert!(saved.break_start_ms.is_none());
        assert!(saved.break_ready_sec.is_none());
    }
}

use crate::clock;
use crate::day::SessionRecord;
use crate::store::SavedTimer;

// ============================================================================
// Mode & State
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Focus,
    Break,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Focus => "🎯 FOCUS",
            Self::Break => "☕ BREAK",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    FocusIdle,
    FocusRunning,
    BreakIdle,
    BreakRunning,
}

// ============================================================================
// Timer State Machine
// ============================================================================

// All countdown and transition logic lives here, driven by a discrete
// one-second tick. No scheduling, no I/O: the run loop owns the clock and
// the app layer owns the side effects, so every transition is testable.
pub struct Timer {
    mode: Mode,
    running: bool,
    remaining: u32,
    focus_total: u32,
    break_total: u32,
    planned_break_min: u32,
    session_start: Option<String>,
    submitted: bool,
}

impl Timer {
    pub fn new(focus_minutes: u32) -> Self {
        Self {
            mode: Mode::Focus,
            running: false,
            remaining: focus_minutes * 60,
            focus_total: focus_minutes * 60,
            break_total: 0,
            planned_break_min: 5,
            session_start: None,
            submitted: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> State {
        match (self.mode, self.running) {
            (Mode::Focus, false) => State::FocusIdle,
            (Mode::Focus, true) => State::FocusRunning,
            (Mode::Break, false) => State::BreakIdle,
            (Mode::Break, true) => State::BreakRunning,
        }
    }

    pub fn session_open(&self) -> bool {
        self.session_start.is_some()
    }

    pub fn total(&self) -> u32 {
        match self.mode {
            Mode::Focus => self.focus_total,
            Mode::Break => self.break_total,
        }
    }

    pub fn progress_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (1.0 - self.remaining as f64 / total as f64).clamp(0.0, 1.0)
    }

    // Planned durations are captured here, at Start, and nowhere else:
    // editing the settings mid-countdown never touches an open interval.
    pub fn start(&mut self, focus_minutes: u32, break_minutes: u32) {
        if self.running {
            return;
        }
        self.planned_break_min = break_minutes;
        match self.mode {
            Mode::Focus => {
                if self.session_start.is_none() {
                    self.focus_total = focus_minutes * 60;
                    self.remaining = self.focus_total;
                    self.session_start = Some(clock::now_iso());
                    self.submitted = false;
                }
            }
            Mode::Break => {
                // A pending break already shows its remaining; don't reset it.
                if self.remaining == 0 {
                    self.break_total = break_minutes * 60;
                    self.remaining = self.break_total;
                }
            }
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    // One elapsed second. Returns the mode that just finished, if any;
    // the countdown stops itself before the caller runs completion effects.
    pub fn tick(&mut self) -> Option<Mode> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return Some(self.mode);
        }
        None
    }

    // Builds the session record for the open focus interval. Whole elapsed
    // minutes, never less than one; a natural timeout (remaining == 0)
    // yields exactly the planned minutes. Second and later calls return
    // None, which is what stops a double submission.
    pub fn close_focus_session(&mut self) -> Option<SessionRecord> {
        if self.mode != Mode::Focus || self.submitted {
            return None;
        }
        self.submitted = true;
        let elapsed = self.focus_total.saturating_sub(self.remaining);
        Some(SessionRecord {
            start_ts: self.session_start.take().unwrap_or_else(clock::now_iso),
            end_ts: clock::now_iso(),
            minutes: (elapsed / 60).max(1),
        })
    }

    // The break length owed after the current focus interval, fixed when
    // it was started.
    pub fn planned_break_secs(&self) -> u32 {
        self.planned_break_min * 60
    }

    pub fn enter_break(&mut self, total_sec: u32, auto_start: bool) {
        self.mode = Mode::Break;
        self.break_total = total_sec;
        self.remaining = total_sec;
        self.running = auto_start;
        self.session_start = None;
    }

    pub fn enter_focus(&mut self, focus_minutes: u32) {
        self.mode = Mode::Focus;
        self.focus_total = focus_minutes * 60;
        self.remaining = self.focus_total;
        self.running = false;
        self.session_start = None;
        self.submitted = false;
    }
}

// ============================================================================
// Resume on launch
// ============================================================================

// Rebuilds the machine from the persisted snapshot. Pure in `now_ms` so the
// "came back mid-break" arithmetic is testable without a wall clock.
// The bool asks the caller to clear the stored break state (the break ran
// out while we were gone).
pub fn resume(saved: &SavedTimer, focus_minutes: u32, break_minutes: u32, now_ms: i64) -> (Timer, bool) {
    if saved.is_break() {
        if let Some((start_ms, total_sec)) = saved.auto_pending() {
            let elapsed = ((now_ms - start_ms) / 1000).max(0) as u32;
            let left = total_sec.saturating_sub(elapsed);
            if left == 0 {
                // Break finished while the app was closed.
                return (Timer::new(focus_minutes), true);
            }
            let mut timer = Timer::new(focus_minutes);
            timer.enter_break(total_sec, true);
            timer.remaining = left;
            return (timer, false);
        }

        // Manual pending break: restore the displayed remaining, falling
        // back to the configured break length.
        let ready = saved
            .break_ready_sec
            .filter(|&s| s > 0)
            .unwrap_or(break_minutes * 60);
        let mut timer = Timer::new(focus_minutes);
        timer.enter_break(ready, false);
        return (timer, false);
    }

    (Timer::new(focus_minutes), false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut Timer, n: u32) -> Vec<Mode> {
        let mut done = Vec::new();
        for _ in 0..n {
            if let Some(mode) = timer.tick() {
                done.push(mode);
            }
        }
        done
    }

    #[test]
    fn start_initializes_focus_once() {
        let mut timer = Timer::new(25);
        assert_eq!(timer.state(), State::FocusIdle);

        timer.start(25, 5);
        assert_eq!(timer.state(), State::FocusRunning);
        assert_eq!(timer.remaining(), 25 * 60);
        assert!(timer.session_open());

        // Ticks decrement; a second Start after a pause must not reset.
        run_ticks(&mut timer, 90);
        timer.pause();
        assert_eq!(timer.remaining(), 25 * 60 - 90);
        timer.start(25, 5);
        assert_eq!(timer.remaining(), 25 * 60 - 90);
    }

    #[test]
    fn tick_reaches_zero_and_never_goes_negative() {
        let mut timer = Timer::new(25);
        timer.start(1, 5);
        assert_eq!(timer.remaining(), 60);

        let done = run_ticks(&mut timer, 59);
        assert!(done.is_empty());
        assert_eq!(timer.remaining(), 1);

        assert_eq!(timer.tick(), Some(Mode::Focus));
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.running());

        // Stopped machine doesn't tick further.
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn natural_completion_records_planned_minutes() {
        let mut timer = Timer::new(25);
        timer.start(2, 5);
        run_ticks(&mut timer, 120);
        assert_eq!(timer.remaining(), 0);

        let record = timer.close_focus_session().unwrap();
        assert_eq!(record.minutes, 2);
        assert!(!record.start_ts.is_empty());
        assert!(!record.end_ts.is_empty());
    }

    #[test]
    fn manual_finish_floors_to_whole_minutes_min_one() {
        // 90 elapsed seconds -> 1 minute.
        let mut timer = Timer::new(25);
        timer.start(25, 5);
        run_ticks(&mut timer, 90);
        timer.pause();
        assert_eq!(timer.close_focus_session().unwrap().minutes, 1);

        // 10 elapsed seconds still counts as 1 minute.
        let mut timer = Timer::new(25);
        timer.start(25, 5);
        run_ticks(&mut timer, 10);
        timer.pause();
        assert_eq!(timer.close_focus_session().unwrap().minutes, 1);

        // 5m40s elapsed -> 5 minutes.
        let mut timer = Timer::new(25);
        timer.start(25, 5);
        run_ticks(&mut timer, 5 * 60 + 40);
        timer.pause();
        assert_eq!(timer.close_focus_session().unwrap().minutes, 5);
    }

    #[test]
    fn close_focus_session_submits_only_once() {
        let mut timer = Timer::new(25);
        timer.start(1, 5);
        run_ticks(&mut timer, 60);

        assert!(timer.close_focus_session().is_some());
        assert!(timer.close_focus_session().is_none());

        // A fresh interval arms the guard again.
        timer.enter_focus(25);
        timer.start(1, 5);
        run_ticks(&mut timer, 60);
        assert!(timer.close_focus_session().is_some());
    }

    #[test]
    fn breaks_never_produce_a_record() {
        let mut timer = Timer::new(25);
        timer.enter_break(5 * 60, false);
        assert!(timer.close_focus_session().is_none());

        timer.start(25, 5);
        run_ticks(&mut timer, 5 * 60);
        assert_eq!(timer.state(), State::BreakIdle);
        assert!(timer.close_focus_session().is_none());
    }

    #[test]
    fn break_completion_reported_with_break_mode() {
        let mut timer = Timer::new(25);
        timer.enter_break(2, true);
        assert_eq!(timer.state(), State::BreakRunning);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.tick(), Some(Mode::Break));
    }

    #[test]
    fn enter_break_honors_auto_start() {
        let mut timer = Timer::new(25);
        timer.enter_break(300, false);
        assert_eq!(timer.state(), State::BreakIdle);
        assert_eq!(timer.remaining(), 300);

        timer.enter_break(300, true);
        assert_eq!(timer.state(), State::BreakRunning);
    }

    #[test]
    fn pending_break_start_resumes_without_reset() {
        let mut timer = Timer::new(25);
        timer.enter_break(300, false);
        timer.start(25, 5);
        // Not reset to break_minutes * 60.
        assert_eq!(timer.remaining(), 300);
        assert_eq!(timer.state(), State::BreakRunning);
    }

    #[test]
    fn pause_preserves_remaining_in_both_modes() {
        let mut timer = Timer::new(25);
        timer.start(25, 5);
        run_ticks(&mut timer, 30);
        timer.pause();
        let held = timer.remaining();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), held);
        timer.start(99, 99); // interval still open, values ignored
        assert_eq!(timer.remaining(), held);

        let mut timer = Timer::new(25);
        timer.enter_break(120, true);
        run_ticks(&mut timer, 20);
        timer.pause();
        assert_eq!(timer.remaining(), 100);
        timer.start(25, 5);
        assert_eq!(timer.remaining(), 100);
    }

    #[test]
    fn enter_focus_resets_the_interval() {
        let mut timer = Timer::new(25);
        timer.enter_break(300, true);
        timer.enter_focus(30);
        assert_eq!(timer.state(), State::FocusIdle);
        assert_eq!(timer.remaining(), 30 * 60);
        assert!(!timer.session_open());
    }

    #[test]
    fn planned_break_is_fixed_at_start() {
        let mut timer = Timer::new(25);
        timer.start(25, 5);
        assert_eq!(timer.planned_break_secs(), 5 * 60);

        // The break owed for this focus interval doesn't move with the
        // settings; only the next Start re-reads them.
        run_ticks(&mut timer, 10);
        assert_eq!(timer.planned_break_secs(), 5 * 60);
    }

    #[test]
    fn resume_focus_mode() {
        let (timer, clear) = resume(&SavedTimer::focus(), 25, 5, 1_000_000);
        assert!(!clear);
        assert_eq!(timer.state(), State::FocusIdle);
        assert_eq!(timer.remaining(), 25 * 60);
    }

    #[test]
    fn resume_auto_break_recomputes_elapsed() {
        let start_ms = 1_000_000;
        let saved = SavedTimer::break_auto(start_ms, 300);

        // 40 seconds passed while the app was closed.
        let (timer, clear) = resume(&saved, 25, 5, start_ms + 40_000);
        assert!(!clear);
        assert_eq!(timer.state(), State::BreakRunning);
        assert_eq!(timer.remaining(), 260);
    }

    #[test]
    fn resume_auto_break_already_elapsed_goes_to_focus() {
        let saved = SavedTimer::break_auto(1_000_000, 300);
        let (timer, clear) = resume(&saved, 25, 5, 1_000_000 + 300_000);
        assert!(clear);
        assert_eq!(timer.state(), State::FocusIdle);
        assert_eq!(timer.remaining(), 25 * 60);

        // Way past the end behaves the same.
        let (timer, clear) = resume(&saved, 25, 5, 1_000_000 + 999_000);
        assert!(clear);
        assert_eq!(timer.state(), State::FocusIdle);
    }

    #[test]
    fn resume_auto_break_with_clock_skew_keeps_full_break() {
        // A start instant in the future counts as zero elapsed.
        let saved = SavedTimer::break_auto(2_000_000, 300);
        let (timer, clear) = resume(&saved, 25, 5, 1_000_000);
        assert!(!clear);
        assert_eq!(timer.remaining(), 300);
    }

    #[test]
    fn resume_manual_break_restores_ready_seconds() {
        let saved = SavedTimer::break_pending(180);
        let (timer, clear) = resume(&saved, 25, 5, 0);
        assert!(!clear);
        assert_eq!(timer.state(), State::BreakIdle);
        assert_eq!(timer.remaining(), 180);
    }

    #[test]
    fn resume_manual_break_falls_back_to_configured_minutes() {
        let mut saved = SavedTimer::break_pending(0);
        saved.break_ready_sec = None;
        let (timer, _) = resume(&saved, 25, 7, 0);
        assert_eq!(timer.state(), State::BreakIdle);
        assert_eq!(timer.remaining(), 7 * 60);

        // Stored zero is treated as absent.
        let saved = SavedTimer::break_pending(0);
        let (timer, _) = resume(&saved, 25, 7, 0);
        assert_eq!(timer.remaining(), 7 * 60);
    }
}

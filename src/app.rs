use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::alert;
use crate::clock;
use crate::day::{DayLog, MAX_GOALS};
use crate::state::{self, Mode, State, Timer};
use crate::status::{self, StatusInput, StatusLine};
use crate::store::{SavedTimer, Settings, Store};

// ============================================================================
// Views & UI Modes
// ============================================================================

#[derive(PartialEq, Clone, Copy)]
pub enum View {
    Timer,
    Goals,
    Settings,
    Help,
}

#[derive(PartialEq, Clone, Copy)]
pub enum SettingsField {
    FocusMinutes,
    BreakMinutes,
    Sound,
    Notify,
    AutoBreak,
}

impl SettingsField {
    pub fn next(self) -> Self {
        match self {
            Self::FocusMinutes => Self::BreakMinutes,
            Self::BreakMinutes => Self::Sound,
            Self::Sound => Self::Notify,
            Self::Notify => Self::AutoBreak,
            Self::AutoBreak => Self::FocusMinutes,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::FocusMinutes => Self::AutoBreak,
            Self::BreakMinutes => Self::FocusMinutes,
            Self::Sound => Self::BreakMinutes,
            Self::Notify => Self::Sound,
            Self::AutoBreak => Self::Notify,
        }
    }
}

#[derive(PartialEq, Clone, Copy)]
pub enum GoalsMode {
    Viewing,
    AddingGoal,
    AddingDistraction,
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub store: Store,
    pub settings: Settings,
    pub timer: Timer,
    pub day: DayLog,
    pub current_view: View,
    pub settings_field: SettingsField,
    pub settings_editing: bool,
    pub settings_input: String,
    pub goals_mode: GoalsMode,
    pub goals_input: String,
    pub selected_goal: usize,
    pub flash: Option<String>,
    pub animation_frame: u8,
}

impl App {
    pub fn new(store: Store, settings: Settings, fresh: bool) -> Self {
        let day = store.load_day();
        store.save_day(&day);

        let timer = if fresh {
            store.save_timer(&SavedTimer::focus());
            Timer::new(settings.focus_minutes)
        } else {
            let saved = store.load_timer();
            let (timer, clear_stored) = state::resume(
                &saved,
                settings.focus_minutes,
                settings.break_minutes,
                clock::now_ms(),
            );
            if clear_stored {
                store.save_timer(&SavedTimer::focus());
            }
            timer
        };

        Self {
            store,
            settings,
            timer,
            day,
            current_view: View::Timer,
            settings_field: SettingsField::FocusMinutes,
            settings_editing: false,
            settings_input: String::new(),
            goals_mode: GoalsMode::Viewing,
            goals_input: String::new(),
            selected_goal: 0,
            flash: None,
            animation_frame: 0,
        }
    }

    pub fn status(&self) -> StatusLine {
        status::status_line(StatusInput {
            running: self.timer.running(),
            mode: self.timer.mode(),
            remaining: self.timer.remaining(),
            goals: self.day.goals.len(),
            sessions: self.day.sessions.len(),
            distractions: self.day.distractions.len(),
        })
    }

    // ------------------------------------------------------------------
    // Timer transitions
    // ------------------------------------------------------------------

    pub fn start(&mut self) {
        self.timer.start(self.settings.focus_minutes, self.settings.break_minutes);
    }

    pub fn pause(&mut self) {
        self.timer.pause();
        // A paused break resumes as a manual pending break next launch,
        // even when it was auto-started.
        if self.timer.mode() == Mode::Break {
            self.store.save_timer(&SavedTimer::break_pending(self.timer.remaining()));
        }
    }

    // Finish (focus) / Skip (break); only meaningful while running.
    pub fn finish_or_skip(&mut self) {
        if !self.timer.running() {
            return;
        }
        match self.timer.mode() {
            Mode::Focus => self.complete_focus(false),
            Mode::Break => self.complete_break(false),
        }
    }

    pub fn on_tick(&mut self) {
        match self.timer.tick() {
            Some(Mode::Focus) => self.complete_focus(true),
            Some(Mode::Break) => self.complete_break(true),
            None => {}
        }
    }

    // Fixed completion order: stop countdown, sound, notification, record,
    // persist the pending break, then switch mode.
    fn complete_focus(&mut self, natural: bool) {
        self.timer.pause();
        if natural {
            self.chime("Focus finished! 🎯", "Take a break, or line up the next session.");
        }

        if let Some(record) = self.timer.close_focus_session() {
            self.day.record_session(record);
            self.store.save_day(&self.day);
        }

        let total = self.timer.planned_break_secs();
        if self.settings.auto_break {
            self.store.save_timer(&SavedTimer::break_auto(clock::now_ms(), total));
            self.timer.enter_break(total, true);
        } else {
            self.store.save_timer(&SavedTimer::break_pending(total));
            self.timer.enter_break(total, false);
        }
    }

    fn complete_break(&mut self, natural: bool) {
        self.timer.pause();
        if natural {
            self.chime("Break finished! ☕", "Ready for the next focus session?");
        }
        self.store.save_timer(&SavedTimer::focus());
        self.timer.enter_focus(self.settings.focus_minutes);
    }

    fn chime(&self, title: &str, body: &str) {
        if self.settings.sound_enabled {
            alert::play_sound();
        }
        if self.settings.notify_enabled {
            alert::notify(title, body);
        }
    }

    pub fn save_on_quit(&mut self) {
        self.store.save_day(&self.day);
        match self.timer.state() {
            State::BreakRunning if self.store.load_timer().auto_pending().is_some() => {
                // Auto-started break: the stored start instant and total
                // already describe it; the next launch recomputes elapsed.
            }
            State::BreakRunning | State::BreakIdle => {
                self.store.save_timer(&SavedTimer::break_pending(self.timer.remaining()));
            }
            _ => {
                self.store.save_timer(&SavedTimer::focus());
            }
        }
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    fn toggle_setting(&mut self) {
        match self.settings_field {
            SettingsField::Sound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                if self.settings.sound_enabled {
                    alert::play_sound();
                }
            }
            SettingsField::Notify => {
                if self.settings.notify_enabled {
                    self.settings.notify_enabled = false;
                } else if alert::try_notify("ftimer", "Desktop notifications are on.") {
                    self.settings.notify_enabled = true;
                } else {
                    self.settings.notify_enabled = false;
                    self.flash = Some("Desktop notifications unavailable — setting left off.".into());
                }
            }
            SettingsField::AutoBreak => {
                self.settings.auto_break = !self.settings.auto_break;
            }
            _ => return,
        }
        self.store.save_settings(&self.settings);
    }

    fn start_editing(&mut self) {
        self.settings_input = match self.settings_field {
            SettingsField::FocusMinutes => self.settings.focus_minutes.to_string(),
            SettingsField::BreakMinutes => self.settings.break_minutes.to_string(),
            _ => return,
        };
        self.settings_editing = true;
    }

    fn apply_setting(&mut self) {
        if let Ok(minutes) = self.settings_input.parse::<u32>() {
            match self.settings_field {
                SettingsField::FocusMinutes => {
                    if (1..=240).contains(&minutes) {
                        self.settings.focus_minutes = minutes;
                        self.store.save_settings(&self.settings);
                        // An idle focus timer with no open interval shows
                        // the new duration right away.
                        if self.timer.state() == State::FocusIdle && !self.timer.session_open() {
                            self.timer.enter_focus(minutes);
                        }
                    }
                }
                SettingsField::BreakMinutes => {
                    if (1..=60).contains(&minutes) {
                        self.settings.break_minutes = minutes;
                        self.store.save_settings(&self.settings);
                    }
                }
                _ => {}
            }
        }
        self.settings_editing = false;
        self.settings_input.clear();
    }

    // ------------------------------------------------------------------
    // Goals & distractions
    // ------------------------------------------------------------------

    fn submit_goals_input(&mut self) {
        let changed = match self.goals_mode {
            GoalsMode::AddingGoal => {
                let added = self.day.add_goal(&self.goals_input);
                if added {
                    self.selected_goal = self.day.goals.len() - 1;
                }
                added
            }
            GoalsMode::AddingDistraction => self.day.log_distraction(&self.goals_input),
            GoalsMode::Viewing => false,
        };
        if changed {
            self.store.save_day(&self.day);
        }
        self.goals_mode = GoalsMode::Viewing;
        self.goals_input.clear();
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    // Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.flash = None;

        if self.goals_mode != GoalsMode::Viewing {
            match key.code {
                KeyCode::Char(c) => self.goals_input.push(c),
                KeyCode::Backspace => {
                    self.goals_input.pop();
                }
                KeyCode::Enter => self.submit_goals_input(),
                KeyCode::Esc => {
                    self.goals_mode = GoalsMode::Viewing;
                    self.goals_input.clear();
                }
                _ => {}
            }
            return false;
        }

        if self.settings_editing {
            match key.code {
                KeyCode::Char(c) => self.settings_input.push(c),
                KeyCode::Backspace => {
                    self.settings_input.pop();
                }
                KeyCode::Enter => self.apply_setting(),
                KeyCode::Esc => {
                    self.settings_editing = false;
                    self.settings_input.clear();
                }
                _ => {}
            }
            return false;
        }

        match self.current_view {
            View::Goals => self.handle_goals_view(key),
            View::Settings => self.handle_settings_view(key),
            _ => return self.handle_main_view(key),
        }
        false
    }

    fn handle_main_view(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Char('q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            || (key.code == KeyCode::Esc && self.current_view == View::Timer)
        {
            return true;
        }

        match key.code {
            KeyCode::Char(' ') => {
                if self.timer.running() {
                    self.pause();
                } else {
                    self.start();
                }
            }
            KeyCode::Char('f') => self.finish_or_skip(),
            KeyCode::Enter => {
                self.current_view = match self.status().target {
                    status::Target::Goals => View::Goals,
                    status::Target::Timer => View::Timer,
                };
            }
            KeyCode::Char('g') => self.current_view = View::Goals,
            KeyCode::Char('d') => self.current_view = View::Settings,
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.current_view = if self.current_view == View::Help {
                    View::Timer
                } else {
                    View::Help
                };
            }
            KeyCode::Esc => self.current_view = View::Timer,
            _ => {}
        }
        false
    }

    fn handle_goals_view(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('g') => {
                self.current_view = View::Timer;
            }
            KeyCode::Char('a') => {
                if self.day.goals.len() < MAX_GOALS {
                    self.goals_mode = GoalsMode::AddingGoal;
                    self.goals_input.clear();
                } else {
                    self.flash = Some(format!("{} goals is the cap. Finish one first.", MAX_GOALS));
                }
            }
            KeyCode::Char('n') => {
                self.goals_mode = GoalsMode::AddingDistraction;
                self.goals_input.clear();
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if !self.day.goals.is_empty() {
                    self.day.toggle_goal(self.selected_goal);
                    self.store.save_day(&self.day);
                }
            }
            KeyCode::Char('d') => {
                if !self.day.goals.is_empty() {
                    self.day.remove_goal(self.selected_goal);
                    self.selected_goal = self.selected_goal.min(self.day.goals.len().saturating_sub(1));
                    self.store.save_day(&self.day);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.day.goals.is_empty() {
                    self.selected_goal = (self.selected_goal + 1).min(self.day.goals.len() - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_goal = self.selected_goal.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_settings_view(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('d') => {
                self.current_view = View::Timer;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.settings_field = self.settings_field.next();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings_field = self.settings_field.prev();
            }
            KeyCode::Enter | KeyCode::Char('e') => self.start_editing(),
            KeyCode::Char(' ') => self.toggle_setting(),
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

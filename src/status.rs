use crate::clock::format_clock;
use crate::state::Mode;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    Timer,
    Goals,
}

#[derive(Clone, PartialEq, Debug)]
pub struct StatusLine {
    pub main: String,
    pub hint: String,
    pub target: Target,
}

#[derive(Clone, Copy)]
pub struct StatusInput {
    pub running: bool,
    pub mode: Mode,
    pub remaining: u32,
    pub goals: usize,
    pub sessions: usize,
    pub distractions: usize,
}

// The one-line "next action" nudge. Pure: same inputs, same message.
// Precedence: running beats everything, then a pending break, then the
// cold-start prompts, then the daily summary.
pub fn status_line(input: StatusInput) -> StatusLine {
    if input.running {
        return match input.mode {
            Mode::Focus => StatusLine {
                main: format!("Focusing · {}", format_clock(input.remaining)),
                hint: "If the flow breaks, jot one line under distractions and come back.".into(),
                target: Target::Timer,
            },
            Mode::Break => StatusLine {
                main: format!("Resting · {}", format_clock(input.remaining)),
                hint: "Water. Stretch. Wandering off is not rest.".into(),
                target: Target::Timer,
            },
        };
    }

    if input.mode == Mode::Break {
        return StatusLine {
            main: "Break is ready. Press Start to begin it.".into(),
            hint: "When the break ends you switch back to focus.".into(),
            target: Target::Timer,
        };
    }

    if input.sessions == 0 {
        if input.goals == 0 {
            return StatusLine {
                main: "Next: write one goal, then Start.".into(),
                hint: "No need for all three. One is enough.".into(),
                target: Target::Goals,
            };
        }
        return StatusLine {
            main: "Next: press Start and log your first session.".into(),
            hint: "Starting beats perfect preparation.".into(),
            target: Target::Timer,
        };
    }

    let main = if input.goals > 0 {
        format!("{} sessions logged today. Even 5 minutes counts for the next.", input.sessions)
    } else {
        format!("{} sessions logged today. Writing one goal wouldn't hurt.", input.sessions)
    };
    let hint = if input.distractions > 0 {
        format!("{} distractions logged. One line, then back to work.", input.distractions)
    } else {
        "Log distractions as they happen. Writing them down is control.".into()
    };
    StatusLine {
        main,
        hint,
        target: if input.goals == 0 { Target::Goals } else { Target::Timer },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(running: bool, mode: Mode, goals: usize, sessions: usize, distractions: usize) -> StatusInput {
        StatusInput { running, mode, remaining: 90, goals, sessions, distractions }
    }

    #[test]
    fn running_focus_wins_over_counts() {
        let line = status_line(input(true, Mode::Focus, 0, 0, 0));
        assert_eq!(line.main, "Focusing · 01:30");
        assert_eq!(line.target, Target::Timer);

        // Counts don't matter while running.
        let line = status_line(input(true, Mode::Focus, 3, 9, 4));
        assert!(line.main.starts_with("Focusing"));
    }

    #[test]
    fn running_break_shows_resting() {
        let line = status_line(input(true, Mode::Break, 0, 2, 1));
        assert_eq!(line.main, "Resting · 01:30");
        assert_eq!(line.target, Target::Timer);
    }

    #[test]
    fn pending_break_beats_session_prompts() {
        let line = status_line(input(false, Mode::Break, 0, 0, 0));
        assert!(line.main.starts_with("Break is ready"));
        assert_eq!(line.target, Target::Timer);

        // Same message regardless of today's counts.
        let with_counts = status_line(input(false, Mode::Break, 2, 5, 3));
        assert_eq!(line, with_counts);
    }

    #[test]
    fn cold_start_without_goals_points_at_goals() {
        let line = status_line(input(false, Mode::Focus, 0, 0, 0));
        assert!(line.main.contains("write one goal"));
        assert_eq!(line.target, Target::Goals);
    }

    #[test]
    fn cold_start_with_goal_points_at_timer() {
        let line = status_line(input(false, Mode::Focus, 1, 0, 0));
        assert!(line.main.contains("first session"));
        assert_eq!(line.target, Target::Timer);
    }

    #[test]
    fn daily_summary_counts_sessions() {
        let line = status_line(input(false, Mode::Focus, 1, 4, 0));
        assert!(line.main.starts_with("4 sessions logged"));
        assert_eq!(line.target, Target::Timer);
        assert!(!line.hint.contains("logged."));

        // No goal set: summary points back at goals.
        let line = status_line(input(false, Mode::Focus, 0, 2, 0));
        assert!(line.main.contains("one goal"));
        assert_eq!(line.target, Target::Goals);
    }

    #[test]
    fn daily_summary_mentions_distractions_when_present() {
        let line = status_line(input(false, Mode::Focus, 2, 3, 5));
        assert!(line.hint.starts_with("5 distractions logged"));
    }
}

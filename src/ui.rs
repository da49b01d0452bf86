use ratatui::{prelude::*, widgets::*};

use crate::app::{App, GoalsMode, SettingsField, View};
use crate::clock::format_clock;
use crate::state::Mode;

const ACCENT: Color = Color::Rgb(0, 200, 255);
const FOCUS_COLOR: Color = Color::Rgb(100, 181, 246);
const BREAK_COLOR: Color = Color::Rgb(0, 255, 150);

fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Focus => FOCUS_COLOR,
        Mode::Break => BREAK_COLOR,
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    match app.current_view {
        View::Timer => render_timer(f, app),
        View::Goals => render_goals(f, app),
        View::Settings => render_settings(f, app),
        View::Help => render_help(f),
    }
}

// ============================================================================
// Timer view
// ============================================================================

fn render_timer(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    // Header
    let header = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(" ⏱  FTIMER ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)));
    f.render_widget(header, chunks[0]);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(5), Constraint::Length(1),
            Constraint::Length(2), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(3), Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Percentage(10),
        ])
        .split(chunks[1]);

    let color = mode_color(app.timer.mode());

    // Mode
    f.render_widget(
        Paragraph::new(app.timer.mode().name())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[1],
    );

    // Countdown
    f.render_widget(
        Paragraph::new(format_clock(app.timer.remaining()))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[3],
    );

    // Run state
    let run_state = if app.timer.running() {
        format!("{} RUNNING", if app.animation_frame < 10 { "●" } else { "○" })
    } else {
        "⏸  PAUSED".into()
    };
    f.render_widget(
        Paragraph::new(run_state)
            .style(Style::default()
                .fg(if app.timer.running() { Color::Green } else { Color::Yellow })
                .add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[5],
    );

    // Next-action status line
    let status = app.status();
    let status_lines = vec![
        Line::from(Span::styled(status.main, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(status.hint, Style::default().fg(Color::Gray))),
        Line::from(match &app.flash {
            Some(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Red)),
            None => Span::raw(""),
        }),
    ];
    f.render_widget(Paragraph::new(status_lines).alignment(Alignment::Center), sections[7]);

    // Progress
    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent((app.timer.progress_ratio() * 100.0) as u16),
        sections[9],
    );

    // Today's tally
    let tally = format!(
        "Today: {} sessions · {} min focused · {} distractions",
        app.day.sessions.len(),
        app.day.total_minutes(),
        app.day.distractions.len(),
    );
    f.render_widget(
        Paragraph::new(tally).style(Style::default().fg(Color::Gray)).alignment(Alignment::Center),
        sections[11],
    );

    // Controls
    let finish_label = match app.timer.mode() {
        Mode::Focus => " Finish  •  ",
        Mode::Break => " Skip  •  ",
    };
    let controls = vec![
        Line::from(vec![
            span_key("Space"), Span::raw(" Start/Pause  •  "),
            span_key("F"), Span::raw(finish_label),
            span_key("Enter"), Span::raw(" Next action"),
        ]),
        Line::from(vec![
            span_key("G"), Span::raw(" Goals  •  "),
            span_key("D"), Span::raw(" Settings  •  "),
            span_key("H"), Span::raw(" Help  •  "),
            span_key("Q"), Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn span_key(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
}

// ============================================================================
// Goals & distractions view
// ============================================================================

fn render_goals(f: &mut Frame, app: &App) {
    let area = centered_rect(75, 85, f.size());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("📋 TODAY'S GOALS", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];

    let help = match app.goals_mode {
        GoalsMode::Viewing => "  a: Add goal  •  x/Space: Done  •  d: Delete  •  n: Log distraction  •  g/Esc: Close",
        GoalsMode::AddingGoal => "  Type the goal and press Enter  •  Esc to cancel",
        GoalsMode::AddingDistraction => "  One line about what pulled you away, then Enter  •  Esc to cancel",
    };
    lines.push(Line::from(Span::styled(help, Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))));
    lines.push(Line::from(""));

    if app.goals_mode != GoalsMode::Viewing {
        let title = match app.goals_mode {
            GoalsMode::AddingGoal => "✏️  NEW GOAL",
            _ => "✏️  DISTRACTION",
        };
        lines.push(Line::from(Span::styled(format!("  {}", title), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(&app.goals_input, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled("█", Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
    }

    if app.day.goals.is_empty() {
        lines.push(Line::from(Span::styled("  No goals yet. One is enough — press 'a'.", Style::default().fg(Color::Gray))));
    } else {
        for (idx, goal) in app.day.goals.iter().enumerate() {
            let selected = idx == app.selected_goal;
            let prefix = if selected { "► " } else { "  " };
            let check = if goal.done { "☑" } else { "☐" };
            let style = if goal.done {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                Span::raw(format!("{} ", check)),
                Span::styled(&goal.title, style),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  🌀 DISTRACTIONS ({})", app.day.distractions.len()),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    if app.day.distractions.is_empty() {
        lines.push(Line::from(Span::styled("  Nothing logged. Writing them down is control.", Style::default().fg(Color::Gray))));
    } else {
        for d in app.day.distractions.iter().rev().take(10) {
            let time = d.ts.split('T').nth(1).unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", time), Style::default().fg(Color::DarkGray)),
                Span::styled(&d.note, Style::default().fg(Color::Gray)),
            ]));
        }
    }

    if let Some(msg) = &app.flash {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", msg), Style::default().fg(Color::Red))));
    }

    f.render_widget(
        Paragraph::new(lines).block(bordered(" Goals & Distractions ")),
        area,
    );
}

// ============================================================================
// Settings view
// ============================================================================

fn render_settings(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 85, f.size());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("⚙️  SETTINGS", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("  ↑↓/jk: Navigate  •  Enter: Edit  •  Space: Toggle  •  d/Esc: Close",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
        Line::from(""),
    ];

    let on_off = |v: bool| if v { "ON" } else { "OFF" }.to_string();
    let fields = [
        (SettingsField::FocusMinutes, "🎯 Focus Minutes", format!("{} min", app.settings.focus_minutes)),
        (SettingsField::BreakMinutes, "☕ Break Minutes", format!("{} min", app.settings.break_minutes)),
        (SettingsField::Sound, "🔔 Sound", on_off(app.settings.sound_enabled)),
        (SettingsField::Notify, "💬 Desktop Notifications", on_off(app.settings.notify_enabled)),
        (SettingsField::AutoBreak, "▶️  Auto-Start Break", on_off(app.settings.auto_break)),
    ];

    for (field, label, value) in fields {
        let selected = app.settings_field == field;
        let editing = selected && app.settings_editing;

        lines.push(Line::from(""));
        if editing {
            lines.push(Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(&app.settings_input, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled("█", Style::default().fg(Color::Green)),
            ]));
        } else {
            let (prefix, label_style, value_style) = if selected {
                ("  > ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                 Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            } else {
                ("    ", Style::default().fg(Color::Gray), Style::default().fg(Color::DarkGray))
            };
            lines.push(Line::from(vec![Span::styled(prefix, label_style), Span::styled(label, label_style)]));
            lines.push(Line::from(vec![Span::raw("    "), Span::styled(value, value_style)]));
        }
    }

    lines.push(Line::from(""));
    match &app.flash {
        Some(msg) => lines.push(Line::from(Span::styled(format!("  {}", msg), Style::default().fg(Color::Red)))),
        None => lines.push(Line::from(Span::styled("  💾 Saved automatically", Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC)))),
    }

    f.render_widget(Paragraph::new(lines).block(bordered(" Settings ")), area);
}

// ============================================================================
// Help view
// ============================================================================

fn render_help(f: &mut Frame) {
    let area = centered_rect(70, 85, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("⌨️  KEYBOARD SHORTCUTS", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  Timer:"),
        help_line("Space", "Start / pause the countdown"),
        help_line("F", "Finish the focus session early (Skip during a break)"),
        help_line("Enter", "Jump to the suggested next action"),
        Line::from(""),
        Line::from("  Navigation:"),
        help_line("G", "Goals & distractions"),
        help_line("D", "Settings"),
        help_line("H / ?", "Toggle help"),
        Line::from(""),
        Line::from("  Goals view:"),
        help_line("A", "Add a goal (up to three)"),
        help_line("X / Space", "Mark the selected goal done"),
        help_line("D", "Delete the selected goal"),
        help_line("N", "Log a one-line distraction"),
        Line::from(""),
        Line::from("  General:"),
        help_line("Q / Esc", "Quit / go back"),
        help_line("Ctrl+C", "Force quit"),
        Line::from(""),
        Line::from(Span::styled("💡 A finished focus session is recorded and owes you a break; quitting mid-break is fine, it resumes next launch.",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
    ];

    f.render_widget(Paragraph::new(help_text).block(bordered(" Help ")), area);
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

// ============================================================================
// Layout helpers
// ============================================================================

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}

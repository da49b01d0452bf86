use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::prelude::*;
use std::{
    io,
    time::{Duration, Instant},
};

mod alert;
mod app;
mod clock;
mod day;
mod state;
mod status;
mod store;
mod ui;

use app::App;
use store::Store;

const POLL_RATE: Duration = Duration::from_millis(200);
const ONE_SECOND: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(author, version, about = "⏱ ftimer - a terminal focus/break timer")]
struct Args {
    /// Focus length in minutes (overrides the saved setting)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=240))]
    focus: Option<u32>,
    /// Break length in minutes (overrides the saved setting)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=60))]
    rest: Option<u32>,
    #[arg(long)]
    no_sound: bool,
    /// Ignore any persisted break and start from a clean focus timer
    #[arg(long)]
    fresh: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let store = Store::new(Store::default_dir());
    let mut settings = store.load_settings();
    if let Some(focus) = args.focus {
        settings.focus_minutes = focus;
    }
    if let Some(rest) = args.rest {
        settings.break_minutes = rest;
    }
    if args.no_sound {
        settings.sound_enabled = false;
    }

    let mut app = App::new(store, settings, args.fresh);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_second = Instant::now();

    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;
        execute!(
            io::stdout(),
            SetTitle(format!(
                "{} · {} - ftimer",
                app.timer.mode().label(),
                clock::format_clock(app.timer.remaining())
            ))
        )?;

        if event::poll(POLL_RATE)? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) {
                    app.save_on_quit();
                    return Ok(());
                }
            }
        }

        app.animation_frame = app.animation_frame.wrapping_add(1) % 20;

        // The draw above always shows the previous second before the
        // countdown moves and completion effects fire.
        if last_second.elapsed() >= ONE_SECOND {
            last_second = Instant::now();
            app.on_tick();
        }
    }
}

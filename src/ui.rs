use crate::format::{format_duration, format_human, format_started_at};
use crate::models::{Fast, WeeklyStats};
use crate::timer::TimerSnapshot;

const BAR_WIDTH: usize = 30;

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\x1b[K";

pub const EMPTY_HISTORY: &str = "no fasts yet — your finished fasts will show up here";
pub const LOAD_MORE_HINT: &str = "more available — type 'more' to load the next page";

pub fn render_timer_line(snapshot: &TimerSnapshot, target_hours: u32) -> String {
    let filled = ((snapshot.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    let color = if snapshot.completed { YELLOW } else { GREEN };
    let flag = if snapshot.completed { "  goal reached" } else { "" };
    format!(
        "{color}{bar}{RESET} {} of {target_hours}h  {}%{flag}{CLEAR_LINE}",
        format_duration(snapshot.elapsed_seconds),
        snapshot.percent,
    )
}

pub fn render_idle(selected_hours: u32) -> String {
    format!("no active fast — target {selected_hours}h, type 'start' to begin")
}

pub fn render_stats(stats: &WeeklyStats) -> String {
    format!(
        "this week: {}/{} fasts completed · {:.1}h fasted · streak {}",
        stats.completed, stats.goal, stats.total_hours, stats.streak
    )
}

pub fn render_card(fast: &Fast) -> String {
    let marker = if fast.completed {
        format!("{GREEN}✓{RESET}")
    } else {
        format!("{RED}✗{RESET}")
    };
    let duration = format_human(fast.duration_seconds.unwrap_or(0));
    format!(
        "[{marker}] {} — {duration} / {}h target  {DIM}#{}{RESET}",
        format_started_at(fast.started_at),
        fast.target_hours,
        fast.id
    )
}

pub fn render_history(entries: &[Fast], has_more: bool) -> String {
    if entries.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    let mut lines: Vec<String> = entries.iter().map(render_card).collect();
    if has_more {
        lines.push(LOAD_MORE_HINT.to_string());
    }
    lines.join("\n")
}

pub fn render_help() -> &'static str {
    HELP
}

const HELP: &str = "\
commands:
  start [hours]   begin a fast (default target: current selection)
  hours N         choose the target for the next fast
  stop            end the running fast (asks for confirmation)
  stats           show this week's summary
  history         show finished fasts
  more            load the next history page
  delete ID       delete a finished fast (asks for confirmation)
  goal fast N     set your default fast length
  goal week N     set your weekly fast goal
  quit            exit";

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::format::format_human;
use crate::history::HistoryController;
use crate::models::GoalsUpdate;
use crate::timer::{TimerController, TimerPhase};
use crate::ui;
use chrono::Utc;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

pub struct App {
    api: ApiClient,
    timer: TimerController,
    history: HistoryController,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            timer: TimerController::new(),
            history: HistoryController::new(),
        }
    }

    pub async fn run(&mut self) -> std::io::Result<()> {
        self.startup().await;

        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = ticker.tick() => self.on_tick(),
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.handle_line(line.trim()).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        println!();
        Ok(())
    }

    async fn startup(&mut self) {
        println!("fasting tracker — api at {}", self.api.base_url());
        println!("{}", ui::render_help());
        println!();

        let generation = self.timer.generation();
        match self.api.active_fast().await {
            Ok(Some(fast)) => {
                let target_hours = fast.target_hours;
                if self.timer.adopt(generation, fast) {
                    info!("resuming active fast with a {target_hours}h target");
                }
            }
            Ok(None) => println!("{}", ui::render_idle(self.timer.selected_hours())),
            // a failed lookup reads as "no active fast"
            Err(err) => error!("failed to fetch active fast: {err}"),
        }

        self.refresh_stats().await;
        self.load_history().await;
    }

    fn on_tick(&mut self) {
        if self.timer.phase() != TimerPhase::Active {
            return;
        }
        let Some(snapshot) = self.timer.snapshot(Utc::now()) else {
            return;
        };
        let target_hours = self
            .timer
            .active_fast()
            .map(|fast| fast.target_hours)
            .unwrap_or(0);
        print!("\r{}", ui::render_timer_line(&snapshot, target_hours));
        let _ = std::io::stdout().flush();
    }

    async fn handle_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }

        if self.timer.phase() == TimerPhase::PendingStop {
            self.answer_stop(line).await;
            return true;
        }
        if self.history.pending_delete().is_some() {
            self.answer_delete(line).await;
            return true;
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        match command {
            "start" => self.start_fast(words.next()).await,
            "hours" => self.select_hours(words.next()),
            "stop" => self.request_stop(),
            "stats" => self.refresh_stats().await,
            "history" => self.show_history().await,
            "more" => self.load_more().await,
            "delete" => self.request_delete(words.next()),
            "goal" => self.update_goal(words.next(), words.next()).await,
            "help" => println!("{}", ui::render_help()),
            "quit" | "exit" => return false,
            _ => println!("unknown command — type 'help' for the list"),
        }
        true
    }

    async fn start_fast(&mut self, hours: Option<&str>) {
        if self.timer.is_running() {
            println!("a fast is already running — stop it first");
            return;
        }
        if let Some(hours) = hours {
            if !self.apply_hours(hours) {
                return;
            }
        }

        let target_hours = self.timer.selected_hours();
        let generation = self.timer.generation();
        match self.api.start_fast(target_hours).await {
            Ok(fast) => {
                if self.timer.adopt(generation, fast) {
                    println!("fast started — target {target_hours}h");
                    self.on_tick();
                }
            }
            Err(err) => alert(&err),
        }
    }

    fn select_hours(&mut self, raw: Option<&str>) {
        match raw {
            Some(raw) => {
                if self.apply_hours(raw) {
                    println!("next fast target set to {}h", self.timer.selected_hours());
                }
            }
            None => println!("usage: hours N"),
        }
    }

    fn apply_hours(&mut self, raw: &str) -> bool {
        match raw.parse::<u32>() {
            Ok(hours) if hours > 0 => {
                if self.timer.select_hours(hours) {
                    true
                } else {
                    println!("the target can only change while idle");
                    false
                }
            }
            _ => {
                println!("hours must be a positive whole number");
                false
            }
        }
    }

    fn request_stop(&mut self) {
        if self.timer.request_stop() {
            println!();
            println!("end your current fast? [y/N]");
        } else {
            println!("no active fast to stop");
        }
    }

    async fn answer_stop(&mut self, answer: &str) {
        if !is_yes(answer) {
            self.timer.decline_stop();
            return;
        }
        match self.api.stop_fast().await {
            Ok(fast) => {
                self.timer.clear();
                let duration = format_human(fast.duration_seconds.unwrap_or(0));
                let outcome = if fast.completed { "goal met" } else { "goal not met" };
                println!("fast ended — {duration} ({outcome})");
                self.refresh_stats().await;
            }
            Err(err) => {
                self.timer.decline_stop();
                alert(&err);
            }
        }
    }

    fn request_delete(&mut self, raw: Option<&str>) {
        let id = match raw.and_then(|raw| raw.parse::<u64>().ok()) {
            Some(id) => id,
            None => {
                println!("usage: delete ID");
                return;
            }
        };
        if self.history.request_delete(id) {
            println!("delete fast #{id}? this cannot be undone [y/N]");
        } else {
            println!("no fast #{id} in the loaded history");
        }
    }

    async fn answer_delete(&mut self, answer: &str) {
        if !is_yes(answer) {
            self.history.decline_delete();
            return;
        }
        let Some(id) = self.history.confirm_delete() else {
            return;
        };
        match self.api.delete_fast(id).await {
            Ok(()) => {
                self.history.remove(id);
                println!("deleted fast #{id}");
            }
            Err(err) => alert(&err),
        }
    }

    async fn show_history(&mut self) {
        if self.history.loaded() {
            println!(
                "{}",
                ui::render_history(self.history.entries(), self.history.has_more())
            );
        } else {
            self.load_history().await;
        }
    }

    async fn load_more(&mut self) {
        if self.history.loaded() && !self.history.has_more() {
            println!("no more pages");
            return;
        }
        self.load_history().await;
    }

    async fn load_history(&mut self) {
        let Some(request) = self.history.begin_load() else {
            return;
        };
        match self.api.history(request.page).await {
            Ok(page) => {
                if let Some(appended) = self.history.apply_page(request, page) {
                    if self.history.is_empty() {
                        println!("{}", ui::EMPTY_HISTORY);
                        return;
                    }
                    let entries = self.history.entries();
                    for fast in &entries[entries.len() - appended..] {
                        println!("{}", ui::render_card(fast));
                    }
                    if self.history.has_more() {
                        println!("{}", ui::LOAD_MORE_HINT);
                    }
                }
            }
            Err(err) => {
                self.history.fail_load(request);
                error!("failed to fetch history: {err}");
            }
        }
    }

    async fn update_goal(&mut self, kind: Option<&str>, value: Option<&str>) {
        let value = value
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|value| *value > 0);
        let goals = match (kind, value) {
            (Some("fast"), Some(hours)) => GoalsUpdate {
                default_fast_hours: Some(hours),
                ..GoalsUpdate::default()
            },
            (Some("week"), Some(count)) => GoalsUpdate {
                weekly_fast_goal: Some(count),
                ..GoalsUpdate::default()
            },
            _ => {
                println!("usage: goal fast N | goal week N");
                return;
            }
        };
        match self.api.update_goals(&goals).await {
            Ok(()) => println!("goals updated"),
            Err(err) => alert(&err),
        }
    }

    async fn refresh_stats(&mut self) {
        match self.api.weekly_stats().await {
            Ok(stats) => println!("{}", ui::render_stats(&stats)),
            Err(err) => error!("failed to fetch weekly stats: {err}"),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

fn alert(err: &ApiError) {
    println!("error: {err}");
}

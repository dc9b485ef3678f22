//! Session timer and the in-process application state.
//!
//! All mutable state (current session, selections, last computed views)
//! lives in `ApplicationState`, which command handlers own and pass around.
//! An in-flight session is never persisted: if the process ends while a
//! session is running, the session is lost.

use crate::config::Config;
use crate::core::calculator::rolling::rolling_average;
use crate::core::logic::Core;
use crate::db::log::ttlog_quiet;
use crate::db::store::LogStore;
use crate::errors::{AppError, AppResult};
use crate::models::dashboard::Dashboard;
use crate::models::period::ChartPeriod;
use crate::models::record::Record;
use crate::models::task::TaskLabel;
use crate::utils::clock::Clock;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub task: TaskLabel,
    pub started_at: NaiveDateTime,
    /// Expected duration, from the rolling average at start time.
    pub target_minutes: f64,
}

impl ActiveSession {
    pub fn elapsed_minutes(&self, now: NaiveDateTime) -> f64 {
        (now - self.started_at).num_seconds().max(0) as f64 / 60.0
    }

    /// Share of the target already spent, capped at 1.0.
    pub fn fill_ratio(&self, now: NaiveDateTime) -> f64 {
        if self.target_minutes <= 0.0 {
            return 1.0;
        }
        (self.elapsed_minutes(now) / self.target_minutes).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Running(ActiveSession),
}

pub struct ApplicationState<C: Clock> {
    store: LogStore,
    clock: C,
    rolling_offset: f64,
    session: SessionState,
    pub selected_task: TaskLabel,
    pub chart_task: TaskLabel,
    pub chart_period: ChartPeriod,
    dashboard: Option<Dashboard>,
    skipped_lines: usize,
}

impl<C: Clock> ApplicationState<C> {
    pub fn new(store: LogStore, clock: C, cfg: &Config) -> AppResult<Self> {
        let task = cfg.task()?;
        Ok(Self {
            store,
            clock,
            rolling_offset: cfg.rolling_offset_minutes,
            session: SessionState::Idle,
            selected_task: task,
            chart_task: task,
            chart_period: cfg.period()?,
            dashboard: None,
            skipped_lines: 0,
        })
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match &self.session {
            SessionState::Running(s) => Some(s),
            SessionState::Idle => None,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    pub fn select_task(&mut self, task: TaskLabel) {
        self.selected_task = task;
    }

    pub fn select_chart_task(&mut self, task: TaskLabel) -> AppResult<&Dashboard> {
        self.chart_task = task;
        self.refresh()
    }

    pub fn select_chart_period(&mut self, period: ChartPeriod) -> AppResult<&Dashboard> {
        self.chart_period = period;
        self.refresh()
    }

    /// Start timing the selected task. Only valid while idle.
    pub fn start_session(&mut self) -> AppResult<ActiveSession> {
        if let SessionState::Running(s) = &self.session {
            return Err(AppError::SessionAlreadyRunning(s.task.to_string()));
        }

        let started_at = self.clock.now();
        let records = self.store.read_all()?;
        let target = rolling_average(
            &records,
            self.selected_task,
            started_at.date(),
            self.rolling_offset,
        );

        let active = ActiveSession {
            task: self.selected_task,
            started_at,
            target_minutes: target,
        };

        info!(task = %active.task, target_minutes = target, "session started");
        self.session = SessionState::Running(active.clone());
        Ok(active)
    }

    /// Stop the running session, append its record and recompute the views.
    ///
    /// If the append fails the session keeps running.
    pub fn stop_session(&mut self) -> AppResult<Record> {
        let active = self.active().ok_or(AppError::NoActiveSession)?;
        let record = Record::from_session(active.task, active.started_at, self.clock.now());

        self.store.append(&record)?;
        self.session = SessionState::Idle;

        info!(task = %record.task, minutes = record.duration_minutes, "session stopped");
        ttlog_quiet(
            self.store.path(),
            "add",
            &record.task,
            &format!(
                "{} {}-{} ({} mins)",
                record.date_str(),
                record.start_str(),
                record.end_str(),
                record.duration_minutes
            ),
        );

        self.refresh()?;
        Ok(record)
    }

    /// Recompute every view from the log.
    pub fn refresh(&mut self) -> AppResult<&Dashboard> {
        let report = self.store.load()?;
        report.warn_malformed();
        self.skipped_lines = report.malformed.len();

        let dashboard =
            Core::build_dashboard(&report.records, self.today(), self.chart_task, self.chart_period);
        Ok(self.dashboard.insert(dashboard))
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    /// Malformed log lines left out of the last `refresh`.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ROLLING_OFFSET_MINUTES;
    use crate::utils::clock::FixedClock;
    use chrono::NaiveTime;

    fn state(dir: &tempfile::TempDir, now: &str) -> ApplicationState<FixedClock> {
        let store = LogStore::new(dir.path().join("time_log.csv"));
        ApplicationState::new(store, FixedClock::at(now), &Config::default()).unwrap()
    }

    #[test]
    fn start_then_stop_appends_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&dir, "2024-05-02 09:00:00");
        app.select_task(TaskLabel::Secondary);

        let target = app.start_session().unwrap().target_minutes;
        assert_eq!(target, DEFAULT_ROLLING_OFFSET_MINUTES);

        app.clock.advance_minutes(25);
        let record = app.stop_session().unwrap();

        assert_eq!(record.task, "Secondary");
        assert_eq!(record.duration_minutes, 25);
        assert_eq!(record.start, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(app.session(), &SessionState::Idle);
        assert_eq!(app.store().read_all().unwrap(), vec![record]);

        let dashboard = app.dashboard().unwrap();
        assert_eq!(dashboard.today_totals["Secondary"], 25);
    }

    #[test]
    fn refresh_counts_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&dir, "2024-05-02 09:00:00");
        crate::db::store::write_raw(
            app.store().path(),
            &[
                "date,task,start,end,duration",
                "2024-05-02,Main,08:00,08:40,40",
                "2024-05-02,Main,oops",
            ],
        );

        let totals = app.refresh().unwrap().today_totals["Main"];
        assert_eq!(totals, 40);
        assert_eq!(app.skipped_lines(), 1);

        app.store().replace_all(&app.store().read_all().unwrap()).unwrap();
        app.refresh().unwrap();
        assert_eq!(app.skipped_lines(), 0);
    }

    #[test]
    fn transitions_are_guarded() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&dir, "2024-05-02 09:00:00");

        assert!(matches!(app.stop_session(), Err(AppError::NoActiveSession)));
        app.start_session().unwrap();
        assert!(matches!(
            app.start_session(),
            Err(AppError::SessionAlreadyRunning(_))
        ));
    }

    #[test]
    fn target_comes_from_recent_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&dir, "2024-05-02 09:00:00");

        app.start_session().unwrap();
        app.clock.advance_minutes(70);
        app.stop_session().unwrap();

        app.start_session().unwrap();
        let active = app.active().unwrap().clone();
        assert_eq!(active.target_minutes, 10.0 + DEFAULT_ROLLING_OFFSET_MINUTES);

        app.clock.advance_minutes(5);
        assert!((active.fill_ratio(app.now()) - 0.25).abs() < 1e-9);
        app.clock.advance_minutes(60);
        assert_eq!(active.fill_ratio(app.now()), 1.0);
    }

    #[test]
    fn failed_append_keeps_session_running() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the log file should be makes appends fail
        let log = dir.path().join("time_log.csv");
        std::fs::create_dir(&log).unwrap();
        let mut app = ApplicationState::new(
            LogStore::new(&log),
            FixedClock::at("2024-05-02 09:00:00"),
            &Config::default(),
        )
        .unwrap();

        app.session = SessionState::Running(ActiveSession {
            task: TaskLabel::Main,
            started_at: app.now(),
            target_minutes: 10.0,
        });

        assert!(app.stop_session().is_err());
        assert!(app.active().is_some());
    }

    #[test]
    fn chart_selection_recomputes_views() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&dir, "2024-05-02 09:00:00");

        let d = app.select_chart_period(ChartPeriod::Month).unwrap();
        assert_eq!(d.chart.days.len(), 30);
        let d = app.select_chart_task(TaskLabel::Secondary).unwrap();
        assert_eq!(d.chart.task, TaskLabel::Secondary);
    }
}

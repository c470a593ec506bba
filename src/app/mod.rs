//! Application service
//!
//! `App` owns the state repository and the advisor and exposes one method
//! per user action. Each mutation loads the current state, applies a ledger
//! operation and writes the whole result back.

pub mod render;

use anyhow::{Context, Result};

use crate::advisor::{
    Advice, AdvisorTransport, AdvisoryClient, AiQuest, AiRecommendation, AiStudyTip,
    ClaudeTransport, OfflineTransport, ProxyTransport, Transport,
};
use crate::catalog::{self, PaperFilter};
use crate::config::{AdvisorMode, Config};
use crate::ledger::{self, Overview, WeeklyCompletion, WeeklyProgress};
use crate::model::{AppState, PastPaper, Subject, WeeklyQuest};
use crate::quests::{self, Clock, Reconciliation, SystemClock};
use crate::store::{FileStore, StateRepository, Store};
use crate::vault::PaperVault;

/// Build the advisor transport selected in the config
pub fn transport_for(config: &Config) -> Result<Transport> {
    Ok(match config.advisor {
        AdvisorMode::Proxy => Transport::Proxy(
            ProxyTransport::new(&config.backend_url).context("Failed to create HTTP client")?,
        ),
        AdvisorMode::Claude => {
            let transport = ClaudeTransport::from_key_source(config.model);
            if !transport.is_configured() {
                tracing::warn!("No Claude API key found, advice will use offline suggestions");
            }
            Transport::Claude(transport)
        }
        AdvisorMode::Offline => Transport::Offline(OfflineTransport),
    })
}

/// The main application
pub struct App<S: Store = FileStore, T = Transport, C = SystemClock> {
    config: Config,
    repo: StateRepository<S>,
    advisor: AdvisoryClient<T>,
    clock: C,
}

impl App {
    /// Open the configured data directory and advisor
    pub fn new(config: Config) -> Result<Self> {
        let dir = config.state_dir()?;
        let store =
            FileStore::open(&dir).with_context(|| format!("Failed to open data directory {:?}", dir))?;
        let transport = transport_for(&config)?;
        tracing::debug!("Using data directory {:?}, advisor {:?}", dir, config.advisor);
        Ok(Self::with_parts(config, StateRepository::new(store), transport, SystemClock))
    }
}

impl<S: Store, T: AdvisorTransport, C: Clock> App<S, T, C> {
    pub fn with_parts(config: Config, repo: StateRepository<S>, transport: T, clock: C) -> Self {
        Self { config, repo, advisor: AdvisoryClient::new(transport), clock }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn advisor(&self) -> &AdvisoryClient<T> {
        &self.advisor
    }

    /// Refresh weekly quests if the week has rolled over
    pub fn start_session(&mut self) -> Result<Reconciliation> {
        Ok(quests::reconcile(&mut self.repo, &self.clock)?)
    }

    pub fn state(&self) -> Result<AppState> {
        Ok(self.repo.load_state()?)
    }

    /// Stored weekly quests, empty before the first session
    pub fn weekly_quests(&self) -> Result<Vec<WeeklyQuest>> {
        Ok(self.repo.load_weekly_quests()?.unwrap_or_default())
    }

    pub fn overview(&self) -> Result<Overview> {
        Ok(Overview::of(&self.state()?))
    }

    pub fn weekly_progress(&self) -> Result<WeeklyProgress> {
        Ok(WeeklyProgress::of(&self.weekly_quests()?))
    }

    pub fn complete_quest(&mut self, id: u64) -> Result<AppState> {
        Ok(self.repo.update_state(|state| ledger::complete_quest(state, id))?)
    }

    pub fn complete_weekly_quest(&mut self, id: u64) -> Result<WeeklyCompletion> {
        let state = self.state()?;
        let weekly = self.weekly_quests()?;
        let completion = ledger::complete_weekly_quest(&state, &weekly, id);
        if completion.weekly != weekly {
            // XP first: a failed list write leaves the quest open to retry
            self.repo.save_state(&completion.state)?;
            self.repo.save_weekly_quests(&completion.weekly)?;
        }
        Ok(completion)
    }

    pub fn add_xp(&mut self, subject: Subject, amount: u32) -> Result<AppState> {
        Ok(self.repo.update_state(|state| ledger::add_xp(state, subject, amount))?)
    }

    pub fn record_study_day(&mut self, day: u32) -> Result<AppState> {
        Ok(self.repo.update_state(|state| ledger::record_study_day(state, day))?)
    }

    /// Past papers from the stored state matching `filter`
    pub fn papers(&self, filter: &PaperFilter) -> Result<Vec<PastPaper>> {
        let state = self.state()?;
        Ok(catalog::filter(&state.past_papers, filter).into_iter().cloned().collect())
    }

    pub async fn tip(&self) -> Result<Advice<AiStudyTip>> {
        let state = self.state()?;
        Ok(self.advisor.personalized_tip(&state.xp).await)
    }

    pub async fn recommendations(&self, subject: Option<&str>) -> Result<Advice<Vec<AiRecommendation>>> {
        let state = self.state()?;
        Ok(self.advisor.recommendations(&state.xp, subject).await)
    }

    /// Tip and recommendations requested together
    pub async fn insights(&self) -> Result<(Advice<AiStudyTip>, Advice<Vec<AiRecommendation>>)> {
        let state = self.state()?;
        Ok(self.advisor.insights(&state.xp).await)
    }

    /// Suggested quests; when `accept` is set they replace the completed
    /// daily quests
    pub async fn ai_quests(&mut self, accept: bool) -> Result<Advice<Vec<AiQuest>>> {
        let state = self.state()?;
        let advice = self.advisor.smart_quests(&state.xp, &state.completed_quests()).await;
        if accept {
            self.repo.update_state(|state| ledger::accept_ai_quests(state, &advice.value))?;
            tracing::info!("Accepted {} suggested quests", advice.value.len());
        }
        Ok(advice)
    }

    pub async fn study_plan(&self, time_available: &str) -> Result<Advice<String>> {
        let state = self.state()?;
        Ok(self.advisor.study_plan(&state.xp, time_available).await)
    }

    /// Open the configured paper vault
    pub fn vault(&self) -> Result<PaperVault> {
        let root = self.config.vault_root()?;
        let vault =
            PaperVault::open(&root).with_context(|| format!("Failed to open paper vault {:?}", root))?;
        tracing::debug!("Using paper vault {:?}", vault.root());
        Ok(vault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, WeekStamp};
    use crate::quests::FixedClock;
    use crate::store::{MemoryStore, STATE_KEY, StoreError};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    type TestApp = App<MemoryStore, OfflineTransport, FixedClock>;

    fn clock_on(date: (i32, u32, u32)) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap())
    }

    fn app_on(date: (i32, u32, u32)) -> TestApp {
        App::with_parts(
            Config::default(),
            StateRepository::new(MemoryStore::new()),
            OfflineTransport,
            clock_on(date),
        )
    }

    /// Memory store whose writes to the state key fail while `failing` is set
    #[derive(Default)]
    struct FailingStateStore {
        inner: MemoryStore,
        failing: bool,
    }

    impl Store for FailingStateStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.failing && key == STATE_KEY {
                return Err(StoreError::Io {
                    path: STATE_KEY.into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn first_session_generates_weekly_quests() {
        let mut app = app_on((2024, 2, 6));
        let outcome = app.start_session().unwrap();
        assert!(outcome.regenerated());
        assert_eq!(outcome.week(), WeekStamp::new(6, 2024));

        let progress = app.weekly_progress().unwrap();
        assert_eq!(progress.label(), "Week 6, 2024");
        assert_eq!(progress.completed, 0);

        assert!(!app.start_session().unwrap().regenerated());
    }

    #[test]
    fn completing_weekly_quest_persists_and_awards_once() {
        let mut app = app_on((2024, 2, 6));
        app.start_session().unwrap();
        let before = app.state().unwrap().xp.total();
        let quest = app.weekly_quests().unwrap()[0].clone();

        let completion = app.complete_weekly_quest(quest.id).unwrap();
        let (_, amount) = completion.awarded.unwrap();
        assert_eq!(amount, quest.xp);
        assert_eq!(app.state().unwrap().xp.total(), before + u64::from(quest.xp));
        assert!(app.weekly_quests().unwrap()[0].completed);

        let again = app.complete_weekly_quest(quest.id).unwrap();
        assert_eq!(again.awarded, None);
        assert_eq!(app.state().unwrap().xp.total(), before + u64::from(quest.xp));
    }

    #[test]
    fn failed_state_write_leaves_weekly_quest_open() {
        let mut app = App::with_parts(
            Config::default(),
            StateRepository::new(FailingStateStore::default()),
            OfflineTransport,
            clock_on((2024, 2, 6)),
        );
        app.start_session().unwrap();
        let before = app.state().unwrap().xp.total();
        let quest = app.weekly_quests().unwrap()[0].clone();

        app.repo.store_mut().failing = true;
        assert!(app.complete_weekly_quest(quest.id).is_err());
        assert!(!app.weekly_quests().unwrap()[0].completed);
        assert_eq!(app.state().unwrap().xp.total(), before);

        app.repo.store_mut().failing = false;
        let retry = app.complete_weekly_quest(quest.id).unwrap();
        assert_eq!(retry.awarded.map(|(_, xp)| xp), Some(quest.xp));
        assert_eq!(app.state().unwrap().xp.total(), before + u64::from(quest.xp));
        assert!(app.weekly_quests().unwrap()[0].completed);
    }

    #[test]
    fn add_xp_applies_multiplier() {
        let mut app = app_on((2024, 2, 6));
        let before = app.state().unwrap().xp.get(Subject::History);
        let after = app.add_xp(Subject::History, 20).unwrap();
        assert_eq!(after.xp.get(Subject::History), before + 30);
    }

    #[test]
    fn papers_are_filtered_from_state() {
        let mut app = app_on((2024, 2, 6));
        let subjects = ["Math", "Physics", "Math", "Physics", "Math"];
        app.repo
            .update_state(|state| {
                let mut state = state.clone();
                for (paper, subject) in state.past_papers.iter_mut().zip(subjects) {
                    paper.subject = subject.to_string();
                }
                state
            })
            .unwrap();
        assert_eq!(app.state().unwrap().past_papers.len(), subjects.len());

        let filter = PaperFilter::parse(Some("Math"), None, None).unwrap();
        let ids: Vec<_> = app.papers(&filter).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn accepting_fallback_quests_replaces_completed_ones() {
        let mut app = app_on((2024, 2, 6));
        let advice = app.ai_quests(true).await.unwrap();
        assert!(advice.is_fallback());

        let state = app.state().unwrap();
        assert_eq!(state.completed_quest_count(), 0);
        assert_eq!(state.quests.len(), 3 + advice.value.len());
        let added = state.quests.last().unwrap();
        assert_eq!(added.difficulty, Some(Difficulty::Easy));
    }

    #[tokio::test]
    async fn offline_insights_use_fallbacks() {
        let app = app_on((2024, 2, 6));
        let (tip, recs) = app.insights().await.unwrap();
        assert!(tip.is_fallback() && recs.is_fallback());
        assert_eq!(tip.value.title, "Focus on English");
    }
}

use std::sync::Arc;

use serde::Serialize;
use time::Date;
use tracing::{debug, info, instrument};

use crate::dates::{self, iso_date};
use crate::error::{AppResult, ValidationErrors};
use crate::profile::{services::round1, Profile};
use crate::weight::repo::WeightRepository;
use crate::weight::repo_types::Observation;

/// `((initial - current) / (initial - goal)) * 100`, clamped to `[0, 100]`.
///
/// A goal equal to the starting weight counts as reached.
pub fn goal_progress_percent(initial: f64, current: f64, goal: f64) -> f64 {
    if initial == goal {
        return 100.0;
    }
    let progress = (initial - current) / (initial - goal) * 100.0;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// A new observation must be a positive number.
pub fn validate_new_weight(weight: f64) -> AppResult<()> {
    let mut errors = ValidationErrors::new();
    if !weight.is_finite() || weight <= 0.0 {
        errors.add("weight", "Please enter a valid weight");
    }
    errors.into_result()
}

/// Row of the progress table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub weight: f64,
    /// Change against the previous measurement; negative is a loss.
    pub difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub initial_weight: f64,
    pub current_weight: f64,
    pub goal_weight: f64,
    pub percent: f64,
}

/// Append-only weight log of one profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightLedger {
    observations: Vec<Observation>,
}

impl WeightLedger {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Starting log for a profile without stored observations: its
    /// current weight dated `today`, or nothing before onboarding.
    pub fn seeded(profile: &Profile, today: Date) -> Self {
        let observations = if profile.weight > 0.0 {
            vec![Observation {
                date: today,
                weight: profile.weight,
            }]
        } else {
            Vec::new()
        };
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Same-day entries are kept side by side, never merged.
    pub fn record_on(&mut self, date: Date, weight: f64) -> Observation {
        let observation = Observation { date, weight };
        self.observations.push(observation);
        observation
    }

    /// Weight of the last appended entry, whatever its date.
    pub fn latest(&self, fallback: f64) -> f64 {
        self.observations
            .last()
            .map(|o| o.weight)
            .unwrap_or(fallback)
    }

    /// Entry with the newest date; the earliest appended wins a tie.
    pub fn newest(&self) -> Option<&Observation> {
        self.observations
            .iter()
            .fold(None, |best: Option<&Observation>, o| match best {
                Some(b) if b.date >= o.date => Some(b),
                _ => Some(o),
            })
    }

    /// Newest date first; each entry is compared with the one below it.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let mut sorted = self.observations.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
            .iter()
            .enumerate()
            .map(|(i, o)| HistoryEntry {
                date: o.date,
                weight: o.weight,
                difference: sorted.get(i + 1).map(|prev| round1(o.weight - prev.weight)),
            })
            .collect()
    }

    pub fn progress(&self, profile: &Profile) -> ProgressSummary {
        let initial = self
            .observations
            .first()
            .map(|o| o.weight)
            .unwrap_or(profile.weight);
        // top row of `history`, not the last appended entry
        let current = self.newest().map(|o| o.weight).unwrap_or(profile.weight);
        let percent = if self.observations.len() < 2 {
            0.0
        } else {
            goal_progress_percent(initial, current, profile.weight_goal)
        };
        ProgressSummary {
            initial_weight: initial,
            current_weight: current,
            goal_weight: profile.weight_goal,
            percent: round1(percent),
        }
    }
}

#[derive(Clone)]
pub struct WeightService {
    repo: Arc<dyn WeightRepository>,
}

impl WeightService {
    pub fn new(repo: Arc<dyn WeightRepository>) -> Self {
        Self { repo }
    }

    /// Stored log for `profile`; seeds and persists one on first access.
    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn ledger(&self, profile: &Profile) -> anyhow::Result<WeightLedger> {
        if let Some(observations) = self.repo.load(profile.id).await? {
            return Ok(WeightLedger::new(observations));
        }
        let ledger = WeightLedger::seeded(profile, dates::today());
        if !ledger.is_empty() {
            self.repo.save(profile.id, ledger.observations()).await?;
            debug!("weight log seeded from profile");
        }
        Ok(ledger)
    }

    pub async fn record(&self, profile: &Profile, weight: f64) -> anyhow::Result<Observation> {
        self.record_on(profile, dates::today(), weight).await
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    pub async fn record_on(
        &self,
        profile: &Profile,
        date: Date,
        weight: f64,
    ) -> anyhow::Result<Observation> {
        let mut ledger = self.ledger(profile).await?;
        let observation = ledger.record_on(date, weight);
        self.repo.save(profile.id, ledger.observations()).await?;
        info!(%date, weight, entries = ledger.len(), "weight recorded");
        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::weight::repo::KvWeightRepository;
    use time::macros::date;
    use uuid::Uuid;

    fn profile(weight: f64, goal: f64) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            name: "Demo".into(),
            email: "demo@example.com".into(),
            age: 35,
            weight,
            height: 170,
            bmi: 32.9,
            weight_goal: goal,
        }
    }

    fn service() -> WeightService {
        WeightService::new(Arc::new(KvWeightRepository::new(Arc::new(MemoryStore::new()))))
    }

    #[test]
    fn progress_percent_examples() {
        assert_eq!(goal_progress_percent(95.0, 95.0, 75.0), 0.0);
        assert_eq!(goal_progress_percent(95.0, 85.0, 75.0), 50.0);
        assert_eq!(goal_progress_percent(95.0, 75.0, 75.0), 100.0);
    }

    #[test]
    fn progress_percent_is_clamped() {
        assert_eq!(goal_progress_percent(95.0, 100.0, 75.0), 0.0);
        assert_eq!(goal_progress_percent(95.0, 60.0, 75.0), 100.0);
        assert_eq!(goal_progress_percent(80.0, 70.0, 80.0), 100.0);
    }

    #[test]
    fn latest_is_last_appended_not_newest_date() {
        let mut ledger = WeightLedger::default();
        assert_eq!(ledger.latest(95.0), 95.0);
        ledger.record_on(date!(2024 - 05 - 10), 90.0);
        ledger.record_on(date!(2024 - 05 - 01), 93.0);
        assert_eq!(ledger.latest(95.0), 93.0);
    }

    #[test]
    fn same_day_records_are_both_kept() {
        let mut ledger = WeightLedger::default();
        ledger.record_on(date!(2024 - 05 - 10), 90.0);
        ledger.record_on(date!(2024 - 05 - 10), 89.5);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn history_sorts_newest_first_with_deltas() {
        let ledger = WeightLedger::new(vec![
            Observation { date: date!(2024 - 01 - 01), weight: 90.0 },
            Observation { date: date!(2024 - 01 - 03), weight: 88.0 },
            Observation { date: date!(2024 - 01 - 02), weight: 89.0 },
        ]);
        let history = ledger.history();
        let dates: Vec<Date> = history.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![date!(2024 - 01 - 03), date!(2024 - 01 - 02), date!(2024 - 01 - 01)]
        );
        assert_eq!(history[0].difference, Some(-1.0));
        assert_eq!(history[1].difference, Some(-1.0));
        assert_eq!(history[2].difference, None);
    }

    #[test]
    fn progress_needs_two_observations() {
        let p = profile(95.0, 75.0);
        let mut ledger = WeightLedger::seeded(&p, date!(2024 - 01 - 01));
        assert_eq!(ledger.progress(&p).percent, 0.0);
        ledger.record_on(date!(2024 - 01 - 08), 85.0);
        let summary = ledger.progress(&p);
        assert_eq!(summary.initial_weight, 95.0);
        assert_eq!(summary.current_weight, 85.0);
        assert_eq!(summary.percent, 50.0);
    }

    #[test]
    fn progress_uses_newest_dated_entry() {
        let p = profile(95.0, 75.0);
        let mut ledger = WeightLedger::new(Vec::new());
        ledger.record_on(date!(2024 - 01 - 01), 95.0);
        ledger.record_on(date!(2024 - 01 - 10), 85.0);
        ledger.record_on(date!(2024 - 01 - 05), 90.0);

        let summary = ledger.progress(&p);
        assert_eq!(summary.current_weight, ledger.history()[0].weight);
        assert_eq!(summary.current_weight, 85.0);
        assert_eq!(summary.percent, 50.0);
        assert_eq!(ledger.latest(p.weight), 90.0);
    }

    #[test]
    fn progress_same_day_keeps_first_appended() {
        let p = profile(95.0, 75.0);
        let mut ledger = WeightLedger::new(Vec::new());
        ledger.record_on(date!(2024 - 01 - 01), 95.0);
        ledger.record_on(date!(2024 - 01 - 02), 91.0);
        ledger.record_on(date!(2024 - 01 - 02), 89.0);
        assert_eq!(ledger.progress(&p).current_weight, 91.0);
        assert_eq!(ledger.history()[0].weight, 91.0);
    }

    #[test]
    fn new_weight_must_be_positive() {
        assert!(validate_new_weight(82.5).is_ok());
        assert!(validate_new_weight(0.0).is_err());
        assert!(validate_new_weight(f64::NAN).is_err());
    }

    #[tokio::test]
    async fn recording_appends_and_persists() {
        let svc = service();
        let p = profile(95.0, 75.0);

        svc.record_on(&p, date!(2024 - 02 - 01), 94.0).await.unwrap();
        let before = svc.ledger(&p).await.unwrap().len();
        svc.record_on(&p, date!(2024 - 02 - 01), 93.5).await.unwrap();
        let after = svc.ledger(&p).await.unwrap();

        assert_eq!(after.len(), before + 1);
        assert_eq!(after.latest(p.weight), 93.5);
    }

    #[tokio::test]
    async fn ledger_not_seeded_before_onboarding() {
        let svc = service();
        let p = profile(0.0, 0.0);
        assert!(svc.ledger(&p).await.unwrap().is_empty());
    }
}

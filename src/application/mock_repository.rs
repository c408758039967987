//! In-memory indicator repository for unit tests

use crate::application::indicator_repository::IndicatorRepository;
use crate::domain::time_series::Observation;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup(Vec<String>),
    Fetch { identifier: String, entity: String },
}

#[derive(Clone, Default)]
pub struct MockIndicatorRepository {
    labels: HashMap<String, String>,
    series: HashMap<String, Vec<Observation>>,
    failing: Vec<String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockIndicatorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indicator(mut self, id: &str, label: &str, observations: &[(&str, Option<f64>)]) -> Self {
        self.labels.insert(id.to_string(), label.to_string());
        self.series.insert(
            id.to_string(),
            observations
                .iter()
                .map(|(period, value)| Observation::new(*period, *value))
                .collect(),
        );
        self
    }

    /// Observations of `id` fail as if the upstream were unreachable
    pub fn with_failing_series(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndicatorRepository for MockIndicatorRepository {
    async fn lookup_labels(&self, identifiers: &[String]) -> anyhow::Result<HashMap<String, String>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Lookup(identifiers.to_vec()));

        // Return in reverse to make sure callers do not rely on source order
        Ok(identifiers
            .iter()
            .rev()
            .filter_map(|id| self.labels.get(id).map(|label| (id.clone(), label.clone())))
            .collect())
    }

    async fn fetch_observations(
        &self,
        identifier: &str,
        entity: &str,
    ) -> anyhow::Result<Vec<Observation>> {
        self.calls.lock().unwrap().push(Call::Fetch {
            identifier: identifier.to_string(),
            entity: entity.to_string(),
        });

        if self.failing.iter().any(|id| id == identifier) {
            anyhow::bail!("connection refused while fetching {}", identifier);
        }
        Ok(self.series.get(identifier).cloned().unwrap_or_default())
    }
}

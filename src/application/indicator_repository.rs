// Repository trait for indicator metadata and observations
use crate::domain::time_series::Observation;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait IndicatorRepository: Send + Sync {
    /// Look up display labels. Identifiers the source does not know are
    /// absent from the returned map rather than reported as errors.
    async fn lookup_labels(&self, identifiers: &[String]) -> anyhow::Result<HashMap<String, String>>;

    /// All observations of one indicator for one entity, periods in the
    /// source's own encoding. Blank observations carry `value: None`.
    async fn fetch_observations(
        &self,
        identifier: &str,
        entity: &str,
    ) -> anyhow::Result<Vec<Observation>>;
}

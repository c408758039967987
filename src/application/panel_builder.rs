// Panel builder - Turns an indicator group into an aligned table and a subplot figure
use crate::application::indicator_repository::IndicatorRepository;
use crate::domain::dashboard::Panel;
use crate::domain::error::PanelError;
use crate::domain::figure::{Figure, Trace};
use crate::domain::grid::layout_grid;
use crate::domain::indicator::{IndicatorGroup, IndicatorMetadata};
use crate::domain::time_series::{Period, TimeSeriesTable};
use std::sync::Arc;

#[derive(Clone)]
pub struct PanelBuilder {
    repository: Arc<dyn IndicatorRepository>,
    row_height: u32,
}

impl PanelBuilder {
    pub fn new(repository: Arc<dyn IndicatorRepository>, row_height: u32) -> Self {
        Self {
            repository,
            row_height,
        }
    }

    /// Resolve display labels for every identifier, sorted by identifier.
    pub async fn resolve_metadata(
        &self,
        group: &IndicatorGroup,
    ) -> Result<IndicatorMetadata, PanelError> {
        let labels = self
            .repository
            .lookup_labels(group.identifiers())
            .await
            .map_err(|e| PanelError::DataSource(format!("{:#}", e)))?;

        IndicatorMetadata::from_labels(group, &labels)
    }

    /// Fetch and align the series of `order` for `entity`.
    ///
    /// Columns come out in exactly the order given. Blank observations are
    /// skipped, so a period only appears if some indicator has a value there.
    pub async fn fetch_series(
        &self,
        order: &[String],
        entity: &str,
    ) -> Result<TimeSeriesTable, PanelError> {
        if order.is_empty() {
            return Err(PanelError::InvalidGroup("no identifiers to fetch".to_string()));
        }
        if entity.trim().is_empty() {
            return Err(PanelError::InvalidGroup("entity is empty".to_string()));
        }

        let mut series = Vec::with_capacity(order.len());
        for id in order {
            let observations = self
                .repository
                .fetch_observations(id, entity)
                .await
                .map_err(|e| PanelError::DataSource(format!("{:#}", e)))?;

            let mut points = Vec::with_capacity(observations.len());
            for observation in observations {
                let Some(value) = observation.value.filter(|v| v.is_finite()) else {
                    continue;
                };
                let period = Period::parse(&observation.period).ok_or_else(|| {
                    PanelError::DataSource(format!(
                        "unrecognized period '{}' for {}",
                        observation.period, id
                    ))
                })?;
                points.push((period, value));
            }

            series.push((id.clone(), points));
        }

        Ok(TimeSeriesTable::align(series))
    }

    /// Resolve, fetch, lay out and place one trace per indicator.
    pub async fn build_panel(
        &self,
        group: &IndicatorGroup,
        entity: &str,
    ) -> Result<Panel, PanelError> {
        let metadata = self.resolve_metadata(group).await?;
        let table = self.fetch_series(&metadata.identifiers(), entity).await?;
        let grid = layout_grid(metadata.len())?;

        let traces = metadata
            .entries()
            .iter()
            .zip(grid.cells())
            .map(|(info, cell)| {
                let y = table.column(&info.id).ok_or_else(|| {
                    PanelError::DataSource(format!("no column for {}", info.id))
                })?;
                Ok(Trace {
                    name: info.id.clone(),
                    label: info.label.clone(),
                    x: table.periods().to_vec(),
                    y,
                    cell: *cell,
                })
            })
            .collect::<Result<Vec<_>, PanelError>>()?;

        let figure = Figure::new(grid, traces, self.row_height);
        Ok(Panel { table, figure })
    }
}

// Dashboard service - Use case for building dashboard pages
use crate::application::panel_builder::PanelBuilder;
use crate::domain::dashboard::{Dashboard, Panel, Section};
use crate::domain::error::PanelError;
use crate::domain::indicator::IndicatorGroup;
use crate::infrastructure::config::{render_template, PageDefinition, PagesConfig, SectionConfig, SiteConfig};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    builder: PanelBuilder,
    pages: Arc<PagesConfig>,
}

impl DashboardService {
    pub fn new(builder: PanelBuilder, pages: PagesConfig) -> Self {
        Self {
            builder,
            pages: Arc::new(pages),
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.pages.site
    }

    pub fn pages(&self) -> &[PageDefinition] {
        &self.pages.pages
    }

    /// Build every section of a page, one after another. A failed section
    /// keeps its error; the remaining sections are still built.
    pub async fn get_dashboard(&self, slug: &str) -> Option<Dashboard> {
        let page = self.pages.find_page(slug)?;
        let vars = template_vars(page);

        let mut sections = Vec::with_capacity(page.sections.len());
        for section in &page.sections {
            sections.push(self.build_section(page, section, &vars).await);
        }

        Some(Dashboard::new(
            page.page.clone(),
            page.heading.clone(),
            page.intro.clone(),
            sections,
        ))
    }

    /// Build a single section of a page
    pub async fn get_section(&self, slug: &str, index: usize) -> Option<Section> {
        let page = self.pages.find_page(slug)?;
        let section = page.sections.get(index)?;
        let vars = template_vars(page);
        Some(self.build_section(page, section, &vars).await)
    }

    /// Build a panel for an arbitrary `;`-separated indicator list
    pub async fn build_adhoc_panel(&self, indicators: &str, entity: &str) -> Result<Panel, PanelError> {
        let group = IndicatorGroup::parse(indicators)?;
        self.builder.build_panel(&group, entity).await
    }

    async fn build_section(
        &self,
        page: &PageDefinition,
        section: &SectionConfig,
        vars: &HashMap<String, String>,
    ) -> Section {
        let heading = render_template(&section.heading, vars);
        let panel = self.builder.build_panel(&section.indicators, &page.entity).await;

        match &panel {
            Ok(p) => tracing::debug!(
                "Built panel '{}' for {}: {} periods x {} indicators",
                heading,
                page.entity,
                p.table.periods().len(),
                p.table.columns().len()
            ),
            Err(e) => tracing::warn!("Panel '{}' for {} failed: {}", heading, page.entity, e),
        }

        Section { heading, panel }
    }
}

fn template_vars(page: &PageDefinition) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("country".to_string(), page.entity_name.clone());
    vars.insert("entity".to_string(), page.entity.clone());
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mock_repository::MockIndicatorRepository;
    use crate::domain::figure::DEFAULT_ROW_HEIGHT;

    const PAGES: &str = r#"
[site]
title = "Portfolio"
heading = "On Economics & Data Science"

[[pages]]
slug = "wdi"
title = "Portfolio / WDI"
heading = "World Development Indicators"
entity = "VNM"
entity_name = "Vietnam"

[[pages.sections]]
heading = "${country} Income"
indicators = ["GNI", "POP"]

[[pages.sections]]
heading = "${country} Prices"
indicators = ["CPI", "UNKNOWN"]
"#;

    fn service() -> DashboardService {
        let repo = MockIndicatorRepository::new()
            .with_indicator("GNI", "GNI per capita", &[("2019", Some(2500.0)), ("2020", Some(2650.0))])
            .with_indicator("POP", "Population", &[("2020", Some(97_300_000.0))])
            .with_indicator("CPI", "Consumer price index", &[("2020", Some(160.0))]);
        let builder = PanelBuilder::new(Arc::new(repo), DEFAULT_ROW_HEIGHT);
        DashboardService::new(builder, PagesConfig::from_toml(PAGES).unwrap())
    }

    #[tokio::test]
    async fn test_get_dashboard_builds_each_section() {
        let dashboard = service().get_dashboard("wdi").await.unwrap();

        assert_eq!(dashboard.heading, "World Development Indicators");
        assert_eq!(dashboard.sections.len(), 2);

        let income = &dashboard.sections[0];
        assert_eq!(income.heading, "Vietnam Income");
        let panel = income.panel.as_ref().unwrap();
        assert_eq!(panel.table.columns(), &["GNI", "POP"]);
        assert_eq!(panel.table.periods(), &["2019", "2020"]);

        let prices = &dashboard.sections[1];
        assert_eq!(prices.heading, "Vietnam Prices");
        assert_eq!(
            prices.panel.as_ref().unwrap_err(),
            &PanelError::MetadataResolution {
                missing: vec!["UNKNOWN".to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_page() {
        let service = service();
        assert!(service.get_dashboard("nope").await.is_none());
        assert!(service.get_section("wdi", 2).await.is_none());
    }

    #[tokio::test]
    async fn test_get_section() {
        let section = service().get_section("wdi", 0).await.unwrap();
        assert_eq!(section.heading, "Vietnam Income");
        assert!(section.panel.is_ok());
    }

    #[tokio::test]
    async fn test_adhoc_panel() {
        let service = service();

        let panel = service.build_adhoc_panel("POP;GNI", "VNM").await.unwrap();
        assert_eq!(panel.figure.subplot_titles(), vec!["GNI per capita", "Population"]);

        assert!(matches!(
            service.build_adhoc_panel("POP;POP", "VNM").await,
            Err(PanelError::InvalidGroup(_))
        ));
    }
}

use crate::domain::dashboard::PageConfig;
use crate::domain::figure::DEFAULT_ROW_HEIGHT;
use crate::domain::indicator::IndicatorGroup;
use anyhow::Context;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub world_bank: WorldBankSettings,
    #[serde(default)]
    pub figure: FigureSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorldBankSettings {
    pub base_url: String,
    #[serde(default = "default_source")]
    pub source: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FigureSettings {
    pub row_height: u32,
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub pages_file: String,
}

fn default_source() -> u32 {
    // World Development Indicators
    2
}

fn default_per_page() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct PagesConfig {
    pub site: SiteConfig,
    #[serde(default)]
    pub pages: Vec<PageDefinition>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub page: PageConfig,
    pub heading: String,
    #[serde(default)]
    pub intro: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageDefinition {
    pub slug: String,
    #[serde(flatten)]
    pub page: PageConfig,
    pub heading: String,
    #[serde(default)]
    pub intro: String,
    pub entity: String,
    pub entity_name: String,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SectionConfig {
    pub heading: String,
    pub indicators: IndicatorGroup,
}

impl PagesConfig {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        Self::load(config::File::from_str(source, config::FileFormat::Toml))
    }

    fn load<S>(source: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to read pages config")?;

        let pages: PagesConfig = settings
            .try_deserialize()
            .context("Failed to parse pages config")?;
        pages.validate()?;
        Ok(pages)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut slugs = HashSet::new();
        for page in &self.pages {
            if page.slug.is_empty() || !page.slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                anyhow::bail!("Invalid page slug '{}'", page.slug);
            }
            if !slugs.insert(page.slug.as_str()) {
                anyhow::bail!("Duplicate page slug '{}'", page.slug);
            }
            if page.entity.trim().is_empty() {
                anyhow::bail!("Page '{}' has no entity", page.slug);
            }
        }
        Ok(())
    }

    pub fn find_page(&self, slug: &str) -> Option<&PageDefinition> {
        self.pages.iter().find(|p| p.slug == slug)
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app"))
        .add_source(config::Environment::with_prefix("WDI").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_pages_config(path: &str) -> anyhow::Result<PagesConfig> {
    PagesConfig::load(config::File::new(path, config::FileFormat::Toml))
        .with_context(|| format!("Failed to load pages config {}", path))
}

/// Replace `${name}` placeholders in a template string
pub fn render_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{PageLayout, SidebarState};

    const PAGES: &str = r#"
[site]
title = "Portfolio"
heading = "On Economics & Data Science"

[[pages]]
slug = "wdi"
title = "Portfolio / WDI"
layout = "centered"
sidebar = "collapsed"
heading = "World Development Indicators"
entity = "VNM"
entity_name = "Vietnam"

[[pages.sections]]
heading = "${country} Income"
indicators = ["NY.GNP.PCAP.CD", "SP.POP.TOTL"]
"#;

    #[test]
    fn test_render_template() {
        let mut vars = HashMap::new();
        vars.insert("country".to_string(), "Vietnam".to_string());

        let result = render_template("${country} Growth & Economic structure", &vars);

        assert_eq!(result, "Vietnam Growth & Economic structure");
        assert_eq!(render_template("No vars", &vars), "No vars");
    }

    #[test]
    fn test_parse_pages() {
        let pages = PagesConfig::from_toml(PAGES).unwrap();

        assert_eq!(pages.site.page.icon, "chart_with_upwards_trend");
        assert_eq!(pages.site.page.layout, PageLayout::Wide);

        let page = pages.find_page("wdi").unwrap();
        assert_eq!(page.page.layout, PageLayout::Centered);
        assert_eq!(page.page.sidebar, SidebarState::Collapsed);
        assert_eq!(page.sections.len(), 1);
        assert_eq!(
            page.sections[0].indicators.identifiers(),
            &["NY.GNP.PCAP.CD", "SP.POP.TOTL"]
        );
        assert!(pages.find_page("missing").is_none());
    }

    #[test]
    fn test_duplicate_indicator_rejected_at_load() {
        let source = PAGES.replace("\"SP.POP.TOTL\"]", "\"NY.GNP.PCAP.CD\"]");
        let err = PagesConfig::from_toml(&source).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate identifier"));
    }

    #[test]
    fn test_empty_group_rejected_at_load() {
        let source = PAGES.replace("[\"NY.GNP.PCAP.CD\", \"SP.POP.TOTL\"]", "[]");
        assert!(PagesConfig::from_toml(&source).is_err());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let source = format!(
            "{}\n[[pages]]\nslug = \"wdi\"\ntitle = \"Again\"\nheading = \"Again\"\nentity = \"USA\"\nentity_name = \"United States\"\n",
            PAGES
        );
        let err = PagesConfig::from_toml(&source).unwrap_err();
        assert!(err.to_string().contains("Duplicate page slug"));
    }

    #[test]
    fn test_load_pages_config_from_file() {
        let pages = load_pages_config("config/pages.toml").unwrap();
        assert!(pages.find_page("world-development-indicators").is_some());

        let err = load_pages_config("config/missing.toml").unwrap_err();
        assert!(err.to_string().contains("config/missing.toml"));
    }

    #[test]
    fn test_shipped_pages_config_is_valid() {
        let pages = PagesConfig::from_toml(include_str!("../../config/pages.toml")).unwrap();
        let page = pages.find_page("world-development-indicators").unwrap();
        let sizes: Vec<usize> = page.sections.iter().map(|s| s.indicators.identifiers().len()).collect();
        assert_eq!(sizes, vec![17, 5, 5, 4, 5]);
    }
}

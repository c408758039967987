// Dashboard domain model
use super::error::PanelError;
use super::figure::Figure;
use super::time_series::TimeSeriesTable;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    #[default]
    Wide,
    Centered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
    #[default]
    Expanded,
    Collapsed,
}

/// Per-view page settings passed to the presentation shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageConfig {
    pub title: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub layout: PageLayout,
    #[serde(default)]
    pub sidebar: SidebarState,
}

fn default_icon() -> String {
    "chart_with_upwards_trend".to_string()
}

/// Aligned table and figure for one indicator group.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub table: TimeSeriesTable,
    pub figure: Figure,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub heading: String,
    pub panel: Result<Panel, PanelError>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub page: PageConfig,
    pub heading: String,
    pub intro: String,
    pub sections: Vec<Section>,
}

impl Dashboard {
    pub fn new(page: PageConfig, heading: String, intro: String, sections: Vec<Section>) -> Self {
        Self {
            page,
            heading,
            intro,
            sections,
        }
    }
}

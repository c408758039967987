// Indicator group and metadata domain models
use super::error::PanelError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Ordered, non-empty list of unique indicator identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct IndicatorGroup {
    identifiers: Vec<String>,
}

impl IndicatorGroup {
    pub fn new<I, S>(identifiers: I) -> Result<Self, PanelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers
            .into_iter()
            .map(|id| id.into().trim().to_string())
            .collect();

        if identifiers.is_empty() {
            return Err(PanelError::InvalidGroup("group is empty".to_string()));
        }
        if identifiers.iter().any(|id| id.is_empty()) {
            return Err(PanelError::InvalidGroup(
                "group contains a blank identifier".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for id in &identifiers {
            if !seen.insert(id.as_str()) {
                return Err(PanelError::InvalidGroup(format!("duplicate identifier {}", id)));
            }
        }

        Ok(Self { identifiers })
    }

    /// Parse a `;` or `,` separated list, e.g. `NY.GDP.MKTP.CD;SP.POP.TOTL`
    pub fn parse(list: &str) -> Result<Self, PanelError> {
        Self::new(
            list.split([';', ','])
                .map(str::trim)
                .filter(|id| !id.is_empty()),
        )
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl TryFrom<Vec<String>> for IndicatorGroup {
    type Error = PanelError;

    fn try_from(identifiers: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(identifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorInfo {
    pub id: String,
    pub label: String,
}

/// Display labels for a group, sorted by identifier.
///
/// The sorted order is the one ordering used for table columns, grid
/// placement and subplot titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorMetadata {
    entries: Vec<IndicatorInfo>,
}

impl IndicatorMetadata {
    /// All-or-nothing: every identifier of `group` must have a label.
    pub fn from_labels(
        group: &IndicatorGroup,
        labels: &HashMap<String, String>,
    ) -> Result<Self, PanelError> {
        let missing: Vec<String> = group
            .identifiers()
            .iter()
            .filter(|id| !labels.contains_key(id.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(PanelError::MetadataResolution { missing });
        }

        let mut entries: Vec<IndicatorInfo> = group
            .identifiers()
            .iter()
            .map(|id| IndicatorInfo {
                id: id.clone(),
                label: labels[id.as_str()].clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IndicatorInfo] {
        &self.entries
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// World Bank Indicators API repository implementation
use crate::application::indicator_repository::IndicatorRepository;
use crate::domain::time_series::Observation;
use crate::infrastructure::config::WorldBankSettings;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldBankError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("World Bank API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("World Bank API error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct WorldBankRepository {
    base_url: String,
    source: u32,
    per_page: u32,
    http: reqwest::Client,
}

/// Pagination header, the first element of every API response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageInfo {
    page: u32,
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct IndicatorRecord {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct DataRecord {
    date: String,
    value: Option<f64>,
}

enum Envelope {
    Messages(Vec<ApiMessage>),
    Page { info: PageInfo, records: Vec<Value> },
}

impl WorldBankRepository {
    pub fn new(settings: &WorldBankSettings) -> Result<Self, WorldBankError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wdi-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            source: settings.source,
            per_page: settings.per_page.max(1),
            http,
        })
    }

    fn indicator_url(&self, identifier: &str) -> String {
        format!(
            "{}/indicator/{}?format=json",
            self.base_url,
            urlencoding::encode(identifier)
        )
    }

    fn data_url(&self, identifier: &str, entity: &str, page: u32) -> String {
        format!(
            "{}/country/{}/indicator/{}?format=json&source={}&per_page={}&page={}",
            self.base_url,
            urlencoding::encode(entity),
            urlencoding::encode(identifier),
            self.source,
            self.per_page,
            page
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value, WorldBankError> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WorldBankError::Status { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| WorldBankError::Parse(format!("response is not JSON: {}", e)))
    }
}

#[async_trait]
impl IndicatorRepository for WorldBankRepository {
    async fn lookup_labels(&self, identifiers: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut labels = HashMap::new();

        for identifier in identifiers {
            let json = self.get_json(&self.indicator_url(identifier)).await?;
            for (id, name) in parse_indicator_labels(&json)? {
                if id.eq_ignore_ascii_case(identifier) {
                    labels.insert(identifier.clone(), name);
                }
            }
        }

        tracing::debug!(
            "Resolved {} of {} indicator labels",
            labels.len(),
            identifiers.len()
        );
        Ok(labels)
    }

    async fn fetch_observations(
        &self,
        identifier: &str,
        entity: &str,
    ) -> anyhow::Result<Vec<Observation>> {
        let mut observations = Vec::new();
        let mut page = 1;

        loop {
            let json = self.get_json(&self.data_url(identifier, entity, page)).await?;
            let (info, records) = parse_observations(&json)?;
            observations.extend(records);

            if info.pages == 0 || info.page >= info.pages || page >= info.pages {
                break;
            }
            page += 1;
        }

        tracing::debug!(
            "Fetched {} observations of {} for {}",
            observations.len(),
            identifier,
            entity
        );
        Ok(observations)
    }
}

fn parse_envelope(json: &Value) -> Result<Envelope, WorldBankError> {
    let items = json
        .as_array()
        .ok_or_else(|| WorldBankError::Parse("expected a JSON array".to_string()))?;
    let head = items
        .first()
        .ok_or_else(|| WorldBankError::Parse("empty response".to_string()))?;

    if let Some(messages) = head.get("message") {
        let messages: Vec<ApiMessage> = serde_json::from_value(messages.clone())
            .map_err(|e| WorldBankError::Parse(format!("invalid message block: {}", e)))?;
        return Ok(Envelope::Messages(messages));
    }

    let info = PageInfo {
        page: read_count(head, "page")?,
        pages: read_count(head, "pages")?,
    };

    let records = match items.get(1) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records.clone(),
        Some(_) => {
            return Err(WorldBankError::Parse(
                "record list is not an array".to_string(),
            ))
        }
    };

    Ok(Envelope::Page { info, records })
}

/// Page counters arrive either as numbers or as numeric strings
fn read_count(head: &Value, key: &str) -> Result<u32, WorldBankError> {
    let value = head
        .get(key)
        .ok_or_else(|| WorldBankError::Parse(format!("missing '{}' in page header", key)))?;

    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .map(|n| n as u32)
        .ok_or_else(|| WorldBankError::Parse(format!("invalid '{}' in page header: {}", key, value)))
}

fn messages_to_error(messages: &[ApiMessage]) -> WorldBankError {
    let text = messages
        .iter()
        .map(|m| format!("{}: {}", m.key, m.value))
        .collect::<Vec<_>>()
        .join("; ");
    WorldBankError::Api(text)
}

fn is_unknown_value(messages: &[ApiMessage]) -> bool {
    messages
        .iter()
        .any(|m| m.key.eq_ignore_ascii_case("invalid value"))
}

/// `(id, name)` pairs from an indicator lookup. An "invalid value" message
/// means the identifier does not exist and yields no pairs.
fn parse_indicator_labels(json: &Value) -> Result<Vec<(String, String)>, WorldBankError> {
    match parse_envelope(json)? {
        Envelope::Messages(messages) if is_unknown_value(&messages) => Ok(Vec::new()),
        Envelope::Messages(messages) => Err(messages_to_error(&messages)),
        Envelope::Page { records, .. } => records
            .into_iter()
            .map(|record| {
                serde_json::from_value::<IndicatorRecord>(record)
                    .map(|r| (r.id, r.name.trim().to_string()))
                    .map_err(|e| WorldBankError::Parse(format!("invalid indicator record: {}", e)))
            })
            .collect(),
    }
}

fn parse_observations(json: &Value) -> Result<(PageInfo, Vec<Observation>), WorldBankError> {
    match parse_envelope(json)? {
        Envelope::Messages(messages) => Err(messages_to_error(&messages)),
        Envelope::Page { info, records } => {
            let observations = records
                .into_iter()
                .map(|record| {
                    serde_json::from_value::<DataRecord>(record)
                        .map(|r| Observation::new(r.date, r.value))
                        .map_err(|e| WorldBankError::Parse(format!("invalid data record: {}", e)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((info, observations))
        }
    }
}

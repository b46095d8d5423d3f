use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::ScrapeStatus;

/// A business entry from the dataset.
///
/// Only the fields the harvester reads or writes are typed; everything else
/// in the source object (DUNS numbers, addresses, industry codes, ...) is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub about_text: Option<String>,
    #[serde(default)]
    pub combined_text: Option<String>,

    #[serde(
        default,
        alias = "selenium_status",
        deserialize_with = "lenient_status"
    )]
    pub scrape_status: Option<ScrapeStatus>,
    #[serde(default, alias = "selenium_scraped_content_length")]
    pub scraped_length: Option<usize>,
    #[serde(default, alias = "selenium_debug_info")]
    pub debug_log: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.id)
    }

    /// The URL to scrape, if the record has a non-blank one.
    pub fn url(&self) -> Option<&str> {
        self.web_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// Best available narrative text: combined, then about, then raw.
    /// Empty strings are skipped.
    pub fn best_text(&self) -> &str {
        [&self.combined_text, &self.about_text, &self.raw_text]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .find(|t| !t.trim().is_empty())
            .unwrap_or("")
    }

    /// Text present before any scraping touched the record.
    ///
    /// `combined_text` is the only field a scrape overwrites, so callers that
    /// need the pre-scrape text must snapshot it with this method first.
    pub fn original_text(&self) -> String {
        self.best_text().to_string()
    }
}

/// Older datasets carry free-form statuses (`not_processed`, pipeline error
/// strings). Those read as "no status" instead of failing the whole file.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<ScrapeStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

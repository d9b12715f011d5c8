use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Kind of listing a site publishes
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Product,
    RealEstate,
}

/// A single scalar (or amenity list) stored in a record field
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Date(NaiveDate),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Flat rendering used by the tabular export
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::List(items) => items.join("; "),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// One scraped listing: an ordered, flat field map where every value may be null.
///
/// Field order is the order of first insertion; setting an existing field
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRecord {
    fields: Vec<(String, Option<FieldValue>)>,
}

impl ListingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<FieldValue>>(&mut self, name: &str, value: Option<V>) {
        let value = value.map(Into::into);
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Builder-style variant of [`ListingRecord::set`]
    pub fn with<V: Into<FieldValue>>(mut self, name: &str, value: Option<V>) -> Self {
        self.set(name, value);
        self
    }

    /// Overwrite `name` only when `value` is present; the detail-page merge rule.
    pub fn set_if_some<V: Into<FieldValue>>(&mut self, name: &str, value: Option<V>) {
        if value.is_some() {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ListingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Why pagination of one category stopped
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    FetchFailed,
    NoContainer,
    NoCards,
    RepeatedPage,
    PageCap,
}

/// Summary of one (site, category URL) pagination run
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRun {
    pub url: String,
    /// Pages whose cards were appended
    pub pages: u32,
    pub records: usize,
    pub stop: StopReason,
}

/// All records collected for one site, in page order
#[derive(Debug, Clone, Serialize)]
pub struct SiteResult {
    pub site: &'static str,
    pub categories: Vec<CategoryRun>,
    pub records: Vec<ListingRecord>,
}

impl SiteResult {
    pub fn new(site: &'static str) -> Self {
        Self {
            site,
            categories: Vec::new(),
            records: Vec::new(),
        }
    }
}

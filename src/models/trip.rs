use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct Trip {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "decimal")]
    pub price: f64,
    #[serde(deserialize_with = "text")]
    pub duration: String,
    pub description: String,
    pub available_slots: i64,
}

impl Trip {
    pub fn is_sold_out(&self) -> bool {
        self.available_slots <= 0
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct NewTrip {
    pub title: String,
    pub description: String,
    pub available_slots: i64,
    pub duration: String,
    pub price: f64,
}

/// Partial update for PATCH /trips/{id}; unset fields are left out of the body
#[derive(Debug, Serialize, Clone, Default)]
pub struct TripUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl TripUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.available_slots.is_none()
            && self.duration.is_none()
            && self.price.is_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

// Postgres DECIMAL columns come back from node-pg as strings ("1500.00")
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {:?}", s))),
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Text(s) => Ok(s),
        NumberOrString::Number(n) if n.fract() == 0.0 => Ok(format!("{}", n as i64)),
        NumberOrString::Number(n) => Ok(n.to_string()),
    }
}

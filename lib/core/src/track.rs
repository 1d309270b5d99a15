use crate::dials::Dials;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    String(String),
    Uuid(Uuid),
    Integer(u64),
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackId::String(s) => write!(f, "{}", s),
            TrackId::Uuid(u) => write!(f, "{}", u),
            TrackId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        TrackId::String(s)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        TrackId::String(s.to_string())
    }
}

impl From<u64> for TrackId {
    fn from(i: u64) -> Self {
        TrackId::Integer(i)
    }
}

impl From<Uuid> for TrackId {
    fn from(u: Uuid) -> Self {
        TrackId::Uuid(u)
    }
}

/// A catalog entry: a unique id, its dial profile, and display metadata
/// the matching engine never looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    #[serde(flatten)]
    pub dials: Dials,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl Track {
    #[inline]
    #[must_use]
    pub fn new(id: TrackId, dials: Dials, payload: Option<serde_json::Value>) -> Self {
        Self { id, dials, payload }
    }

    #[inline]
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Human-readable label from the payload's `title`/`artist` fields,
    /// falling back to the id.
    #[must_use]
    pub fn label(&self) -> String {
        let field = |name: &str| {
            self.payload
                .as_ref()
                .and_then(|p| p.get(name))
                .and_then(|v| v.as_str())
        };
        match (field("title"), field("artist")) {
            (Some(title), Some(artist)) => format!("{} - {}", title, artist),
            (Some(title), None) => title.to_string(),
            _ => self.id.to_string(),
        }
    }
}

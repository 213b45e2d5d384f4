use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A maker the user has saved. Only `id` is required; whatever else the
/// directory page handed us is kept as-is.
#[derive(Debug, Clone, PartialEq)]
#[serde_with::skip_serializing_none]
#[derive(Deserialize, Serialize)]
pub struct SavedMaker {
    pub id: String,
    pub name: Option<String>,
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SavedMaker {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            url: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

pub fn saved_makers_key(username: &str) -> String {
    format!("savedMakers_{username}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let maker = SavedMaker::new("m1").with_name("Ada's Workshop");

        let json = serde_json::to_string(&maker).unwrap();
        assert_eq!(json, r#"{"id":"m1","name":"Ada's Workshop"}"#);
    }

    #[test]
    fn unknown_fields_survive() {
        let json = r#"{"id":"m7","category":"woodwork","rating":4}"#;
        let maker: SavedMaker = serde_json::from_str(json).unwrap();

        assert_eq!(maker.id, "m7");
        assert_eq!(maker.name, None);
        assert_eq!(maker.extra["category"], "woodwork");

        let back = serde_json::to_value(&maker).unwrap();
        assert_eq!(back["rating"], 4);
    }

    #[test]
    fn key_per_user() {
        assert_eq!(saved_makers_key("alice"), "savedMakers_alice");
    }
}

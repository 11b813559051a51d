use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Kind of resource a bookmark points at.
///
/// The set is closed: every site that cares about the kind (validation,
/// resolution) matches on it exhaustively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceType {
    #[default]
    #[serde(alias = "URL")]
    Url,
    #[serde(alias = "FILE")]
    File,
}

/// A bookmark record as stored in the record store.
///
/// Every field except `id` carries a serde default so that records written by
/// older versions (no `resourceType`, no `live`, `url` instead of `location`)
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    #[serde(default)]
    pub route: String,
    #[serde(default, alias = "url")]
    pub location: String,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub live: bool,
}

impl Bookmark {
    /// A fresh bookmark: no route, no location, not live.
    pub fn unrouted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route: String::new(),
            location: String::new(),
            resource_type: ResourceType::default(),
            live: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_wire_names() {
        assert_eq!(serde_json::to_string(&ResourceType::Url).unwrap(), "\"url\"");
        assert_eq!(serde_json::to_string(&ResourceType::File).unwrap(), "\"file\"");
        assert_eq!(ResourceType::File.to_string(), "file");
        assert_eq!("URL".parse::<ResourceType>().unwrap(), ResourceType::Url);
    }

    #[test]
    fn test_bookmark_json_keys_are_camel_case() {
        let mut bookmark = Bookmark::unrouted("0001");
        bookmark.resource_type = ResourceType::File;
        bookmark.live = true;

        let value = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(value["resourceType"], "file");
        assert_eq!(value["live"], true);
        assert!(value.get("resource_type").is_none());
    }

    #[test]
    fn test_legacy_record_gets_defaults() {
        let legacy = r#"{"id":"0001","route":"gh","url":"https://github.com"}"#;
        let bookmark: Bookmark = serde_json::from_str(legacy).unwrap();

        assert_eq!(bookmark.location, "https://github.com");
        assert_eq!(bookmark.resource_type, ResourceType::Url);
        assert!(!bookmark.live);
    }

    #[test]
    fn test_unrouted_bookmark() {
        let bookmark = Bookmark::unrouted("42");
        assert_eq!(bookmark.id, "42");
        assert!(bookmark.route.is_empty());
        assert!(bookmark.location.is_empty());
        assert!(!bookmark.live);
    }
}

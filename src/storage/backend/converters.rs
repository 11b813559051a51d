use sea_orm::ActiveValue::Set;

use crate::errors::{AkaError, Result};
use crate::storage::Bookmark;
use migration::entities::bookmark;

/// Decode a stored row. The row key wins over any id inside the JSON.
pub fn model_to_bookmark(model: bookmark::Model) -> Result<Bookmark> {
    let mut decoded: Bookmark = serde_json::from_str(&model.value).map_err(|e| {
        AkaError::serialization(format!("Corrupt bookmark record '{}': {}", model.id, e))
    })?;
    decoded.id = model.id;
    Ok(decoded)
}

pub fn bookmark_to_active_model(bookmark: &Bookmark) -> Result<bookmark::ActiveModel> {
    let value = serde_json::to_string(bookmark)?;
    Ok(bookmark::ActiveModel {
        id: Set(bookmark.id.clone()),
        value: Set(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ResourceType;

    #[test]
    fn test_model_round_trip_preserves_enum_and_bool() {
        let bookmark = Bookmark {
            id: "0017000000000000000000003".to_string(),
            route: "notes".to_string(),
            location: "/home/me/notes.md".to_string(),
            resource_type: ResourceType::File,
            live: true,
        };

        let active = bookmark_to_active_model(&bookmark).unwrap();
        let model = bookmark::Model {
            id: active.id.unwrap(),
            value: active.value.unwrap(),
        };

        assert_eq!(model_to_bookmark(model).unwrap(), bookmark);
    }

    #[test]
    fn test_corrupt_value_is_serialization_error() {
        let model = bookmark::Model {
            id: "1".to_string(),
            value: "{not json".to_string(),
        };
        let err = model_to_bookmark(model).unwrap_err();
        assert!(matches!(err, AkaError::Serialization(_)));
    }
}

//! 资源校验
//!
//! 按资源类型校验 bookmark 的 location：
//! - url: 必须是合法的绝对 URL（scheme + authority 或 scheme + opaque），不做网络请求
//! - file: 必须是绝对路径，且当前指向一个存在的普通文件

use std::path::Path;

use url::Url;

use crate::storage::ResourceType;

/// Why a location was rejected for its resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceValidationError {
    EmptyLocation,
    InvalidUrl(String),
    RelativePath(String),
    FileMissing(String),
    NotAFile(String),
}

impl std::fmt::Display for ResourceValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLocation => write!(f, "Location cannot be empty"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL format: {}", msg),
            Self::RelativePath(path) => write!(f, "File path must be absolute: {}", path),
            Self::FileMissing(path) => write!(f, "File does not exist: {}", path),
            Self::NotAFile(path) => write!(f, "Not a regular file: {}", path),
        }
    }
}

impl std::error::Error for ResourceValidationError {}

/// 校验 location 是否满足其资源类型
pub async fn validate(
    resource_type: ResourceType,
    location: &str,
) -> Result<(), ResourceValidationError> {
    if location.trim().is_empty() {
        return Err(ResourceValidationError::EmptyLocation);
    }

    match resource_type {
        ResourceType::Url => validate_url(location),
        ResourceType::File => validate_file(location).await,
    }
}

pub async fn is_valid(resource_type: ResourceType, location: &str) -> bool {
    validate(resource_type, location).await.is_ok()
}

/// `Url::parse` only accepts absolute URLs, so a successful parse is enough.
pub fn validate_url(location: &str) -> Result<(), ResourceValidationError> {
    Url::parse(location.trim())
        .map(|_| ())
        .map_err(|e| ResourceValidationError::InvalidUrl(e.to_string()))
}

pub async fn validate_file(location: &str) -> Result<(), ResourceValidationError> {
    let path = Path::new(location);
    if !path.is_absolute() {
        return Err(ResourceValidationError::RelativePath(location.to_string()));
    }

    // 跟随符号链接
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ResourceValidationError::NotAFile(location.to_string())),
        Err(_) => Err(ResourceValidationError::FileMissing(location.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://localhost:8080/path?q=1#frag").is_ok());
        assert!(validate_url("ftp://files.example.com/pub").is_ok());
        assert!(validate_url("mailto:someone@example.com").is_ok());
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(
            validate_url("example.com"),
            Err(ResourceValidationError::InvalidUrl(_))
        ));
        assert!(validate_url("/just/a/path").is_err());
        assert!(validate_url("http://").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_empty_location_rejected_for_every_kind() {
        use strum::IntoEnumIterator;

        for kind in ResourceType::iter() {
            assert_eq!(
                validate(kind, "  ").await,
                Err(ResourceValidationError::EmptyLocation)
            );
        }
    }

    #[tokio::test]
    async fn test_existing_file_is_valid() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "hello").unwrap();

        assert!(is_valid(ResourceType::File, file.to_str().unwrap()).await);
        // 同一路径作为 URL 不合法
        assert!(!is_valid(ResourceType::Url, file.to_str().unwrap()).await);
    }

    #[tokio::test]
    async fn test_missing_file_and_directory_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");

        assert!(matches!(
            validate(ResourceType::File, missing.to_str().unwrap()).await,
            Err(ResourceValidationError::FileMissing(_))
        ));
        assert!(matches!(
            validate(ResourceType::File, dir.path().to_str().unwrap()).await,
            Err(ResourceValidationError::NotAFile(_))
        ));
    }

    #[tokio::test]
    async fn test_relative_file_path_rejected() {
        assert!(matches!(
            validate(ResourceType::File, "relative/notes.txt").await,
            Err(ResourceValidationError::RelativePath(_))
        ));
    }
}

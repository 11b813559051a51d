use std::fmt;

use crate::storage::ResourceType;

#[derive(Debug, Clone)]
pub enum AkaError {
    /// Missing bookmark (by id) or missing route
    NotFound(String),
    /// The route is already claimed by another live bookmark
    DuplicateRoute(String),
    /// The route can never be resolved (empty, contains a separator, reserved)
    InvalidRoute(String),
    /// The stored location does not satisfy its resource kind
    InvalidResource {
        resource_type: ResourceType,
        location: String,
    },
    /// A file-backed route whose file disappeared after validation
    ResourceUnavailable(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    FileOperation(String),
}

impl AkaError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AkaError::NotFound(_) => "E001",
            AkaError::DuplicateRoute(_) => "E002",
            AkaError::InvalidRoute(_) => "E003",
            AkaError::InvalidResource { .. } => "E004",
            AkaError::ResourceUnavailable(_) => "E005",
            AkaError::DatabaseConfig(_) => "E006",
            AkaError::DatabaseConnection(_) => "E007",
            AkaError::DatabaseOperation(_) => "E008",
            AkaError::Serialization(_) => "E009",
            AkaError::FileOperation(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AkaError::NotFound(_) => "Not Found",
            AkaError::DuplicateRoute(_) => "Duplicate Route",
            AkaError::InvalidRoute(_) => "Invalid Route",
            AkaError::InvalidResource { .. } => "Invalid Resource",
            AkaError::ResourceUnavailable(_) => "Resource Unavailable",
            AkaError::DatabaseConfig(_) => "Database Configuration Error",
            AkaError::DatabaseConnection(_) => "Database Connection Error",
            AkaError::DatabaseOperation(_) => "Database Operation Error",
            AkaError::Serialization(_) => "Serialization Error",
            AkaError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            AkaError::NotFound(msg) => msg.clone(),
            AkaError::DuplicateRoute(route) => format!("Duplicate route: {}", route),
            AkaError::InvalidRoute(route) => format!("Invalid route: '{}'", route),
            AkaError::InvalidResource { resource_type, .. } => {
                format!("Invalid {}", resource_type)
            }
            AkaError::ResourceUnavailable(path) => format!("{} is no longer available", path),
            AkaError::DatabaseConfig(msg)
            | AkaError::DatabaseConnection(msg)
            | AkaError::DatabaseOperation(msg)
            | AkaError::Serialization(msg)
            | AkaError::FileOperation(msg) => msg.clone(),
        }
    }

    /// Storage-layer failures: fatal for the current operation, never for the process.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AkaError::DatabaseConfig(_)
                | AkaError::DatabaseConnection(_)
                | AkaError::DatabaseOperation(_)
                | AkaError::Serialization(_)
                | AkaError::FileOperation(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AkaError::NotFound(_))
    }

    /// 格式化为彩色输出（用于 serve 模式的启动错误）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AkaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AkaError {}

// 便捷的构造函数
impl AkaError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AkaError::NotFound(msg.into())
    }

    pub fn duplicate_route<T: Into<String>>(route: T) -> Self {
        AkaError::DuplicateRoute(route.into())
    }

    pub fn invalid_route<T: Into<String>>(route: T) -> Self {
        AkaError::InvalidRoute(route.into())
    }

    pub fn invalid_resource<T: Into<String>>(resource_type: ResourceType, location: T) -> Self {
        AkaError::InvalidResource {
            resource_type,
            location: location.into(),
        }
    }

    pub fn resource_unavailable<T: Into<String>>(path: T) -> Self {
        AkaError::ResourceUnavailable(path.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AkaError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AkaError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AkaError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AkaError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AkaError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AkaError {
    fn from(err: sea_orm::DbErr) -> Self {
        AkaError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AkaError {
    fn from(err: std::io::Error) -> Self {
        AkaError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AkaError {
    fn from(err: serde_json::Error) -> Self {
        AkaError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AkaError>;

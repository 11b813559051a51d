use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - database: 数据目录与数据库连接
/// - routes: HTTP 路由前缀
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：AKA，分隔符：__
    /// 示例：AKA__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 AKA，分隔符 __
            .add_source(
                Environment::with_prefix("AKA")
                    .separator("__")
                    .try_parsing(true),
            );

        // 日志系统此时尚未初始化，只能写 stderr
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Storage root; the default SQLite file lives here.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Explicit database URL, overrides `data_dir`.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// Seconds; SQLite busy timeout, or connect/acquire timeout elsewhere.
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

impl DatabaseConfig {
    pub fn resolved_database_url(&self) -> String {
        match self.database_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.to_string(),
            None => {
                let path = std::path::Path::new(&self.data_dir).join("aka.db");
                format!("sqlite://{}?mode=rwc", path.display())
            }
        }
    }
}

/// HTTP 路由配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
    /// Where the admin UI is mounted; only named in not-found messages.
    #[serde(default = "default_admin_ui_path")]
    pub admin_ui_path: String,
}

impl RoutesConfig {
    /// First path segments claimed by the HTTP surface. A bookmark route equal
    /// to one of these would be shadowed and never resolve.
    pub fn reserved_routes(&self) -> Vec<String> {
        [&self.api_prefix, &self.health_prefix]
            .iter()
            .filter_map(|prefix| {
                prefix
                    .trim_start_matches('/')
                    .split('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    80
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_data_dir() -> String {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    std::path::Path::new(&home)
        .join(".aka")
        .display()
        .to_string()
}

fn default_database_pool_size() -> u32 {
    5
}

fn default_database_timeout() -> u64 {
    5
}

fn default_api_prefix() -> String {
    "/bookmark".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_admin_ui_path() -> String {
    "/admin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_url: None,
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            api_prefix: default_api_prefix(),
            health_prefix: default_health_prefix(),
            admin_ui_path: default_admin_ui_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url_lives_under_data_dir() {
        let config = DatabaseConfig {
            data_dir: "/var/lib/aka".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_database_url(),
            "sqlite:///var/lib/aka/aka.db?mode=rwc"
        );
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let config = DatabaseConfig {
            database_url: Some("postgres://localhost/aka".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_database_url(), "postgres://localhost/aka");
    }

    #[test]
    fn test_reserved_routes_from_prefixes() {
        let routes = RoutesConfig {
            api_prefix: "/api/bookmark".to_string(),
            ..Default::default()
        };
        assert_eq!(routes.reserved_routes(), vec!["api", "health"]);
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 80);
        assert_eq!(parsed.routes.api_prefix, "/bookmark");
        assert_eq!(parsed.logging.format, "text");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let parsed: StaticConfig = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.database.pool_size, 5);
    }
}

//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 会话认证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 跨域配置
    #[serde(default)]
    pub cors: CorsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 部署环境，决定会话 cookie 的 Secure / SameSite 属性
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnvironment {
    #[default]
    Development,
    Production,
}

impl DeployEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, DeployEnvironment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeployEnvironment::Development => "development",
            DeployEnvironment::Production => "production",
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 部署环境
    #[serde(default)]
    pub environment: DeployEnvironment,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: DeployEnvironment::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/foodshare.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 会话认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 令牌签名密钥（必填）
    #[serde(default)]
    pub token_secret: String,

    /// 令牌有效期（天）
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// 会话 cookie 名称
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// 是否对写接口（创建/删除 listing、创建请求）启用会话校验
    #[serde(default)]
    pub protect_writes: bool,
}

fn default_token_ttl_days() -> i64 {
    365
}

fn default_cookie_name() -> String {
    "token".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_days: default_token_ttl_days(),
            cookie_name: default_cookie_name(),
            protect_writes: false,
        }
    }
}

/// 跨域配置
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// 允许携带凭据的来源列表
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "https://a-11-ayesh.web.app".to_string(),
        "https://a-11-ayesh.firebaseapp.com".to_string(),
    ]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, DeployEnvironment::Development);
        assert_eq!(config.auth.cookie_name, "token");
        assert_eq!(config.auth.token_ttl_days, 365);
        assert!(!config.auth.protect_writes);
        assert_eq!(config.cors.allowed_origins.len(), 3);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/foodshare.db?mode=rwc");
    }
}

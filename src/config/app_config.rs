//! # 应用配置结构定义

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// 应用主配置结构
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 解析缓存配置
    #[serde(default)]
    pub cache: CacheConfig,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/dev.db".to_string(),
        }
    }
}

/// 解析缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 默认过期时间（秒）
    pub default_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { default_ttl: 300 }
    }
}

impl CacheConfig {
    /// 过期时间
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }
}

/// 加载应用配置
///
/// 读取 `AI_ROUTER_CONFIG` 指定的 TOML 文件（默认 `config/config.toml`，
/// 不存在时使用默认值），`DATABASE_URL` 环境变量优先于文件配置。
pub fn load_config() -> Result<AppConfig> {
    let path = std::env::var("AI_ROUTER_CONFIG")
        .unwrap_or_else(|_| "config/config.toml".to_string());

    let mut config = if std::path::Path::new(&path).exists() {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| crate::config_error!("读取配置文件失败 {}: {}", path, e))?;
        toml::from_str(&content)
            .map_err(|e| crate::config_error!("解析配置文件失败 {}: {}", path, e))?
    } else {
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache.default_ttl, 300);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            url = "sqlite://data/test.db"

            [cache]
            default_ttl = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url, "sqlite://data/test.db");
        assert_eq!(config.cache.default_ttl, 60);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.cache.default_ttl, 300);
    }
}

//! # 配置模块
//!
//! 应用配置加载与敏感凭证加密

pub mod app_config;
pub mod crypto;

pub use app_config::{AppConfig, CacheConfig, DatabaseConfig, load_config};
pub use crypto::SecretCipher;

//! # 环境变量回退解析
//!
//! 配置存储中没有可用绑定时，从进程环境合成一份 OpenAI 兼容配置

use crate::proxy::types::{ENV_FALLBACK_PROXY_ID, ResolvedConfig};
use crate::types::ProviderKind;

/// 回退基础 URL 环境变量名
pub const FALLBACK_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// 回退凭证环境变量名
pub const FALLBACK_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// 回退模型环境变量名
pub const FALLBACK_MODEL_ENV: &str = "OPENAI_MODEL";

/// 回退默认上游端点
pub const DEFAULT_FALLBACK_BASE_URL: &str = "https://api.openai.com/v1";

/// 从进程环境合成回退配置
///
/// 永不失败：未设置的变量取默认端点或空字符串。
/// 产出的配置带回退哨兵 ID，健康上报对其是空操作。
#[must_use]
pub fn resolve_fallback() -> ResolvedConfig {
    ResolvedConfig {
        proxy_id: ENV_FALLBACK_PROXY_ID.to_string(),
        proxy_name: "Environment Variables".to_string(),
        provider: ProviderKind::OpenAiCompatible,
        base_url: std::env::var(FALLBACK_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_BASE_URL.to_string()),
        api_key: std::env::var(FALLBACK_API_KEY_ENV).unwrap_or_default(),
        model: std::env::var(FALLBACK_MODEL_ENV).unwrap_or_default(),
        assignment_id: ENV_FALLBACK_PROXY_ID.to_string(),
    }
}

//! # 解析结果类型定义

use serde::{Deserialize, Serialize};

use crate::types::{HealthStatus, ProviderKind};

/// 环境变量回退配置的保留哨兵 ID
///
/// 该 ID 不会写入配置存储，健康上报对其必须是空操作
pub const ENV_FALLBACK_PROXY_ID: &str = "__env_fallback__";

/// 判断给定 Proxy ID 是否为回退哨兵
#[must_use]
pub fn is_fallback_proxy(proxy_id: &str) -> bool {
    proxy_id == ENV_FALLBACK_PROXY_ID
}

/// 候选 Proxy 快照（缓存项）
///
/// 凭证保持加密状态：解密只发生在选中之后，缓存永不持有明文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyCandidate {
    /// Proxy ID
    pub proxy_id: String,
    /// Proxy 显示名称
    pub proxy_name: String,
    /// 提供商类型
    pub provider: ProviderKind,
    /// 上游基础 URL
    pub base_url: String,
    /// 加密存储的 API 密钥
    pub encrypted_api_key: String,
    /// 绑定的可用模型范围（allowlist），None 表示不限
    pub models: Option<Vec<String>>,
    /// 绑定的默认模型
    pub default_model: Option<String>,
    /// 优先级快照
    pub priority: i32,
    /// 健康状态快照（可能滞后于存储，上限为缓存 TTL）
    pub health_status: HealthStatus,
    /// 绑定记录 ID
    pub assignment_id: String,
}

/// 解析完成的 Proxy 配置
///
/// 明文凭证仅存在于产生它的单次解析调用；
/// 不派生 Serialize，不写入存储或缓存
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Proxy ID（或回退哨兵）
    pub proxy_id: String,
    /// Proxy 显示名称
    pub proxy_name: String,
    /// 提供商类型
    pub provider: ProviderKind,
    /// 上游基础 URL
    pub base_url: String,
    /// 解密后的 API 密钥
    pub api_key: String,
    /// 选定模型（绑定默认模型，未设置时为空字符串）
    pub model: String,
    /// 绑定记录 ID（或回退哨兵）
    pub assignment_id: String,
}

impl ResolvedConfig {
    /// 是否为环境变量回退配置
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        is_fallback_proxy(&self.proxy_id)
    }
}

//! # 领域类型定义
//!
//! 提供商类型与健康状态的封闭枚举，以及与存储层文本值的互转

use serde::{Deserialize, Serialize};
use std::fmt;

/// AI 提供商类型
///
/// 封闭集合：未识别的存储值按 OpenAI 兼容协议处理
/// （许多自建网关模仿 OpenAI 的接口协议）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI 及兼容接口
    #[serde(rename = "openai")]
    OpenAiCompatible,
    /// Anthropic Claude
    Anthropic,
    /// Google Gemini
    Google,
}

impl ProviderKind {
    /// 从存储层文本值解析，未识别的值宽松降级为 OpenAI 兼容
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "anthropic" => Self::Anthropic,
            "google" => Self::Google,
            _ => Self::OpenAiCompatible,
        }
    }

    /// 存储层文本值
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proxy 健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 健康
    Healthy,
    /// 不健康（连续失败达到阈值）
    Unhealthy,
}

impl HealthStatus {
    /// 从存储层文本值解析，未识别的值视为健康
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "unhealthy" => Self::Unhealthy,
            _ => Self::Healthy,
        }
    }

    /// 存储层文本值
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

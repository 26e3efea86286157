//! # 上游客户端句柄
//!
//! 按提供商类型构造携带基础 URL、凭证与模型的请求构造器。
//! 工厂本身无状态也无失败路径——任何问题在句柄实际发起请求时才暴露。

use reqwest::Client;
use std::time::Duration;

use crate::proxy::types::ResolvedConfig;
use crate::types::ProviderKind;

/// Anthropic API 版本
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// 上游客户端工厂
///
/// 持有共享的 HTTP 客户端，按提供商类型分发到对应的句柄构造。
/// 未识别的提供商文本在 `ProviderKind::parse` 处已宽松降级为
/// OpenAI 兼容，因此这里的分发是封闭匹配。
pub struct AdapterFactory {
    http: Client,
}

impl AdapterFactory {
    /// 创建工厂及其共享 HTTP 客户端
    #[must_use]
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client for provider adapters");
        Self { http }
    }

    /// 根据解析配置创建上游客户端句柄
    #[must_use]
    pub fn create_client(&self, config: &ResolvedConfig) -> ClientHandle {
        match config.provider {
            ProviderKind::Anthropic => ClientHandle::Anthropic(AnthropicClient {
                http: self.http.clone(),
                base_url: trim_base(&config.base_url),
                api_key: config.api_key.clone(),
                model: config.model.clone(),
            }),
            ProviderKind::Google => ClientHandle::Google(GoogleClient {
                http: self.http.clone(),
                base_url: trim_base(&config.base_url),
                api_key: config.api_key.clone(),
                model: config.model.clone(),
            }),
            ProviderKind::OpenAiCompatible => {
                ClientHandle::OpenAiCompatible(OpenAiCompatibleClient {
                    http: self.http.clone(),
                    base_url: trim_base(&config.base_url),
                    api_key: config.api_key.clone(),
                    model: config.model.clone(),
                })
            }
        }
    }
}

impl Default for AdapterFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// 上游客户端句柄
///
/// 封闭的提供商集合，统一的请求构造能力
pub enum ClientHandle {
    /// OpenAI 及兼容接口
    OpenAiCompatible(OpenAiCompatibleClient),
    /// Anthropic Claude
    Anthropic(AnthropicClient),
    /// Google Gemini
    Google(GoogleClient),
}

impl ClientHandle {
    /// 提供商类型
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        match self {
            Self::OpenAiCompatible(_) => ProviderKind::OpenAiCompatible,
            Self::Anthropic(_) => ProviderKind::Anthropic,
            Self::Google(_) => ProviderKind::Google,
        }
    }

    /// 选定模型
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAiCompatible(c) => &c.model,
            Self::Anthropic(c) => &c.model,
            Self::Google(c) => &c.model,
        }
    }

    /// 请求端点 URL
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        match self {
            Self::OpenAiCompatible(c) => c.endpoint_url(),
            Self::Anthropic(c) => c.endpoint_url(),
            Self::Google(c) => c.endpoint_url(),
        }
    }

    /// 构造携带认证头与 JSON 请求体的请求
    #[must_use]
    pub fn chat_request(&self, body: &serde_json::Value) -> reqwest::RequestBuilder {
        match self {
            Self::OpenAiCompatible(c) => c.chat_request(body),
            Self::Anthropic(c) => c.chat_request(body),
            Self::Google(c) => c.chat_request(body),
        }
    }
}

/// OpenAI 兼容客户端
pub struct OpenAiCompatibleClient {
    http: Client,
    base_url: String,
    api_key: String,
    /// 选定模型
    pub model: String,
}

impl OpenAiCompatibleClient {
    /// 请求端点 URL
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// 构造 chat completions 请求
    #[must_use]
    pub fn chat_request(&self, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint_url())
            .bearer_auth(&self.api_key)
            .json(body)
    }
}

/// Anthropic Claude 客户端
pub struct AnthropicClient {
    http: Client,
    base_url: String,
    api_key: String,
    /// 选定模型
    pub model: String,
}

impl AnthropicClient {
    /// 请求端点 URL
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }

    /// 构造 messages 请求
    #[must_use]
    pub fn chat_request(&self, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(body)
    }
}

/// Google Gemini 客户端
pub struct GoogleClient {
    http: Client,
    base_url: String,
    api_key: String,
    /// 选定模型
    pub model: String,
}

impl GoogleClient {
    /// 请求端点 URL
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// 构造 generateContent 请求
    #[must_use]
    pub fn chat_request(&self, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint_url())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
    }
}

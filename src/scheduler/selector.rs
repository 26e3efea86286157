//! # 候选 Proxy 选择器
//!
//! 基于健康快照与优先级从候选列表中选出一个 Proxy，
//! 并只对选中者解密凭证

use std::sync::Arc;
use tracing::warn;

use crate::config::crypto::SecretCipher;
use crate::proxy::types::{ProxyCandidate, ResolvedConfig};
use crate::types::HealthStatus;

/// 候选选择器
pub struct ProxySelector {
    cipher: Arc<SecretCipher>,
}

impl ProxySelector {
    /// 创建选择器
    #[must_use]
    pub fn new(cipher: Arc<SecretCipher>) -> Self {
        Self { cipher }
    }

    /// 从候选列表中选择一个 Proxy 并解密其凭证
    ///
    /// 列表已按优先级降序到达，此处不重排：
    /// 取第一个健康候选；全部不健康时退化为取列表首位
    /// （宁可路由到已配置的上游也不直接失败）。
    /// 选中候选解密失败时返回 None 由调用方回退，不尝试下一个候选。
    #[must_use]
    pub fn select(&self, candidates: &[ProxyCandidate]) -> Option<ResolvedConfig> {
        if candidates.is_empty() {
            return None;
        }

        let selected = candidates
            .iter()
            .find(|c| c.health_status != HealthStatus::Unhealthy)
            .unwrap_or(&candidates[0]);

        let api_key = match self.cipher.decrypt(&selected.encrypted_api_key) {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    proxy_name = %selected.proxy_name,
                    error = %e,
                    "解密 Proxy API Key 失败"
                );
                return None;
            }
        };

        Some(ResolvedConfig {
            proxy_id: selected.proxy_id.clone(),
            proxy_name: selected.proxy_name.clone(),
            provider: selected.provider,
            base_url: selected.base_url.clone(),
            api_key,
            model: selected.default_model.clone().unwrap_or_default(),
            assignment_id: selected.assignment_id.clone(),
        })
    }
}

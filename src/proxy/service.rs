//! # Proxy 解析服务
//!
//! 对外的核心入口：根据功能标识获取上游 AI Proxy 配置，
//! 并承接调用方的健康上报与管理端的缓存失效通知

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{DEFAULT_TTL, ResolutionCache};
use crate::config::crypto::SecretCipher;
use crate::error::Result;
use crate::proxy::fallback::resolve_fallback;
use crate::proxy::store;
use crate::proxy::types::ResolvedConfig;
use crate::scheduler::{HealthTracker, ProxySelector};

/// Proxy 解析服务
///
/// 解析路径：缓存 → 配置存储连接查询 → 选择器 → 解密选中凭证。
/// 同一功能的并发缓存未命中会各自查询并各自写缓存（后写者覆盖），
/// 不做按键加锁；读取廉价，一致性只需最终一致。
pub struct ProxyResolver {
    db: Arc<DatabaseConnection>,
    cache: Arc<ResolutionCache>,
    selector: ProxySelector,
    health: HealthTracker,
}

impl ProxyResolver {
    /// 创建解析服务，共享密钥取自环境变量，缓存使用默认 TTL
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self::with_parts(
            db,
            Arc::new(ResolutionCache::new(DEFAULT_TTL)),
            Arc::new(SecretCipher::from_env()),
        )
    }

    /// 使用显式构造的缓存与加密器创建解析服务
    #[must_use]
    pub fn with_parts(
        db: Arc<DatabaseConnection>,
        cache: Arc<ResolutionCache>,
        cipher: Arc<SecretCipher>,
    ) -> Self {
        let health = HealthTracker::new(db.clone(), cache.clone());
        Self {
            db,
            cache,
            selector: ProxySelector::new(cipher),
            health,
        }
    }

    /// 获取指定功能的 Proxy 配置
    ///
    /// `Ok(None)` 表示该功能没有激活的绑定，
    /// 或选中候选的凭证无法解密——两者都由调用方回退处理
    pub async fn resolve(&self, feature_key: &str) -> Result<Option<ResolvedConfig>> {
        if let Some(cached) = self.cache.get(feature_key) {
            debug!(feature_key = feature_key, "解析缓存命中");
            return Ok(self.selector.select(&cached));
        }

        let candidates = store::find_candidates(self.db.as_ref(), feature_key).await?;
        if candidates.is_empty() {
            return Ok(None);
        }

        let resolved = self.selector.select(&candidates);
        self.cache.insert(feature_key, candidates);
        Ok(resolved)
    }

    /// 获取指定功能的 Proxy 配置，无可用绑定时回退到环境变量
    pub async fn resolve_with_fallback(&self, feature_key: &str) -> Result<ResolvedConfig> {
        if let Some(config) = self.resolve(feature_key).await? {
            return Ok(config);
        }

        debug!(feature_key = feature_key, "无可用绑定，回退到环境变量配置");
        Ok(resolve_fallback())
    }

    /// 记录 Proxy 请求成功（尽力而为，不影响调用方主路径）
    pub async fn report_success(&self, proxy_id: &str) {
        self.health.report_success(proxy_id).await;
    }

    /// 记录 Proxy 请求失败（尽力而为，不影响调用方主路径）
    pub async fn report_failure(&self, proxy_id: &str, message: &str) {
        self.health.report_failure(proxy_id, message).await;
    }

    /// 重置 Proxy 健康状态（管理端手动恢复）
    pub async fn reset_health(&self, proxy_id: &str) -> Result<()> {
        self.health.reset_health(proxy_id).await
    }

    /// 清除指定功能的缓存（管理端修改单个绑定后调用）
    pub fn invalidate(&self, feature_key: &str) {
        self.cache.invalidate(feature_key);
    }

    /// 清空整个解析缓存（管理端批量修改后调用）
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

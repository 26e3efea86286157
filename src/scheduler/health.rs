//! # 被动健康检查
//!
//! 根据真实请求的成功/失败上报维护 Proxy 健康状态。
//! 健康状态与失败计数的唯一事实来源是配置存储；
//! 失败计数的递增与状态重算在单条 UPDATE 内由存储端完成，
//! 并发上报不会少计。

use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use tracing::{error, warn};

use crate::cache::ResolutionCache;
use crate::error::Result;
use crate::proxy::types::is_fallback_proxy;
use crate::types::HealthStatus;
use entity::ai_proxies;

/// 连续失败阈值，达到后标记为不健康
pub const UNHEALTHY_THRESHOLD: i32 = 3;

/// 错误信息截断长度
const LAST_ERROR_MAX_LEN: usize = 500;

/// 被动健康追踪器
///
/// 上报接口是尽力而为的：存储失败只记录日志，
/// 绝不让健康上报拖垮调用方的主请求路径。
pub struct HealthTracker {
    db: Arc<DatabaseConnection>,
    cache: Arc<ResolutionCache>,
}

impl HealthTracker {
    /// 创建健康追踪器
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, cache: Arc<ResolutionCache>) -> Self {
        Self { db, cache }
    }

    /// 记录 Proxy 请求成功
    ///
    /// 无条件恢复为健康并清零失败计数；回退哨兵为空操作
    pub async fn report_success(&self, proxy_id: &str) {
        if is_fallback_proxy(proxy_id) {
            return;
        }

        if let Err(e) = self.apply_success(proxy_id).await {
            error!(proxy_id = proxy_id, error = %e, "更新 Proxy 健康状态失败");
        }
    }

    /// 记录 Proxy 请求失败
    ///
    /// 原子递增失败计数并由存储端重算状态；
    /// 本次上报使计数达到阈值时清空整个解析缓存，
    /// 让后续解析立即看到降级状态而非等待 TTL；回退哨兵为空操作
    pub async fn report_failure(&self, proxy_id: &str, message: &str) {
        if is_fallback_proxy(proxy_id) {
            return;
        }

        match self.apply_failure(proxy_id, message).await {
            Ok(Some(failure_count)) if failure_count >= UNHEALTHY_THRESHOLD => {
                warn!(
                    proxy_id = proxy_id,
                    failure_count = failure_count,
                    "Proxy 已标记为 unhealthy"
                );
                self.cache.invalidate_all();
            }
            Ok(_) => {}
            Err(e) => {
                error!(proxy_id = proxy_id, error = %e, "更新 Proxy 失败状态失败");
            }
        }
    }

    /// 重置 Proxy 健康状态（管理端手动恢复）
    pub async fn reset_health(&self, proxy_id: &str) -> Result<()> {
        if is_fallback_proxy(proxy_id) {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        ai_proxies::Entity::update_many()
            .col_expr(
                ai_proxies::Column::HealthStatus,
                Expr::value(HealthStatus::Healthy.as_str()),
            )
            .col_expr(ai_proxies::Column::FailureCount, Expr::value(0))
            .col_expr(
                ai_proxies::Column::LastError,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                ai_proxies::Column::LastErrorAt,
                Expr::value(Option::<chrono::NaiveDateTime>::None),
            )
            .col_expr(ai_proxies::Column::UpdatedAt, Expr::value(now))
            .filter(ai_proxies::Column::Id.eq(proxy_id))
            .exec(self.db.as_ref())
            .await?;

        self.cache.invalidate_all();
        Ok(())
    }

    async fn apply_success(&self, proxy_id: &str) -> Result<()> {
        let now = Utc::now().naive_utc();
        ai_proxies::Entity::update_many()
            .col_expr(
                ai_proxies::Column::HealthStatus,
                Expr::value(HealthStatus::Healthy.as_str()),
            )
            .col_expr(ai_proxies::Column::FailureCount, Expr::value(0))
            .col_expr(ai_proxies::Column::UpdatedAt, Expr::value(now))
            .filter(ai_proxies::Column::Id.eq(proxy_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    /// 原子失败上报，返回更新后的失败计数
    ///
    /// 计数递增与状态重算放在同一条 UPDATE 的表达式里，
    /// 应用层不做读-改-写，多实例并发上报下保持正确
    async fn apply_failure(&self, proxy_id: &str, message: &str) -> Result<Option<i32>> {
        let truncated: String = message.chars().take(LAST_ERROR_MAX_LEN).collect();
        let now = Utc::now().naive_utc();

        ai_proxies::Entity::update_many()
            .col_expr(
                ai_proxies::Column::FailureCount,
                Expr::col(ai_proxies::Column::FailureCount).add(1),
            )
            .col_expr(
                ai_proxies::Column::HealthStatus,
                Expr::case(
                    Expr::col(ai_proxies::Column::FailureCount)
                        .add(1)
                        .gte(UNHEALTHY_THRESHOLD),
                    Expr::value(HealthStatus::Unhealthy.as_str()),
                )
                .finally(Expr::value(HealthStatus::Healthy.as_str()))
                .into(),
            )
            .col_expr(ai_proxies::Column::LastError, Expr::value(truncated))
            .col_expr(ai_proxies::Column::LastErrorAt, Expr::value(now))
            .col_expr(ai_proxies::Column::UpdatedAt, Expr::value(now))
            .filter(ai_proxies::Column::Id.eq(proxy_id))
            .exec(self.db.as_ref())
            .await?;

        let updated = ai_proxies::Entity::find_by_id(proxy_id)
            .one(self.db.as_ref())
            .await?;

        Ok(updated.map(|m| m.failure_count))
    }
}

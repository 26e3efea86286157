//! # 配置存储查询
//!
//! 从配置存储读取功能绑定与 Proxy 的连接结果。
//! 记录的创建、编辑与删除由外部管理端负责，本模块只读。

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::error::{ProxyError, Result};
use crate::proxy::types::ProxyCandidate;
use crate::types::{HealthStatus, ProviderKind};
use entity::{ai_proxies, ai_proxy_assignments};

/// 查询指定功能的候选 Proxy 列表
///
/// 仅返回绑定与 Proxy 均激活的记录，按 Proxy 优先级降序排列；
/// 同优先级保持存储返回顺序（未定义稳定次序）。凭证保持加密状态。
pub async fn find_candidates(
    db: &DatabaseConnection,
    feature_key: &str,
) -> Result<Vec<ProxyCandidate>> {
    let rows = ai_proxy_assignments::Entity::find()
        .find_also_related(ai_proxies::Entity)
        .filter(ai_proxy_assignments::Column::FeatureKey.eq(feature_key))
        .filter(ai_proxy_assignments::Column::IsActive.eq(true))
        .filter(ai_proxies::Column::IsActive.eq(true))
        .order_by_desc(ai_proxies::Column::Priority)
        .all(db)
        .await
        .map_err(|e| ProxyError::database_with_source("查询功能绑定失败", e))?;

    let candidates: Vec<ProxyCandidate> = rows
        .into_iter()
        .filter_map(|(assignment, proxy)| proxy.map(|p| build_candidate(assignment, p)))
        .collect();

    debug!(
        feature_key = feature_key,
        count = candidates.len(),
        "配置存储查询完成"
    );

    Ok(candidates)
}

/// 将连接查询行映射为候选快照
fn build_candidate(
    assignment: ai_proxy_assignments::Model,
    proxy: ai_proxies::Model,
) -> ProxyCandidate {
    ProxyCandidate {
        proxy_id: proxy.id,
        proxy_name: proxy.name,
        provider: ProviderKind::parse(&proxy.provider),
        base_url: proxy.base_url,
        encrypted_api_key: proxy.api_key,
        models: assignment
            .models
            .and_then(|v| serde_json::from_value(v).ok()),
        default_model: assignment.default_model,
        priority: proxy.priority,
        health_status: HealthStatus::parse(&proxy.health_status),
        assignment_id: assignment.id,
    }
}

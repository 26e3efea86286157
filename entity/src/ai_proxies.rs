//! # AI Proxy 配置实体定义
//!
//! 上游 AI 服务端点配置表的 Sea-ORM 实体模型，
//! 包含加密凭证与被动健康检查状态

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// AI Proxy 配置实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_proxies")]
pub struct Model {
    /// 主键（由管理端生成的文本 ID）
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// 显示名称
    pub name: String,
    /// 提供商类型（openai | anthropic | google）
    pub provider: String,
    /// 上游基础 URL
    pub base_url: String,
    /// API 密钥（AES-256-GCM 加密后 base64 存储）
    pub api_key: String,
    /// 支持的模型列表（JSON 数组）
    pub models: Json,
    pub is_active: bool,
    /// 优先级，数值越大越优先
    pub priority: i32,
    /// 健康状态（healthy | unhealthy）
    pub health_status: String,
    /// 连续失败次数
    pub failure_count: i32,
    /// 最近一次错误信息（截断存储）
    pub last_error: Option<String>,
    /// 最近一次错误时间
    pub last_error_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ai_proxy_assignments::Entity")]
    AiProxyAssignments,
}

impl Related<super::ai_proxy_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiProxyAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

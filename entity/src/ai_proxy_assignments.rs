//! # 功能与 Proxy 绑定关系实体定义
//!
//! 功能标识到 AI Proxy 候选的绑定表的 Sea-ORM 实体模型

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 功能绑定实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_proxy_assignments")]
pub struct Model {
    /// 主键（由管理端生成的文本 ID）
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// 显示名称，如 "聊天功能 - Kimi"
    pub name: String,
    /// 描述说明
    pub description: Option<String>,
    /// 功能标识，如 'chat'；同一功能可绑定多个 Proxy
    pub feature_key: String,
    /// 关联的 Proxy ID
    pub proxy_id: String,
    /// 可用模型范围（allowlist），NULL 表示该 Proxy 所有模型均可用
    pub models: Option<Json>,
    /// 该功能的默认模型
    pub default_model: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ai_proxies::Entity",
        from = "Column::ProxyId",
        to = "super::ai_proxies::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    AiProxy,
}

impl Related<super::ai_proxies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiProxy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

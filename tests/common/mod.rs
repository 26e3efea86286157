//! # 集成测试辅助
//!
//! 内存 SQLite 数据库初始化与测试数据构建器

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use ai_router::SecretCipher;
use ai_router::cache::ResolutionCache;
use ai_router::proxy::ProxyResolver;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use entity::{ai_proxies, ai_proxy_assignments};

/// 集成测试共享密钥
pub const TEST_SECRET: &str = "integration_test_shared_secret";

/// 创建内存数据库并执行迁移
///
/// 限制为单连接，保证内存数据库在整个测试期间共享
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("连接内存数据库失败");
    migration::Migrator::up(&db, None)
        .await
        .expect("执行数据库迁移失败");
    Arc::new(db)
}

/// 测试用加密器
pub fn test_cipher() -> Arc<SecretCipher> {
    Arc::new(SecretCipher::from_secret(TEST_SECRET))
}

/// 构建使用默认 TTL 的解析服务
pub fn build_resolver(db: &Arc<DatabaseConnection>) -> ProxyResolver {
    build_resolver_with_ttl(db, Duration::from_secs(300))
}

/// 构建指定缓存 TTL 的解析服务
pub fn build_resolver_with_ttl(db: &Arc<DatabaseConnection>, ttl: Duration) -> ProxyResolver {
    ProxyResolver::with_parts(
        db.clone(),
        Arc::new(ResolutionCache::new(ttl)),
        test_cipher(),
    )
}

/// Proxy 测试数据构建器
pub struct ProxyFixture {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub base_url: String,
    pub api_key_plaintext: String,
    pub encrypted_api_key: Option<String>,
    pub models: Vec<String>,
    pub is_active: bool,
    pub priority: i32,
    pub health_status: String,
    pub failure_count: i32,
}

impl Default for ProxyFixture {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: "test_proxy".to_string(),
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_plaintext: "sk-test-key".to_string(),
            encrypted_api_key: None,
            models: vec!["gpt-4o".to_string()],
            is_active: true,
            priority: 0,
            health_status: "healthy".to_string(),
            failure_count: 0,
        }
    }
}

impl ProxyFixture {
    /// 创建新的 Proxy fixture
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// 设置提供商类型
    pub fn provider(mut self, provider: &str) -> Self {
        self.provider = provider.to_string();
        self
    }

    /// 设置基础 URL
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// 设置明文 API 密钥（插入时加密）
    pub fn api_key(mut self, plaintext: &str) -> Self {
        self.api_key_plaintext = plaintext.to_string();
        self
    }

    /// 直接设置加密字段内容（用于构造损坏密文）
    pub fn raw_encrypted_key(mut self, blob: &str) -> Self {
        self.encrypted_api_key = Some(blob.to_string());
        self
    }

    /// 设置优先级
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 设置为非激活状态
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 设置为不健康状态
    pub fn unhealthy(mut self, failure_count: i32) -> Self {
        self.health_status = "unhealthy".to_string();
        self.failure_count = failure_count;
        self
    }

    /// 插入数据库，返回持久化模型
    pub async fn insert(self, db: &DatabaseConnection) -> ai_proxies::Model {
        let now = Utc::now().naive_utc();
        let encrypted = match self.encrypted_api_key {
            Some(blob) => blob,
            None => test_cipher()
                .encrypt(&self.api_key_plaintext)
                .expect("加密测试密钥失败"),
        };

        ai_proxies::ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            provider: Set(self.provider),
            base_url: Set(self.base_url),
            api_key: Set(encrypted),
            models: Set(serde_json::json!(self.models)),
            is_active: Set(self.is_active),
            priority: Set(self.priority),
            health_status: Set(self.health_status),
            failure_count: Set(self.failure_count),
            last_error: Set(None),
            last_error_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("插入 Proxy 测试数据失败")
    }
}

/// 功能绑定测试数据构建器
pub struct AssignmentFixture {
    pub id: String,
    pub name: String,
    pub feature_key: String,
    pub proxy_id: String,
    pub models: Option<Vec<String>>,
    pub default_model: Option<String>,
    pub is_active: bool,
}

impl AssignmentFixture {
    /// 创建绑定 fixture
    pub fn new(feature_key: &str, proxy_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("{feature_key} assignment"),
            feature_key: feature_key.to_string(),
            proxy_id: proxy_id.to_string(),
            models: None,
            default_model: None,
            is_active: true,
        }
    }

    /// 设置默认模型
    pub fn default_model(mut self, model: &str) -> Self {
        self.default_model = Some(model.to_string());
        self
    }

    /// 设置可用模型范围
    pub fn models(mut self, models: &[&str]) -> Self {
        self.models = Some(models.iter().map(|m| (*m).to_string()).collect());
        self
    }

    /// 设置为非激活状态
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 插入数据库，返回持久化模型
    pub async fn insert(self, db: &DatabaseConnection) -> ai_proxy_assignments::Model {
        let now = Utc::now().naive_utc();

        ai_proxy_assignments::ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            description: Set(None),
            feature_key: Set(self.feature_key),
            proxy_id: Set(self.proxy_id),
            models: Set(self.models.map(|m| serde_json::json!(m))),
            default_model: Set(self.default_model),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("插入绑定测试数据失败")
    }
}

/// 更新 Proxy 的基础 URL（模拟管理端编辑）
pub async fn update_proxy_base_url(db: &DatabaseConnection, proxy_id: &str, base_url: &str) {
    use sea_orm::EntityTrait;

    let model = ai_proxies::Entity::find_by_id(proxy_id)
        .one(db)
        .await
        .expect("查询 Proxy 失败")
        .expect("Proxy 不存在");
    let mut active: ai_proxies::ActiveModel = model.into();
    active.base_url = Set(base_url.to_string());
    active.update(db).await.expect("更新 Proxy 失败");
}

/// 读取 Proxy 当前持久化状态
pub async fn fetch_proxy(db: &DatabaseConnection, proxy_id: &str) -> ai_proxies::Model {
    use sea_orm::EntityTrait;

    ai_proxies::Entity::find_by_id(proxy_id)
        .one(db)
        .await
        .expect("查询 Proxy 失败")
        .expect("Proxy 不存在")
}

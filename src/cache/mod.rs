//! # 解析缓存模块
//!
//! 按功能标识缓存候选 Proxy 列表的短 TTL 进程内缓存。
//! 缓存项中的凭证保持加密状态；过期在读取时惰性检查，无后台清理任务。

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::proxy::ProxyCandidate;

/// 默认缓存过期时间
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// 时钟抽象，测试中可注入可控时钟
pub trait Clock: Send + Sync {
    /// 当前时刻
    fn now(&self) -> Instant;
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 缓存项
struct CacheEntry {
    candidates: Vec<ProxyCandidate>,
    created_at: Instant,
}

/// 解析缓存
///
/// 显式构造的缓存实例（非进程级全局状态），TTL 与时钟均可注入。
/// 并发写入同一键时后写者覆盖，读取方只需最终一致。
pub struct ResolutionCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResolutionCache {
    /// 创建使用系统时钟的缓存
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// 创建使用指定时钟的缓存
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// 读取候选列表，过期项在此处惰性移除
    #[must_use]
    pub fn get(&self, feature_key: &str) -> Option<Vec<ProxyCandidate>> {
        let expired = match self.entries.get(feature_key) {
            Some(entry) => {
                if self.clock.now().duration_since(entry.created_at) < self.ttl {
                    return Some(entry.candidates.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            self.entries.remove(feature_key);
        }
        None
    }

    /// 写入候选列表快照
    pub fn insert(&self, feature_key: &str, candidates: Vec<ProxyCandidate>) {
        self.entries.insert(
            feature_key.to_string(),
            CacheEntry {
                candidates,
                created_at: self.clock.now(),
            },
        );
    }

    /// 清除指定功能的缓存（管理端修改单个绑定后调用）
    pub fn invalidate(&self, feature_key: &str) {
        self.entries.remove(feature_key);
    }

    /// 清空整个缓存（健康状态跃迁或管理端批量修改后调用）
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// 当前缓存条目数
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 缓存是否为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

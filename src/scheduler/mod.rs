//! # 调度模块
//!
//! 候选 Proxy 的故障转移选择与被动健康检查

pub mod health;
pub mod selector;

pub use health::{HealthTracker, UNHEALTHY_THRESHOLD};
pub use selector::ProxySelector;

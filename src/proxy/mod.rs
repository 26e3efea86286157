//! # 解析服务模块
//!
//! 功能标识到上游 AI Proxy 配置的解析：配置存储查询、
//! 环境变量回退与对外的核心服务入口

pub mod fallback;
pub mod service;
pub mod store;
pub mod types;

pub use fallback::resolve_fallback;
pub use service::ProxyResolver;
pub use types::{ENV_FALLBACK_PROXY_ID, ProxyCandidate, ResolvedConfig};

//! # AI 服务提供商客户端模块
//!
//! 将解析完成的配置映射为可直接使用的上游客户端句柄

pub mod client;

pub use client::{
    ANTHROPIC_API_VERSION, AdapterFactory, AnthropicClient, ClientHandle, GoogleClient,
    OpenAiCompatibleClient,
};

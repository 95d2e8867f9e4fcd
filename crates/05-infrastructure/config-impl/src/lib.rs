//! # Configuration Implementation
//!
//! 配置管理的具体实现，提供各种配置源。
//!
//! ## 主要组件
//!
//! - [`MemoryConfigProvider`] - 内存配置提供者
//! - [`TomlConfigProvider`] - TOML 配置提供者
//! - [`EnvironmentConfigProvider`] - 环境变量配置提供者
//! - [`LayeredConfigProvider`] - 基于 `config` crate 的分层配置
//! - [`CompositeConfigProvider`] - 按优先级组合多个提供者

pub mod manager;
pub mod providers;

pub use manager::*;
pub use providers::*;

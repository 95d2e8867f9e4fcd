//! # Configuration Abstractions
//!
//! 配置管理抽象层。容器通过 [`ConfigProvider`] 读取 `#[value("key")]`
//! 字段需要的配置值。

pub mod provider;

pub use provider::*;

//! # Infrastructure Common
//!
//! 这个 crate 提供了 bean 容器各层共用的基础类型。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件标记 trait
//! - [`Autowired`] / [`Value`] - 字段注入槽
//! - [`TypeInfo`] / [`ComponentMetadata`] - 类型与组件元数据
//! - [`ComponentError`] / [`ConfigError`] / [`InfrastructureError`] - 错误类型

pub mod component;
pub mod errors;
pub mod metadata;

pub use component::*;
pub use errors::*;
pub use metadata::*;

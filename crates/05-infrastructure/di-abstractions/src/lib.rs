//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件描述、注册表和扫描的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentDescriptor`] / [`ComponentBuilder`] - 组件注册表项
//! - [`BeanRegistry`] / [`FrozenBeanRegistry`] - bean 注册表
//! - [`BeanFactory`] - 按类型查找 bean
//! - [`ComponentCatalog`] - 组件目录
//! - [`ComponentScanner`] - 组件扫描器接口

pub mod container;
pub mod descriptor;
pub mod discovery;
pub mod registry;
pub mod scanner;

pub use container::*;
pub use descriptor::*;
pub use discovery::*;
pub use registry::*;
pub use scanner::*;

//! 任务追踪示例的组件

pub mod application;
pub mod notifier;
pub mod repository;
pub mod service;

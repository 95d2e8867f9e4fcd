//! # 依赖注入具体实现
//!
//! 提供应用上下文（两阶段初始化的 bean 容器）、目录扫描器、
//! 实例化排序以及应用工厂。
//!
//! ```ignore
//! let context = ApplicationFactory::new()
//!     .with_config(config)
//!     .create_context(&["app"])?;
//! let app = context.get_bean::<Application>();
//! ```

pub mod context;
pub mod factory;
pub mod ordering;
pub mod scanner;

pub use context::{ApplicationContext, ApplicationContextBuilder};
pub use factory::ApplicationFactory;
pub use scanner::CatalogScanner;

//! # Component Macros
//!
//! 编译时组件注册过程宏。
//!
//! ## 核心宏
//!
//! - [`Component`] - 派生组件描述符并在程序启动时登记到全局组件目录
//! - [`injectable`] - 从实现块中收集 `#[inject]` 构造器和 setter 方法
//!
//! 使用方需要依赖 `infrastructure-common`、`di-abstractions` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::{injectable, Component};
//! use infrastructure_common::{Autowired, Value};
//! use std::sync::Arc;
//!
//! #[derive(Default, Component)]
//! #[component(implements(dyn TaskRepository))]
//! pub struct InMemoryTaskRepository { /* ... */ }
//!
//! #[derive(Component)]
//! #[component(injectable)]
//! pub struct TaskService {
//!     repository: Option<Arc<dyn TaskRepository>>,
//!     #[autowired]
//!     clock: Autowired<dyn Clock>,
//!     #[value("tasks.owner")]
//!     owner: Value,
//! }
//!
//! #[injectable]
//! impl TaskService {
//!     #[inject]
//!     pub fn new(repository: Option<Arc<dyn TaskRepository>>) -> Self {
//!         /* ... */
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod injectable;
mod utils;

/// 派生组件
///
/// # 结构体参数 `#[component(...)]`
///
/// - `name = "bean_name"` - 自定义 bean 名称（默认为首字母小写的类型名）
/// - `implements(dyn A, dyn B)` - 组件可以通过这些接口查找
/// - `injectable` - 构造器与 setter 由 `#[injectable]` 实现块提供；否则使用 `Default`
///
/// # 字段属性
///
/// - `#[autowired]` - `Autowired<T>` 字段，装配阶段注入 bean
/// - `#[value("key")]` - `Value` 字段，装配阶段注入配置值
///
/// 未声明 `injectable` 的组件由派生宏实现 `InjectionPoints`，因此再为它编写
/// `#[injectable]` 实现块会产生冲突实现，注入点不会被静默丢弃：
///
/// ```compile_fail,E0119
/// use component_macros::{injectable, Component};
/// use infrastructure_common::Autowired;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
///
/// #[derive(Default, Component)]
/// struct Reporter {
///     clock: Autowired<Clock>,
/// }
///
/// #[injectable]
/// impl Reporter {
///     #[inject]
///     fn set_clock(&self, clock: Arc<Clock>) {
///         self.clock.inject(clock);
///     }
/// }
///
/// fn main() {}
/// ```
///
/// 反过来，声明了 `injectable` 却没有 `#[injectable]` 实现块同样无法编译：
///
/// ```compile_fail,E0277
/// use component_macros::Component;
///
/// #[derive(Default, Component)]
/// #[component(injectable)]
/// struct Reporter;
///
/// fn main() {}
/// ```
#[proc_macro_derive(Component, attributes(component, autowired, value))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input).into()
}

/// 收集注入点
///
/// 实现块中的 `#[inject]` 标记：
///
/// - 无接收者的函数是注入构造器，参数必须是 `Option<Arc<T>>`，
///   实例化阶段尚未注册的依赖传入 `None`
/// - `&self` 方法是注入方法，恰好一个 `Arc<T>` 参数时作为 setter 调用
#[proc_macro_attribute]
pub fn injectable(args: TokenStream, input: TokenStream) -> TokenStream {
    injectable::injectable_impl(args, input)
}

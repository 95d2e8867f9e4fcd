//! 组件基础接口定义
//!
//! 提供组件标记 trait 以及字段注入使用的注入槽

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// 组件基础 trait
///
/// 由 `#[derive(Component)]` 自动实现
pub trait Component: Send + Sync + 'static {
    /// 组件名称
    fn name(&self) -> &'static str;
}

/// 依赖注入槽
///
/// 标记为 `#[autowired]` 的字段使用此类型。槽在装配阶段最多被写入一次；
/// 找不到依赖时保持为空，使用方可以据此区分“未装配”与“已装配”。
pub struct Autowired<T: ?Sized> {
    slot: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Autowired<T> {
    /// 创建空注入槽
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// 写入依赖，槽已被写入时返回 `false`
    pub fn inject(&self, dependency: Arc<T>) -> bool {
        self.slot.set(dependency).is_ok()
    }

    /// 获取依赖的共享引用
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get().cloned()
    }

    /// 借用依赖
    pub fn as_deref(&self) -> Option<&T> {
        self.slot.get().map(|dependency| &**dependency)
    }

    /// 是否已装配
    pub fn is_wired(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T: ?Sized> Default for Autowired<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("type", &std::any::type_name::<T>())
            .field("wired", &self.is_wired())
            .finish()
    }
}

/// 配置值注入槽
///
/// 标记为 `#[value("key")]` 的字段使用此类型，仅支持字符串配置。
/// 装配后槽处于“已解析”状态，配置源没有该键时值为空。
#[derive(Default)]
pub struct Value {
    slot: OnceCell<Option<String>>,
}

impl Value {
    /// 创建空配置槽
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// 写入配置值，槽已被写入时返回 `false`
    pub fn inject(&self, value: Option<String>) -> bool {
        self.slot.set(value).is_ok()
    }

    /// 获取配置值
    pub fn get(&self) -> Option<&str> {
        self.slot.get().and_then(|value| value.as_deref())
    }

    /// 是否已经过装配阶段（无论配置源是否提供了值）
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => f.debug_tuple("Value").field(value).finish(),
            None => f.write_str("Value(<unresolved>)"),
        }
    }
}

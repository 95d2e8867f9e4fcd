//! 容器抽象接口
//!
//! 提供按类型查找 bean 的核心抽象以及容器配置

use crate::registry::BeanHandle;
use std::any::TypeId;
use std::sync::Arc;

/// Bean 工厂 trait
///
/// 所有可以按类型查找 bean 的对象都实现此 trait：初始化期间的注册表、
/// 冻结后的注册表以及应用上下文本身。
pub trait BeanFactory {
    /// 按类型ID查找条目
    fn lookup(&self, type_id: TypeId) -> Option<&BeanHandle>;

    /// 按类型获取 bean，`T` 可以是具体类型或 `dyn Trait`
    fn get_bean<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + 'static,
        Self: Sized,
    {
        self.lookup(TypeId::of::<T>()).and_then(BeanHandle::get::<T>)
    }

    /// 检查是否存在指定类型的 bean
    fn contains_bean<T>(&self) -> bool
    where
        T: ?Sized + 'static,
        Self: Sized,
    {
        self.lookup(TypeId::of::<T>()).is_some()
    }
}

/// 实例化顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstantiationOrder {
    /// 按发现顺序实例化。构造器依赖只能解析到此前已经注册的 bean，
    /// 否则保持为空。
    #[default]
    Discovery,
    /// 按构造器依赖拓扑排序后实例化，依赖总是先于使用者创建；
    /// 构造器之间的循环依赖是致命错误。
    DependencyFirst,
}

/// 容器配置
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// 实例化顺序
    pub instantiation_order: InstantiationOrder,
}

impl ContainerConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置实例化顺序
    pub fn with_instantiation_order(mut self, order: InstantiationOrder) -> Self {
        self.instantiation_order = order;
        self
    }
}

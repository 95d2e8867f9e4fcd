//! 组件目录
//!
//! `#[derive(Component)]` 生成的代码在程序启动时（通过 `ctor`）把组件的
//! 描述符工厂登记到全局目录；扫描器从目录快照中按扫描根筛选组件。

use crate::descriptor::{ComponentDefinition, ComponentDescriptor};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// 描述符工厂
pub type DescriptorFactory = fn() -> ComponentDescriptor;

/// 全局组件目录
static GLOBAL_COMPONENT_CATALOG: Lazy<RwLock<Vec<DescriptorFactory>>> =
    Lazy::new(|| RwLock::new(Vec::new()));

/// 向全局目录登记组件
pub fn register_component(factory: DescriptorFactory) {
    GLOBAL_COMPONENT_CATALOG.write().push(factory);
}

/// 组件目录
///
/// 描述符按登记顺序保存，这就是扫描得到的发现顺序
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    descriptors: Vec<ComponentDescriptor>,
}

impl ComponentCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 全局目录的快照
    pub fn global() -> Self {
        let factories = GLOBAL_COMPONENT_CATALOG.read().clone();
        Self {
            descriptors: factories.into_iter().map(|factory| factory()).collect(),
        }
    }

    /// 添加描述符
    pub fn with_descriptor(mut self, descriptor: ComponentDescriptor) -> Self {
        self.add(descriptor);
        self
    }

    /// 添加组件类型
    pub fn with_component<T: ComponentDefinition>(self) -> Self {
        self.with_descriptor(T::descriptor())
    }

    /// 添加描述符
    pub fn add(&mut self, descriptor: ComponentDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// 所有描述符
    pub fn descriptors(&self) -> &[ComponentDescriptor] {
        &self.descriptors
    }

    /// 描述符数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

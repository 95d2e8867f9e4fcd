//! Bean 注册表
//!
//! 初始化期间使用可变的 [`BeanRegistry`]，实例化阶段结束后通过
//! [`BeanRegistry::freeze`] 转换为只读的 [`FrozenBeanRegistry`]。

use crate::container::BeanFactory;
use infrastructure_common::{ComponentMetadata, TypeInfo};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// 类型擦除后的 bean 实例（具体类型）
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// 注册表中的一个条目
///
/// 内部保存 `Arc<T>`，`T` 可以是具体类型，也可以是 `dyn Trait`
pub struct BeanHandle {
    type_info: TypeInfo,
    owner: TypeInfo,
    reference: Box<dyn Any + Send + Sync>,
}

impl BeanHandle {
    /// 以 `T` 为键包装 bean
    pub fn new<T>(owner: TypeInfo, bean: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            owner,
            reference: Box::new(bean),
        }
    }

    /// 条目的键类型
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 拥有该实例的组件类型
    pub fn owner(&self) -> TypeInfo {
        self.owner
    }

    /// 取出类型化的共享引用，类型不匹配时返回 `None`
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.reference.downcast_ref::<Arc<T>>().cloned()
    }
}

impl fmt::Debug for BeanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanHandle")
            .field("type", &self.type_info.name)
            .field("owner", &self.owner.name)
            .finish()
    }
}

/// 可变 bean 注册表，仅在实例化阶段使用
#[derive(Debug, Default)]
pub struct BeanRegistry {
    beans: HashMap<TypeId, BeanHandle>,
    names: HashMap<String, TypeId>,
    components: Vec<ComponentMetadata>,
}

impl BeanRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记组件元数据，使其可以按名称查找
    ///
    /// 名称重复时后登记的组件覆盖先前的映射
    pub fn register_component(&mut self, metadata: ComponentMetadata) {
        let previous = self.names.insert(metadata.name.clone(), metadata.type_info.id);
        if let Some(previous) = previous.filter(|id| *id != metadata.type_info.id) {
            let replaced = self
                .components
                .iter()
                .find(|c| c.type_info.id == previous)
                .map_or("<unknown>", |c| c.type_info.name);
            warn!(
                "bean 名称 {} 重复，{} 覆盖了 {}",
                metadata.name, metadata.type_info.name, replaced
            );
        }
        self.components.push(metadata);
    }

    /// 注册条目，返回被覆盖的旧条目
    pub fn register_handle(&mut self, handle: BeanHandle) -> Option<BeanHandle> {
        self.beans.insert(handle.type_info.id, handle)
    }

    /// 条目数量（具体类型与接口键合计）
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    /// 冻结注册表，之后不再允许修改
    pub fn freeze(self) -> FrozenBeanRegistry {
        FrozenBeanRegistry {
            beans: self.beans,
            names: self.names,
            components: self.components,
        }
    }
}

impl BeanFactory for BeanRegistry {
    fn lookup(&self, type_id: TypeId) -> Option<&BeanHandle> {
        self.beans.get(&type_id)
    }
}

/// 只读 bean 注册表
#[derive(Debug)]
pub struct FrozenBeanRegistry {
    beans: HashMap<TypeId, BeanHandle>,
    names: HashMap<String, TypeId>,
    components: Vec<ComponentMetadata>,
}

impl FrozenBeanRegistry {
    /// 按 bean 名称查找
    pub fn lookup_by_name(&self, name: &str) -> Option<&BeanHandle> {
        self.names.get(name).and_then(|id| self.beans.get(id))
    }

    /// 已注册组件的元数据，按实例化顺序排列
    pub fn components(&self) -> &[ComponentMetadata] {
        &self.components
    }

    /// 条目数量（具体类型与接口键合计）
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl BeanFactory for FrozenBeanRegistry {
    fn lookup(&self, type_id: TypeId) -> Option<&BeanHandle> {
        self.beans.get(&type_id)
    }
}

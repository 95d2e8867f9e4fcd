//! 应用上下文
//!
//! 上下文只能通过 [`ApplicationContext::initialize`] 或
//! [`ApplicationContextBuilder::build`] 获得。初始化分两个阶段：
//!
//! 1. 实例化：按顺序创建每个组件，并以具体类型和各接口注册；
//! 2. 装配：冻结注册表后，为每个 bean 注入 setter 方法、`#[autowired]` 字段和
//!    `#[value]` 配置值。
//!
//! 初始化完成后注册表只读，上下文可以在线程间共享。

use crate::ordering;
use crate::scanner::CatalogScanner;
use config_abstractions::ConfigProvider;
use di_abstractions::{
    BeanFactory, BeanHandle, BeanInstance, BeanRegistry, ComponentCatalog, ComponentDescriptor,
    ComponentScanner, ContainerConfig, FrozenBeanRegistry, InjectionPoint, InstantiationOrder,
};
use infrastructure_common::{ComponentError, ComponentMetadata, TypeInfo};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 应用上下文
pub struct ApplicationContext {
    registry: FrozenBeanRegistry,
}

impl ApplicationContext {
    /// 创建上下文构建器
    pub fn builder() -> ApplicationContextBuilder {
        ApplicationContextBuilder::new()
    }

    /// 使用全局组件目录和默认配置初始化上下文
    pub fn initialize<S: AsRef<str>>(scan_roots: &[S]) -> Result<Self, ComponentError> {
        scan_roots
            .iter()
            .fold(Self::builder(), |builder, root| builder.scan(root.as_ref()))
            .build()
    }

    /// 按类型获取 bean，`T` 可以是具体类型或 `dyn Trait`
    pub fn get_bean<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.registry.get_bean::<T>()
    }

    /// 按 bean 名称获取 bean
    pub fn get_bean_by_name<T: ?Sized + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.registry
            .lookup_by_name(name)
            .and_then(BeanHandle::get::<T>)
    }

    /// 检查是否存在指定类型的 bean
    pub fn contains_bean<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains_bean::<T>()
    }

    /// 已注册组件数量
    pub fn bean_count(&self) -> usize {
        self.registry.components().len()
    }

    /// 已注册组件的元数据，按实例化顺序排列
    pub fn registered_components(&self) -> &[ComponentMetadata] {
        self.registry.components()
    }
}

impl BeanFactory for ApplicationContext {
    fn lookup(&self, type_id: TypeId) -> Option<&BeanHandle> {
        self.registry.lookup(type_id)
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("components", &self.registry.components().len())
            .field("entries", &self.registry.len())
            .finish()
    }
}

/// 应用上下文构建器
pub struct ApplicationContextBuilder {
    scan_roots: Vec<String>,
    scanner: Option<Box<dyn ComponentScanner>>,
    config: Option<Arc<dyn ConfigProvider>>,
    container_config: ContainerConfig,
}

impl ApplicationContextBuilder {
    /// 创建构建器
    pub fn new() -> Self {
        Self {
            scan_roots: Vec::new(),
            scanner: None,
            config: None,
            container_config: ContainerConfig::default(),
        }
    }

    /// 添加扫描根
    pub fn scan(mut self, root: impl Into<String>) -> Self {
        self.scan_roots.push(root.into());
        self
    }

    /// 使用指定的组件目录代替全局目录
    pub fn with_catalog(self, catalog: ComponentCatalog) -> Self {
        self.with_scanner(Box::new(CatalogScanner::new(catalog)))
    }

    /// 使用自定义扫描器
    pub fn with_scanner(mut self, scanner: Box<dyn ComponentScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// 设置配置源
    pub fn with_config(mut self, config: Arc<dyn ConfigProvider>) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置容器配置
    pub fn with_container_config(mut self, container_config: ContainerConfig) -> Self {
        self.container_config = container_config;
        self
    }

    /// 扫描、实例化并装配所有组件
    pub fn build(self) -> Result<ApplicationContext, ComponentError> {
        let scanner = match self.scanner {
            Some(scanner) => scanner,
            None => Box::new(CatalogScanner::global()),
        };

        info!("开始扫描组件: {:?} (扫描器: {})", self.scan_roots, scanner.name());
        let discovered = scanner.scan(&self.scan_roots)?;
        info!("发现 {} 个组件", discovered.len());

        let winners = ordering::interface_winners(&discovered);
        let ordered = match self.container_config.instantiation_order {
            InstantiationOrder::Discovery => discovered,
            InstantiationOrder::DependencyFirst => ordering::dependency_first(discovered)?,
        };

        let (registry, beans) = instantiate_all(ordered, &winners)?;
        let registry = registry.freeze();

        for (descriptor, instance) in &beans {
            wire(descriptor, instance, &registry, self.config.as_deref())?;
        }

        info!(
            "应用上下文初始化完成，共 {} 个组件，{} 个注册表条目",
            beans.len(),
            registry.len()
        );
        Ok(ApplicationContext { registry })
    }
}

impl Default for ApplicationContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 实例化阶段
///
/// `winners` 给出每个接口在发现顺序下的最终实现者；该实现者注册后，
/// 同一接口的其他实现者不再覆盖接口键。
fn instantiate_all(
    ordered: Vec<ComponentDescriptor>,
    winners: &HashMap<TypeId, TypeInfo>,
) -> Result<(BeanRegistry, Vec<(ComponentDescriptor, BeanInstance)>), ComponentError> {
    let mut registry = BeanRegistry::new();
    let mut beans = Vec::with_capacity(ordered.len());

    for descriptor in ordered {
        let type_info = descriptor.type_info();
        debug!("实例化组件: {}", type_info);
        let instance = descriptor.instantiate(&registry)?;

        let concrete = descriptor
            .concrete_handle(&instance)
            .ok_or_else(|| ComponentError::InvalidMetadata {
                message: format!("构造器返回的实例类型与 {} 不一致", type_info),
            })?;
        registry.register_handle(concrete);

        for handle in descriptor.interface_handles(&instance) {
            let interface = handle.type_info();
            let winner = winners.get(&interface.id);
            let held_by_winner = registry
                .lookup(interface.id)
                .is_some_and(|existing| Some(&existing.owner()) == winner);
            if held_by_winner && winner != Some(&type_info) {
                warn!(
                    "接口 {} 存在多个实现，保留 {}，忽略 {}",
                    interface,
                    winner.map_or("<unknown>", |w| w.name),
                    type_info
                );
                continue;
            }
            if let Some(replaced) = registry.register_handle(handle) {
                if replaced.owner() != type_info {
                    warn!(
                        "接口 {} 存在多个实现，{} 覆盖了 {}",
                        interface,
                        type_info,
                        replaced.owner()
                    );
                }
            }
        }

        registry.register_component(descriptor.metadata().clone());
        beans.push((descriptor, instance));
    }

    Ok((registry, beans))
}

/// 装配阶段
fn wire(
    descriptor: &ComponentDescriptor,
    instance: &BeanInstance,
    registry: &FrozenBeanRegistry,
    config: Option<&dyn ConfigProvider>,
) -> Result<(), ComponentError> {
    let type_info = descriptor.type_info();

    for point in descriptor.injection_points() {
        if let Some(key) = point.config_key() {
            let value = match config {
                Some(provider) => {
                    provider
                        .get_string(key)
                        .map_err(|source| ComponentError::ValueInjectionFailed {
                            type_name: type_info.name.to_string(),
                            field: point.name().to_string(),
                            key: key.to_string(),
                            source,
                        })?
                }
                None => None,
            };
            if value.is_none() {
                debug!("配置键 {} 不存在，{}.{} 保持为空", key, type_info, point.name());
            }
            point.inject_value(instance, value);
            continue;
        }

        let Some(dependency) = point.dependency() else {
            if let InjectionPoint::Method { parameters, .. } = point {
                debug!(
                    "跳过 {}::{}：注入方法需要恰好一个参数，实际为 {} 个",
                    type_info,
                    point.name(),
                    parameters.len()
                );
            }
            continue;
        };

        match registry.lookup(dependency.id) {
            Some(handle) => {
                if point.inject_bean(instance, handle) {
                    debug!("装配 {}.{} <- {}", type_info, point.name(), handle.owner());
                } else {
                    debug!("{}.{} 已装配，忽略重复注入", type_info, point.name());
                }
            }
            None => {
                debug!(
                    "未找到 {} 类型的 bean，{}.{} 保持为空",
                    dependency,
                    type_info,
                    point.name()
                );
            }
        }
    }

    Ok(())
}

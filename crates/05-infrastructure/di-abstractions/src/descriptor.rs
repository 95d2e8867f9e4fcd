//! 组件描述符
//!
//! 描述符是组件的注册表项：类型、命名空间、构造方式、对外提供的接口，
//! 以及需要注入的字段、方法和配置值。描述符通过类型化的
//! [`ComponentBuilder`] 构建，由 `#[derive(Component)]` 生成或手工编写。

use crate::container::BeanFactory;
use crate::registry::{BeanHandle, BeanInstance, BeanRegistry};
use infrastructure_common::{Autowired, ComponentError, ComponentMetadata, TypeInfo, Value};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

pub(crate) type BuildFn = Arc<dyn Fn(&ConstructorArgs<'_>) -> Result<BeanInstance, ComponentError> + Send + Sync>;
pub(crate) type CastFn = Arc<dyn Fn(&BeanInstance) -> Option<BeanHandle> + Send + Sync>;
/// 向 bean 注入依赖的函数
pub type WireFn = Arc<dyn Fn(&BeanInstance, &BeanHandle) -> bool + Send + Sync>;
/// 向 bean 注入配置值的函数
pub type ValueFn = Arc<dyn Fn(&BeanInstance, Option<String>) -> bool + Send + Sync>;

/// 可被容器管理的组件
///
/// 由 `#[derive(Component)]` 实现
pub trait ComponentDefinition: Send + Sync + Sized + 'static {
    /// 构建组件描述符
    fn descriptor() -> ComponentDescriptor;
}

/// 构造器与 setter 注入点
///
/// 由 `#[injectable]` 实现块生成；未声明 `injectable` 的派生组件使用
/// `Default` 构造器的默认实现。
pub trait InjectionPoints: Send + Sync + Sized + 'static {
    /// 向构建器登记构造器与 setter 注入点
    fn contribute(builder: ComponentBuilder<Self>) -> ComponentBuilder<Self>;
}

/// 构造器注入时的参数解析视图
///
/// 只能看到实例化阶段中已经注册的 bean
pub struct ConstructorArgs<'a> {
    registry: &'a BeanRegistry,
    component: TypeInfo,
}

impl<'a> ConstructorArgs<'a> {
    /// 创建参数解析视图
    pub fn new(registry: &'a BeanRegistry, component: TypeInfo) -> Self {
        Self { registry, component }
    }

    /// 解析构造器参数，尚未注册时返回 `None`
    pub fn get<P: ?Sized + 'static>(&self) -> Option<Arc<P>> {
        let dependency = self.registry.get_bean::<P>();
        if dependency.is_none() {
            debug!(
                "构造 {} 时依赖 {} 尚未注册，参数为空",
                self.component,
                std::any::type_name::<P>()
            );
        }
        dependency
    }
}

/// 构造器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorKind {
    /// 无参构造器（`Default`）
    Default,
    /// 标记为注入的构造器
    Injected,
}

/// 组件构造器
#[derive(Clone)]
pub struct Constructor {
    kind: ConstructorKind,
    parameters: Vec<TypeInfo>,
    build: BuildFn,
}

impl Constructor {
    /// 构造器类型
    pub fn kind(&self) -> ConstructorKind {
        self.kind
    }

    /// 构造器参数类型
    pub fn parameters(&self) -> &[TypeInfo] {
        &self.parameters
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// 组件对外提供的接口
#[derive(Clone)]
pub struct InterfaceBinding {
    interface: TypeInfo,
    cast: CastFn,
}

impl InterfaceBinding {
    /// 接口类型
    pub fn interface(&self) -> TypeInfo {
        self.interface
    }
}

impl fmt::Debug for InterfaceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterfaceBinding").field(&self.interface.name).finish()
    }
}

/// 装配阶段的注入点
#[derive(Clone)]
pub enum InjectionPoint {
    /// `#[autowired]` 字段
    Field {
        name: String,
        dependency: TypeInfo,
        inject: WireFn,
    },
    /// `#[inject]` 方法；只有单参数方法带有注入函数
    Method {
        name: String,
        parameters: Vec<TypeInfo>,
        inject: Option<WireFn>,
    },
    /// `#[value("key")]` 字段
    Value {
        name: String,
        key: String,
        inject: ValueFn,
    },
}

impl InjectionPoint {
    /// 字段或方法名称
    pub fn name(&self) -> &str {
        match self {
            Self::Field { name, .. } | Self::Method { name, .. } | Self::Value { name, .. } => name,
        }
    }

    /// 需要从注册表解析的依赖类型；配置值和被跳过的方法没有
    pub fn dependency(&self) -> Option<TypeInfo> {
        match self {
            Self::Field { dependency, .. } => Some(*dependency),
            Self::Method {
                parameters,
                inject: Some(_),
                ..
            } => parameters.first().copied(),
            Self::Method { .. } | Self::Value { .. } => None,
        }
    }

    /// 配置键
    pub fn config_key(&self) -> Option<&str> {
        match self {
            Self::Value { key, .. } => Some(key),
            _ => None,
        }
    }

    /// 注入解析到的 bean，成功写入时返回 `true`
    pub fn inject_bean(&self, instance: &BeanInstance, dependency: &BeanHandle) -> bool {
        match self {
            Self::Field { inject, .. }
            | Self::Method {
                inject: Some(inject),
                ..
            } => inject(instance, dependency),
            _ => false,
        }
    }

    /// 注入配置值，成功写入时返回 `true`
    pub fn inject_value(&self, instance: &BeanInstance, value: Option<String>) -> bool {
        match self {
            Self::Value { inject, .. } => inject(instance, value),
            _ => false,
        }
    }
}

impl fmt::Debug for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { name, dependency, .. } => f
                .debug_struct("Field")
                .field("name", name)
                .field("dependency", &dependency.name)
                .finish(),
            Self::Method {
                name,
                parameters,
                inject,
            } => f
                .debug_struct("Method")
                .field("name", name)
                .field("parameters", parameters)
                .field("skipped", &inject.is_none())
                .finish(),
            Self::Value { name, key, .. } => f
                .debug_struct("Value")
                .field("name", name)
                .field("key", key)
                .finish(),
        }
    }
}

/// 组件描述符
#[derive(Clone)]
pub struct ComponentDescriptor {
    metadata: ComponentMetadata,
    constructor: Option<Constructor>,
    concrete: CastFn,
    interfaces: Vec<InterfaceBinding>,
    injections: Vec<InjectionPoint>,
}

impl ComponentDescriptor {
    /// 为类型 `T` 创建构建器
    pub fn builder<T: Send + Sync + 'static>() -> ComponentBuilder<T> {
        ComponentBuilder::new()
    }

    /// 组件元数据
    pub fn metadata(&self) -> &ComponentMetadata {
        &self.metadata
    }

    /// 组件类型
    pub fn type_info(&self) -> TypeInfo {
        self.metadata.type_info
    }

    /// 组件构造器；没有可用构造器时为 `None`
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// 构造器依赖类型
    pub fn constructor_dependencies(&self) -> &[TypeInfo] {
        self.constructor.as_ref().map_or(&[][..], |c| c.parameters())
    }

    /// 组件提供的接口
    pub fn interfaces(&self) -> &[InterfaceBinding] {
        &self.interfaces
    }

    /// 装配阶段的注入点
    pub fn injection_points(&self) -> &[InjectionPoint] {
        &self.injections
    }

    /// 创建组件实例
    pub fn instantiate(&self, registry: &BeanRegistry) -> Result<BeanInstance, ComponentError> {
        let constructor = self
            .constructor
            .as_ref()
            .ok_or_else(|| ComponentError::NoUsableConstructor {
                type_name: self.metadata.type_info.name.to_string(),
            })?;
        let args = ConstructorArgs::new(registry, self.metadata.type_info);
        (constructor.build)(&args)
    }

    /// 以具体类型为键的注册表条目
    pub fn concrete_handle(&self, instance: &BeanInstance) -> Option<BeanHandle> {
        (self.concrete)(instance)
    }

    /// 以各接口为键的注册表条目
    pub fn interface_handles(&self, instance: &BeanInstance) -> Vec<BeanHandle> {
        self.interfaces
            .iter()
            .filter_map(|binding| (binding.cast)(instance))
            .collect()
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("metadata", &self.metadata)
            .field("constructor", &self.constructor)
            .field("interfaces", &self.interfaces)
            .field("injections", &self.injections)
            .finish()
    }
}

/// 类型化的组件描述符构建器
pub struct ComponentBuilder<T> {
    metadata: ComponentMetadata,
    constructor: Option<Constructor>,
    interfaces: Vec<InterfaceBinding>,
    injections: Vec<InjectionPoint>,
    _component: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ComponentBuilder<T> {
    /// 创建构建器，名称和命名空间默认取自类型
    pub fn new() -> Self {
        Self {
            metadata: ComponentMetadata::new(TypeInfo::of::<T>()),
            constructor: None,
            interfaces: Vec::new(),
            injections: Vec::new(),
            _component: PhantomData,
        }
    }

    /// 设置 bean 名称
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = name.into();
        self
    }

    /// 设置命名空间
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = namespace.into();
        self
    }

    /// 使用无参构造器
    pub fn default_constructor(mut self) -> Self
    where
        T: Default,
    {
        self.constructor = Some(Constructor {
            kind: ConstructorKind::Default,
            parameters: Vec::new(),
            build: Arc::new(|_: &ConstructorArgs<'_>| Ok(Arc::new(T::default()) as BeanInstance)),
        });
        self
    }

    /// 使用注入构造器
    ///
    /// `parameters` 列出构造器依赖的类型，`build` 通过 [`ConstructorArgs::get`]
    /// 解析它们。
    pub fn constructor<F>(mut self, parameters: Vec<TypeInfo>, build: F) -> Self
    where
        F: Fn(&ConstructorArgs<'_>) -> Result<T, ComponentError> + Send + Sync + 'static,
    {
        self.constructor = Some(Constructor {
            kind: ConstructorKind::Injected,
            parameters,
            build: Arc::new(move |args: &ConstructorArgs<'_>| build(args).map(|bean| Arc::new(bean) as BeanInstance)),
        });
        self
    }

    /// 声明组件实现的接口
    pub fn implements<I>(mut self, cast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let owner = self.metadata.type_info;
        self.metadata.interfaces.push(TypeInfo::of::<I>());
        self.interfaces.push(InterfaceBinding {
            interface: TypeInfo::of::<I>(),
            cast: Arc::new(move |instance: &BeanInstance| {
                let bean = Arc::clone(instance).downcast::<T>().ok()?;
                Some(BeanHandle::new(owner, cast(bean)))
            }),
        });
        self
    }

    /// 声明 `#[autowired]` 字段
    pub fn autowired<D>(mut self, field: impl Into<String>, slot: fn(&T) -> &Autowired<D>) -> Self
    where
        D: ?Sized + Send + Sync + 'static,
    {
        self.injections.push(InjectionPoint::Field {
            name: field.into(),
            dependency: TypeInfo::of::<D>(),
            inject: Arc::new(move |instance: &BeanInstance, dependency: &BeanHandle| {
                match ((**instance).downcast_ref::<T>(), dependency.get::<D>()) {
                    (Some(bean), Some(dependency)) => slot(bean).inject(dependency),
                    _ => false,
                }
            }),
        });
        self
    }

    /// 声明单参数的 `#[inject]` setter 方法
    pub fn setter<D, F>(mut self, method: impl Into<String>, invoke: F) -> Self
    where
        D: ?Sized + Send + Sync + 'static,
        F: Fn(&T, Arc<D>) + Send + Sync + 'static,
    {
        self.injections.push(InjectionPoint::Method {
            name: method.into(),
            parameters: vec![TypeInfo::of::<D>()],
            inject: Some(Arc::new(move |instance: &BeanInstance, dependency: &BeanHandle| {
                match ((**instance).downcast_ref::<T>(), dependency.get::<D>()) {
                    (Some(bean), Some(dependency)) => {
                        invoke(bean, dependency);
                        true
                    }
                    _ => false,
                }
            })),
        });
        self
    }

    /// 记录参数个数不为一的 `#[inject]` 方法，装配阶段会跳过它
    pub fn skipped_method(mut self, method: impl Into<String>, parameters: Vec<TypeInfo>) -> Self {
        self.injections.push(InjectionPoint::Method {
            name: method.into(),
            parameters,
            inject: None,
        });
        self
    }

    /// 声明 `#[value("key")]` 字段
    pub fn value(mut self, field: impl Into<String>, key: impl Into<String>, slot: fn(&T) -> &Value) -> Self {
        self.injections.push(InjectionPoint::Value {
            name: field.into(),
            key: key.into(),
            inject: Arc::new(move |instance: &BeanInstance, value: Option<String>| {
                (**instance)
                    .downcast_ref::<T>()
                    .is_some_and(|bean| slot(bean).inject(value))
            }),
        });
        self
    }

    /// 构建描述符
    pub fn build(self) -> ComponentDescriptor {
        let owner = self.metadata.type_info;
        ComponentDescriptor {
            metadata: self.metadata,
            constructor: self.constructor,
            concrete: Arc::new(move |instance: &BeanInstance| {
                let bean = Arc::clone(instance).downcast::<T>().ok()?;
                Some(BeanHandle::new(owner, bean))
            }),
            interfaces: self.interfaces,
            injections: self.injections,
        }
    }
}

impl<T: Send + Sync + 'static> Default for ComponentBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! 应用上下文集成测试

use config_impl::MemoryConfigProvider;
use di_abstractions::{ComponentCatalog, ComponentDescriptor, ContainerConfig, InstantiationOrder};
use di_impl::{ApplicationContext, ApplicationFactory};
use infrastructure_common::{Autowired, ComponentError, InfrastructureError, TypeInfo, Value};
use std::sync::Arc;

trait Store: Send + Sync {
    fn label(&self) -> String;
}

#[derive(Default)]
struct MemoryStore;

impl Store for MemoryStore {
    fn label(&self) -> String {
        "memory".to_string()
    }
}

#[derive(Default)]
struct FileStore;

impl Store for FileStore {
    fn label(&self) -> String {
        "file".to_string()
    }
}

#[derive(Default)]
struct AuditLog;

struct OrderService {
    store: Option<Arc<dyn Store>>,
    audit: Autowired<AuditLog>,
    fallback: Autowired<dyn Store>,
    name: Value,
}

impl OrderService {
    fn new(store: Option<Arc<dyn Store>>) -> Self {
        Self {
            store,
            audit: Autowired::new(),
            fallback: Autowired::new(),
            name: Value::new(),
        }
    }

    fn set_fallback(&self, store: Arc<dyn Store>) {
        self.fallback.inject(store);
    }
}

/// 依赖自身所实现接口的装饰器
struct CachedStore {
    inner: Option<Arc<dyn Store>>,
}

impl Store for CachedStore {
    fn label(&self) -> String {
        match &self.inner {
            Some(inner) => format!("cached({})", inner.label()),
            None => "cached(none)".to_string(),
        }
    }
}

struct Unregistered;

struct NoConstructor;

fn memory_store() -> ComponentDescriptor {
    ComponentDescriptor::builder::<MemoryStore>()
        .namespace("shop::storage")
        .default_constructor()
        .implements::<dyn Store>(|store| store as Arc<dyn Store>)
        .build()
}

fn file_store() -> ComponentDescriptor {
    ComponentDescriptor::builder::<FileStore>()
        .namespace("shop::storage")
        .default_constructor()
        .implements::<dyn Store>(|store| store as Arc<dyn Store>)
        .build()
}

fn cached_store() -> ComponentDescriptor {
    ComponentDescriptor::builder::<CachedStore>()
        .namespace("shop::storage")
        .constructor(vec![TypeInfo::of::<dyn Store>()], |args| {
            Ok(CachedStore {
                inner: args.get::<dyn Store>(),
            })
        })
        .implements::<dyn Store>(|store| store as Arc<dyn Store>)
        .build()
}

fn audit_log() -> ComponentDescriptor {
    ComponentDescriptor::builder::<AuditLog>()
        .namespace("shop::audit")
        .default_constructor()
        .build()
}

fn order_service() -> ComponentDescriptor {
    ComponentDescriptor::builder::<OrderService>()
        .namespace("shop::service")
        .constructor(vec![TypeInfo::of::<dyn Store>()], |args| {
            Ok(OrderService::new(args.get::<dyn Store>()))
        })
        .autowired("audit", |service: &OrderService| &service.audit)
        .setter("set_fallback", |service: &OrderService, store: Arc<dyn Store>| {
            service.set_fallback(store);
        })
        .value("name", "service.name", |service: &OrderService| &service.name)
        .skipped_method("configure", vec![TypeInfo::of::<u32>(), TypeInfo::of::<u32>()])
        .skipped_method("reset", Vec::new())
        .build()
}

fn context_from(descriptors: Vec<ComponentDescriptor>) -> ApplicationContext {
    context_with(descriptors, ContainerConfig::default())
}

fn context_with(descriptors: Vec<ComponentDescriptor>, config: ContainerConfig) -> ApplicationContext {
    let catalog = descriptors
        .into_iter()
        .fold(ComponentCatalog::new(), ComponentCatalog::with_descriptor);
    ApplicationContext::builder()
        .scan("shop")
        .with_catalog(catalog)
        .with_container_config(config)
        .build()
        .unwrap()
}

#[test]
fn test_get_bean_returns_same_instance() {
    let context = context_from(vec![memory_store(), audit_log()]);

    let first = context.get_bean::<MemoryStore>().unwrap();
    let second = context.get_bean::<MemoryStore>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_interface_lookup_points_at_concrete_bean() {
    let context = context_from(vec![memory_store()]);

    let concrete = context.get_bean::<MemoryStore>().unwrap();
    let interface = context.get_bean::<dyn Store>().unwrap();
    assert_eq!(interface.label(), "memory");
    assert_eq!(Arc::as_ptr(&concrete) as *const (), Arc::as_ptr(&interface) as *const ());
}

#[test]
fn test_constructor_injection_when_dependency_discovered_first() {
    let context = context_from(vec![memory_store(), audit_log(), order_service()]);

    let service = context.get_bean::<OrderService>().unwrap();
    let store = service.store.as_ref().map(|store| store.label());
    assert_eq!(store.as_deref(), Some("memory"));
}

#[test]
fn test_constructor_dependency_absent_when_discovered_later() {
    let context = context_from(vec![order_service(), memory_store(), audit_log()]);

    let service = context.get_bean::<OrderService>().unwrap();
    assert!(service.store.is_none());
    // 装配阶段不受发现顺序影响
    assert!(service.audit.is_wired());
    assert!(service.fallback.is_wired());
}

#[test]
fn test_field_and_setter_injection_in_both_orders() {
    for descriptors in [
        vec![memory_store(), audit_log(), order_service()],
        vec![order_service(), audit_log(), memory_store()],
    ] {
        let context = context_from(descriptors);
        let service = context.get_bean::<OrderService>().unwrap();
        let audit = context.get_bean::<AuditLog>().unwrap();

        assert!(Arc::ptr_eq(&service.audit.get().unwrap(), &audit));
        assert_eq!(service.fallback.as_deref().map(|store| store.label()).as_deref(), Some("memory"));
    }
}

#[test]
fn test_config_value_is_injected() {
    let config = MemoryConfigProvider::new().with_value("service.name", "orders");
    let context = ApplicationContext::builder()
        .scan("shop")
        .with_catalog(ComponentCatalog::new().with_descriptor(order_service()))
        .with_config(Arc::new(config))
        .build()
        .unwrap();

    let service = context.get_bean::<OrderService>().unwrap();
    assert_eq!(service.name.get(), Some("orders"));
}

#[test]
fn test_missing_config_key_leaves_value_empty() {
    let context = ApplicationContext::builder()
        .scan("shop")
        .with_catalog(ComponentCatalog::new().with_descriptor(order_service()))
        .with_config(Arc::new(MemoryConfigProvider::new()))
        .build()
        .unwrap();

    let service = context.get_bean::<OrderService>().unwrap();
    assert!(service.name.is_resolved());
    assert_eq!(service.name.get(), None);
}

#[test]
fn test_undiscovered_type_is_absent() {
    let context = context_from(vec![memory_store()]);

    assert!(context.get_bean::<Unregistered>().is_none());
    assert!(!context.contains_bean::<Unregistered>());
    assert!(context.get_bean::<AuditLog>().is_none());
}

#[test]
fn test_component_without_constructor_fails_context_creation() {
    let catalog = ComponentCatalog::new()
        .with_descriptor(memory_store())
        .with_descriptor(
            ComponentDescriptor::builder::<NoConstructor>()
                .namespace("shop::broken")
                .build(),
        );

    let result = ApplicationFactory::new()
        .with_catalog(catalog)
        .create_context(&["shop"]);

    match result {
        Err(InfrastructureError::ContextCreationFailed { source }) => {
            assert!(matches!(source, ComponentError::NoUsableConstructor { .. }));
        }
        other => panic!("期望上下文创建失败，实际为 {other:?}"),
    }
}

#[test]
fn test_failing_constructor_is_fatal() {
    let failing = ComponentDescriptor::builder::<OrderService>()
        .namespace("shop::service")
        .constructor(Vec::new(), |_| {
            Err(ComponentError::construction_failed(
                std::any::type_name::<OrderService>(),
                "数据源不可用",
            ))
        })
        .build();

    let result = ApplicationContext::builder()
        .scan("shop")
        .with_catalog(ComponentCatalog::new().with_descriptor(failing))
        .build();

    assert!(matches!(result, Err(ComponentError::ConstructionFailed { .. })));
}

#[test]
fn test_dependency_first_order_closes_the_hazard() {
    let config = ContainerConfig::new().with_instantiation_order(InstantiationOrder::DependencyFirst);
    let context = context_with(vec![order_service(), memory_store(), audit_log()], config);

    let service = context.get_bean::<OrderService>().unwrap();
    assert!(service.store.is_some());

    let order: Vec<&str> = context
        .registered_components()
        .iter()
        .map(|metadata| metadata.type_info.short_name())
        .collect();
    assert_eq!(order, vec!["MemoryStore", "OrderService", "AuditLog"]);
}

struct Chicken;
struct Egg;

#[test]
fn test_dependency_first_reports_constructor_cycles() {
    let chicken = ComponentDescriptor::builder::<Chicken>()
        .namespace("shop::farm")
        .constructor(vec![TypeInfo::of::<Egg>()], |_| Ok(Chicken))
        .build();
    let egg = ComponentDescriptor::builder::<Egg>()
        .namespace("shop::farm")
        .constructor(vec![TypeInfo::of::<Chicken>()], |_| Ok(Egg))
        .build();

    let result = ApplicationContext::builder()
        .scan("shop::farm")
        .with_catalog(ComponentCatalog::new().with_descriptor(chicken).with_descriptor(egg))
        .with_container_config(
            ContainerConfig::new().with_instantiation_order(InstantiationOrder::DependencyFirst),
        )
        .build();
    assert!(matches!(result, Err(ComponentError::CircularDependency { .. })));
}

#[test]
fn test_scan_roots_match_module_boundaries() {
    let outside = ComponentDescriptor::builder::<AuditLog>()
        .namespace("shopping::audit")
        .default_constructor()
        .build();

    let context = context_from(vec![memory_store(), outside]);
    assert!(context.contains_bean::<MemoryStore>());
    assert!(!context.contains_bean::<AuditLog>());

    let context = ApplicationContext::builder()
        .scan("shop::storage")
        .scan("shop")
        .with_catalog(ComponentCatalog::new().with_descriptor(memory_store()).with_descriptor(audit_log()))
        .build()
        .unwrap();
    assert_eq!(context.bean_count(), 2);
}

#[test]
fn test_ambiguous_interface_last_registration_wins() {
    let context = context_from(vec![memory_store(), file_store()]);
    assert_eq!(context.get_bean::<dyn Store>().unwrap().label(), "file");

    let context = context_from(vec![file_store(), memory_store()]);
    assert_eq!(context.get_bean::<dyn Store>().unwrap().label(), "memory");

    // 两个具体类型仍然都可以查找
    assert!(context.contains_bean::<FileStore>());
    assert!(context.contains_bean::<MemoryStore>());
}

fn data_ptr<T: ?Sized>(bean: &Arc<T>) -> *const () {
    Arc::as_ptr(bean).cast::<()>()
}

#[test]
fn test_dependency_first_keeps_discovery_interface_winner() {
    let catalog = || vec![order_service(), memory_store(), file_store(), audit_log()];

    let discovery = context_from(catalog());
    assert_eq!(discovery.get_bean::<dyn Store>().unwrap().label(), "file");

    let config = ContainerConfig::new().with_instantiation_order(InstantiationOrder::DependencyFirst);
    let context = context_with(catalog(), config);

    let winner = context.get_bean::<dyn Store>().unwrap();
    assert_eq!(winner.label(), "file");

    // 构造器依赖、接口查找与 setter 注入指向同一个 bean
    let service = context.get_bean::<OrderService>().unwrap();
    let store = service.store.clone().unwrap();
    let fallback = service.fallback.get().unwrap();
    assert_eq!(data_ptr(&store), data_ptr(&winner));
    assert_eq!(data_ptr(&fallback), data_ptr(&winner));
    assert!(context.contains_bean::<MemoryStore>());
}

#[test]
fn test_dependency_first_builds_decorators() {
    let config = ContainerConfig::new().with_instantiation_order(InstantiationOrder::DependencyFirst);

    // 装饰器先被发现：接口仍由最后发现的 MemoryStore 提供
    let context = context_with(vec![cached_store(), memory_store()], config.clone());
    assert_eq!(context.get_bean::<CachedStore>().unwrap().label(), "cached(memory)");
    assert_eq!(context.get_bean::<dyn Store>().unwrap().label(), "memory");

    // 装饰器最后被发现：它包装 MemoryStore 并成为接口的实现
    let context = context_with(vec![order_service(), memory_store(), cached_store()], config);
    assert_eq!(context.get_bean::<dyn Store>().unwrap().label(), "cached(memory)");
    let service = context.get_bean::<OrderService>().unwrap();
    assert_eq!(
        service.store.as_ref().map(|store| store.label()).as_deref(),
        Some("cached(memory)")
    );
}

#[test]
fn test_methods_with_other_arity_are_skipped() {
    let context = context_from(vec![memory_store(), audit_log(), order_service()]);
    let service = context.get_bean::<OrderService>().unwrap();
    assert!(service.fallback.is_wired());
    assert_eq!(context.bean_count(), 3);
}

#[test]
fn test_lookup_by_bean_name() {
    let context = context_from(vec![memory_store(), audit_log()]);

    assert!(context.get_bean_by_name::<MemoryStore>("memoryStore").is_some());
    assert!(context.get_bean_by_name::<AuditLog>("memoryStore").is_none());
    assert!(context.get_bean_by_name::<AuditLog>("missing").is_none());
}

#[test]
fn test_concurrent_lookups_share_instances() {
    let context = context_from(vec![memory_store(), audit_log(), order_service()]);
    let expected = context.get_bean::<OrderService>().unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    let service = context.get_bean::<OrderService>().unwrap();
                    assert!(Arc::ptr_eq(&service, &expected));
                }
            });
        }
    });
}

#[test]
fn test_invalid_scan_root_fails() {
    let result = ApplicationFactory::new()
        .with_catalog(ComponentCatalog::new().with_descriptor(memory_store()))
        .create_context(&["shop/storage"]);
    assert!(matches!(result, Err(InfrastructureError::ContextCreationFailed { .. })));
}

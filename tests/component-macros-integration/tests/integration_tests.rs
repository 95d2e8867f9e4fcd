//! 组件宏集成测试
//!
//! 组件通过 `ctor` 登记到全局目录，测试用扫描根把它们区分开。

use config_impl::MemoryConfigProvider;
use di_abstractions::{
    ComponentDefinition, ConstructorKind, ContainerConfig, InjectionPoint, InstantiationOrder,
};
use di_impl::{ApplicationContext, ApplicationFactory};
use infrastructure_common::{Component, TypeInfo};
use std::sync::Arc;

mod app {
    pub mod repository {
        use component_macros::Component;
        use std::sync::atomic::{AtomicUsize, Ordering};

        pub trait TaskRepository: Send + Sync {
            fn add(&self) -> usize;
        }

        #[derive(Default, Component)]
        #[component(implements(dyn TaskRepository))]
        pub struct InMemoryTaskRepository {
            count: AtomicUsize,
        }

        impl TaskRepository for InMemoryTaskRepository {
            fn add(&self) -> usize {
                self.count.fetch_add(1, Ordering::SeqCst) + 1
            }
        }
    }

    pub mod support {
        use component_macros::Component;

        pub trait Notifier: Send + Sync {
            fn channel(&self) -> &'static str;
        }

        #[derive(Default, Component)]
        #[component(name = "mailer", implements(dyn Notifier))]
        pub struct MailNotifier;

        impl Notifier for MailNotifier {
            fn channel(&self) -> &'static str {
                "mail"
            }
        }

        #[derive(Default, Component)]
        pub struct SystemClock;
    }

    pub mod service {
        use super::repository::TaskRepository;
        use super::support::{Notifier, SystemClock};
        use component_macros::{injectable, Component};
        use infrastructure_common::{Autowired, Value};
        use std::sync::Arc;

        #[derive(Component)]
        #[component(name = "tasks", injectable)]
        pub struct TaskService {
            pub repository: Option<Arc<dyn TaskRepository>>,
            #[autowired]
            pub clock: Autowired<SystemClock>,
            #[value("tasks.owner")]
            pub owner: Value,
            pub notifier: Autowired<dyn Notifier>,
        }

        #[injectable]
        impl TaskService {
            #[inject]
            pub fn new(repository: Option<Arc<dyn TaskRepository>>) -> Self {
                Self {
                    repository,
                    clock: Autowired::new(),
                    owner: Value::new(),
                    notifier: Autowired::new(),
                }
            }

            #[inject]
            pub fn set_notifier(&self, notifier: Arc<dyn Notifier>) {
                self.notifier.inject(notifier);
            }

            #[inject]
            pub fn configure(&self, _first: Arc<SystemClock>, _second: Arc<SystemClock>) {
                unreachable!("参数个数不为一的注入方法不会被调用");
            }
        }
    }
}

mod broken {
    use component_macros::{injectable, Component};

    #[derive(Component)]
    #[component(injectable)]
    pub struct Database;

    #[injectable]
    impl Database {
        #[inject]
        pub fn connect() -> Result<Self, std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "连接被拒绝"))
        }
    }
}

use app::repository::{InMemoryTaskRepository, TaskRepository};
use app::service::TaskService;
use app::support::{MailNotifier, Notifier, SystemClock};

const APP_ROOT: &str = "integration_tests::app";

#[test]
fn test_component_name_from_attribute_or_type() {
    assert_eq!(MailNotifier.name(), "mailer");
    assert_eq!(SystemClock.name(), "systemClock");

    let descriptor = TaskService::descriptor();
    assert_eq!(descriptor.metadata().name, "tasks");
}

#[test]
fn test_descriptor_records_namespace_and_interfaces() {
    let descriptor = InMemoryTaskRepository::descriptor();
    let metadata = descriptor.metadata();

    assert_eq!(metadata.namespace, "integration_tests::app::repository");
    assert_eq!(metadata.interfaces, vec![TypeInfo::of::<dyn TaskRepository>()]);
    assert_eq!(
        descriptor.constructor().map(|c| c.kind()),
        Some(ConstructorKind::Default)
    );
}

#[test]
fn test_injectable_contributes_constructor_and_methods() {
    let descriptor = TaskService::descriptor();

    assert_eq!(
        descriptor.constructor_dependencies(),
        &[TypeInfo::of::<dyn TaskRepository>()][..]
    );

    let points = descriptor.injection_points();
    let fields: Vec<&str> = points.iter().map(InjectionPoint::name).collect();
    assert_eq!(fields, vec!["set_notifier", "configure", "clock", "owner"]);
    assert_eq!(points[0].dependency(), Some(TypeInfo::of::<dyn Notifier>()));
    assert_eq!(points[1].dependency(), None);
    assert_eq!(points[3].config_key(), Some("tasks.owner"));
}

#[test]
fn test_global_catalog_bootstrap() {
    let config = MemoryConfigProvider::new().with_value("tasks.owner", "ops");
    let context = ApplicationContext::builder()
        .scan(APP_ROOT)
        .with_config(Arc::new(config))
        .with_container_config(
            ContainerConfig::new().with_instantiation_order(InstantiationOrder::DependencyFirst),
        )
        .build()
        .unwrap();

    assert_eq!(context.bean_count(), 4);

    let service = context.get_bean::<TaskService>().unwrap();
    let repository = context.get_bean::<dyn TaskRepository>().unwrap();
    assert!(Arc::ptr_eq(service.repository.as_ref().unwrap(), &repository));
    assert_eq!(repository.add(), 1);

    assert!(service.clock.is_wired());
    assert_eq!(service.notifier.as_deref().map(|n| n.channel()), Some("mail"));
    assert_eq!(service.owner.get(), Some("ops"));

    assert!(context.get_bean_by_name::<TaskService>("tasks").is_some());
    assert!(context.get_bean_by_name::<MailNotifier>("mailer").is_some());
}

#[test]
fn test_wiring_is_independent_of_discovery_order() {
    let context = ApplicationContext::initialize(&[APP_ROOT]).unwrap();

    let service = context.get_bean::<TaskService>().unwrap();
    assert!(service.clock.is_wired());
    assert!(service.notifier.is_wired());
    assert!(service.owner.is_resolved());
}

#[test]
fn test_narrow_scan_root() {
    let context = ApplicationContext::initialize(&["integration_tests::app::support"]).unwrap();

    assert_eq!(context.bean_count(), 2);
    assert!(context.contains_bean::<dyn Notifier>());
    assert!(context.get_bean::<TaskService>().is_none());
}

#[test]
fn test_failing_constructor_fails_context_creation() {
    let result = ApplicationFactory::new().create_context(&["integration_tests::broken"]);
    assert!(result.is_err());
}

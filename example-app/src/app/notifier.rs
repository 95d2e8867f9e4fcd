//! 通知

use component_macros::Component;
use infrastructure_common::Value;
use tracing::info;

/// 通知接口
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// 输出到日志的通知
#[derive(Default, Component)]
#[component(name = "console", implements(dyn Notifier))]
pub struct ConsoleNotifier {
    #[value("notifier.prefix")]
    prefix: Value,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        match self.prefix.get() {
            Some(prefix) => info!("{} {}", prefix, message),
            None => info!("{}", message),
        }
    }
}

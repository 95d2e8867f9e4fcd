//! 应用工厂
//!
//! 包装上下文初始化：任何初始化失败都被折叠为
//! [`InfrastructureError::ContextCreationFailed`]，不会返回部分初始化的上下文。

use crate::context::ApplicationContext;
use config_abstractions::ConfigProvider;
use di_abstractions::{ComponentCatalog, ContainerConfig};
use infrastructure_common::InfrastructureError;
use std::sync::Arc;
use tracing::{error, info};

/// 应用工厂
#[derive(Default)]
pub struct ApplicationFactory {
    config: Option<Arc<dyn ConfigProvider>>,
    container_config: ContainerConfig,
    catalog: Option<ComponentCatalog>,
}

impl ApplicationFactory {
    /// 创建工厂，默认使用全局组件目录
    pub fn new() -> Self {
        Self::default()
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

    /// 使用指定的组件目录
    pub fn with_catalog(mut self, catalog: ComponentCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 创建应用上下文
    pub fn create_context<S: AsRef<str>>(
        &self,
        scan_roots: &[S],
    ) -> Result<ApplicationContext, InfrastructureError> {
        let mut builder = ApplicationContext::builder()
            .with_container_config(self.container_config.clone());
        for root in scan_roots {
            builder = builder.scan(root.as_ref());
        }
        if let Some(config) = &self.config {
            builder = builder.with_config(Arc::clone(config));
        }
        if let Some(catalog) = &self.catalog {
            builder = builder.with_catalog(catalog.clone());
        }

        match builder.build() {
            Ok(context) => {
                info!("应用上下文创建成功");
                Ok(context)
            }
            Err(source) => {
                error!("应用上下文创建失败: {}", source);
                Err(InfrastructureError::ContextCreationFailed { source })
            }
        }
    }
}

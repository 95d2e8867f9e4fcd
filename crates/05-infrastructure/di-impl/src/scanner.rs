//! 基于组件目录的扫描器

use di_abstractions::{validate_scan_root, ComponentCatalog, ComponentDescriptor, ComponentScanner};
use infrastructure_common::ComponentError;
use std::any::TypeId;
use std::collections::HashSet;
use tracing::{debug, warn};

/// 目录扫描器
///
/// 按扫描根筛选目录中的组件。同一类型只会被发现一次，
/// 结果保持目录中的先后顺序。
#[derive(Debug, Clone, Default)]
pub struct CatalogScanner {
    catalog: ComponentCatalog,
}

impl CatalogScanner {
    /// 基于给定目录创建扫描器
    pub fn new(catalog: ComponentCatalog) -> Self {
        Self { catalog }
    }

    /// 基于全局目录创建扫描器
    pub fn global() -> Self {
        Self::new(ComponentCatalog::global())
    }
}

impl ComponentScanner for CatalogScanner {
    fn scan(&self, scan_roots: &[String]) -> Result<Vec<ComponentDescriptor>, ComponentError> {
        for root in scan_roots {
            validate_scan_root(root)?;
        }

        let mut seen: HashSet<TypeId> = HashSet::new();
        let mut discovered = Vec::new();

        for descriptor in self.catalog.descriptors() {
            let metadata = descriptor.metadata();
            if !scan_roots.iter().any(|root| metadata.is_under(root)) {
                continue;
            }

            if seen.insert(metadata.type_info.id) {
                debug!("发现组件: {} ({})", metadata.name, metadata.type_info);
                discovered.push(descriptor.clone());
            } else {
                warn!("组件 {} 在目录中重复登记，忽略后出现的描述符", metadata.type_info);
            }
        }

        Ok(discovered)
    }

    fn name(&self) -> &str {
        "CatalogScanner"
    }
}

//! 组件扫描器抽象接口

use crate::descriptor::ComponentDescriptor;
use infrastructure_common::ComponentError;

/// 组件扫描器 trait
///
/// 返回位于任一扫描根之下的组件描述符，顺序即发现顺序
pub trait ComponentScanner: Send + Sync {
    /// 扫描组件
    fn scan(&self, scan_roots: &[String]) -> Result<Vec<ComponentDescriptor>, ComponentError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}

/// 校验扫描根
///
/// 扫描根是 `::` 分隔的模块路径，空字符串表示扫描全部组件
pub fn validate_scan_root(root: &str) -> Result<(), ComponentError> {
    if root.is_empty() {
        return Ok(());
    }

    let valid = root.split("::").all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
            && chars.all(|c| c == '_' || c.is_alphanumeric())
    });

    if valid {
        Ok(())
    } else {
        Err(ComponentError::scan_error(format!("无效的扫描根: {root:?}")))
    }
}

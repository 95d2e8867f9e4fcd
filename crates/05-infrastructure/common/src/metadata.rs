//! 元数据定义
//!
//! 提供组件和类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
///
/// 同时适用于具体类型和 trait object（`dyn Trait`），后者作为接口键使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// 获取类型所在的模块路径
    pub fn module_path(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        let base = base.strip_prefix("dyn ").unwrap_or(base);
        base.rsplit_once("::").map_or("", |(module, _)| module)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 组件元数据
#[derive(Debug, Clone)]
pub struct ComponentMetadata {
    /// 组件名称（bean 名称）
    pub name: String,
    /// 类型信息
    pub type_info: TypeInfo,
    /// 组件所在的命名空间（模块路径）
    pub namespace: String,
    /// 组件实现的接口
    pub interfaces: Vec<TypeInfo>,
}

impl ComponentMetadata {
    /// 创建新的组件元数据，名称与命名空间取自类型本身
    pub fn new(type_info: TypeInfo) -> Self {
        Self {
            name: default_bean_name(type_info.short_name()),
            namespace: type_info.module_path().to_string(),
            type_info,
            interfaces: Vec::new(),
        }
    }

    /// 设置名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 设置命名空间
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// 判断组件是否位于扫描根之下
    ///
    /// 命名空间等于扫描根，或在 `::` 边界处嵌套于扫描根之下时匹配；
    /// 空扫描根匹配所有组件。
    pub fn is_under(&self, scan_root: &str) -> bool {
        if scan_root.is_empty() {
            return true;
        }
        match self.namespace.strip_prefix(scan_root) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }
}

/// 默认 bean 名称：首字母小写的类型短名
pub fn default_bean_name(short_name: &str) -> String {
    let mut chars = short_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

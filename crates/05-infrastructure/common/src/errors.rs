//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置键不存在: {key}")]
    KeyNotFound { key: String },

    #[error("配置类型转换失败: {message}")]
    TypeConversionError { message: String },
}

/// 组件错误类型
///
/// 容器初始化期间的所有致命错误都以此类型返回。依赖缺失不属于错误，
/// 只会让对应的注入槽保持为空。
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("组件元数据无效: {message}")]
    InvalidMetadata { message: String },

    #[error("组件没有可用的构造器: {type_name}")]
    NoUsableConstructor { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ConstructionFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("检测到循环依赖: {cycle}")]
    CircularDependency { cycle: String },

    #[error("读取配置值失败: {type_name}.{field} <- {key}, 原因: {source}")]
    ValueInjectionFailed {
        type_name: String,
        field: String,
        key: String,
        source: ConfigError,
    },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(message: impl Into<String>) -> Self {
        Self::ScanError {
            message: message.into(),
        }
    }

    /// 创建构造失败错误
    pub fn construction_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// 应用上下文创建失败，启动过程不可恢复
    #[error("应用上下文创建失败")]
    ContextCreationFailed {
        #[source]
        source: ComponentError,
    },
}

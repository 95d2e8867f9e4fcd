//! 配置管理器实现
//!
//! 将多个配置提供者组合为一个，并提供基于 `config` crate 的分层加载

use config_abstractions::{collect_keys, lookup_path, ConfigProvider};
use infrastructure_common::ConfigError;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// 组合配置提供者
///
/// 按优先级从高到低依次查询，第一个给出值的提供者胜出
#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// 创建空的组合配置提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加配置提供者
    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.register_provider(Box::new(provider));
        self
    }

    /// 注册配置提供者，保持优先级降序；优先级相同时先注册者在前
    pub fn register_provider(&mut self, provider: Box<dyn ConfigProvider>) {
        info!("注册配置提供者: {} (优先级 {})", provider.name(), provider.priority());
        let position = self
            .providers
            .iter()
            .position(|existing| existing.priority() < provider.priority())
            .unwrap_or(self.providers.len());
        self.providers.insert(position, provider);
    }

    /// 已注册提供者的名称，按查询顺序排列
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Debug for CompositeConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeConfigProvider")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_configuration(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        for provider in &self.providers {
            if let Some(value) = provider.get_configuration(key)? {
                debug!("配置项 {} 由 {} 提供", key, provider.name());
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        let mut keys = BTreeSet::new();
        for provider in &self.providers {
            keys.extend(provider.get_all_keys()?);
        }
        Ok(keys.into_iter().collect())
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        for provider in &mut self.providers {
            provider.reload()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "CompositeConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.providers.first().map_or(0, |p| p.priority())
    }
}

/// 分层配置提供者
///
/// 使用 `config` crate 加载可选的配置文件（toml/json/yaml 由扩展名决定），
/// 再叠加 `PREFIX_SECTION__KEY` 形式的环境变量
#[derive(Debug)]
pub struct LayeredConfigProvider {
    file_stem: String,
    env_prefix: String,
    priority: i32,
    tree: Value,
}

impl LayeredConfigProvider {
    /// 创建新的分层配置提供者
    pub fn new(file_stem: impl Into<String>, env_prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let mut provider = Self {
            file_stem: file_stem.into(),
            env_prefix: env_prefix.into(),
            priority: 50,
            tree: Value::Null,
        };
        provider.load()?;
        Ok(provider)
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn load(&mut self) -> Result<(), ConfigError> {
        debug!("加载分层配置: 文件 {}, 环境变量前缀 {}", self.file_stem, self.env_prefix);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&self.file_stem).required(false))
            .add_source(
                config::Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::ParseError { source: Box::new(e) })?;

        self.tree = settings
            .try_deserialize::<Value>()
            .map_err(|e| ConfigError::ParseError { source: Box::new(e) })?;
        Ok(())
    }
}

impl ConfigProvider for LayeredConfigProvider {
    fn get_configuration(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(lookup_path(&self.tree, key).cloned())
    }

    fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        let mut keys = Vec::new();
        collect_keys(&self.tree, "", &mut keys);
        Ok(keys)
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.load()
    }

    fn name(&self) -> &str {
        "LayeredConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

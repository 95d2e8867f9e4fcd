//! 配置提供者实现

use config_abstractions::{collect_keys, lookup_path, ConfigProvider};
use infrastructure_common::ConfigError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 内存配置提供者
///
/// 以扁平的 `a.b.c` 键保存配置，适合测试和默认值
#[derive(Debug, Default, Clone)]
pub struct MemoryConfigProvider {
    values: BTreeMap<String, Value>,
    priority: i32,
}

impl MemoryConfigProvider {
    /// 创建空的内存配置提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加配置项
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 插入配置项
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_configuration(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }

    fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.values.keys().cloned().collect())
    }

    fn name(&self) -> &str {
        "MemoryConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// TOML 配置提供者
#[derive(Debug)]
pub struct TomlConfigProvider {
    file_path: PathBuf,
    config: Value,
    priority: i32,
}

impl TomlConfigProvider {
    /// 创建新的 TOML 配置提供者
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut provider = Self {
            file_path: path.as_ref().to_path_buf(),
            config: Value::Null,
            priority: 100, // TOML 文件默认高优先级
        };

        provider.load_config()?;
        Ok(provider)
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 获取文件路径
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_config(&mut self) -> Result<(), ConfigError> {
        debug!("加载 TOML 配置文件: {}", self.file_path.display());

        if !self.file_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: self.file_path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;

        self.config = toml_to_json(toml::Value::Table(table));
        debug!("TOML 配置文件加载完成");
        Ok(())
    }
}

/// 将 TOML 值转换为 JSON 值
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn get_configuration(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(lookup_path(&self.config, key).cloned())
    }

    fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        let mut keys = Vec::new();
        collect_keys(&self.config, "", &mut keys);
        Ok(keys)
    }

    fn reload(&mut self) -> Result<(), ConfigError> {
        self.load_config()
    }

    fn name(&self) -> &str {
        "TomlConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// 环境变量配置提供者
///
/// `APP_SERVER_PORT` 在前缀 `APP`、分隔符 `_` 下对应键 `server.port`
#[derive(Debug)]
pub struct EnvironmentConfigProvider {
    prefix: String,
    separator: String,
    env_vars: BTreeMap<String, String>,
    priority: i32,
}

impl EnvironmentConfigProvider {
    /// 从当前进程环境变量创建
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// 从给定的变量集合创建
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut provider = Self {
            prefix: prefix.into(),
            separator: "_".to_string(),
            env_vars: BTreeMap::new(),
            priority: 200, // 环境变量优先级最高
        };
        provider.load_env_vars(vars);
        provider
    }

    /// 设置分隔符
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 获取环境变量前缀
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn load_env_vars<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = format!("{}{}", self.prefix, self.separator);
        self.env_vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(&prefix))
            .collect();
        debug!("加载了 {} 个 {} 前缀的环境变量", self.env_vars.len(), self.prefix);
    }

    fn config_key_to_env_key(&self, config_key: &str) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            self.separator,
            config_key.to_uppercase().replace('.', &self.separator)
        )
    }

    fn env_key_to_config_key(&self, env_key: &str) -> String {
        env_key[self.prefix.len() + self.separator.len()..]
            .to_lowercase()
            .replace(&self.separator, ".")
    }
}

impl ConfigProvider for EnvironmentConfigProvider {
    fn get_configuration(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        let env_key = self.config_key_to_env_key(key);
        Ok(self.env_vars.get(&env_key).cloned().map(Value::String))
    }

    fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self
            .env_vars
            .keys()
            .map(|k| self.env_key_to_config_key(k))
            .collect())
    }

    fn name(&self) -> &str {
        "EnvironmentConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

//! 配置提供者抽象接口

use infrastructure_common::ConfigError;
use serde_json::Value;

/// 配置提供者 trait
///
/// 定义从不同数据源获取配置的统一接口。键使用 `.` 分隔的路径，
/// 例如 `server.port`。
pub trait ConfigProvider: Send + Sync {
    /// 获取配置值，键不存在时返回 `None`
    fn get_configuration(&self, key: &str) -> Result<Option<Value>, ConfigError>;

    /// 获取字符串形式的配置值
    ///
    /// 标量值转换为字符串；表和数组无法作为字符串注入，返回类型转换错误。
    fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get_configuration(key)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value_to_string(key, value).map(Some),
        }
    }

    /// 检查配置键是否存在
    fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.get_configuration(key)?.is_some())
    }

    /// 获取所有配置键
    fn get_all_keys(&self) -> Result<Vec<String>, ConfigError>;

    /// 重新加载配置
    fn reload(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// 获取提供者名称
    fn name(&self) -> &str;

    /// 获取提供者优先级，数值越高越先被查询
    fn priority(&self) -> i32 {
        0
    }
}

/// 将标量配置值转换为字符串
pub fn value_to_string(key: &str, value: Value) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ConfigError::TypeConversionError {
            message: format!("配置项 {key} 不是标量值: {other}"),
        }),
    }
}

/// 按 `.` 分隔的路径在 JSON 树中查找
pub fn lookup_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |current, part| match current {
        Value::Object(map) => map.get(part),
        _ => None,
    })
}

/// 递归收集 JSON 树中的所有键
pub fn collect_keys(value: &Value, prefix: &str, keys: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (key, nested) in map {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            keys.push(full_key.clone());
            collect_keys(nested, &full_key, keys);
        }
    }
}

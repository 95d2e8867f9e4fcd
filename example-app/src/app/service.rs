//! 任务服务

use super::notifier::Notifier;
use super::repository::{Task, TaskRepository};
use component_macros::{injectable, Component};
use infrastructure_common::{Autowired, Value};
use std::sync::Arc;
use thiserror::Error;

/// 任务服务错误
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("任务存储不可用")]
    RepositoryUnavailable,

    #[error("任务不存在: {id}")]
    NotFound { id: u64 },
}

/// 任务服务
///
/// 存储通过构造器注入；按发现顺序实例化时存储可能尚未创建，此时为空。
#[derive(Component)]
#[component(injectable)]
pub struct TaskService {
    repository: Option<Arc<dyn TaskRepository>>,
    #[autowired]
    notifier: Autowired<dyn Notifier>,
    #[value("tasks.owner")]
    owner: Value,
}

#[injectable]
impl TaskService {
    #[inject]
    pub fn new(repository: Option<Arc<dyn TaskRepository>>) -> Self {
        Self {
            repository,
            notifier: Autowired::new(),
            owner: Value::new(),
        }
    }

    fn repository(&self) -> Result<&dyn TaskRepository, TaskError> {
        self.repository
            .as_deref()
            .ok_or(TaskError::RepositoryUnavailable)
    }

    /// 创建任务
    pub fn add(&self, title: &str) -> Result<Task, TaskError> {
        let task = self.repository()?.insert(title);
        self.notify(&format!("新任务 #{}: {}", task.id, task.title));
        Ok(task)
    }

    /// 完成任务
    pub fn complete(&self, id: u64) -> Result<Task, TaskError> {
        let task = self
            .repository()?
            .complete(id)
            .ok_or(TaskError::NotFound { id })?;
        self.notify(&format!("任务 #{} 已完成", task.id));
        Ok(task)
    }

    /// 所有任务
    pub fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.repository()?.all())
    }

    /// 任务负责人
    pub fn owner(&self) -> &str {
        self.owner.get().unwrap_or("unassigned")
    }

    fn notify(&self, message: &str) {
        if let Some(notifier) = self.notifier.as_deref() {
            notifier.notify(message);
        }
    }
}

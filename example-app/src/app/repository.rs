//! 任务存储

use component_macros::Component;
use parking_lot::RwLock;
use serde::Serialize;

/// 任务
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub done: bool,
}

/// 任务存储接口
pub trait TaskRepository: Send + Sync {
    /// 保存新任务
    fn insert(&self, title: &str) -> Task;

    /// 标记完成，任务不存在时返回 `None`
    fn complete(&self, id: u64) -> Option<Task>;

    /// 所有任务
    fn all(&self) -> Vec<Task>;
}

/// 内存任务存储
#[derive(Default, Component)]
#[component(implements(dyn TaskRepository))]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl TaskRepository for InMemoryTaskRepository {
    fn insert(&self, title: &str) -> Task {
        let mut tasks = self.tasks.write();
        let task = Task {
            id: tasks.len() as u64 + 1,
            title: title.to_string(),
            done: false,
        };
        tasks.push(task.clone());
        task
    }

    fn complete(&self, id: u64) -> Option<Task> {
        let mut tasks = self.tasks.write();
        let task = tasks.iter_mut().find(|task| task.id == id)?;
        task.done = true;
        Some(task.clone())
    }

    fn all(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }
}

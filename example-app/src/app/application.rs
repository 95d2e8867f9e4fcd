//! 应用根组件

use super::service::{TaskError, TaskService};
use component_macros::{injectable, Component};
use infrastructure_common::{Autowired, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// 应用根组件，从上下文中取出后调用 [`Application::run`]
#[derive(Component)]
#[component(injectable)]
pub struct Application {
    tasks: Autowired<TaskService>,
    #[value("app.name")]
    name: Value,
}

#[injectable]
impl Application {
    #[inject]
    pub fn new() -> Self {
        Self {
            tasks: Autowired::new(),
            name: Value::new(),
        }
    }

    #[inject]
    pub fn set_task_service(&self, tasks: Arc<TaskService>) {
        self.tasks.inject(tasks);
    }

    /// 创建给定的任务，完成第一个，然后输出任务列表
    pub fn run(&self, titles: &[String]) -> anyhow::Result<()> {
        let name = self.name.get().unwrap_or("application");
        let Some(tasks) = self.tasks.as_deref() else {
            warn!("{}: TaskService 未装配，没有可执行的操作", name);
            return Ok(());
        };
        info!("{} 启动，负责人: {}", name, tasks.owner());

        for title in titles {
            match tasks.add(title) {
                Ok(_) => {}
                Err(TaskError::RepositoryUnavailable) => {
                    warn!("任务存储未注入，可以使用 --order dependency-first 启动");
                    return Ok(());
                }
                Err(error) => return Err(error.into()),
            }
        }

        if !titles.is_empty() {
            tasks.complete(1)?;
        }

        let all = tasks.list()?;
        println!("{}", serde_json::to_string_pretty(&all)?);
        Ok(())
    }
}

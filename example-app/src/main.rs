//! # 示例应用程序
//!
//! 任务追踪示例：通过组件扫描创建应用上下文，取出根组件并运行。

mod app;

use anyhow::{anyhow, Context};
use app::application::Application;
use clap::{Parser, ValueEnum};
use config_abstractions::ConfigProvider;
use config_impl::{CompositeConfigProvider, EnvironmentConfigProvider, MemoryConfigProvider, TomlConfigProvider};
use di_abstractions::{ContainerConfig, InstantiationOrder};
use di_impl::ApplicationFactory;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "任务追踪示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/application.toml")]
    config: PathBuf,

    /// 扫描根（可重复）
    #[arg(long = "scan", default_value = "example_app::app")]
    scan_roots: Vec<String>,

    /// 实例化顺序
    #[arg(long, value_enum, default_value_t = OrderArg::DependencyFirst)]
    order: OrderArg,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 要创建的任务
    #[arg(default_values_t = ["写周报".to_string(), "检查告警".to_string()])]
    tasks: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    /// 按发现顺序
    Discovery,
    /// 依赖先于使用者
    DependencyFirst,
}

impl From<OrderArg> for InstantiationOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Discovery => InstantiationOrder::Discovery,
            OrderArg::DependencyFirst => InstantiationOrder::DependencyFirst,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动任务追踪示例应用");

    let config = build_config(&args)?;
    let context = ApplicationFactory::new()
        .with_config(config)
        .with_container_config(ContainerConfig::new().with_instantiation_order(args.order.into()))
        .create_context(args.scan_roots.as_slice())
        .context("无法启动应用")?;

    for component in context.registered_components() {
        info!("已注册组件: {} ({})", component.name, component.type_info);
    }

    let application = context
        .get_bean::<Application>()
        .ok_or_else(|| anyhow!("扫描根 {:?} 下没有 Application 组件", args.scan_roots))?;
    application.run(&args.tasks)?;

    info!("应用已退出");
    Ok(())
}

/// 构建配置源：环境变量 > 配置文件 > 内置默认值
fn build_config(args: &Args) -> anyhow::Result<Arc<dyn ConfigProvider>> {
    let mut composite = CompositeConfigProvider::new()
        .with_provider(MemoryConfigProvider::new().with_value("app.name", "task-tracker"))
        .with_provider(EnvironmentConfigProvider::new("TASKS"));

    if args.config.exists() {
        info!("加载配置文件: {}", args.config.display());
        composite.register_provider(Box::new(TomlConfigProvider::new(&args.config)?));
    } else {
        info!("配置文件 {} 不存在，使用默认配置和环境变量", args.config.display());
    }

    Ok(Arc::new(composite))
}

use clap::Parser;
use keepit_application::command_bus::CommandBus;
use keepit_application::config::ValidationConfig;
use keepit_application::context::AppContext;
use keepit_application::error::AppError;
use keepit_application::problem::ProblemDetails;
use keepit_application::query_bus::QueryBus;
use keepit_application::use_cases::dummies::{
    CreateDummy, DeleteDummyById, DummyServices, GetDummies, GetDummyById, UpdateDummy,
    register_dummy_handlers,
};
use keepit_application::{InMemoryCommandBus, InMemoryQueryBus};
use keepit_domain::DummyFilter;
use keepit_domain::clock::SystemClock;
use keepit_domain::persist::InMemoryStore;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// 在内存存储上跑一遍 Dummy 的增删改查
#[derive(Debug, Parser)]
#[command(name = "keepit-demo", version)]
struct Cli {
    /// 日志过滤表达式；设置了 RUST_LOG 时以 RUST_LOG 为准
    #[arg(long, env = "KEEPIT_LOG", default_value = "info")]
    log_filter: String,

    /// 预先创建的名称
    #[arg(long = "seed", default_values = ["alpha", "beta", "gamma"])]
    seeds: Vec<String>,

    /// 名称长度上限
    #[arg(long, default_value_t = keepit_application::config::DEFAULT_MAX_NAME_LENGTH)]
    max_name_length: usize,
}

fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn show<T: Serialize>(label: &str, value: &T) -> anyhow::Result<()> {
    println!("{label}: {}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 预期中的失败：打印对应的问题详情
fn show_problem<T>(label: &str, outcome: Result<T, AppError>) -> anyhow::Result<()> {
    match outcome {
        Ok(_) => anyhow::bail!("{label}: expected a failure"),
        Err(err) => show(label, &ProblemDetails::from(&err)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_filter);

    let store = InMemoryStore::new();
    let services = DummyServices::builder()
        .units(Arc::new(store.clone()))
        .clock(Arc::new(SystemClock))
        .config(
            ValidationConfig::builder()
                .max_name_length(cli.max_name_length)
                .build(),
        )
        .build();
    let commands = InMemoryCommandBus::new();
    let queries = InMemoryQueryBus::new();
    register_dummy_handlers(&services, &commands, &queries)?;

    let ctx = AppContext::correlated("demo");

    let mut created = Vec::with_capacity(cli.seeds.len());
    for name in &cli.seeds {
        created.push(commands.dispatch(&ctx, CreateDummy::new(name.clone())).await?);
    }
    show("all", &queries.dispatch(&ctx, GetDummies::default()).await?)?;

    let Some(first) = created.first() else {
        tracing::info!("no seeds given, nothing else to do");
        return Ok(());
    };

    show_problem(
        "duplicate",
        commands.dispatch(&ctx, CreateDummy::new(first.name.clone())).await,
    )?;
    show_problem(
        "too long",
        commands
            .dispatch(&ctx, CreateDummy::new("x".repeat(cli.max_name_length + 1)))
            .await,
    )?;
    show_problem(
        "bad id",
        queries.dispatch(&ctx, GetDummyById::new("not a valid guid")).await,
    )?;

    let renamed = commands
        .dispatch(
            &ctx,
            UpdateDummy::new(first.id.to_string(), format!("{}-renamed", first.name)),
        )
        .await?;
    show("renamed", &renamed)?;

    let by_name = queries
        .dispatch(&ctx, GetDummies::from(DummyFilter::by_name(renamed.name.clone())))
        .await?;
    show("by name", &by_name)?;

    commands
        .dispatch(&ctx, DeleteDummyById::new(renamed.id.to_string()))
        .await?;
    show_problem(
        "deleted",
        queries
            .dispatch(&ctx, GetDummyById::new(renamed.id.to_string()))
            .await,
    )?;

    tracing::info!(remaining = store.len().await, "demo finished");
    Ok(())
}

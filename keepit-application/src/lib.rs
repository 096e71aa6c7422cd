//! keepit 应用层（keepit-application）
//!
//! - 命令/查询及其处理器、进程内总线（`InMemoryCommandBus` / `InMemoryQueryBus`）
//! - 应用上下文、错误与问题详情（`problem`）转换
//! - 校验管线（`validation`）与 Dummy 用例（`use_cases::dummies`）
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod problem;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod use_cases;
pub mod validation;

pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;

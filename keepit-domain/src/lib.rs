//! keepit 领域层（keepit-domain）
//!
//! 提供 Dummy 资源的领域模型与持久化契约：
//! - 实体（`entity`、`dummy`）与审计时间戳，时间来源由 `clock` 显式注入
//! - 规约（`specification`）及基于规约的查询过滤（`filter`）
//! - 仓储与工作单元接口（`persist`），以及可选的内存实现（`inmemory` 特性）
//!
//! 本 crate 不包含校验逻辑：名称非空、长度与唯一性由应用层的校验管线负责。
//!
pub mod clock;
pub mod dummy;
pub mod entity;
pub mod error;
pub mod filter;
pub mod persist;
pub mod specification;

pub use dummy::{Dummy, DummyId};
pub use filter::DummyFilter;

//! Chaptersmith - 章节式小说写作项目管理
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Project Context: 项目聚合、章节实体、视角策略
//! - 纯计算组件: 视角解析、生成指令组装、字数规则、文稿拼接
//!
//! 应用层 (application/):
//! - Ports: ProjectRepository
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful JSON API
//! - Persistence: SQLite 存储
//! - Memory: 内存存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

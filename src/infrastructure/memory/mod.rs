//! Memory Layer - In-Memory State Management
//!
//! 实现 ProjectRepository 的内存版本，供测试和无持久化部署使用

mod project_repo;

pub use project_repo::InMemoryProjectRepository;

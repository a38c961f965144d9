//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod chapter_handlers;
mod manuscript_handlers;
mod project_handlers;

pub use chapter_handlers::*;
pub use manuscript_handlers::*;
pub use project_handlers::*;

//! HTTP Handlers
//!
//! 每个处理器只做请求解析和响应包装，业务逻辑在应用层

mod chapter;
mod manuscript;
mod ping;
mod project;

pub use chapter::*;
pub use manuscript::*;
pub use ping::*;
pub use project::*;

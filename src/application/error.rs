//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::RepositoryError;
use crate::domain::project::ProjectError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: Uuid,
    },

    /// 验证错误（字段 + 原因）
    #[error("Validation error: {message}")]
    ValidationError {
        field: &'static str,
        message: String,
    },

    /// 并发写冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            message: message.into(),
        }
    }
}

impl From<ProjectError> for ApplicationError {
    fn from(err: ProjectError) -> Self {
        Self::validation(err.field(), err.to_string())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // 读取之后、写入之前项目被并发删除
            RepositoryError::NotFound(id) => Self::not_found("Project", id),
            RepositoryError::Duplicate(msg) | RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_keep_their_kind() {
        let id = Uuid::new_v4();
        let missing = ApplicationError::from(RepositoryError::NotFound(id));
        assert!(matches!(
            missing,
            ApplicationError::NotFound { resource_type: "Project", id: found } if found == id
        ));

        let stale = ApplicationError::from(RepositoryError::Conflict("revision 2".to_string()));
        assert!(matches!(stale, ApplicationError::Conflict(_)));

        let disk = ApplicationError::from(RepositoryError::DatabaseError("locked".to_string()));
        assert!(matches!(disk, ApplicationError::RepositoryError(_)));
    }
}

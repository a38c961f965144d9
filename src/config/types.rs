//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::{WordCountPolicy, WordCountRules, WordRange};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 存储后端选择
    #[serde(default)]
    pub storage: StorageConfig,

    /// 章节字数规则
    #[serde(default)]
    pub chapter: ChapterConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节）
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/chaptersmith.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// 进程内存储，重启后数据丢失
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// 章节字数配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterConfig {
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// advisory: 超出区间只提示；strict: 超出区间拒绝保存
    #[serde(default)]
    pub word_count_policy: WordCountPolicy,
}

fn default_min_words() -> usize {
    crate::domain::word_count::DEFAULT_MIN_WORDS
}

fn default_max_words() -> usize {
    crate::domain::word_count::DEFAULT_MAX_WORDS
}

impl Default for ChapterConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            max_words: default_max_words(),
            word_count_policy: WordCountPolicy::default(),
        }
    }
}

impl ChapterConfig {
    /// 转换为领域层字数规则
    pub fn word_count_rules(&self) -> WordCountRules {
        WordCountRules::new(
            WordRange::new(self.min_words, self.max_words),
            self.word_count_policy,
        )
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.chapter.min_words, 1400);
        assert_eq!(config.chapter.max_words, 1800);
        assert_eq!(config.chapter.word_count_policy, WordCountPolicy::Advisory);
    }

    #[test]
    fn test_chapter_config_to_rules() {
        let config = ChapterConfig {
            min_words: 10,
            max_words: 20,
            word_count_policy: WordCountPolicy::Strict,
        };
        let rules = config.word_count_rules();
        assert_eq!(rules.range, WordRange::new(10, 20));
        assert_eq!(rules.policy, WordCountPolicy::Strict);
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig {
            path: "/tmp/test.db".to_string(),
            max_connections: 1,
        };
        assert_eq!(config.database_url(), "sqlite:/tmp/test.db?mode=rwc");
    }
}

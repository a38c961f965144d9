//! Domain Layer - 领域层
//!
//! Project Context: 写作项目与章节
//!
//! 纯计算组件:
//! - pov_resolver: 章节视角解析
//! - prompt_assembler: 生成指令组装
//! - word_count: 字数统计与区间策略
//! - manuscript: 文稿拼接导出

pub mod manuscript;
pub mod pov_resolver;
pub mod project;
pub mod prompt_assembler;
pub mod word_count;

// 大纲分段只供 prompt_assembler 和 Project 使用
mod outline_segmenter;

pub use manuscript::{assemble_manuscript, export_filename, ManuscriptExport};
pub use pov_resolver::resolve_pov;
pub use prompt_assembler::GenerationPlan;
pub use word_count::{count_words, WordCountAssessment, WordCountPolicy, WordCountRules, WordRange};

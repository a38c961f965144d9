//! 字数统计与字数区间策略
//!
//! 字数 = 按空白切分后的非空片段数。
//! 区间检查默认只是提示（Advisory），Strict 模式下超出区间拒绝保存。

use serde::{Deserialize, Serialize};

use crate::domain::project::ProjectError;

/// 默认最小字数
pub const DEFAULT_MIN_WORDS: usize = 1400;

/// 默认最大字数
pub const DEFAULT_MAX_WORDS: usize = 1800;

/// 统计字数
#[inline]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 字数区间（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRange {
    pub min: usize,
    pub max: usize,
}

impl Default for WordRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WORDS,
            max: DEFAULT_MAX_WORDS,
        }
    }
}

impl WordRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, word_count: usize) -> bool {
        (self.min..=self.max).contains(&word_count)
    }
}

/// 字数区间策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCountPolicy {
    /// 超出区间只返回警告，仍然保存
    #[default]
    Advisory,
    /// 超出区间拒绝保存
    Strict,
}

impl WordCountPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordCountPolicy::Advisory => "advisory",
            WordCountPolicy::Strict => "strict",
        }
    }
}

/// 字数评估结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCountAssessment {
    pub word_count: usize,
    pub in_range: bool,
    /// 非阻塞的策略警告
    pub warning: Option<String>,
}

/// 章节字数规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordCountRules {
    pub range: WordRange,
    pub policy: WordCountPolicy,
}

impl WordCountRules {
    pub fn new(range: WordRange, policy: WordCountPolicy) -> Self {
        Self { range, policy }
    }

    /// 评估章节正文
    ///
    /// 空正文总是错误；区间检查是否阻塞取决于策略
    pub fn assess(&self, content: &str) -> Result<WordCountAssessment, ProjectError> {
        let word_count = count_words(content);
        if word_count == 0 {
            return Err(ProjectError::EmptyContent);
        }

        let in_range = self.range.contains(word_count);
        if !in_range && self.policy == WordCountPolicy::Strict {
            return Err(ProjectError::WordCountOutOfRange {
                word_count,
                min: self.range.min,
                max: self.range.max,
            });
        }

        let warning = (!in_range).then(|| {
            format!(
                "word count {} is outside the recommended range {}-{}",
                word_count, self.range.min, self.range.max
            )
        });

        Ok(WordCountAssessment {
            word_count,
            in_range,
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("one two three"), 3);
        assert_eq!(count_words("  one\ttwo\n\nthree  "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \n\t "), 0);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = WordRange::default();
        assert!(range.contains(1400));
        assert!(range.contains(1800));
        assert!(!range.contains(1399));
        assert!(!range.contains(1801));
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let rules = WordCountRules::default();
        assert_eq!(rules.assess("   \n"), Err(ProjectError::EmptyContent));
    }

    #[test]
    fn test_advisory_policy_warns_but_passes() {
        let rules = WordCountRules::default();

        let ok = rules.assess(&words(1500)).unwrap();
        assert!(ok.in_range);
        assert!(ok.warning.is_none());

        let short = rules.assess(&words(500)).unwrap();
        assert_eq!(short.word_count, 500);
        assert!(!short.in_range);
        assert!(short.warning.unwrap().contains("1400-1800"));
    }

    #[test]
    fn test_strict_policy_rejects_out_of_range() {
        let rules = WordCountRules::new(WordRange::default(), WordCountPolicy::Strict);
        assert!(rules.assess(&words(1600)).is_ok());
        assert_eq!(
            rules.assess(&words(500)),
            Err(ProjectError::WordCountOutOfRange {
                word_count: 500,
                min: 1400,
                max: 1800
            })
        );
    }
}

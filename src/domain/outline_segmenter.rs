//! 大纲分段器
//!
//! 把自由文本大纲按章节切分成摘录，并从摘录中推导建议标题。
//!
//! 分段策略：
//! 1. 空行分隔的段落数 >= 章节数时按段落分配
//! 2. 否则按非空行分配
//! 3. 单元数仍少于章节数时，每章都使用完整大纲

/// 建议标题的最大词数
pub const MAX_TITLE_WORDS: usize = 8;

/// 按空行切分段落，段内行保持原样（去首尾空白）
fn split_paragraphs(outline: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in outline.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

fn split_lines(outline: &str) -> Vec<String> {
    outline
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 获取指定章节对应的大纲摘录
///
/// 相同输入总是得到相同输出；章节号超出范围时返回完整大纲
pub fn outline_excerpt(outline: &str, chapter_number: u32, chapter_count: u32) -> String {
    let count = chapter_count as usize;
    let number = chapter_number as usize;
    if count == 0 || number == 0 || number > count {
        return outline.trim().to_string();
    }

    let paragraphs = split_paragraphs(outline);
    let (units, separator) = if paragraphs.len() >= count {
        (paragraphs, "\n\n")
    } else {
        (split_lines(outline), "\n")
    };

    if units.len() < count {
        return outline.trim().to_string();
    }

    let len = units.len();
    let start = (number - 1) * len / count;
    let end = number * len / count;

    units[start..end].join(separator)
}

/// 去掉行首的列表/标题标记以及 "Chapter N:" 前缀
fn strip_markers(line: &str) -> &str {
    let mut rest = line.trim();

    loop {
        let before = rest;

        rest = rest
            .trim_start_matches(|c: char| matches!(c, '#' | '-' | '*' | '>' | '•'))
            .trim_start();

        // "1." / "2)" 形式的编号
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            if let Some(after) = rest[digits..].strip_prefix(|c: char| c == '.' || c == ')') {
                rest = after.trim_start();
            }
        }

        let has_chapter_prefix = rest
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("chapter "));
        if has_chapter_prefix {
            let after = rest[8..].trim_start();
            let number_len = after
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .count();
            rest = after[number_len..]
                .trim_start_matches(|c: char| matches!(c, ':' | '-' | '.' | '–'))
                .trim_start();
        }

        if rest == before {
            return rest;
        }
    }
}

/// 从摘录推导建议章节标题，可能为空
pub fn suggest_title(excerpt: &str) -> String {
    let Some(first_line) = excerpt.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return String::new();
    };

    let words: Vec<&str> = strip_markers(first_line)
        .split_whitespace()
        .take(MAX_TITLE_WORDS)
        .collect();

    words
        .join(" ")
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_distributed_across_chapters() {
        let outline = "Ava meets Rowan.\n\nThey clash at the gala.\n\nRowan confesses.";
        assert_eq!(outline_excerpt(outline, 1, 3), "Ava meets Rowan.");
        assert_eq!(outline_excerpt(outline, 2, 3), "They clash at the gala.");
        assert_eq!(outline_excerpt(outline, 3, 3), "Rowan confesses.");
    }

    #[test]
    fn test_lines_used_when_too_few_paragraphs() {
        let outline = "Opening\nMiddle part one\nMiddle part two\nEnding\n\nEpilogue";
        // 2 段 < 3 章，改为按 5 行分配
        assert_eq!(outline_excerpt(outline, 1, 3), "Opening");
        assert_eq!(outline_excerpt(outline, 2, 3), "Middle part one\nMiddle part two");
        assert_eq!(outline_excerpt(outline, 3, 3), "Ending\nEpilogue");
    }

    #[test]
    fn test_short_outline_returns_whole_text() {
        let outline = "  A single line outline.  ";
        for n in 1..=4 {
            assert_eq!(outline_excerpt(outline, n, 4), "A single line outline.");
        }
    }

    #[test]
    fn test_groups_cover_every_unit_in_order() {
        let outline = (1..=7)
            .map(|i| format!("Beat {}", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let joined: Vec<String> = (1..=3).map(|n| outline_excerpt(&outline, n, 3)).collect();
        assert_eq!(joined.join("\n\n"), outline);
        assert!(joined.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_excerpt_is_deterministic() {
        let outline = "One\nTwo\nThree\nFour";
        assert_eq!(outline_excerpt(outline, 2, 3), outline_excerpt(outline, 2, 3));
    }

    #[test]
    fn test_suggest_title_strips_markers() {
        assert_eq!(suggest_title("# Chapter 1: The Broken Vow\nmore"), "The Broken Vow");
        assert_eq!(suggest_title("- Ava arrives at the estate."), "Ava arrives at the estate");
        assert_eq!(suggest_title("2) A dangerous bargain"), "A dangerous bargain");
        assert_eq!(
            suggest_title("one two three four five six seven eight nine ten"),
            "one two three four five six seven eight"
        );
    }

    #[test]
    fn test_suggest_title_empty_input() {
        assert_eq!(suggest_title(""), "");
        assert_eq!(suggest_title("\n  \n"), "");
        assert_eq!(suggest_title("###"), "");
    }
}

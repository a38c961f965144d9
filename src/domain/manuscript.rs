//! Manuscript Assembler
//!
//! 把已保存的章节按章节号升序拼接成一份可导出的文稿。
//! 未保存的章节直接跳过，不阻止导出。

use serde::Serialize;

use crate::domain::project::Chapter;

/// 项目无标题时的导出文件名
pub const DEFAULT_EXPORT_FILENAME: &str = "manuscript.md";

/// 导出结果（临时值）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManuscriptExport {
    pub content: String,
    pub filename: String,
    /// 实际写入文稿的章节号
    pub included_chapters: Vec<u32>,
}

/// 章节小标题，标题为空时只保留章节号
pub fn chapter_heading(number: u32, title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        format!("Chapter {}", number)
    } else {
        format!("Chapter {}: {}", number, title)
    }
}

/// 由项目标题推导导出文件名
///
/// 保留字母数字，其余连续字符折叠为单个 `_`
pub fn export_filename(project_title: Option<&str>) -> String {
    let mut stem = String::new();
    let mut pending_separator = false;

    for ch in project_title.unwrap_or_default().trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !stem.is_empty() {
                stem.push('_');
            }
            pending_separator = false;
            stem.push(ch);
        } else {
            pending_separator = true;
        }
    }

    if stem.is_empty() {
        DEFAULT_EXPORT_FILENAME.to_string()
    } else {
        format!("{}.md", stem)
    }
}

/// 组装文稿
///
/// 相同输入总是得到逐字节相同的输出
pub fn assemble_manuscript(project_title: Option<&str>, chapters: &[Chapter]) -> ManuscriptExport {
    let mut saved: Vec<&Chapter> = chapters.iter().filter(|c| c.is_saved()).collect();
    saved.sort_by_key(|c| c.number());

    let sections: Vec<String> = saved
        .iter()
        .map(|chapter| {
            format!(
                "{}\n\n{}",
                chapter_heading(chapter.number(), chapter.title()),
                chapter.content().unwrap_or_default().trim()
            )
        })
        .collect();

    let mut content = sections.join("\n\n");
    if !content.is_empty() {
        content.push('\n');
    }

    ManuscriptExport {
        content,
        filename: export_filename(project_title),
        included_chapters: saved.iter().map(|c| c.number()).collect(),
    }
}

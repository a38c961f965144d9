//! Prompt Assembler
//!
//! 根据大纲、题材、章节位置和已解析的视角构建生成指令（system rules + user prompt）。
//! 只做纯计算：不调用任何生成后端，也不持久化。

use serde::Serialize;

use crate::domain::outline_segmenter::{outline_excerpt, suggest_title};
use crate::domain::project::{Genre, Pov};
use crate::domain::word_count::WordRange;

/// 固定叙事约束
const NARRATIVE_RULES: &[&str] = &[
    "Write in deep, immersive point of view: stay inside the narrator's head, senses and emotions.",
    "Use clear, natural dialogue that sounds like real people talking.",
    "Keep the narration grounded and human-first: concrete detail, honest emotion, no purple prose.",
    "Write complete, cohesive scenes with a clear beginning, middle and end.",
    "Output only the chapter prose: no headings, notes, summaries or meta commentary.",
];

fn genre_tone(genre: Genre) -> &'static str {
    match genre {
        Genre::General => {
            "Tone: contemporary fiction with emotional stakes, believable conflict and steady pacing."
        }
        Genre::Billionaire => {
            "Tone: billionaire romance. Luxury settings and power imbalance, sharp banter, \
             simmering tension and vulnerability beneath wealth."
        }
        Genre::Werewolf => {
            "Tone: werewolf romance. Pack hierarchy, fated-mate pull, primal instinct and loyalty, \
             danger at the edges of the territory."
        }
        Genre::Mafia => {
            "Tone: mafia romance. Dangerous loyalties, family codes, morally grey choices, \
             high-stakes tension and protective intensity."
        }
    }
}

fn pov_rule(pov: Pov) -> &'static str {
    match pov {
        Pov::Female => "Write this chapter from the female lead's point of view.",
        Pov::Male => "Write this chapter from the male lead's point of view.",
    }
}

/// 构建生成指令所需的上下文
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub outline: &'a str,
    pub genre: Genre,
    pub chapter_number: u32,
    pub chapter_count: u32,
    pub resolved_pov: Pov,
    pub word_range: WordRange,
}

/// 生成计划（临时值，不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    pub chapter_number: u32,
    pub chapter_count: u32,
    pub resolved_pov: Pov,
    /// 建议标题，可能为空，最终标题在保存时确定
    pub chapter_title: String,
    pub system_rules: String,
    pub user_prompt: String,
}

/// 构建 system rules
pub fn build_system_rules(genre: Genre, pov: Pov) -> String {
    let mut rules: Vec<&str> = NARRATIVE_RULES.to_vec();
    rules.push(genre_tone(genre));
    rules.push(pov_rule(pov));

    rules
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 构建 user prompt
pub fn build_user_prompt(ctx: &PromptContext<'_>, excerpt: &str) -> String {
    format!(
        "Write Chapter {number} of {count}.\n\n\
         Full outline:\n{outline}\n\n\
         Focus for this chapter:\n{excerpt}\n\n\
         Cover this part of the outline cohesively, keeping continuity with the chapters \
         before and after it. The chapter must be strictly between {min} and {max} words.",
        number = ctx.chapter_number,
        count = ctx.chapter_count,
        outline = ctx.outline.trim(),
        excerpt = excerpt,
        min = ctx.word_range.min,
        max = ctx.word_range.max,
    )
}

/// 组装完整的生成计划
pub fn assemble(ctx: &PromptContext<'_>) -> GenerationPlan {
    let excerpt = outline_excerpt(ctx.outline, ctx.chapter_number, ctx.chapter_count);

    GenerationPlan {
        chapter_number: ctx.chapter_number,
        chapter_count: ctx.chapter_count,
        resolved_pov: ctx.resolved_pov,
        chapter_title: suggest_title(&excerpt),
        system_rules: build_system_rules(ctx.genre, ctx.resolved_pov),
        user_prompt: build_user_prompt(ctx, &excerpt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(outline: &str) -> PromptContext<'_> {
        PromptContext {
            outline,
            genre: Genre::Werewolf,
            chapter_number: 2,
            chapter_count: 3,
            resolved_pov: Pov::Male,
            word_range: WordRange::default(),
        }
    }

    #[test]
    fn test_system_rules_include_genre_and_pov() {
        let rules = build_system_rules(Genre::Mafia, Pov::Female);
        assert!(rules.contains("deep, immersive point of view"));
        assert!(rules.contains("natural dialogue"));
        assert!(rules.contains("mafia romance"));
        assert!(rules.contains("female lead"));
    }

    #[test]
    fn test_user_prompt_embeds_position_outline_and_range() {
        let outline = "Mara runs.\n\nThe alpha finds her.\n\nShe chooses the pack.";
        let plan = assemble(&context(outline));

        assert!(plan.user_prompt.contains("Chapter 2 of 3"));
        assert!(plan.user_prompt.contains("She chooses the pack."));
        assert!(plan.user_prompt.contains("Focus for this chapter:\nThe alpha finds her."));
        assert!(plan.user_prompt.contains("strictly between 1400 and 1800 words"));
        assert_eq!(plan.chapter_title, "The alpha finds her");
        assert_eq!(plan.resolved_pov, Pov::Male);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let outline = "One\nTwo\nThree";
        assert_eq!(assemble(&context(outline)), assemble(&context(outline)));
    }

    #[test]
    fn test_word_range_is_configurable() {
        let mut ctx = context("Outline");
        ctx.word_range = WordRange::new(900, 1100);
        let prompt = build_user_prompt(&ctx, "Outline");
        assert!(prompt.contains("between 900 and 1100 words"));
    }
}

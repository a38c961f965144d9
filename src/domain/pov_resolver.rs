//! 视角解析器
//!
//! 纯函数：(视角策略, 章节号, 可选覆盖) -> 本章视角
//!
//! 双视角模式的约定：奇数章为女主视角，偶数章为男主视角。
//! 结果只取决于章节号，不依赖任何计数器。

use crate::domain::project::{Pov, PovMode, ProjectError};

/// 双视角模式下第 1 章使用的视角
pub const DUAL_FIRST_POV: Pov = Pov::Female;

/// 解析指定章节的视角
///
/// 优先级：显式覆盖 > 固定策略 > 双视角奇偶交替
pub fn resolve_pov(
    mode: PovMode,
    chapter_number: u32,
    override_pov: Option<Pov>,
) -> Result<Pov, ProjectError> {
    if chapter_number == 0 {
        return Err(ProjectError::InvalidChapterNumber(0));
    }

    if let Some(pov) = override_pov {
        return Ok(pov);
    }

    let pov = match mode {
        PovMode::Female => Pov::Female,
        PovMode::Male => Pov::Male,
        PovMode::Dual if chapter_number % 2 == 1 => DUAL_FIRST_POV,
        PovMode::Dual => DUAL_FIRST_POV.other(),
    };

    Ok(pov)
}

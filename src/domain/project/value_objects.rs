//! Project Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::ProjectError;

/// 项目唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 叙事视角（女主 / 男主）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pov {
    Female,
    Male,
}

impl Pov {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pov::Female => "female",
            Pov::Male => "male",
        }
    }

    /// 另一位主角的视角
    pub fn other(&self) -> Self {
        match self {
            Pov::Female => Pov::Male,
            Pov::Male => Pov::Female,
        }
    }

    /// 解析可选的覆盖视角，空字符串视为未设置
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ProjectError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for Pov {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Pov::Female),
            "male" => Ok(Pov::Male),
            _ => Err(ProjectError::InvalidPov(s.to_string())),
        }
    }
}

impl std::fmt::Display for Pov {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 项目级视角策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PovMode {
    /// 全书女主视角（默认）
    #[default]
    Female,
    /// 全书男主视角
    Male,
    /// 按章节奇偶交替
    Dual,
}

impl PovMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PovMode::Female => "female",
            PovMode::Male => "male",
            PovMode::Dual => "dual",
        }
    }
}

impl FromStr for PovMode {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(PovMode::Female),
            "male" => Ok(PovMode::Male),
            "dual" => Ok(PovMode::Dual),
            _ => Err(ProjectError::InvalidPovMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for PovMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 题材标签，决定生成指令中的基调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    General,
    Billionaire,
    Werewolf,
    Mafia,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::General => "general",
            Genre::Billionaire => "billionaire",
            Genre::Werewolf => "werewolf",
            Genre::Mafia => "mafia",
        }
    }
}

impl FromStr for Genre {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" | "" => Ok(Genre::General),
            "billionaire" => Ok(Genre::Billionaire),
            "werewolf" => Ok(Genre::Werewolf),
            "mafia" => Ok(Genre::Mafia),
            _ => Err(ProjectError::InvalidGenre(s.to_string())),
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 章节状态
///
/// 没有持久化的 "prepared" 状态：生成计划只是临时计算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterStatus {
    #[default]
    Empty,
    Saved,
}

impl ChapterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterStatus::Empty => "empty",
            ChapterStatus::Saved => "saved",
        }
    }
}

impl FromStr for ChapterStatus {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(ChapterStatus::Empty),
            "saved" => Ok(ChapterStatus::Saved),
            _ => Err(ProjectError::InvalidStatus(s.to_string())),
        }
    }
}

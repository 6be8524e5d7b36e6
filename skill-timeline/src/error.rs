use thiserror::Error;

use crate::types::SkillId;

/// 技能資料載入錯誤
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("無法讀取技能資料: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML 解析失敗: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON 解析失敗: {0}")]
    Json(#[from] serde_json::Error),
    #[error("不支援的檔案格式: {0}")]
    UnsupportedFormat(String),
}

/// 生成物派發錯誤，只影響單一生成事件
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("技能 {skill_id} 的視覺資源中找不到 '{name}'")]
    MissingAsset { skill_id: SkillId, name: String },
    #[error("技能 {skill_id} 沒有指定目標單位")]
    MissingTarget { skill_id: SkillId },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("技能執行體 {0} 不在待命狀態")]
    NotInactive(String),
}

use serde::{Deserialize, Serialize};
use std::path::Path;

use skill_timeline::DEFAULT_TARGET_FLY_TIME;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerSection {
    /// 每秒 tick 數
    pub tps: u64,
    pub skill_file: String,
    pub log_config: String,
}

/// 技能子任務相關參數
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SkillSetting {
    /// 指定技飛行時間（秒）
    pub target_fly_time: f32,
    /// 指向技飛行速度
    pub forward_fly_speed: f32,
    pub projectile_radius: f32,
    pub collider_radius: f32,
    /// 單一 tick 最大時間增量（秒）
    pub max_delta_time: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ServerSetting {
    pub server: ServerSection,
    pub skill: SkillSetting,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            tps: 30,
            skill_file: "data/skills.yaml".to_owned(),
            log_config: "log4rs.yml".to_owned(),
        }
    }
}

impl Default for SkillSetting {
    fn default() -> Self {
        Self {
            target_fly_time: DEFAULT_TARGET_FLY_TIME,
            forward_fly_speed: 1200.0,
            projectile_radius: 20.0,
            collider_radius: 150.0,
            max_delta_time: 1.0,
        }
    }
}

impl ServerSetting {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 讀取設定檔，檔案不存在時回傳 `None` 由呼叫端決定預設值
    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map(Some)
    }
}

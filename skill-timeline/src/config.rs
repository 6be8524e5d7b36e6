use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::LibraryError;
use crate::timeline::Timeline;
use crate::types::*;

/// 技能定義
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    #[serde(default)]
    pub id: SkillId,
    pub name: String,
    /// 命中目標時套用的效果
    #[serde(default)]
    pub effects: Vec<AbilityEffect>,
    /// 技能執行時間軸，沒有就是瞬發技能
    #[serde(default)]
    pub execution: Option<AuthoredTimeline>,
}

/// 編輯器輸出的時間軸資料
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthoredTimeline {
    /// 時間軸總長（秒），沒填就取最後一個事件
    #[serde(default)]
    pub duration: Option<f32>,
    /// 視覺資源底下可生成的子物件名稱
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub clips: Vec<AuthoredClip>,
    #[serde(default)]
    pub markers: Vec<AuthoredMarker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredClip {
    pub clip: Option<String>,
    #[serde(default)]
    pub start: f32,
    #[serde(default)]
    pub duration: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredMarker {
    pub time: f32,
    #[serde(flatten)]
    pub kind: SpawnKind,
}

/// 技能資料庫
#[derive(Debug, Default)]
pub struct SkillLibrary {
    skills: HashMap<SkillId, SkillDefinition>,
}

impl SkillLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從文件載入配置
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => self.load_from_yaml(&content),
            Some("json") => self.load_from_json(&content),
            _ => Err(LibraryError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// 從YAML載入
    pub fn load_from_yaml(&mut self, content: &str) -> Result<(), LibraryError> {
        let skills: HashMap<SkillId, SkillDefinition> = serde_yaml::from_str(content)?;
        self.extend(skills);
        Ok(())
    }

    /// 從JSON載入
    pub fn load_from_json(&mut self, content: &str) -> Result<(), LibraryError> {
        let skills: HashMap<SkillId, SkillDefinition> = serde_json::from_str(content)?;
        self.extend(skills);
        Ok(())
    }

    fn extend(&mut self, skills: HashMap<SkillId, SkillDefinition>) {
        for (id, mut def) in skills {
            def.id = id;
            log::debug!("載入技能 {} '{}'", id, def.name);
            self.register(def);
        }
    }

    pub fn register(&mut self, def: SkillDefinition) {
        self.skills.insert(def.id, def);
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    pub fn effects(&self, id: SkillId) -> &[AbilityEffect] {
        self.skills.get(&id).map(|d| d.effects.as_slice()).unwrap_or(&[])
    }

    /// 建立技能時間軸；找不到編輯資料時回傳空時間軸
    pub fn timeline(&self, id: SkillId) -> Timeline {
        match self.skills.get(&id).and_then(|d| d.execution.as_ref()) {
            Some(authored) => Timeline::load(authored),
            None => {
                log::debug!("{} 沒有時間軸資料，視為瞬發技能", execution_asset_name(id));
                Timeline::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// 技能視覺資源名稱
pub fn execution_asset_name(id: SkillId) -> String {
    format!("Skill_{}_Execution", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
1001:
  name: 火球術
  effects:
    - type: damage
      amount: 120
      damage_type: magical
  execution:
    duration: 2.0
    assets: [fireball, burn_area]
    clips:
      - clip: cast_fire
        start: 0.0
        duration: 0.8
      - clip: ~
        start: 0.2
        duration: 1.0
    markers:
      - time: 0.3
        type: target_fly
        projectile: fireball
      - time: 0.5
        type: fixed_position
        collider: burn_area
        exist_time: 1.5
1002:
  name: 瞬步
"#;

    #[test]
    fn test_load_from_yaml() {
        let mut lib = SkillLibrary::new();
        lib.load_from_yaml(YAML).unwrap();
        assert_eq!(lib.len(), 2);

        let def = lib.get(1001).unwrap();
        assert_eq!(def.id, 1001);
        assert_eq!(def.effects.len(), 1);

        let t = lib.timeline(1001);
        // 沒有動畫的片段被略過
        assert_eq!(t.animations().len(), 1);
        assert_eq!(t.spawns().len(), 2);
        assert_eq!(t.duration(), 2.0);
        assert!(t.has_asset("burn_area"));
        assert_eq!(
            t.spawns()[1].kind,
            SpawnKind::FixedPosition { collider: "burn_area".into(), exist_time: 1.5 }
        );
    }

    #[test]
    fn test_missing_authoring_is_empty_timeline() {
        let mut lib = SkillLibrary::new();
        lib.load_from_yaml(YAML).unwrap();
        let t = lib.timeline(1002);
        assert!(t.is_empty());
        assert!(!t.is_authored());
        assert!(lib.timeline(9999).is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let mut lib = SkillLibrary::new();
        let path = std::env::temp_dir().join("skill_timeline_test.txt");
        std::fs::write(&path, "{}").unwrap();
        let err = lib.load_from_file(&path).unwrap_err();
        assert!(matches!(err, LibraryError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(execution_asset_name(7), "Skill_7_Execution");
    }
}

use serde::{Deserialize, Serialize};
use specs::Entity;
use std::fmt;
use uuid::Uuid;
use vek::Vec2;

/// 技能編號（對應技能配置的 id）
pub type SkillId = u32;

/// 動畫片段識別碼
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(name: impl Into<String>) -> Self {
        ClipId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 技能執行體識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub Uuid);

impl ExecutionId {
    pub fn new() -> Self {
        ExecutionId(Uuid::new_v4())
    }
}

impl Default for ExecutionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 生成物類型
///
/// 四種固定的生成方式，每種帶各自的參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpawnKind {
    /// 追蹤目標的投射物
    TargetFly { projectile: String },
    /// 沿施法方向飛行的投射物，exist_time 為 0 時飛到碰撞為止
    ForwardFly {
        projectile: String,
        #[serde(default)]
        exist_time: f32,
    },
    /// 在輸入點生成的碰撞體
    FixedPosition { collider: String, exist_time: f32 },
    /// 在施法者位置、朝施法者方向生成的碰撞體
    FixedDirection { collider: String, exist_time: f32 },
}

impl SpawnKind {
    /// 生成物在技能視覺資源底下的名稱
    pub fn asset_name(&self) -> &str {
        match self {
            SpawnKind::TargetFly { projectile } | SpawnKind::ForwardFly { projectile, .. } => projectile,
            SpawnKind::FixedPosition { collider, .. } | SpawnKind::FixedDirection { collider, .. } => collider,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpawnKind::TargetFly { .. } => "target_fly",
            SpawnKind::ForwardFly { .. } => "forward_fly",
            SpawnKind::FixedPosition { .. } => "fixed_position",
            SpawnKind::FixedDirection { .. } => "fixed_direction",
        }
    }
}

/// 傷害類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Physical,
    Magical,
    Pure,
}

/// 技能效果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbilityEffect {
    Damage {
        amount: f32,
        #[serde(default)]
        damage_type: DamageType,
    },
    Heal { amount: f32 },
}

/// 施法輸入：目標單位、地面點、方向（角度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionInput {
    pub target: Option<Entity>,
    pub point: Vec2<f32>,
    pub direction: f32,
}

impl Default for ExecutionInput {
    fn default() -> Self {
        Self {
            target: None,
            point: Vec2::zero(),
            direction: 0.0,
        }
    }
}

impl ExecutionInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_point(mut self, point: Vec2<f32>) -> Self {
        self.point = point;
        self
    }

    pub fn with_direction(mut self, degrees: f32) -> Self {
        self.direction = degrees;
        self
    }

    /// 方向角轉成單位向量
    pub fn direction_vec(&self) -> Vec2<f32> {
        direction_from_degrees(self.direction)
    }
}

pub fn direction_from_degrees(degrees: f32) -> Vec2<f32> {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

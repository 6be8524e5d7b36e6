use hashbrown::HashSet;
use skill_timeline::{ColliderTask, HitCallback};
use specs::{Component, DenseVecStorage, Entity};

/// 技能生成的碰撞體，存活時間到就移除
#[derive(Clone, Debug)]
pub struct SpawnedCollider {
    pub prefab: String,
    pub expire_at_ms: i64,
    pub on_trigger_enter: Option<HitCallback>,
}

impl SpawnedCollider {
    pub fn from_task(task: ColliderTask, now_ms: i64) -> Self {
        Self {
            prefab: task.prefab,
            expire_at_ms: now_ms + task.lifetime_ms,
            on_trigger_enter: Some(task.on_trigger_enter),
        }
    }

    pub fn expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expire_at_ms
    }
}

impl Component for SpawnedCollider {
    type Storage = DenseVecStorage<Self>;
}

/// 觸發範圍，記錄目前在範圍內的單位
#[derive(Clone, Debug)]
pub struct TriggerVolume {
    pub owner: Entity,
    pub radius: f32,
    pub inside: HashSet<Entity>,
}

impl TriggerVolume {
    pub fn new(owner: Entity, radius: f32) -> Self {
        Self {
            owner,
            radius,
            inside: HashSet::new(),
        }
    }
}

impl Component for TriggerVolume {
    type Storage = DenseVecStorage<Self>;
}

/// 單位進入觸發範圍
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerEnter {
    pub volume: Entity,
    pub other: Entity,
}

use skill_timeline::{ForwardFlyTask, HitCallback, TargetFlyTask};
use specs::{Component, DenseVecStorage};
use specs::Entity as EcsEntity;
use vek::Vec2;

/// 指定技：固定時間內飛到目標身上
#[derive(Clone, Debug)]
pub struct TargetFlyProjectile {
    pub prefab: String,
    pub target: EcsEntity,
    pub start: Vec2<f32>,
    pub fly_time: f32,
    pub elapsed: f32,
    pub on_arrive: Option<HitCallback>,
}

impl TargetFlyProjectile {
    pub fn from_task(task: TargetFlyTask, start: Vec2<f32>) -> Self {
        Self {
            prefab: task.prefab,
            target: task.target,
            start,
            fly_time: task.fly_time.max(0.0),
            elapsed: 0.0,
            on_arrive: Some(task.on_arrive),
        }
    }

    /// 飛行進度 0..=1
    pub fn progress(&self) -> f32 {
        if self.fly_time <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.fly_time).min(1.0)
        }
    }

    pub fn arrived(&self) -> bool {
        self.progress() >= 1.0
    }
}

impl Component for TargetFlyProjectile {
    type Storage = DenseVecStorage<Self>;
}

/// 指向技：沿方向直飛直到撞到東西
#[derive(Clone, Debug)]
pub struct ForwardProjectile {
    pub prefab: String,
    pub velocity: Vec2<f32>,
    // None 就是飛到碰撞為止
    pub time_left: Option<f32>,
    pub on_collision: Option<HitCallback>,
}

impl ForwardProjectile {
    pub fn from_task(task: ForwardFlyTask, speed: f32) -> Self {
        Self {
            prefab: task.prefab,
            velocity: task.direction * speed,
            time_left: task.lifetime,
            on_collision: Some(task.on_collision),
        }
    }

    pub fn expired(&self) -> bool {
        matches!(self.time_left, Some(t) if t <= 0.0)
    }
}

impl Component for ForwardProjectile {
    type Storage = DenseVecStorage<Self>;
}

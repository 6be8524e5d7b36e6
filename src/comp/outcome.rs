use skill_timeline::{ExecutionId, SkillId};
use specs::Entity as EcsEntity;
use vek::*;

/// 需要套用技能效果的命中
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityHit {
    pub skill_id: SkillId,
    pub source: EcsEntity,
    pub target: EcsEntity,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    ExecutionStarted {
        skill_id: SkillId,
        caster: EcsEntity,
        execution: ExecutionId,
    },
    ExecutionEnded {
        skill_id: SkillId,
        caster: EcsEntity,
        execution: ExecutionId,
    },
    Spawned {
        skill_id: SkillId,
        prefab: String,
        ent: EcsEntity,
    },
    SpawnFailed {
        skill_id: SkillId,
        reason: String,
    },
    SubTaskFailed {
        skill_id: SkillId,
        prefab: String,
        reason: String,
    },
    ProjectileCollided {
        skill_id: SkillId,
        pos: Vec2<f32>,
        other: EcsEntity,
    },
    Damage {
        skill_id: SkillId,
        source: EcsEntity,
        target: EcsEntity,
        amount: f32,
    },
    Heal {
        skill_id: SkillId,
        source: EcsEntity,
        target: EcsEntity,
        amount: f32,
    },
    Death {
        pos: Vec2<f32>,
        ent: EcsEntity,
    },
}

impl Outcome {
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::ExecutionStarted { .. } => "execution_started",
            Outcome::ExecutionEnded { .. } => "execution_ended",
            Outcome::Spawned { .. } => "spawned",
            Outcome::SpawnFailed { .. } => "spawn_failed",
            Outcome::SubTaskFailed { .. } => "sub_task_failed",
            Outcome::ProjectileCollided { .. } => "projectile_collided",
            Outcome::Damage { .. } => "damage",
            Outcome::Heal { .. } => "heal",
            Outcome::Death { .. } => "death",
        }
    }
}

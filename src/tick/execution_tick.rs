use skill_timeline::{
    execution_asset_name, ClipId, ExecutionHost, ExecutionId, ExecutionPhase, SkillExecution,
    SkillId, SpawnEvent, SpawnTask,
};
use specs::{
    shred::{self, ResourceId, World}, Builder, Entities, Entity, Join, LazyUpdate, Read, ReadExpect, ReadStorage,
    System, SystemData, Write, WriteStorage,
};
use vek::Vec2;

use crate::comp::*;
use crate::config::SkillSetting;
use super::TickSystem;

/// 等待建立的子任務或視覺物件
#[derive(Clone, Debug)]
pub enum PendingSpawn {
    Task {
        skill_id: SkillId,
        source: Entity,
        origin: Vec2<f32>,
        task: SpawnTask,
    },
    Visual {
        pos: Vec2<f32>,
        visual: SkillVisual,
    },
}

/// ECS 這邊提供給技能執行體的協作者
pub struct EcsHost<'s, 'a> {
    pub now_ms: i64,
    pub setting: &'s SkillSetting,
    pub positions: &'s ReadStorage<'a, Pos>,
    pub facings: &'s ReadStorage<'a, Facing>,
    pub animators: &'s mut WriteStorage<'a, Animator>,
    pub pending: &'s mut Vec<PendingSpawn>,
    pub outcomes: &'s mut Vec<Outcome>,
}

impl<'s, 'a> EcsHost<'s, 'a> {
    fn owner_position(&self, owner: Entity) -> Vec2<f32> {
        self.positions.get(owner).map(|p| p.0).unwrap_or_else(Vec2::zero)
    }
}

impl<'s, 'a> ExecutionHost for EcsHost<'s, 'a> {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn play_clip(&mut self, owner: Entity, clip: &ClipId) {
        if let Some(animator) = self.animators.get_mut(owner) {
            animator.play_fade(clip);
        }
    }

    fn play_idle(&mut self, owner: Entity) {
        if let Some(animator) = self.animators.get_mut(owner) {
            animator.play_idle();
        }
    }

    fn dispatch_spawn(&mut self, execution: &SkillExecution, event: &SpawnEvent) {
        let owner = execution.owner();
        let origin = self.owner_position(owner);
        let facing = self.facings.get(owner).map(|f| f.0).unwrap_or(0.0);

        match execution.dispatch(event, origin, facing, self.setting.target_fly_time) {
            Ok(task) => self.pending.push(PendingSpawn::Task {
                skill_id: execution.skill_id(),
                source: owner,
                origin,
                task,
            }),
            Err(e) => {
                log::error!("{}", e);
                self.outcomes.push(Outcome::SpawnFailed {
                    skill_id: execution.skill_id(),
                    reason: e.to_string(),
                });
            }
        }
    }

    fn spawn_visual(&mut self, execution: &SkillExecution, lifetime: f32) {
        let pos = self.owner_position(execution.owner());
        self.pending.push(PendingSpawn::Visual {
            pos,
            visual: SkillVisual {
                asset: execution_asset_name(execution.skill_id()),
                execution: execution.id(),
                expire_at_ms: self.now_ms + (lifetime.max(0.0) * 1000.0) as i64,
            },
        });
    }
}

/// 把等待中的生成物建成實體
pub fn build_spawn<B: Builder>(
    builder: B,
    spawn: PendingSpawn,
    now_ms: i64,
    setting: &SkillSetting,
    outcomes: &mut Vec<Outcome>,
) -> Entity {
    match spawn {
        PendingSpawn::Task { skill_id, source, origin, task } => {
            let prefab = task.prefab().to_string();
            let ent = match task {
                SpawnTask::TargetFly(t) => builder
                    .with(Pos(origin))
                    .with(TargetFlyProjectile::from_task(t, origin))
                    .build(),
                SpawnTask::ForwardFly(t) => builder
                    .with(Pos(origin))
                    .with(ForwardProjectile::from_task(t, setting.forward_fly_speed))
                    .with(TriggerVolume::new(source, setting.projectile_radius))
                    .build(),
                SpawnTask::Collider(t) => builder
                    .with(Pos(t.position))
                    .with(Facing(t.direction.y.atan2(t.direction.x).to_degrees()))
                    .with(TriggerVolume::new(source, setting.collider_radius))
                    .with(SpawnedCollider::from_task(t, now_ms))
                    .build(),
            };
            outcomes.push(Outcome::Spawned { skill_id, prefab, ent });
            ent
        }
        PendingSpawn::Visual { pos, visual } => builder.with(Pos(pos)).with(visual).build(),
    }
}

#[derive(SystemData)]
pub struct ExecutionRead<'a> {
    entities: Entities<'a>,
    now: Read<'a, NowMs>,
    setting: ReadExpect<'a, SkillSetting>,
    positions: ReadStorage<'a, Pos>,
    facings: ReadStorage<'a, Facing>,
    updater: Read<'a, LazyUpdate>,
}

#[derive(SystemData)]
pub struct ExecutionWrite<'a> {
    executions: WriteStorage<'a, SkillExecution>,
    units: WriteStorage<'a, CombatUnit>,
    animators: WriteStorage<'a, Animator>,
    outcomes: Write<'a, Vec<Outcome>>,
}

/// 推進所有進行中的技能執行體
#[derive(Default)]
pub struct Sys;

impl TickSystem for Sys {
    const NAME: &'static str = "execution";
}

impl<'a> System<'a> for Sys {
    type SystemData = (
        ExecutionRead<'a>,
        ExecutionWrite<'a>,
    );

    fn run(&mut self, (tr, mut tw): Self::SystemData) {
        let now_ms = tr.now.0;
        let ExecutionWrite { ref mut executions, ref mut units, ref mut animators, ref mut outcomes } = tw;
        let mut pending = Vec::new();
        let mut finished: Vec<(Entity, SkillId, Entity, ExecutionId)> = Vec::new();

        for (entity, exec) in (&tr.entities, &mut *executions).join() {
            if !exec.is_active() {
                continue;
            }
            let mut host = EcsHost {
                now_ms,
                setting: &*tr.setting,
                positions: &tr.positions,
                facings: &tr.facings,
                animators: &mut *animators,
                pending: &mut pending,
                outcomes: &mut **outcomes,
            };
            let phase = match units.get_mut(exec.owner()) {
                Some(unit) => exec.update(&mut unit.execution, &mut host),
                None => {
                    log::warn!("技能 {} 的施法者已不存在", exec.skill_id());
                    exec.abandon();
                    exec.phase()
                }
            };
            if phase == ExecutionPhase::Completed {
                finished.push((entity, exec.skill_id(), exec.owner(), exec.id()));
            }
        }

        for (entity, skill_id, caster, execution) in finished {
            outcomes.push(Outcome::ExecutionEnded { skill_id, caster, execution });
            if let Err(e) = tr.entities.delete(entity) {
                log::warn!("刪除技能執行體失敗: {}", e);
            }
        }

        for spawn in pending {
            build_spawn(
                tr.updater.create_entity(&tr.entities),
                spawn,
                now_ms,
                &tr.setting,
                &mut **outcomes,
            );
        }
    }
}

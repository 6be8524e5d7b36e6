/// 生成派發器
///
/// 把觸發的生成事件轉成一個獨立運行的子任務。派發本身不等待子任務，
/// 子任務的生命週期也不綁在技能執行體上

use specs::Entity;
use vek::Vec2;

use crate::error::SpawnError;
use crate::event::SpawnEvent;
use crate::types::*;

/// 追蹤投射物的固定飛行時間
pub const DEFAULT_TARGET_FLY_TIME: f32 = 0.3;

/// 子任務結束時的回呼，每個子任務最多觸發一次
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitCallback {
    /// 對命中的目標套用技能效果
    ApplyEffects { skill_id: SkillId, source: Entity },
    /// 只回報碰撞，不套用效果
    Report { skill_id: SkillId, source: Entity },
}

impl HitCallback {
    pub fn skill_id(&self) -> SkillId {
        match self {
            HitCallback::ApplyEffects { skill_id, .. } | HitCallback::Report { skill_id, .. } => *skill_id,
        }
    }

    pub fn source(&self) -> Entity {
        match self {
            HitCallback::ApplyEffects { source, .. } | HitCallback::Report { source, .. } => *source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetFlyTask {
    pub prefab: String,
    pub target: Entity,
    pub fly_time: f32,
    pub on_arrive: HitCallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForwardFlyTask {
    pub prefab: String,
    pub direction: Vec2<f32>,
    /// None 表示飛到碰撞為止
    pub lifetime: Option<f32>,
    pub on_collision: HitCallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColliderTask {
    pub prefab: String,
    pub position: Vec2<f32>,
    pub direction: Vec2<f32>,
    pub lifetime_ms: i64,
    pub on_trigger_enter: HitCallback,
}

/// 生成出來的子任務
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnTask {
    TargetFly(TargetFlyTask),
    ForwardFly(ForwardFlyTask),
    Collider(ColliderTask),
}

impl SpawnTask {
    pub fn prefab(&self) -> &str {
        match self {
            SpawnTask::TargetFly(t) => &t.prefab,
            SpawnTask::ForwardFly(t) => &t.prefab,
            SpawnTask::Collider(t) => &t.prefab,
        }
    }
}

/// 派發時需要的執行體資訊
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    pub skill_id: SkillId,
    pub source: Entity,
    pub input: &'a ExecutionInput,
    pub owner_position: Vec2<f32>,
    pub owner_direction: f32,
    pub target_fly_time: f32,
}

/// 找不到資源或缺少目標時直接失敗，不會生成任何東西
pub fn dispatch(
    event: &SpawnEvent,
    ctx: &DispatchContext,
    has_asset: impl Fn(&str) -> bool,
) -> Result<SpawnTask, SpawnError> {
    let name = event.kind.asset_name();
    if !has_asset(name) {
        return Err(SpawnError::MissingAsset {
            skill_id: ctx.skill_id,
            name: name.to_string(),
        });
    }
    let prefab = name.to_string();
    let apply = HitCallback::ApplyEffects { skill_id: ctx.skill_id, source: ctx.source };

    let task = match &event.kind {
        SpawnKind::TargetFly { .. } => {
            let target = ctx
                .input
                .target
                .ok_or(SpawnError::MissingTarget { skill_id: ctx.skill_id })?;
            SpawnTask::TargetFly(TargetFlyTask {
                prefab,
                target,
                fly_time: ctx.target_fly_time,
                on_arrive: apply,
            })
        }
        SpawnKind::ForwardFly { exist_time, .. } => SpawnTask::ForwardFly(ForwardFlyTask {
            prefab,
            direction: ctx.input.direction_vec(),
            lifetime: if *exist_time > 0.0 { Some(*exist_time) } else { None },
            on_collision: HitCallback::Report { skill_id: ctx.skill_id, source: ctx.source },
        }),
        SpawnKind::FixedPosition { exist_time, .. } => SpawnTask::Collider(ColliderTask {
            prefab,
            position: ctx.input.point,
            direction: ctx.input.direction_vec(),
            lifetime_ms: secs_to_ms(*exist_time),
            on_trigger_enter: apply,
        }),
        SpawnKind::FixedDirection { exist_time, .. } => SpawnTask::Collider(ColliderTask {
            prefab,
            position: ctx.owner_position,
            direction: direction_from_degrees(ctx.owner_direction),
            lifetime_ms: secs_to_ms(*exist_time),
            on_trigger_enter: apply,
        }),
    };
    Ok(task)
}

fn secs_to_ms(secs: f32) -> i64 {
    (secs.max(0.0) * 1000.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use specs::{Builder, World, WorldExt};

    fn entities() -> (Entity, Entity) {
        let mut world = World::new();
        let a = world.create_entity().build();
        let b = world.create_entity().build();
        (a, b)
    }

    #[test]
    fn test_fixed_position_uses_input_point() {
        let (caster, _) = entities();
        let input = ExecutionInput::new().with_point(Vec2::new(300.0, 40.0));
        let ctx = DispatchContext {
            skill_id: 1,
            source: caster,
            input: &input,
            owner_position: Vec2::new(10.0, 10.0),
            owner_direction: 90.0,
            target_fly_time: DEFAULT_TARGET_FLY_TIME,
        };
        let ev = SpawnEvent::new(0.0, SpawnKind::FixedPosition { collider: "area".into(), exist_time: 1.25 });
        match dispatch(&ev, &ctx, |_| true).unwrap() {
            SpawnTask::Collider(c) => {
                assert_eq!(c.position, Vec2::new(300.0, 40.0));
                assert_eq!(c.lifetime_ms, 1250);
            }
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn test_fixed_direction_uses_owner_transform() {
        let (caster, _) = entities();
        let input = ExecutionInput::new().with_point(Vec2::new(300.0, 40.0));
        let ctx = DispatchContext {
            skill_id: 1,
            source: caster,
            input: &input,
            owner_position: Vec2::new(10.0, 10.0),
            owner_direction: 90.0,
            target_fly_time: DEFAULT_TARGET_FLY_TIME,
        };
        let ev = SpawnEvent::new(0.0, SpawnKind::FixedDirection { collider: "slash".into(), exist_time: 0.5 });
        match dispatch(&ev, &ctx, |_| true).unwrap() {
            SpawnTask::Collider(c) => {
                assert_eq!(c.position, Vec2::new(10.0, 10.0));
                assert!(c.direction.x.abs() < 1e-5);
                assert!((c.direction.y - 1.0).abs() < 1e-5);
            }
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn test_missing_asset_fails_fast() {
        let (caster, _) = entities();
        let input = ExecutionInput::new();
        let ctx = DispatchContext {
            skill_id: 5,
            source: caster,
            input: &input,
            owner_position: Vec2::zero(),
            owner_direction: 0.0,
            target_fly_time: DEFAULT_TARGET_FLY_TIME,
        };
        let ev = SpawnEvent::new(0.0, SpawnKind::FixedPosition { collider: "ghost".into(), exist_time: 1.0 });
        let err = dispatch(&ev, &ctx, |name| name == "area").unwrap_err();
        assert_eq!(err, SpawnError::MissingAsset { skill_id: 5, name: "ghost".into() });
    }

    #[test]
    fn test_target_fly_requires_target() {
        let (caster, target) = entities();
        let input = ExecutionInput::new();
        let mut ctx = DispatchContext {
            skill_id: 2,
            source: caster,
            input: &input,
            owner_position: Vec2::zero(),
            owner_direction: 0.0,
            target_fly_time: DEFAULT_TARGET_FLY_TIME,
        };
        let ev = SpawnEvent::new(0.0, SpawnKind::TargetFly { projectile: "orb".into() });
        assert_eq!(
            dispatch(&ev, &ctx, |_| true).unwrap_err(),
            SpawnError::MissingTarget { skill_id: 2 }
        );

        let with_target = ExecutionInput::new().with_target(target);
        ctx.input = &with_target;
        match dispatch(&ev, &ctx, |_| true).unwrap() {
            SpawnTask::TargetFly(t) => {
                assert_eq!(t.target, target);
                assert_eq!(t.fly_time, 0.3);
                assert_eq!(t.on_arrive, HitCallback::ApplyEffects { skill_id: 2, source: caster });
            }
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn test_forward_fly_reports_only() {
        let (caster, _) = entities();
        let input = ExecutionInput::new().with_direction(180.0);
        let ctx = DispatchContext {
            skill_id: 3,
            source: caster,
            input: &input,
            owner_position: Vec2::zero(),
            owner_direction: 0.0,
            target_fly_time: DEFAULT_TARGET_FLY_TIME,
        };
        let ev = SpawnEvent::new(0.0, SpawnKind::ForwardFly { projectile: "arrow".into(), exist_time: 0.0 });
        match dispatch(&ev, &ctx, |_| true).unwrap() {
            SpawnTask::ForwardFly(t) => {
                assert!(t.lifetime.is_none());
                assert!((t.direction.x + 1.0).abs() < 1e-5);
                assert!(matches!(t.on_collision, HitCallback::Report { .. }));
            }
            other => panic!("unexpected task {:?}", other),
        }
    }
}

pub mod execution_tick;
pub mod trigger_tick;
pub mod projectile_tick;
pub mod collider_tick;
pub mod effect_tick;
pub mod visual_tick;

pub use self::{
    execution_tick::*,
    trigger_tick::*,
    projectile_tick::*,
    collider_tick::*,
    effect_tick::*,
    visual_tick::*,
};

use skill_timeline::HitCallback;
use specs::{DispatcherBuilder, Entity, ReadStorage, System};
use vek::Vec2;

use crate::comp::*;

/// 帶名稱的 tick 系統
pub trait TickSystem: for<'a> System<'a> + Default + Send {
    const NAME: &'static str;
}

pub fn sys_name<S: TickSystem>() -> String {
    format!("{}_sys", S::NAME)
}

/// 依名稱與依賴加入系統，名稱為 `<NAME>_sys`
pub fn dispatch<'a, 'b, S: TickSystem + 'a>(builder: &mut DispatcherBuilder<'a, 'b>, deps: &[&str]) {
    builder.add(S::default(), &sys_name::<S>(), deps);
}

/// 子任務的目標必須活著且與施法者敵對；施法者已不存在時只檢查存活
pub fn is_valid_target(units: &ReadStorage<'_, CombatUnit>, source: Entity, other: Entity) -> bool {
    match (units.get(source), units.get(other)) {
        (_, None) => false,
        (None, Some(target)) => target.is_alive(),
        (Some(caster), Some(target)) => target.is_alive() && caster.is_hostile_to(target),
    }
}

/// 觸發子任務的回呼
pub fn invoke_callback(
    cb: HitCallback,
    other: Entity,
    pos: Vec2<f32>,
    hits: &mut Vec<AbilityHit>,
    outcomes: &mut Vec<Outcome>,
) {
    match cb {
        HitCallback::ApplyEffects { skill_id, source } => {
            hits.push(AbilityHit { skill_id, source, target: other });
        }
        HitCallback::Report { skill_id, .. } => {
            log::debug!("技能 {} 投射物碰撞 {:?}", skill_id, other);
            outcomes.push(Outcome::ProjectileCollided { skill_id, pos, other });
        }
    }
}

use specs::{
    shred::{self, ResourceId, World}, Entities, Join, Read, ReadStorage, System, SystemData, Write,
    WriteStorage,
};
use specs::Entity;

use crate::comp::*;
use super::{invoke_callback, is_valid_target, TickSystem};

#[derive(SystemData)]
pub struct ProjectileRead<'a> {
    entities: Entities<'a>,
    dt: Read<'a, DeltaTime>,
    enters: Read<'a, Vec<TriggerEnter>>,
    units: ReadStorage<'a, CombatUnit>,
}

#[derive(SystemData)]
pub struct ProjectileWrite<'a> {
    pos: WriteStorage<'a, Pos>,
    target_flies: WriteStorage<'a, TargetFlyProjectile>,
    forwards: WriteStorage<'a, ForwardProjectile>,
    hits: Write<'a, Vec<AbilityHit>>,
    outcomes: Write<'a, Vec<Outcome>>,
}

#[derive(Default)]
pub struct Sys;

impl TickSystem for Sys {
    const NAME: &'static str = "projectile";
}

impl<'a> System<'a> for Sys {
    type SystemData = (
        ProjectileRead<'a>,
        ProjectileWrite<'a>,
    );

    fn run(&mut self, (tr, mut tw): Self::SystemData) {
        let dt = tr.dt.0;
        let ProjectileWrite { ref mut pos, ref mut target_flies, ref mut forwards, ref mut hits, ref mut outcomes } = tw;
        let mut dead: Vec<Entity> = Vec::new();

        // 指定技：目標失效就算這個子任務失敗
        for (e, proj) in (&tr.entities, &mut *target_flies).join() {
            let target_alive = tr.entities.is_alive(proj.target)
                && tr.units.get(proj.target).map_or(false, |u| u.is_alive());
            let target_pos = pos.get(proj.target).map(|p| p.0);

            match (target_alive, target_pos) {
                (true, Some(tpos)) => {
                    proj.elapsed += dt;
                    let cur = proj.start + (tpos - proj.start) * proj.progress();
                    if let Some(p) = pos.get_mut(e) {
                        p.0 = cur;
                    }
                    if proj.arrived() {
                        if let Some(cb) = proj.on_arrive.take() {
                            invoke_callback(cb, proj.target, cur, hits, outcomes);
                        }
                        dead.push(e);
                    }
                }
                _ => {
                    let skill_id = proj.on_arrive.map(|cb| cb.skill_id()).unwrap_or_default();
                    log::warn!("技能 {} 的投射物 '{}' 目標已失效", skill_id, proj.prefab);
                    proj.on_arrive = None;
                    outcomes.push(Outcome::SubTaskFailed {
                        skill_id,
                        prefab: proj.prefab.clone(),
                        reason: "target lost".to_owned(),
                    });
                    dead.push(e);
                }
            }
        }

        // 指向技：撞到第一個有效目標就結束
        for (e, proj) in (&tr.entities, &mut *forwards).join() {
            let cur = pos.get(e).map(|p| p.0).unwrap_or_default();
            if let Some(cb) = proj.on_collision {
                let hit = tr
                    .enters
                    .iter()
                    .filter(|t| t.volume == e)
                    .map(|t| t.other)
                    .find(|&other| is_valid_target(&tr.units, cb.source(), other));
                if let Some(other) = hit {
                    proj.on_collision = None;
                    invoke_callback(cb, other, cur, hits, outcomes);
                    dead.push(e);
                    continue;
                }
            }

            if let Some(p) = pos.get_mut(e) {
                p.0 += proj.velocity * dt;
            }
            if let Some(t) = proj.time_left.as_mut() {
                *t -= dt;
            }
            if proj.expired() {
                log::trace!("投射物 '{}' 飛行時間結束", proj.prefab);
                dead.push(e);
            }
        }

        for e in dead {
            if let Err(err) = tr.entities.delete(e) {
                log::warn!("刪除投射物失敗: {}", err);
            }
        }
    }
}

use specs::{
    shred::{self, ResourceId, World}, Entities, Entity, Join, Read, ReadStorage, System, SystemData,
    Write, WriteStorage,
};

use crate::comp::*;
use super::{invoke_callback, is_valid_target, TickSystem};

#[derive(SystemData)]
pub struct ColliderRead<'a> {
    entities: Entities<'a>,
    now: Read<'a, NowMs>,
    enters: Read<'a, Vec<TriggerEnter>>,
    units: ReadStorage<'a, CombatUnit>,
    positions: ReadStorage<'a, Pos>,
}

#[derive(SystemData)]
pub struct ColliderWrite<'a> {
    colliders: WriteStorage<'a, SpawnedCollider>,
    hits: Write<'a, Vec<AbilityHit>>,
    outcomes: Write<'a, Vec<Outcome>>,
}

/// 碰撞體：第一個進入範圍的有效目標觸發一次回呼，時間到就移除
#[derive(Default)]
pub struct Sys;

impl TickSystem for Sys {
    const NAME: &'static str = "collider";
}

impl<'a> System<'a> for Sys {
    type SystemData = (
        ColliderRead<'a>,
        ColliderWrite<'a>,
    );

    fn run(&mut self, (tr, mut tw): Self::SystemData) {
        let now = tr.now.0;
        let ColliderWrite { ref mut colliders, ref mut hits, ref mut outcomes } = tw;
        let mut expired: Vec<(Entity, String)> = Vec::new();

        for (e, col) in (&tr.entities, &mut *colliders).join() {
            if let Some(cb) = col.on_trigger_enter {
                let hit = tr
                    .enters
                    .iter()
                    .filter(|t| t.volume == e)
                    .map(|t| t.other)
                    .find(|&other| is_valid_target(&tr.units, cb.source(), other));
                if let Some(other) = hit {
                    col.on_trigger_enter = None;
                    let pos = tr.positions.get(e).map(|p| p.0).unwrap_or_default();
                    invoke_callback(cb, other, pos, hits, outcomes);
                }
            }
            if col.expired(now) {
                expired.push((e, col.prefab.clone()));
            }
        }

        for (e, prefab) in expired {
            log::trace!("碰撞體 '{}' 到期", prefab);
            if let Err(err) = tr.entities.delete(e) {
                log::warn!("刪除碰撞體失敗: {}", err);
            }
        }
    }
}

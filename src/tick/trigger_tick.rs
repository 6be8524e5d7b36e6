use hashbrown::HashSet;
use specs::{
    shred::{self, ResourceId, World}, Entities, Join, ReadStorage, System, SystemData, Write, WriteStorage,
};

use crate::comp::*;
use super::TickSystem;

#[derive(SystemData)]
pub struct TriggerRead<'a> {
    entities: Entities<'a>,
    positions: ReadStorage<'a, Pos>,
    units: ReadStorage<'a, CombatUnit>,
}

#[derive(SystemData)]
pub struct TriggerWrite<'a> {
    volumes: WriteStorage<'a, TriggerVolume>,
    enters: Write<'a, Vec<TriggerEnter>>,
}

/// 圓形重疊檢查，只在單位剛進入範圍時送出事件
#[derive(Default)]
pub struct Sys;

impl TickSystem for Sys {
    const NAME: &'static str = "trigger";
}

impl<'a> System<'a> for Sys {
    type SystemData = (
        TriggerRead<'a>,
        TriggerWrite<'a>,
    );

    fn run(&mut self, (tr, mut tw): Self::SystemData) {
        tw.enters.clear();

        for (ve, vol, vpos) in (&tr.entities, &mut tw.volumes, &tr.positions).join() {
            let mut now_inside = HashSet::new();
            for (ue, unit, upos) in (&tr.entities, &tr.units, &tr.positions).join() {
                if ue == vol.owner || !unit.is_alive() {
                    continue;
                }
                let r = vol.radius + unit.radius;
                if (upos.0 - vpos.0).magnitude_squared() <= r * r {
                    now_inside.insert(ue);
                    if !vol.inside.contains(&ue) {
                        tw.enters.push(TriggerEnter { volume: ve, other: ue });
                    }
                }
            }
            vol.inside = now_inside;
        }
    }
}

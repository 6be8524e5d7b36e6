use specs::{
    shred::{self, ResourceId, World}, Entities, Join, Read, ReadStorage, System, SystemData,
};

use crate::comp::*;
use super::TickSystem;

#[derive(SystemData)]
pub struct VisualRead<'a> {
    entities: Entities<'a>,
    now: Read<'a, NowMs>,
    visuals: ReadStorage<'a, SkillVisual>,
}

#[derive(Default)]
pub struct Sys;

impl TickSystem for Sys {
    const NAME: &'static str = "visual";
}

impl<'a> System<'a> for Sys {
    type SystemData = VisualRead<'a>;

    fn run(&mut self, tr: Self::SystemData) {
        for (e, visual) in (&tr.entities, &tr.visuals).join() {
            if tr.now.0 >= visual.expire_at_ms {
                log::trace!("銷毀技能視覺 {} ({})", visual.asset, visual.execution);
                if let Err(err) = tr.entities.delete(e) {
                    log::warn!("刪除技能視覺失敗: {}", err);
                }
            }
        }
    }
}

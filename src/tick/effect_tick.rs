use skill_timeline::{AbilityEffect, SkillLibrary};
use specs::{
    shred::{self, ResourceId, World}, Entities, ReadExpect, ReadStorage, System, SystemData, Write,
    WriteStorage,
};

use crate::comp::*;
use super::TickSystem;

#[derive(SystemData)]
pub struct EffectRead<'a> {
    entities: Entities<'a>,
    library: ReadExpect<'a, SkillLibrary>,
    positions: ReadStorage<'a, Pos>,
}

#[derive(SystemData)]
pub struct EffectWrite<'a> {
    units: WriteStorage<'a, CombatUnit>,
    hits: Write<'a, Vec<AbilityHit>>,
    outcomes: Write<'a, Vec<Outcome>>,
}

/// 把子任務的命中換成技能效果
#[derive(Default)]
pub struct Sys;

impl TickSystem for Sys {
    const NAME: &'static str = "effect";
}

impl<'a> System<'a> for Sys {
    type SystemData = (
        EffectRead<'a>,
        EffectWrite<'a>,
    );

    fn run(&mut self, (tr, mut tw): Self::SystemData) {
        let EffectWrite { ref mut units, ref mut hits, ref mut outcomes } = tw;

        for hit in hits.drain(..) {
            if !tr.entities.is_alive(hit.target) {
                continue;
            }
            let unit = match units.get_mut(hit.target) {
                Some(u) if u.is_alive() => u,
                _ => continue,
            };

            for effect in tr.library.effects(hit.skill_id) {
                match *effect {
                    AbilityEffect::Damage { amount, damage_type } => {
                        let dealt = unit.take_damage(amount);
                        log::debug!(
                            "技能 {} 對 {} 造成 {:.1} {:?} 傷害",
                            hit.skill_id, unit.name, dealt, damage_type
                        );
                        outcomes.push(Outcome::Damage {
                            skill_id: hit.skill_id,
                            source: hit.source,
                            target: hit.target,
                            amount: dealt,
                        });
                        if !unit.is_alive() {
                            let pos = tr.positions.get(hit.target).map(|p| p.0).unwrap_or_default();
                            log::info!("{} 死亡", unit.name);
                            outcomes.push(Outcome::Death { pos, ent: hit.target });
                            break;
                        }
                    }
                    AbilityEffect::Heal { amount } => {
                        let healed = unit.heal(amount);
                        outcomes.push(Outcome::Heal {
                            skill_id: hit.skill_id,
                            source: hit.source,
                            target: hit.target,
                            amount: healed,
                        });
                    }
                }
            }
        }
    }
}

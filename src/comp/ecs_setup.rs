use skill_timeline::{SkillExecution, SkillLibrary};
use specs::{World, WorldExt};

use crate::comp::*;
use crate::config::SkillSetting;

pub struct EcsSetup;

impl EcsSetup {
    pub fn setup_ecs_world(library: SkillLibrary, setting: SkillSetting) -> World {
        let mut ecs = World::new();

        // Register all components.
        ecs.register::<Pos>();
        ecs.register::<Facing>();
        ecs.register::<CombatUnit>();
        ecs.register::<Animator>();
        ecs.register::<SkillExecution>();
        ecs.register::<SkillVisual>();
        ecs.register::<TargetFlyProjectile>();
        ecs.register::<ForwardProjectile>();
        ecs.register::<SpawnedCollider>();
        ecs.register::<TriggerVolume>();

        // Register unsynced resources used by the ECS.
        ecs.insert(DeltaTime(0.0));
        ecs.insert(NowMs(0));
        ecs.insert(Tick(0));
        ecs.insert(Vec::<Outcome>::new());
        ecs.insert(Vec::<AbilityHit>::new());
        ecs.insert(Vec::<TriggerEnter>::new());
        ecs.insert(library);
        ecs.insert(setting);
        ecs
    }
}

/// 遊戲狀態核心結構

use core::time::Duration;
use anyhow::{anyhow, bail};
use skill_timeline::{
    ClipId, Clock, ExecutionId, ExecutionInput, SkillExecution, SkillId, SkillLibrary,
};
use specs::{Builder, Entity, Join, World, WorldExt};
use vek::Vec2;

use crate::comp::*;
use crate::config::SkillSetting;
use crate::tick::{build_spawn, EcsHost};

use super::{SystemDispatcher, TimeManager};

/// 遊戲核心狀態
pub struct State {
    /// ECS 世界
    ecs: World,
    /// 單調時鐘
    clock: Box<dyn Clock>,
    /// 時間管理器
    time_manager: TimeManager,
    /// 系統分派器
    system_dispatcher: SystemDispatcher,
}

impl State {
    pub fn new(setting: SkillSetting, library: SkillLibrary, clock: Box<dyn Clock>) -> Self {
        let time_manager = TimeManager::new(setting.max_delta_time);
        let mut ecs = EcsSetup::setup_ecs_world(library, setting);
        ecs.insert(NowMs(clock.now_ms()));
        let system_dispatcher = SystemDispatcher::new(&mut ecs);

        Self {
            ecs,
            clock,
            time_manager,
            system_dispatcher,
        }
    }

    /// 遊戲主循環 tick
    pub fn tick(&mut self, dt: Duration) -> anyhow::Result<()> {
        let now_ms = self.clock.now_ms();
        self.time_manager.update(&mut self.ecs, dt, now_ms)?;
        self.system_dispatcher.run_systems(&self.ecs)?;
        self.ecs.maintain();
        Ok(())
    }

    /// 建立一個可以施法或被命中的戰鬥單位
    pub fn spawn_unit(&mut self, unit: CombatUnit, pos: Vec2<f32>, facing: f32) -> Entity {
        self.ecs
            .create_entity()
            .with(Pos(pos))
            .with(Facing(facing))
            .with(unit)
            .with(Animator::new(ClipId::new("idle")))
            .build()
    }

    /// 施放技能，施法者原本的執行體會失去綁定
    pub fn cast(&mut self, caster: Entity, skill_id: SkillId, input: ExecutionInput) -> anyhow::Result<ExecutionId> {
        let now_ms = self.clock.now_ms();
        let setting = (*self.ecs.read_resource::<SkillSetting>()).clone();
        let timeline = self.ecs.read_resource::<SkillLibrary>().timeline(skill_id);
        let mut exec = SkillExecution::new(skill_id, caster, timeline);
        let mut pending = Vec::new();
        let mut outcomes = Vec::new();

        {
            let positions = self.ecs.read_storage::<Pos>();
            let facings = self.ecs.read_storage::<Facing>();
            let mut animators = self.ecs.write_storage::<Animator>();
            let mut units = self.ecs.write_storage::<CombatUnit>();

            let unit = units
                .get_mut(caster)
                .ok_or_else(|| anyhow!("{:?} 不是戰鬥單位，無法施放技能 {}", caster, skill_id))?;
            if !unit.is_alive() {
                bail!("{} 已死亡，無法施放技能 {}", unit.name, skill_id);
            }

            let mut host = EcsHost {
                now_ms,
                setting: &setting,
                positions: &positions,
                facings: &facings,
                animators: &mut animators,
                pending: &mut pending,
                outcomes: &mut outcomes,
            };
            exec.begin_execute(input, &mut unit.execution, &mut host)?;
        }

        let id = exec.id();
        outcomes.push(Outcome::ExecutionStarted { skill_id, caster, execution: id });
        self.ecs.create_entity().with(exec).build();
        for spawn in pending {
            build_spawn(self.ecs.create_entity(), spawn, now_ms, &setting, &mut outcomes);
        }
        self.ecs.write_resource::<Vec<Outcome>>().extend(outcomes);

        log::info!("施法者 {:?} 施放技能 {} ({})", caster, skill_id, id);
        Ok(id)
    }

    /// 中斷施法者目前綁定的執行體，沒有綁定時回傳 false
    pub fn cancel(&mut self, caster: Entity) -> bool {
        let now_ms = self.clock.now_ms();
        let setting = (*self.ecs.read_resource::<SkillSetting>()).clone();
        let mut pending = Vec::new();
        let mut outcomes = Vec::new();

        let cancelled = {
            let entities = self.ecs.entities();
            let positions = self.ecs.read_storage::<Pos>();
            let facings = self.ecs.read_storage::<Facing>();
            let mut animators = self.ecs.write_storage::<Animator>();
            let mut units = self.ecs.write_storage::<CombatUnit>();
            let mut executions = self.ecs.write_storage::<SkillExecution>();

            let unit = match units.get_mut(caster) {
                Some(unit) => unit,
                None => return false,
            };
            let id = match unit.execution.current() {
                Some(id) => id,
                None => return false,
            };

            match (&entities, &mut executions).join().find(|(_, e)| e.id() == id) {
                Some((ent, exec)) => {
                    let mut host = EcsHost {
                        now_ms,
                        setting: &setting,
                        positions: &positions,
                        facings: &facings,
                        animators: &mut animators,
                        pending: &mut pending,
                        outcomes: &mut outcomes,
                    };
                    exec.end_execute(&mut unit.execution, &mut host);
                    outcomes.push(Outcome::ExecutionEnded {
                        skill_id: exec.skill_id(),
                        caster,
                        execution: id,
                    });
                    if let Err(e) = entities.delete(ent) {
                        log::warn!("刪除技能執行體失敗: {}", e);
                    }
                    true
                }
                None => {
                    log::warn!("找不到施法者綁定的執行體 {}", id);
                    false
                }
            }
        };

        self.ecs.write_resource::<Vec<Outcome>>().extend(outcomes);
        cancelled
    }

    /// 取出本 tick 累積的結果
    pub fn take_outcomes(&mut self) -> Vec<Outcome> {
        std::mem::take(&mut *self.ecs.write_resource::<Vec<Outcome>>())
    }

    /// 已執行的 tick 數
    pub fn tick_count(&self) -> u64 {
        self.ecs.read_resource::<Tick>().0
    }

    /// 獲取 ECS 世界引用
    pub fn ecs(&self) -> &World {
        &self.ecs
    }

    /// 獲取 ECS 世界可變引用
    pub fn ecs_mut(&mut self) -> &mut World {
        &mut self.ecs
    }
}

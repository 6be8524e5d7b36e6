/// 技能執行體
///
/// 技能施放後的時間排程狀態機：Inactive → Active → Completed。
/// 每個 tick 由宿主呼叫 `update`，依經過時間觸發到期事件，
/// 所有動畫片段播完後自行結束，尚未到期的生成事件隨之捨棄。

use specs::{Component, DenseVecStorage, Entity};
use vek::Vec2;

use crate::dispatcher::{dispatch, DispatchContext, SpawnTask};
use crate::error::{ExecutionError, SpawnError};
use crate::event::SpawnEvent;
use crate::timeline::Timeline;
use crate::types::*;

/// 執行體向外部要求的協作者（時鐘、動畫、生成、視覺資源）
pub trait ExecutionHost {
    fn now_ms(&self) -> i64;
    fn play_clip(&mut self, owner: Entity, clip: &ClipId);
    fn play_idle(&mut self, owner: Entity);
    fn dispatch_spawn(&mut self, execution: &SkillExecution, event: &SpawnEvent);
    /// 產生技能視覺物件並在 lifetime 秒後銷毀
    fn spawn_visual(&mut self, _execution: &SkillExecution, _lifetime: f32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPhase {
    Inactive,
    Active,
    Completed,
}

/// 戰鬥單位身上「目前的技能執行體」
///
/// 只有 `begin_execute` / `end_execute` 會寫入
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSlot {
    current: Option<ExecutionId>,
}

impl ExecutionSlot {
    pub fn current(&self) -> Option<ExecutionId> {
        self.current
    }

    pub fn is_casting(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_bound_to(&self, id: ExecutionId) -> bool {
        self.current == Some(id)
    }

    pub(crate) fn bind(&mut self, id: ExecutionId) -> Option<ExecutionId> {
        self.current.replace(id)
    }

    pub(crate) fn clear(&mut self) -> Option<ExecutionId> {
        self.current.take()
    }
}

#[derive(Debug, Clone)]
pub struct SkillExecution {
    id: ExecutionId,
    skill_id: SkillId,
    owner: Entity,
    phase: ExecutionPhase,
    origin_time: i64,
    input: ExecutionInput,
    timeline: Timeline,
}

impl Component for SkillExecution {
    type Storage = DenseVecStorage<Self>;
}

impl SkillExecution {
    pub fn new(skill_id: SkillId, owner: Entity, timeline: Timeline) -> Self {
        Self {
            id: ExecutionId::new(),
            skill_id,
            owner,
            phase: ExecutionPhase::Inactive,
            origin_time: 0,
            input: ExecutionInput::default(),
            timeline,
        }
    }

    pub fn id(&self) -> ExecutionId {
        self.id
    }

    pub fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == ExecutionPhase::Active
    }

    pub fn is_completed(&self) -> bool {
        self.phase == ExecutionPhase::Completed
    }

    pub fn input(&self) -> &ExecutionInput {
        &self.input
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn origin_time(&self) -> i64 {
        self.origin_time
    }

    pub fn elapsed_secs(&self, now_ms: i64) -> f32 {
        ((now_ms - self.origin_time).max(0) as f64 / 1000.0) as f32
    }

    /// 開始執行：綁定到施法者、記錄起始時間
    ///
    /// 施法者原本的執行體只會失去綁定，已生成的子任務不受影響
    pub fn begin_execute<H: ExecutionHost>(
        &mut self,
        input: ExecutionInput,
        slot: &mut ExecutionSlot,
        host: &mut H,
    ) -> Result<(), ExecutionError> {
        if self.phase != ExecutionPhase::Inactive {
            return Err(ExecutionError::NotInactive(self.id.to_string()));
        }

        if let Some(prev) = slot.bind(self.id) {
            log::info!("技能 {} 取代了施法者目前的執行體 {}", self.skill_id, prev);
        }
        self.input = input;
        self.phase = ExecutionPhase::Active;
        self.origin_time = host.now_ms();

        if self.timeline.is_authored() {
            host.spawn_visual(self, self.timeline.duration());
        }
        log::debug!("技能 {} 開始執行 ({})", self.skill_id, self.id);
        Ok(())
    }

    /// 每個 tick 呼叫一次
    pub fn update<H: ExecutionHost>(&mut self, slot: &mut ExecutionSlot, host: &mut H) -> ExecutionPhase {
        if self.phase != ExecutionPhase::Active {
            return self.phase;
        }

        let elapsed = self.elapsed_secs(host.now_ms());
        let adv = self.timeline.advance(elapsed);

        for event in adv.due_spawns.iter() {
            log::debug!("技能 {} 在 {:.3}s 觸發 {} '{}'", self.skill_id, elapsed, event.kind.label(), event.kind.asset_name());
            host.dispatch_spawn(self, event);
        }
        for seg in adv.due_animation_starts.iter() {
            host.play_clip(self.owner, &seg.clip);
        }

        if adv.all_animations_complete {
            self.end_execute(slot, host);
        }
        self.phase
    }

    /// 結束執行：清空施法者的綁定並切回待機動畫，重複呼叫不會有任何效果
    ///
    /// 綁定是後寫者勝，被取代的執行體結束時同樣會清掉施法者目前的綁定
    pub fn end_execute<H: ExecutionHost>(&mut self, slot: &mut ExecutionSlot, host: &mut H) {
        if self.phase != ExecutionPhase::Active {
            return;
        }
        self.phase = ExecutionPhase::Completed;

        if let Some(other) = slot.clear().filter(|&bound| bound != self.id) {
            log::debug!("技能 {} 結束時清除了執行體 {} 的綁定", self.skill_id, other);
        }
        host.play_idle(self.owner);
        log::debug!("技能 {} 執行結束 ({})", self.skill_id, self.id);
    }

    /// 施法者已不存在：直接結束，不碰綁定也不播動畫
    pub fn abandon(&mut self) {
        if self.phase == ExecutionPhase::Active {
            self.phase = ExecutionPhase::Completed;
            log::debug!("技能 {} 的施法者已不存在，放棄執行 ({})", self.skill_id, self.id);
        }
    }

    /// 結束後重新待命，可以再次 `begin_execute`
    pub fn reset(&mut self) {
        if self.phase == ExecutionPhase::Active {
            log::warn!("技能 {} 執行中，不能重置", self.skill_id);
            return;
        }
        self.timeline.reset();
        self.phase = ExecutionPhase::Inactive;
        self.origin_time = 0;
    }

    /// 把生成事件交給派發器
    pub fn dispatch(
        &self,
        event: &SpawnEvent,
        owner_position: Vec2<f32>,
        owner_direction: f32,
        target_fly_time: f32,
    ) -> Result<SpawnTask, SpawnError> {
        let ctx = DispatchContext {
            skill_id: self.skill_id,
            source: self.owner,
            input: &self.input,
            owner_position,
            owner_direction,
            target_fly_time,
        };
        dispatch(event, &ctx, |name| self.timeline.has_asset(name))
    }
}

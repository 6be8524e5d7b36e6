/// 事件時間軸
///
/// 技能執行開始時從編輯好的資料一次建好，之後每個 tick 由 `advance`
/// 回答「現在有哪些事件到期」

use crate::config::AuthoredTimeline;
use crate::event::{AnimationSegment, SpawnEvent};
use crate::types::ClipId;

/// 單次推進的結果
#[derive(Debug, Clone, Default)]
pub struct TimelineAdvance {
    pub due_spawns: Vec<SpawnEvent>,
    pub due_animation_starts: Vec<AnimationSegment>,
    pub newly_ended: Vec<AnimationSegment>,
    /// 執行體以此判斷結束，尚未觸發的生成事件不會延長執行
    pub all_animations_complete: bool,
    pub all_spawns_fired: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    animations: Vec<AnimationSegment>,
    spawns: Vec<SpawnEvent>,
    assets: Vec<String>,
    duration: f32,
    authored: bool,
}

impl Timeline {
    /// 沒有編輯資料的技能：空時間軸，第一次更新就結束
    pub fn empty() -> Self {
        Self::default()
    }

    /// 從編輯資料建立時間軸，沒有指定動畫的片段會被略過
    pub fn load(authored: &AuthoredTimeline) -> Self {
        let animations: Vec<AnimationSegment> = authored
            .clips
            .iter()
            .filter_map(|c| {
                let clip = c.clip.as_ref()?;
                Some(AnimationSegment::new(ClipId::new(clip.clone()), c.start, c.duration))
            })
            .collect();

        let mut spawns: Vec<SpawnEvent> = authored
            .markers
            .iter()
            .map(|m| SpawnEvent::new(m.time, m.kind.clone()))
            .collect();
        // 同時間的標記保持編輯順序
        spawns.sort_by(|a, b| a.time.total_cmp(&b.time));

        let latest = animations
            .iter()
            .map(|a| a.end_time)
            .chain(spawns.iter().map(|s| s.time))
            .fold(0.0_f32, f32::max);
        let duration = authored.duration.unwrap_or(latest).max(0.0);

        Self {
            animations,
            spawns,
            assets: authored.assets.clone(),
            duration,
            authored: true,
        }
    }

    pub fn from_parts(animations: Vec<AnimationSegment>, spawns: Vec<SpawnEvent>, assets: Vec<String>) -> Self {
        let duration = animations
            .iter()
            .map(|a| a.end_time)
            .chain(spawns.iter().map(|s| s.time))
            .fold(0.0_f32, f32::max);
        Self {
            animations,
            spawns,
            assets,
            duration,
            authored: true,
        }
    }

    /// 推進到 elapsed 秒，回傳到期事件；比較一律用 >=，跳幀也不會漏
    pub fn advance(&mut self, elapsed: f32) -> TimelineAdvance {
        let mut result = TimelineAdvance::default();

        for spawn in self.spawns.iter_mut() {
            if spawn.try_fire(elapsed) {
                result.due_spawns.push(spawn.clone());
            }
        }

        for seg in self.animations.iter_mut() {
            if seg.try_start(elapsed) {
                result.due_animation_starts.push(seg.clone());
            }
            if seg.try_end(elapsed) {
                result.newly_ended.push(seg.clone());
            }
        }

        result.all_animations_complete = self.animations.iter().all(AnimationSegment::is_complete);
        result.all_spawns_fired = self.spawns.iter().all(SpawnEvent::has_started);
        result
    }

    pub fn reset(&mut self) {
        self.animations.iter_mut().for_each(AnimationSegment::reset);
        self.spawns.iter_mut().for_each(SpawnEvent::reset);
    }

    pub fn animations(&self) -> &[AnimationSegment] {
        &self.animations
    }

    pub fn spawns(&self) -> &[SpawnEvent] {
        &self.spawns
    }

    /// 視覺資源存活時間（秒）
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_authored(&self) -> bool {
        self.authored
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty() && self.spawns.is_empty()
    }

    pub fn has_asset(&self, name: &str) -> bool {
        self.assets.iter().any(|a| a == name)
    }
}

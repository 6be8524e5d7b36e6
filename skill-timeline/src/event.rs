use crate::types::{ClipId, SpawnKind};

/// 動畫片段 - 時間軸上的一段動畫
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSegment {
    pub clip: ClipId,
    pub start_time: f32,
    pub duration: f32,
    pub end_time: f32,
    has_started: bool,
    has_ended: bool,
}

impl AnimationSegment {
    /// 負的起始時間或長度一律視為 0
    pub fn new(clip: ClipId, start_time: f32, duration: f32) -> Self {
        let start_time = start_time.max(0.0);
        let duration = duration.max(0.0);
        Self {
            clip,
            start_time,
            duration,
            end_time: start_time + duration,
            has_started: false,
            has_ended: false,
        }
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn has_ended(&self) -> bool {
        self.has_ended
    }

    pub fn is_complete(&self) -> bool {
        self.has_started && self.has_ended
    }

    /// 到了起始時間就開始，只會成功一次
    pub fn try_start(&mut self, elapsed: f32) -> bool {
        if self.has_started || elapsed < self.start_time {
            return false;
        }
        self.has_started = true;
        true
    }

    /// 必須先開始才會結束，只會成功一次
    pub fn try_end(&mut self, elapsed: f32) -> bool {
        if !self.has_started || self.has_ended || elapsed < self.end_time {
            return false;
        }
        self.has_ended = true;
        true
    }

    pub fn reset(&mut self) {
        self.has_started = false;
        self.has_ended = false;
    }
}

/// 生成事件 - 到時間就觸發一次
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnEvent {
    pub time: f32,
    pub kind: SpawnKind,
    has_started: bool,
}

impl SpawnEvent {
    pub fn new(time: f32, kind: SpawnKind) -> Self {
        Self {
            time: time.max(0.0),
            kind,
            has_started: false,
        }
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn try_fire(&mut self, elapsed: f32) -> bool {
        if self.has_started || elapsed < self.time {
            return false;
        }
        self.has_started = true;
        true
    }

    pub fn reset(&mut self) {
        self.has_started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_ends_only_after_start() {
        let mut seg = AnimationSegment::new(ClipId::new("attack"), 0.5, 1.0);
        assert!(!seg.try_end(2.0));
        assert!(seg.try_start(2.0));
        assert!(seg.try_end(2.0));
        assert!(!seg.try_end(3.0));
        assert!(seg.is_complete());
    }

    #[test]
    fn test_negative_values_clamped() {
        let seg = AnimationSegment::new(ClipId::new("idle"), -1.0, -2.0);
        assert_eq!(seg.start_time, 0.0);
        assert_eq!(seg.duration, 0.0);
        assert_eq!(seg.end_time, 0.0);
    }

    #[test]
    fn test_spawn_fires_once() {
        let mut ev = SpawnEvent::new(
            0.3,
            SpawnKind::TargetFly { projectile: "fireball".to_string() },
        );
        assert!(!ev.try_fire(0.1));
        assert!(ev.try_fire(0.9));
        assert!(!ev.try_fire(1.5));
        ev.reset();
        assert!(ev.try_fire(0.3));
    }
}

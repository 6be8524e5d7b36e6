/// 時間管理器 - 負責每個 tick 的時間資源

use std::time::Duration;
use specs::{World, WorldExt};

use crate::comp::{DeltaTime, NowMs, Tick};

/// 時間管理器
pub struct TimeManager {
    /// 最大增量時間
    max_delta_time: f32,
}

impl TimeManager {
    pub fn new(max_delta_time: f32) -> Self {
        Self { max_delta_time }
    }

    /// 更新時間資源，`now_ms` 是單調時鐘在本 tick 的讀數
    pub fn update(&self, world: &mut World, dt: Duration, now_ms: i64) -> anyhow::Result<()> {
        {
            let mut delta_time = world.write_resource::<DeltaTime>();
            delta_time.0 = dt.as_secs_f32().min(self.max_delta_time);
        }

        {
            let mut now = world.write_resource::<NowMs>();
            if now_ms < now.0 {
                log::warn!("時鐘倒退 {} -> {}，沿用前一個讀數", now.0, now_ms);
            } else {
                now.0 = now_ms;
            }
        }

        world.write_resource::<Tick>().0 += 1;
        Ok(())
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new(1.0)
    }
}

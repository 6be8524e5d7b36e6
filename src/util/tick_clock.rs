use std::time::{Duration, Instant};

/// 固定頻率的 tick 節拍器
pub struct TickClock {
    target_dt: Duration,
    last_tick: Instant,
    last_dt: Duration,
}

impl TickClock {
    pub fn new(target_dt: Duration) -> Self {
        Self {
            target_dt,
            last_tick: Instant::now(),
            last_dt: target_dt,
        }
    }

    pub fn from_tps(tps: u64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / tps.max(1) as f64))
    }

    /// 上一個 tick 實際經過的時間
    pub fn dt(&self) -> Duration {
        self.last_dt
    }

    /// 睡到下一個 tick
    pub fn tick(&mut self) {
        let busy = self.last_tick.elapsed();
        if let Some(rest) = self.target_dt.checked_sub(busy) {
            spin_sleep::sleep(rest);
        } else {
            log::trace!("tick 超時 {:?}", busy - self.target_dt);
        }
        let now = Instant::now();
        self.last_dt = now - self.last_tick;
        self.last_tick = now;
    }
}

/// A resource that stores the time since the previous tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeltaTime(pub f32);

/// 單調時鐘在本 tick 開始時的讀數（毫秒）
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NowMs(pub i64);

/// 已執行的 tick 數
#[derive(Copy, Clone, Debug, Default)]
pub struct Tick(pub u64);

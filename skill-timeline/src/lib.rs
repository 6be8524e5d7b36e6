/// 技能執行時間軸
///
/// 純邏輯處理，不包含 ECS 系統：時間軸事件、技能執行體狀態機、
/// 生成派發器與技能資料載入。時鐘、動畫與生成物由宿主透過
/// `ExecutionHost` 提供。

pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod execution;
pub mod timeline;
pub mod types;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{
    execution_asset_name, AuthoredClip, AuthoredMarker, AuthoredTimeline, SkillDefinition, SkillLibrary,
};
pub use crate::dispatcher::{
    dispatch, ColliderTask, DispatchContext, ForwardFlyTask, HitCallback, SpawnTask, TargetFlyTask,
    DEFAULT_TARGET_FLY_TIME,
};
pub use crate::error::{ExecutionError, LibraryError, SpawnError};
pub use crate::event::{AnimationSegment, SpawnEvent};
pub use crate::execution::{ExecutionHost, ExecutionPhase, ExecutionSlot, SkillExecution};
pub use crate::timeline::{Timeline, TimelineAdvance};
pub use crate::types::*;

/// 技能執行驅動
///
/// 以 ECS 承載 `skill_timeline` 的技能執行體：推進時間軸、
/// 建立子任務（投射物、碰撞體）並套用技能效果

pub mod comp;
pub mod config;
pub mod msg;
pub mod state;
pub mod tick;
pub mod util;

// Re-export commonly used types
pub use crate::comp::*;
pub use crate::msg::OutcomeMsg;
pub use crate::state::State;

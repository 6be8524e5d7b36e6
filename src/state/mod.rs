/// 遊戲狀態管理模塊
///
/// 負責 ECS 世界、tick 循環，以及施法/取消施法的入口

pub mod core;
pub mod time_management;
pub mod system_dispatcher;

#[cfg(test)]
mod tests;

pub use self::core::State;
pub use time_management::TimeManager;
pub use system_dispatcher::SystemDispatcher;

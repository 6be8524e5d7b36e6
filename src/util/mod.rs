pub mod command;
pub mod tick_clock;

pub use self::command::Command;
pub use self::tick_clock::TickClock;

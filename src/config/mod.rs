pub mod server_config;

pub use self::server_config::{ServerSetting, ServerSection, SkillSetting};

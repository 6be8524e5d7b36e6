/// 系統分派器 - 負責協調和運行所有技能系統

use specs::{Dispatcher, DispatcherBuilder, World};

use crate::tick::*;

/// 系統分派器
pub struct SystemDispatcher {
    dispatcher: Dispatcher<'static, 'static>,
}

impl SystemDispatcher {
    pub fn new(world: &mut World) -> Self {
        let mut builder = DispatcherBuilder::new();
        Self::build_system_dependencies(&mut builder);
        let mut dispatcher = builder.build();
        dispatcher.setup(world);
        Self { dispatcher }
    }

    /// 運行所有技能系統
    pub fn run_systems(&mut self, world: &World) -> anyhow::Result<()> {
        self.dispatcher.dispatch(world);
        Ok(())
    }

    // 執行體先推進並產生子任務，接著判定重疊、移動子任務，最後套用效果
    fn build_system_dependencies(builder: &mut DispatcherBuilder<'static, 'static>) {
        dispatch::<execution_tick::Sys>(builder, &[]);
        dispatch::<trigger_tick::Sys>(builder, &["execution_sys"]);
        dispatch::<projectile_tick::Sys>(builder, &["trigger_sys"]);
        dispatch::<collider_tick::Sys>(builder, &["projectile_sys"]);
        dispatch::<effect_tick::Sys>(builder, &["collider_sys"]);
        dispatch::<visual_tick::Sys>(builder, &["effect_sys"]);
    }
}

use serde::{Deserialize, Serialize};
use specs::storage::VecStorage;
use specs::Component;
use vek::*;

/// Position
#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pos(pub Vec2<f32>);

impl Component for Pos {
    type Storage = VecStorage<Self>;
}

/// 面向角度（度）
#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facing(pub f32);

impl Component for Facing {
    type Storage = VecStorage<Self>;
}

use skill_timeline::ExecutionId;
use specs::{Component, DenseVecStorage};

/// 技能視覺物件，時間軸長度到了就銷毀
#[derive(Clone, Debug)]
pub struct SkillVisual {
    pub asset: String,
    pub execution: ExecutionId,
    pub expire_at_ms: i64,
}

impl Component for SkillVisual {
    type Storage = DenseVecStorage<Self>;
}

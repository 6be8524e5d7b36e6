use serde::{Deserialize, Serialize};
use skill_timeline::{ClipId, ExecutionSlot};
use specs::storage::VecStorage;
use specs::{Component, DenseVecStorage};

/// 戰鬥單位 - 施法者與技能目標
#[derive(Clone, Debug)]
pub struct CombatUnit {
    pub name: String,
    pub faction: Faction,
    pub max_hp: f32,
    pub hp: f32,
    /// 觸發判定半徑
    pub radius: f32,
    /// 目前綁定的技能執行體
    pub execution: ExecutionSlot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Faction {
    Player,
    Monster,
}

impl Component for CombatUnit {
    type Storage = VecStorage<Self>;
}

impl CombatUnit {
    pub fn new(name: impl Into<String>, faction: Faction, max_hp: f32, radius: f32) -> Self {
        Self {
            name: name.into(),
            faction,
            max_hp,
            hp: max_hp,
            radius,
            execution: ExecutionSlot::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    pub fn is_casting(&self) -> bool {
        self.execution.is_casting()
    }

    /// 回傳實際扣除的血量
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        before - self.hp
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0.0)).min(self.max_hp);
        self.hp - before
    }

    /// 能被對方的技能碰撞體命中
    pub fn is_hostile_to(&self, other: &CombatUnit) -> bool {
        self.faction != other.faction
    }
}

/// 動畫播放器，只記錄目前播放的片段
#[derive(Clone, Debug)]
pub struct Animator {
    pub idle: ClipId,
    pub current: ClipId,
    /// 本局播放過的片段，依播放順序
    pub played: Vec<ClipId>,
}

impl Component for Animator {
    type Storage = DenseVecStorage<Self>;
}

impl Animator {
    pub fn new(idle: ClipId) -> Self {
        Self {
            current: idle.clone(),
            idle,
            played: Vec::new(),
        }
    }

    pub fn play_fade(&mut self, clip: &ClipId) {
        log::trace!("play {} -> {}", self.current, clip);
        self.current = clip.clone();
        self.played.push(clip.clone());
    }

    pub fn play_idle(&mut self) {
        let idle = self.idle.clone();
        self.play_fade(&idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut u = CombatUnit::new("dummy", Faction::Monster, 100.0, 30.0);
        assert_eq!(u.take_damage(150.0), 100.0);
        assert!(!u.is_alive());
        assert_eq!(u.heal(500.0), 100.0);
        assert_eq!(u.hp, 100.0);
    }

    #[test]
    fn test_animator_idle() {
        let mut a = Animator::new(ClipId::new("idle"));
        a.play_fade(&ClipId::new("cast"));
        a.play_idle();
        assert_eq!(a.current, ClipId::new("idle"));
        assert_eq!(a.played.len(), 2);
    }
}

use std::sync::Arc;
use std::time::Duration;

use skill_timeline::{ExecutionInput, ManualClock, SkillExecution, SkillLibrary};
use specs::{Entity, Join, WorldExt};
use vek::Vec2;

use super::State;
use crate::comp::*;
use crate::config::SkillSetting;

const SKILLS: &str = r#"
3001:
  name: 戰吼
  effects:
    - type: damage
      amount: 10
3002:
  name: 飛彈
  effects:
    - type: damage
      amount: 40
  execution:
    duration: 1.0
    assets: [missile]
    clips:
      - clip: cast
        start: 0.0
        duration: 0.5
    markers:
      - time: 0.2
        type: target_fly
        projectile: missile
3003:
  name: 地裂
  effects:
    - type: damage
      amount: 25
  execution:
    assets: [quake]
    clips:
      - clip: stomp
        start: 0.0
        duration: 0.3
    markers:
      - time: 0.1
        type: fixed_position
        collider: quake
        exist_time: 1.0
3004:
  name: 幻影
  execution:
    assets: []
    clips:
      - clip: cast
        start: 0.0
        duration: 0.2
    markers:
      - time: 0.1
        type: fixed_direction
        collider: ghost
        exist_time: 1.0
3006:
  name: 落雷
  execution:
    assets: [bolt]
    markers:
      - time: 0.2
        type: fixed_position
        collider: bolt
        exist_time: 1.0
3005:
  name: 穿雲箭
  effects:
    - type: damage
      amount: 15
  execution:
    assets: [arrow]
    clips:
      - clip: shoot
        start: 0.0
        duration: 0.2
    markers:
      - time: 0.0
        type: forward_fly
        projectile: arrow
"#;

struct Scene {
    state: State,
    clock: Arc<ManualClock>,
    caster: Entity,
    monster: Entity,
}

fn scene(monster_pos: Vec2<f32>) -> Scene {
    let mut library = SkillLibrary::new();
    library.load_from_yaml(SKILLS).unwrap();
    let clock = Arc::new(ManualClock::new(0));
    let mut state = State::new(SkillSetting::default(), library, Box::new(clock.clone()));
    let caster = state.spawn_unit(CombatUnit::new("法師", Faction::Player, 100.0, 30.0), Vec2::zero(), 0.0);
    let monster = state.spawn_unit(CombatUnit::new("木樁", Faction::Monster, 100.0, 30.0), monster_pos, 180.0);
    Scene { state, clock, caster, monster }
}

impl Scene {
    fn step(&mut self, ms: i64, times: usize) -> Vec<Outcome> {
        for _ in 0..times {
            self.clock.advance(ms);
            self.state.tick(Duration::from_millis(ms as u64)).unwrap();
        }
        self.state.take_outcomes()
    }

    fn hp(&self, e: Entity) -> f32 {
        self.state.ecs().read_storage::<CombatUnit>().get(e).map(|u| u.hp).unwrap_or(0.0)
    }

    fn is_casting(&self) -> bool {
        self.state.ecs().read_storage::<CombatUnit>().get(self.caster).map_or(false, |u| u.is_casting())
    }

    fn idle_count(&self) -> usize {
        let animators = self.state.ecs().read_storage::<Animator>();
        animators
            .get(self.caster)
            .map_or(0, |a| a.played.iter().filter(|c| c.as_str() == "idle").count())
    }
}

fn count(outcomes: &[Outcome], name: &str) -> usize {
    outcomes.iter().filter(|o| o.name() == name).count()
}

#[test]
fn test_instant_skill_ends_on_first_tick() {
    let mut s = scene(Vec2::new(500.0, 0.0));
    let caster = s.caster;
    s.state.cast(caster, 3001, ExecutionInput::new()).unwrap();
    assert!(s.is_casting());

    let out = s.step(16, 1);
    assert_eq!(s.state.tick_count(), 1);
    assert_eq!(count(&out, "execution_started"), 1);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert_eq!(count(&out, "spawned"), 0);
    assert!(!s.is_casting());
    assert_eq!(s.idle_count(), 1);
    assert_eq!(s.state.ecs().read_storage::<SkillExecution>().join().count(), 0);
}

#[test]
fn test_target_fly_applies_damage_on_arrival() {
    let mut s = scene(Vec2::new(500.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    s.state.cast(caster, 3002, ExecutionInput::new().with_target(monster)).unwrap();
    assert_eq!(s.state.ecs().read_storage::<SkillVisual>().join().count(), 1);

    // 0.25 秒時觸發飛彈
    let out = s.step(250, 1);
    assert_eq!(count(&out, "spawned"), 1);
    assert_eq!(s.hp(monster), 100.0);

    let out = s.step(100, 10);
    assert_eq!(count(&out, "damage"), 1);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert_eq!(s.hp(monster), 60.0);
    assert!(!s.is_casting());
    assert_eq!(s.idle_count(), 1);
    assert_eq!(s.state.ecs().read_storage::<TargetFlyProjectile>().join().count(), 0);
    // 時間軸長度 1 秒後視覺物件銷毀
    assert_eq!(s.state.ecs().read_storage::<SkillVisual>().join().count(), 0);
}

#[test]
fn test_fixed_position_collider_hits_once() {
    let mut s = scene(Vec2::new(300.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    let ally = s.state.spawn_unit(
        CombatUnit::new("隊友", Faction::Player, 100.0, 30.0),
        Vec2::new(320.0, 0.0),
        0.0,
    );
    s.state
        .cast(caster, 3003, ExecutionInput::new().with_point(Vec2::new(300.0, 0.0)))
        .unwrap();

    let out = s.step(100, 20);
    assert_eq!(count(&out, "damage"), 1);
    assert_eq!(s.hp(monster), 75.0);
    assert_eq!(s.hp(ally), 100.0);
    assert_eq!(s.state.ecs().read_storage::<SpawnedCollider>().join().count(), 0);
}

#[test]
fn test_missing_asset_is_skipped() {
    let mut s = scene(Vec2::new(300.0, 0.0));
    let caster = s.caster;
    s.state.cast(caster, 3004, ExecutionInput::new()).unwrap();

    let out = s.step(100, 5);
    assert_eq!(count(&out, "spawn_failed"), 1);
    assert_eq!(count(&out, "spawned"), 0);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert!(!s.is_casting());
}

#[test]
fn test_missing_input_target_is_skipped() {
    let mut s = scene(Vec2::new(300.0, 0.0));
    let caster = s.caster;
    s.state.cast(caster, 3002, ExecutionInput::new()).unwrap();

    let out = s.step(100, 10);
    assert_eq!(count(&out, "spawn_failed"), 1);
    assert_eq!(count(&out, "execution_ended"), 1);
}

#[test]
fn test_new_cast_takes_binding_without_aborting_sub_tasks() {
    let mut s = scene(Vec2::new(500.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    let first = s.state.cast(caster, 3002, ExecutionInput::new().with_target(monster)).unwrap();
    let out = s.step(250, 1);
    assert_eq!(count(&out, "spawned"), 1);

    let second = s
        .state
        .cast(caster, 3003, ExecutionInput::new().with_point(Vec2::new(500.0, 0.0)))
        .unwrap();
    {
        let units = s.state.ecs().read_storage::<CombatUnit>();
        let slot = &units.get(caster).unwrap().execution;
        assert!(slot.is_bound_to(second));
        assert!(!slot.is_bound_to(first));
    }

    let out = s.step(50, 40);
    assert_eq!(count(&out, "execution_ended"), 2);
    assert_eq!(count(&out, "damage"), 2);
    assert_eq!(s.hp(monster), 35.0);
    // 兩個執行體各自結束時都會清空綁定並切回待機
    assert_eq!(s.idle_count(), 2);
    assert!(!s.is_casting());
}

#[test]
fn test_cancel_twice_plays_idle_once() {
    let mut s = scene(Vec2::new(500.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    s.state.cast(caster, 3002, ExecutionInput::new().with_target(monster)).unwrap();
    s.step(100, 1);

    assert!(s.state.cancel(caster));
    assert!(!s.state.cancel(caster));
    assert_eq!(s.idle_count(), 1);

    let out = s.step(100, 10);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert_eq!(count(&out, "spawned"), 0);
    assert_eq!(s.hp(monster), 100.0);
}

#[test]
fn test_lost_target_fails_only_that_sub_task() {
    let mut s = scene(Vec2::new(500.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    s.state.cast(caster, 3002, ExecutionInput::new().with_target(monster)).unwrap();
    s.step(250, 1);

    s.state.ecs_mut().delete_entity(monster).unwrap();
    let out = s.step(100, 10);
    assert_eq!(count(&out, "sub_task_failed"), 1);
    assert_eq!(count(&out, "damage"), 0);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert_eq!(s.state.ecs().read_storage::<TargetFlyProjectile>().join().count(), 0);
}

#[test]
fn test_forward_fly_reports_collision_only() {
    let mut s = scene(Vec2::new(300.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    s.state.cast(caster, 3005, ExecutionInput::new().with_direction(0.0)).unwrap();

    let out = s.step(50, 30);
    let collided: Vec<_> = out
        .iter()
        .filter_map(|o| match o {
            Outcome::ProjectileCollided { other, .. } => Some(*other),
            _ => None,
        })
        .collect();
    assert_eq!(collided, vec![monster]);
    assert_eq!(count(&out, "damage"), 0);
    assert_eq!(s.hp(monster), 100.0);
    assert_eq!(s.state.ecs().read_storage::<ForwardProjectile>().join().count(), 0);
}

#[test]
fn test_dead_caster_cannot_cast() {
    let mut s = scene(Vec2::new(300.0, 0.0));
    let caster = s.caster;
    s.state.ecs().write_storage::<CombatUnit>().get_mut(caster).unwrap().hp = 0.0;
    assert!(s.state.cast(caster, 3001, ExecutionInput::new()).is_err());
}

#[test]
fn test_skill_without_clips_ends_before_its_markers() {
    let mut s = scene(Vec2::new(300.0, 0.0));
    let caster = s.caster;
    s.state
        .cast(caster, 3006, ExecutionInput::new().with_point(Vec2::new(300.0, 0.0)))
        .unwrap();

    let out = s.step(16, 1);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert!(!s.is_casting());

    let out = s.step(100, 5);
    assert_eq!(count(&out, "spawned"), 0);
    assert_eq!(count(&out, "spawn_failed"), 0);
    assert_eq!(s.state.ecs().read_storage::<SpawnedCollider>().join().count(), 0);
}

#[test]
fn test_deleted_caster_ends_its_execution() {
    let mut s = scene(Vec2::new(500.0, 0.0));
    let (caster, monster) = (s.caster, s.monster);
    s.state.cast(caster, 3002, ExecutionInput::new().with_target(monster)).unwrap();
    s.step(100, 1);

    s.state.ecs_mut().delete_entity(caster).unwrap();
    let out = s.step(100, 1);
    assert_eq!(count(&out, "execution_ended"), 1);
    assert_eq!(s.state.ecs().read_storage::<SkillExecution>().join().count(), 0);
}

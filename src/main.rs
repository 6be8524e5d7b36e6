use log::{error, info, warn};
use std::{io, io::BufRead, thread};

use anyhow::Context;
use crossbeam_channel::{unbounded, Receiver};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log::LevelFilter;
use specs::{Entity, Join, WorldExt};
use vek::Vec2;

use omb_skill_exec::comp::*;
use omb_skill_exec::config::ServerSetting;
use omb_skill_exec::msg::OutcomeMsg;
use omb_skill_exec::state::State;
use omb_skill_exec::util::{Command, TickClock};
use skill_timeline::{ExecutionInput, SkillLibrary, SystemClock};

const CONFIG_PATH: &str = "game.toml";

fn init_logging(path: &str) {
    if let Err(e) = log4rs::init_file(path, Default::default()) {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}")))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info));
        match config {
            Ok(config) => {
                if let Err(e) = log4rs::init_config(config) {
                    eprintln!("無法初始化日誌: {}", e);
                }
            }
            Err(e) => eprintln!("日誌設定錯誤: {}", e),
        }
        warn!("讀取 {} 失敗 ({})，改用主控台輸出", path, e);
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("讀取輸入失敗: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// 找離施法點最近、還活著的怪物當指定技目標
fn nearest_monster(state: &State, point: Vec2<f32>) -> Option<Entity> {
    let ecs = state.ecs();
    let entities = ecs.entities();
    let units = ecs.read_storage::<CombatUnit>();
    let positions = ecs.read_storage::<Pos>();
    (&entities, &units, &positions)
        .join()
        .filter(|(_, u, _)| u.faction == Faction::Monster && u.is_alive())
        .min_by(|a, b| {
            let da = a.2 .0.distance_squared(point);
            let db = b.2 .0.distance_squared(point);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(e, _, _)| e)
}

fn handle_command(state: &mut State, caster: Entity, line: &str) -> bool {
    match Command::parse(line) {
        Ok(Command::Cast { skill_id, point, direction }) => {
            let point = point.unwrap_or_else(Vec2::zero);
            let mut input = ExecutionInput::new()
                .with_point(point)
                .with_direction(direction.unwrap_or(0.0));
            if let Some(target) = nearest_monster(state, point) {
                input = input.with_target(target);
            }
            if let Err(e) = state.cast(caster, skill_id, input) {
                warn!("施放技能 {} 失敗: {}", skill_id, e);
            }
        }
        Ok(Command::Cancel) => {
            if !state.cancel(caster) {
                info!("目前沒有施放中的技能");
            }
        }
        Ok(Command::Quit) => return false,
        Err(e) => warn!("{}", e),
    }
    true
}

fn main() -> anyhow::Result<()> {
    let loaded = ServerSetting::read(CONFIG_PATH)?;
    let setting = loaded.clone().unwrap_or_default();
    init_logging(&setting.server.log_config);
    if loaded.is_none() {
        warn!("找不到設定檔 {}，使用預設值", CONFIG_PATH);
    }

    let mut library = SkillLibrary::new();
    library
        .load_from_file(&setting.server.skill_file)
        .with_context(|| format!("載入技能資料 {} 失敗", setting.server.skill_file))?;
    info!("載入 {} 個技能", library.len());

    let mut state = State::new(setting.skill.clone(), library, Box::new(SystemClock::new()));
    let caster = state.spawn_unit(CombatUnit::new("法師", Faction::Player, 500.0, 30.0), Vec2::zero(), 0.0);
    for (i, pos) in [Vec2::new(400.0, 0.0), Vec2::new(300.0, 200.0), Vec2::new(-250.0, 100.0)]
        .iter()
        .enumerate()
    {
        state.spawn_unit(CombatUnit::new(format!("木樁{}", i + 1), Faction::Monster, 200.0, 40.0), *pos, 180.0);
    }
    info!("指令: cast <skill> [x y [dir]] | cancel | quit");

    let rx = spawn_stdin_reader();
    let mut clock = TickClock::from_tps(setting.server.tps);
    loop {
        let mut running = true;
        for line in rx.try_iter() {
            running &= handle_command(&mut state, caster, &line);
        }
        if !running {
            break;
        }

        state.tick(clock.dt())?;
        for outcome in state.take_outcomes() {
            println!("{}", OutcomeMsg::from(&outcome).to_json());
        }

        // Wait for the next tick.
        clock.tick();
    }

    info!("結束，共執行 {} 個 tick", state.tick_count());
    Ok(())
}

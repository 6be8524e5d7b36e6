use anyhow::{anyhow, bail};
use skill_timeline::SkillId;
use vek::Vec2;

/// 從標準輸入讀到的指令
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `cast <skill> [x y [dir]]`
    Cast {
        skill_id: SkillId,
        point: Option<Vec2<f32>>,
        direction: Option<f32>,
    },
    Cancel,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Command> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(|| anyhow!("空白指令"))?;
        let args: Vec<&str> = words.collect();

        match head {
            "cast" => {
                let skill_id = args
                    .first()
                    .ok_or_else(|| anyhow!("cast 需要技能編號"))?
                    .parse::<SkillId>()?;
                let point = match (args.get(1), args.get(2)) {
                    (Some(x), Some(y)) => Some(Vec2::new(x.parse()?, y.parse()?)),
                    (None, None) => None,
                    _ => bail!("cast 的座標需要 x 與 y"),
                };
                let direction = args.get(3).map(|d| d.parse::<f32>()).transpose()?;
                Ok(Command::Cast { skill_id, point, direction })
            }
            "cancel" => Ok(Command::Cancel),
            "quit" | "exit" => Ok(Command::Quit),
            other => bail!("未知指令 '{}'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cast() {
        assert_eq!(
            Command::parse("cast 1001 300 0 45").unwrap(),
            Command::Cast {
                skill_id: 1001,
                point: Some(Vec2::new(300.0, 0.0)),
                direction: Some(45.0),
            }
        );
        assert_eq!(
            Command::parse(" cast 7 ").unwrap(),
            Command::Cast { skill_id: 7, point: None, direction: None }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("cast").is_err());
        assert!(Command::parse("cast abc").is_err());
        assert!(Command::parse("cast 1 300").is_err());
        assert!(Command::parse("jump").is_err());
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(Command::parse("cancel").unwrap(), Command::Cancel);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }
}

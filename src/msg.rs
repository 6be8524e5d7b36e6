use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comp::Outcome;

/// 對外送出的技能結果，格式為 `{t, a, d}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OutcomeMsg {
    pub t: String,
    pub a: String,
    pub d: serde_json::Value,
}

impl OutcomeMsg {
    pub fn new_s(t: &str, a: &str, d: serde_json::Value) -> OutcomeMsg {
        OutcomeMsg {
            t: t.to_owned(),
            a: a.to_owned(),
            d,
        }
    }

    pub fn to_json(&self) -> String {
        json!({ "t": self.t, "a": self.a, "d": self.d }).to_string()
    }
}

impl From<&Outcome> for OutcomeMsg {
    fn from(outcome: &Outcome) -> Self {
        let d = match outcome {
            Outcome::ExecutionStarted { skill_id, caster, execution }
            | Outcome::ExecutionEnded { skill_id, caster, execution } => json!({
                "skill": skill_id,
                "caster": caster.id(),
                "execution": execution.to_string(),
            }),
            Outcome::Spawned { skill_id, prefab, ent } => json!({
                "skill": skill_id,
                "prefab": prefab,
                "id": ent.id(),
            }),
            Outcome::SpawnFailed { skill_id, reason } => json!({
                "skill": skill_id,
                "reason": reason,
            }),
            Outcome::SubTaskFailed { skill_id, prefab, reason } => json!({
                "skill": skill_id,
                "prefab": prefab,
                "reason": reason,
            }),
            Outcome::ProjectileCollided { skill_id, pos, other } => json!({
                "skill": skill_id,
                "x": pos.x,
                "y": pos.y,
                "other": other.id(),
            }),
            Outcome::Damage { skill_id, source, target, amount }
            | Outcome::Heal { skill_id, source, target, amount } => json!({
                "skill": skill_id,
                "source": source.id(),
                "target": target.id(),
                "amount": amount,
            }),
            Outcome::Death { pos, ent } => json!({
                "id": ent.id(),
                "x": pos.x,
                "y": pos.y,
            }),
        };
        OutcomeMsg::new_s("skill", outcome.name(), d)
    }
}

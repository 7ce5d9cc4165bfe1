//! Action variants used by scenario agents

use serde::{Deserialize, Serialize};
use tracing::warn;

use hearth_core::{FactEntry, WorldState};
use hearth_goap::action::facts_for;
use hearth_goap::{Action, ActionData, ActionDefinition, GoapError};

/// Authored action plus the facts it uses up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockedActionDefinition {
    #[serde(flatten)]
    pub action: ActionDefinition,
    /// Facts decremented when the action completes (e.g. one sack of wheat)
    #[serde(default)]
    pub consumes: Vec<FactEntry>,
}

impl StockedActionDefinition {
    pub fn build(&self) -> Result<StockedAction, GoapError> {
        let data = self.action.build()?;
        let consumes = facts_for(&self.action.name, &self.consumes)?;
        if let Some(entry) = self.consumes.iter().find(|e| e.value <= 0) {
            return Err(GoapError::InvalidAmount {
                owner: self.action.name.clone(),
                key: entry.key.clone(),
            });
        }
        Ok(StockedAction { data, consumes })
    }
}

/// Action that draws on shared stock.
///
/// The world may have changed between planning and execution, so the
/// consumed facts are checked again when the action starts.
#[derive(Debug, Clone)]
pub struct StockedAction {
    data: ActionData,
    consumes: WorldState,
}

impl Action for StockedAction {
    fn data(&self) -> &ActionData {
        &self.data
    }

    fn on_action_start(&mut self, world: &WorldState) -> bool {
        if let Some(key) = world.missing(&self.consumes).next() {
            warn!("'{}' needs '{}' but the stock is gone", self.data.name(), key);
            return false;
        }
        true
    }

    fn on_action_complete(&mut self, world: &mut WorldState) -> bool {
        for (key, amount) in &self.consumes {
            world.edit_state(key, amount.saturating_neg());
        }
        self.data.commit_effects(world);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bake() -> StockedAction {
        let def: StockedActionDefinition = toml::from_str(
            r#"
name = "bake_bread"
cost = 2.0
preconditions = [{ key = "wheat", value = 1 }]
effects = [{ key = "bread", value = 1 }]
consumes = [{ key = "wheat", value = 1 }]
"#,
        )
        .unwrap();
        def.build().unwrap()
    }

    #[test]
    fn test_start_requires_stock() {
        let mut action = bake();
        assert!(!action.on_action_start(&WorldState::new()));
        assert!(action.on_action_start(&WorldState::from_fact("wheat", 1)));
    }

    #[test]
    fn test_complete_consumes_and_produces() {
        let mut action = bake();
        let mut world = WorldState::from_fact("wheat", 2);

        assert!(action.on_action_complete(&mut world));
        assert_eq!(world.get("wheat"), Some(1));
        assert_eq!(world.get("bread"), Some(1));

        // Effects are written, not accumulated
        assert!(action.on_action_complete(&mut world));
        assert!(!world.contains("wheat"));
        assert_eq!(world.get("bread"), Some(1));
    }

    #[test]
    fn test_non_positive_consume_rejected() {
        for amount in [0, -3, i32::MIN] {
            let def = StockedActionDefinition {
                action: ActionDefinition {
                    name: "feast".into(),
                    cost: 1.0,
                    duration: 0.0,
                    target: None,
                    preconditions: Vec::new(),
                    effects: Vec::new(),
                },
                consumes: vec![FactEntry::new("wheat", amount)],
            };
            assert!(matches!(
                def.build(),
                Err(GoapError::InvalidAmount { ref owner, ref key }) if owner == "feast" && key == "wheat"
            ));
        }
    }

    #[test]
    fn test_duplicate_consumed_fact() {
        let def = StockedActionDefinition {
            action: ActionDefinition {
                name: "mill".into(),
                cost: 1.0,
                duration: 0.0,
                target: None,
                preconditions: Vec::new(),
                effects: Vec::new(),
            },
            consumes: vec![FactEntry::new("wheat", 1), FactEntry::new("wheat", 1)],
        };
        assert!(matches!(def.build(), Err(GoapError::DuplicateFact { .. })));
    }
}

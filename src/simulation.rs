//! Runs every scenario agent against one shared world state

use tracing::info;

use hearth_core::WorldState;
use hearth_goap::{build_goals, Agent, AgentConfig, AgentState, GoapError, GoapPlanner, PlannerConfig};

use crate::actions::{StockedAction, StockedActionDefinition};
use crate::scenario::Scenario;
use crate::walker::Walker;

/// An agent paired with the body that carries it around
pub struct SimAgent {
    pub brain: Agent<StockedAction>,
    pub body: Walker,
}

pub struct Simulation {
    agents: Vec<SimAgent>,
}

impl Simulation {
    pub fn from_scenario(
        scenario: &Scenario,
        planner: &PlannerConfig,
        agent_config: &AgentConfig,
    ) -> Result<Self, GoapError> {
        let locations = scenario.location_map();
        let mut agents = Vec::with_capacity(scenario.agents.len());

        for def in &scenario.agents {
            let actions = def
                .actions
                .iter()
                .map(StockedActionDefinition::build)
                .collect::<Result<Vec<_>, _>>()?;
            let goals = build_goals(&def.goals)?;

            let brain = Agent::new(&def.name, actions, goals)
                .with_planner(GoapPlanner::new().with_config(planner.clone()))
                .with_config(agent_config.clone());
            let body = Walker::new(def.position, def.speed, locations.clone());

            info!(
                "Registered agent '{}' with {} actions and {} goals",
                def.name,
                brain.actions().len(),
                brain.goals().len()
            );
            agents.push(SimAgent { brain, body });
        }

        Ok(Self { agents })
    }

    pub fn agents(&self) -> &[SimAgent] {
        &self.agents
    }

    /// One control tick. Agents act in order, so each sees the previous agent's completions.
    pub fn step(&mut self, world: &mut WorldState, delta: f32) {
        for agent in &mut self.agents {
            agent.body.advance(delta);
            agent.brain.tick(world, &mut agent.body, delta);
        }
    }

    /// True once no agent has work left: all idle with no goals remaining
    pub fn is_finished(&self) -> bool {
        self.agents
            .iter()
            .all(|a| a.brain.state() == AgentState::Idle && a.brain.goals().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bakery_scenario_runs_to_completion() {
        let scenario = Scenario::parse(include_str!("../demos/bakery.toml")).unwrap();
        let mut world = scenario.world_state().unwrap();
        let mut sim = Simulation::from_scenario(
            &scenario,
            &PlannerConfig::default(),
            &AgentConfig::default(),
        )
        .unwrap();

        let mut ticks = 0;
        while !sim.is_finished() && ticks < 2000 {
            sim.step(&mut world, 0.1);
            ticks += 1;
        }

        assert!(sim.is_finished(), "scenario did not finish in {} ticks", ticks);
        assert!(world.get("bread_sold").unwrap_or(0) >= 1);
    }

    #[test]
    fn test_agents_share_world() {
        let scenario = Scenario::parse(
            r#"
[[agents]]
name = "farmer"

[[agents.actions]]
name = "harvest"
cost = 1.0
effects = [{ key = "wheat", value = 1 }]

[[agents.goals]]
name = "grow"
facts = [{ key = "wheat", value = 1 }]
remove_on_achieve = true

[[agents]]
name = "miller"

[[agents.actions]]
name = "mill"
cost = 1.0
preconditions = [{ key = "wheat", value = 1 }]
consumes = [{ key = "wheat", value = 1 }]
effects = [{ key = "flour", value = 1 }]

[[agents.goals]]
name = "grind"
facts = [{ key = "flour", value = 1 }]
remove_on_achieve = true
"#,
        )
        .unwrap();
        let mut world = WorldState::new();
        let mut sim = Simulation::from_scenario(
            &scenario,
            &PlannerConfig::default(),
            &AgentConfig::default(),
        )
        .unwrap();

        for _ in 0..20 {
            sim.step(&mut world, 0.1);
        }

        assert!(sim.is_finished());
        assert_eq!(world.get("flour"), Some(1));
        assert!(!world.contains("wheat"));
        assert_eq!(sim.agents().len(), 2);
    }
}

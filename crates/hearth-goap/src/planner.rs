//! Exhaustive GOAP planner: builds a tree of every action ordering that
//! reaches a goal and returns the cheapest one
//!
//! Each branch may use an action at most once, so depth is bounded by the
//! size of the action pool. There is no heuristic and no merging of
//! equivalent states: every plausible ordering is expanded unless a bound in
//! [`PlannerConfig`] cuts the search short.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use hearth_core::WorldState;

use crate::action::Action;

/// Optional bounds on the search. The default is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Longest branch (in actions) that will be explored
    pub max_depth: Option<usize>,
    /// Maximum number of search nodes created per planning call
    pub max_nodes: Option<usize>,
}

/// A node in the search tree
#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    /// Cumulative cost from the root
    cost: f32,
    /// Index of the action that produced this node (None for the root)
    action: Option<usize>,
    /// Private copy of the world state after applying the branch's actions
    state: WorldState,
    depth: usize,
}

/// Ordered action sequence produced by the planner
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Indices into the action slice the plan was built from, first to last
    pub steps: Vec<usize>,
    /// Sum of the costs of every step
    pub cost: f32,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolve the step indices to action names
    pub fn names<'a, A: Action>(&self, actions: &'a [A]) -> Vec<&'a str> {
        self.steps
            .iter()
            .filter_map(|&i| actions.get(i))
            .map(|a| a.name())
            .collect()
    }
}

/// One planning invocation: owns the tree and the goal leaves found so far
struct Search<'a, A> {
    actions: &'a [A],
    goal: &'a WorldState,
    config: &'a PlannerConfig,
    nodes: Vec<Node>,
    leaves: Vec<usize>,
    truncated: bool,
}

impl<A: Action> Search<'_, A> {
    fn node_limit_reached(&self) -> bool {
        self.config
            .max_nodes
            .is_some_and(|max| self.nodes.len() >= max)
    }

    /// Expand `parent` with every plausible action from `pool`.
    /// Returns true if any goal leaf was found beneath it.
    fn expand(&mut self, parent: usize, pool: &[usize]) -> bool {
        let actions = self.actions;
        let mut found = false;

        for &action_idx in pool {
            if self.node_limit_reached() {
                self.truncated = true;
                break;
            }

            let action = &actions[action_idx];
            let (state, cost, depth) = {
                let node = &self.nodes[parent];
                if !action.check_plausibility(&node.state) {
                    continue;
                }
                let mut state = node.state.clone();
                state.merge_absent(action.data().effects());
                (state, node.cost + action.data().cost(), node.depth + 1)
            };

            let reached = state.satisfies(self.goal);
            let child = self.nodes.len();
            self.nodes.push(Node {
                parent: Some(parent),
                cost,
                action: Some(action_idx),
                state,
                depth,
            });

            if reached {
                self.leaves.push(child);
                found = true;
                continue;
            }

            if self.config.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            let remaining: Vec<usize> = pool.iter().copied().filter(|&i| i != action_idx).collect();
            if self.expand(child, &remaining) {
                found = true;
            }
        }

        found
    }

    /// First leaf with the minimum cost, in discovery order
    fn cheapest_leaf(&self) -> Option<usize> {
        let mut cheapest: Option<usize> = None;
        for &leaf in &self.leaves {
            match cheapest {
                Some(best) if self.nodes[leaf].cost >= self.nodes[best].cost => {}
                _ => cheapest = Some(leaf),
            }
        }
        cheapest
    }

    /// Walk parent links from `leaf` back to the root
    fn plan_from(&self, leaf: usize) -> Plan {
        let mut steps = Vec::new();
        let mut current = Some(leaf);
        while let Some(idx) = current {
            let node = &self.nodes[idx];
            if let Some(action) = node.action {
                steps.push(action);
            }
            current = node.parent;
        }
        steps.reverse();

        Plan {
            steps,
            cost: self.nodes[leaf].cost,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoapPlanner {
    config: PlannerConfig,
}

impl GoapPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Find the cheapest sequence of `actions` that takes `world` to a state
    /// containing every key of `goal`.
    ///
    /// The goal is only tested after an action has been applied, so an
    /// already satisfied goal still yields a one-step plan when any action is
    /// plausible. Among equally cheap plans the first one discovered wins;
    /// discovery follows the order of `actions`.
    ///
    /// Returns None if no combination of actions reaches the goal.
    pub fn create_plan<A: Action>(
        &self,
        actions: &[A],
        goal: &WorldState,
        world: &WorldState,
    ) -> Option<Plan> {
        let mut search = Search {
            actions,
            goal,
            config: &self.config,
            nodes: vec![Node {
                parent: None,
                cost: 0.0,
                action: None,
                state: world.clone(),
                depth: 0,
            }],
            leaves: Vec::new(),
            truncated: false,
        };

        let pool: Vec<usize> = (0..actions.len()).collect();
        search.expand(0, &pool);

        debug!(
            "Planner explored {} nodes, {} goal leaves",
            search.nodes.len(),
            search.leaves.len()
        );
        if search.truncated {
            warn!(
                "Planner hit its node limit ({:?}), plan may not be the cheapest",
                self.config.max_nodes
            );
        }

        let Some(leaf) = search.cheapest_leaf() else {
            info!("Planner failed to obtain plan");
            return None;
        };

        let plan = search.plan_from(leaf);
        info!(
            "Selected plan (cost {}): {}",
            plan.cost,
            plan.names(actions).join(" -> ")
        );
        Some(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionData, BasicAction};

    fn action(name: &str, cost: f32, pre: &[&str], eff: &[&str]) -> BasicAction {
        let mut builder = ActionData::builder(name).cost(cost);
        for key in pre {
            builder = builder.precondition(*key, 1);
        }
        for key in eff {
            builder = builder.effect(*key, 1);
        }
        BasicAction::from(builder.build().unwrap())
    }

    fn bakery() -> Vec<BasicAction> {
        vec![
            action("get_wheat", 1.0, &[], &["has_wheat"]),
            action("bake_bread", 2.0, &["has_wheat"], &["has_bread"]),
        ]
    }

    #[test]
    fn test_plan_chain() {
        let actions = bakery();
        let goal = WorldState::from_fact("has_bread", 1);

        let plan = GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::new())
            .unwrap();
        assert_eq!(plan.names(&actions), vec!["get_wheat", "bake_bread"]);
        assert_eq!(plan.cost, 3.0);
    }

    #[test]
    fn test_plan_prefers_cheaper_alternative() {
        let mut actions = bakery();
        actions.push(action("buy_bread", 1.0, &[], &["has_bread"]));
        let goal = WorldState::from_fact("has_bread", 1);

        let plan = GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::new())
            .unwrap();
        assert_eq!(plan.names(&actions), vec!["buy_bread"]);
        assert_eq!(plan.cost, 1.0);
    }

    #[test]
    fn test_plan_impossible() {
        let actions = vec![action("bake_bread", 2.0, &["has_wheat"], &["has_bread"])];
        let goal = WorldState::from_fact("has_bread", 1);

        assert!(GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::new())
            .is_none());
    }

    #[test]
    fn test_plan_no_actions() {
        let goal = WorldState::from_fact("has_bread", 1);
        let actions: Vec<BasicAction> = Vec::new();
        assert!(GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::from_fact("has_bread", 1))
            .is_none());
    }

    #[test]
    fn test_plan_uses_world_facts() {
        let actions = bakery();
        let goal = WorldState::from_fact("has_bread", 1);
        let world = WorldState::from_fact("has_wheat", 5);

        let plan = GoapPlanner::new().create_plan(&actions, &goal, &world).unwrap();
        assert_eq!(plan.names(&actions), vec!["bake_bread"]);
        // Planning never touches the caller's state
        assert_eq!(world, WorldState::from_fact("has_wheat", 5));
    }

    #[test]
    fn test_plan_satisfied_goal_still_takes_a_step() {
        let actions = vec![
            action("expensive", 3.0, &[], &["x"]),
            action("cheap", 1.0, &[], &["y"]),
        ];
        let goal = WorldState::from_fact("has_bread", 1);
        let world = WorldState::from_fact("has_bread", 1);

        let plan = GoapPlanner::new().create_plan(&actions, &goal, &world).unwrap();
        assert_eq!(plan.names(&actions), vec!["cheap"]);
    }

    #[test]
    fn test_plan_finds_cheaper_longer_path() {
        let actions = vec![
            action("hire_courier", 10.0, &[], &["delivered"]),
            action("pack", 1.0, &[], &["packed"]),
            action("walk_over", 1.0, &["packed"], &["delivered"]),
        ];
        let goal = WorldState::from_fact("delivered", 1);

        let plan = GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::new())
            .unwrap();
        assert_eq!(plan.names(&actions), vec!["pack", "walk_over"]);
        assert_eq!(plan.cost, 2.0);
    }

    #[test]
    fn test_plan_tie_takes_first_discovered() {
        let actions = vec![
            action("run_home", 1.0, &[], &["at_home"]),
            action("ride_home", 1.0, &[], &["at_home"]),
        ];
        let goal = WorldState::from_fact("at_home", 1);

        for _ in 0..5 {
            let plan = GoapPlanner::new()
                .create_plan(&actions, &goal, &WorldState::new())
                .unwrap();
            assert_eq!(plan.steps, vec![0]);
        }
    }

    #[test]
    fn test_plan_never_repeats_an_action() {
        let actions = vec![
            action("chop_wood", 1.0, &[], &["wood"]),
            action("gather_stone", 1.0, &[], &["stone"]),
            action("build_hut", 1.0, &["wood", "stone"], &["hut"]),
            action("build_wall", 1.0, &["stone", "hut"], &["wall"]),
        ];
        let goal = WorldState::from_fact("wall", 1);

        let plan = GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::new())
            .unwrap();
        let mut seen = plan.steps.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), plan.len());
        assert_eq!(plan.cost, 4.0);
        assert_eq!(plan.names(&actions).last(), Some(&"build_wall"));
    }

    #[test]
    fn test_max_depth_bounds_search() {
        let actions = vec![
            action("a", 1.0, &[], &["a"]),
            action("b", 1.0, &["a"], &["b"]),
            action("c", 1.0, &["b"], &["c"]),
        ];
        let goal = WorldState::from_fact("c", 1);

        let bounded = GoapPlanner::new().with_config(PlannerConfig {
            max_depth: Some(2),
            max_nodes: None,
        });
        assert!(bounded.create_plan(&actions, &goal, &WorldState::new()).is_none());

        let unbounded = GoapPlanner::new();
        let plan = unbounded.create_plan(&actions, &goal, &WorldState::new()).unwrap();
        assert_eq!(plan.names(&actions), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_max_nodes_keeps_best_so_far() {
        let actions = vec![
            action("slow", 5.0, &[], &["done"]),
            action("fast", 1.0, &[], &["done"]),
        ];
        let goal = WorldState::from_fact("done", 1);

        // Root plus one child: only the first action is ever tried
        let planner = GoapPlanner::new().with_config(PlannerConfig {
            max_depth: None,
            max_nodes: Some(2),
        });
        let plan = planner.create_plan(&actions, &goal, &WorldState::new()).unwrap();
        assert_eq!(plan.names(&actions), vec!["slow"]);
    }

    #[test]
    fn test_boxed_actions() {
        let actions: Vec<Box<dyn Action>> = bakery()
            .into_iter()
            .map(|a| Box::new(a) as Box<dyn Action>)
            .collect();
        let goal = WorldState::from_fact("has_bread", 1);

        let plan = GoapPlanner::new()
            .create_plan(&actions, &goal, &WorldState::new())
            .unwrap();
        assert_eq!(plan.steps, vec![0, 1]);
    }
}

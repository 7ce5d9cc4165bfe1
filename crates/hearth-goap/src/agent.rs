//! Per-agent execution loop
//!
//! Each tick advances the agent by at most one transition. While a plan is
//! active no replanning happens; a fresh plan is only requested once the
//! queue has run dry or been discarded.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use hearth_core::WorldState;

use crate::action::{Action, ActionData};
use crate::goal::GoalSet;
use crate::movement::Movement;
use crate::planner::GoapPlanner;

/// Where the agent is in its plan/act cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentState {
    /// No plan
    Idle,
    /// Searching for a plan this tick
    Planning,
    /// Action started, waiting for the movement provider to report arrival
    ActionDispatched,
    /// In place, duration timer counting down
    ActionRunning,
    /// Action finished and its effects committed
    ActionComplete,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seconds to wait after a failed planning attempt before trying again
    pub replan_cooldown: f32,
}

/// An agent with its own actions, goals, and plan queue
pub struct Agent<A = Box<dyn Action>> {
    pub name: String,
    actions: Vec<A>,
    goals: GoalSet,
    planner: GoapPlanner,
    config: AgentConfig,
    state: AgentState,
    plan: VecDeque<usize>,
    current_action: Option<usize>,
    current_goal: Option<String>,
    action_timer: f32,
    replan_timer: f32,
}

impl<A: Action> Agent<A> {
    pub fn new(name: impl Into<String>, actions: Vec<A>, goals: GoalSet) -> Self {
        Self {
            name: name.into(),
            actions,
            goals,
            planner: GoapPlanner::new(),
            config: AgentConfig::default(),
            state: AgentState::Idle,
            plan: VecDeque::new(),
            current_action: None,
            current_goal: None,
            action_timer: 0.0,
            replan_timer: 0.0,
        }
    }

    pub fn with_planner(mut self, planner: GoapPlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    /// Goals may be changed at any time; the change is seen at the next planning attempt
    pub fn goals_mut(&mut self) -> &mut GoalSet {
        &mut self.goals
    }

    /// Name of the goal the active plan is working toward
    pub fn current_goal(&self) -> Option<&str> {
        self.current_goal.as_deref()
    }

    /// Get the name of the currently executing action
    pub fn current_action_name(&self) -> Option<&str> {
        let idx = self.current_action?;
        Some(self.actions[idx].name())
    }

    /// Names of the actions still queued after the current one
    pub fn remaining_plan(&self) -> Vec<&str> {
        self.plan.iter().map(|&i| self.actions[i].name()).collect()
    }

    /// Advance the agent by one control tick of `dt` seconds
    pub fn tick(
        &mut self,
        world: &mut WorldState,
        movement: &mut dyn Movement,
        dt: f32,
    ) -> AgentState {
        match self.state {
            AgentState::Idle | AgentState::Planning => self.plan_for_goals(world, movement, dt),
            AgentState::ActionDispatched => self.check_arrival(movement),
            AgentState::ActionRunning => self.run_action(world, dt),
            AgentState::ActionComplete => {
                if self.plan.is_empty() {
                    self.finish_goal();
                } else {
                    self.dispatch_next(world, movement);
                }
            }
        }
        self.state
    }

    /// Try each goal in descending priority and keep the first plan found
    fn plan_for_goals(&mut self, world: &WorldState, movement: &mut dyn Movement, dt: f32) {
        if self.replan_timer > 0.0 {
            self.replan_timer -= dt;
            return;
        }

        self.state = AgentState::Planning;

        let mut found = None;
        for goal in self.goals.by_priority() {
            if let Some(plan) = self
                .planner
                .create_plan(&self.actions, &goal.desired_state, world)
            {
                found = Some((goal.name.clone(), plan));
                break;
            }
        }

        let Some((goal, plan)) = found else {
            debug!("{}: no goal has a plan, staying idle", self.name);
            self.state = AgentState::Idle;
            self.replan_timer = self.config.replan_cooldown;
            return;
        };

        info!("{}: planning for goal '{}' ({} steps)", self.name, goal, plan.len());
        self.plan = plan.steps.into_iter().collect();
        self.current_goal = Some(goal);
        self.dispatch_next(world, movement);
    }

    /// Dequeue the next action and run its start hook
    fn dispatch_next(&mut self, world: &WorldState, movement: &mut dyn Movement) {
        let Some(idx) = self.plan.pop_front() else {
            self.finish_goal();
            return;
        };

        self.current_action = Some(idx);
        let action = &mut self.actions[idx];
        if !action.on_action_start(world) {
            warn!(
                "{}: action '{}' could not start, discarding plan",
                self.name,
                action.name()
            );
            self.abort();
            return;
        }

        if let Some(target) = action.data().target() {
            movement.move_to(target);
        }
        debug!("{}: dispatched '{}'", self.name, action.name());
        self.state = AgentState::ActionDispatched;
    }

    fn check_arrival(&mut self, movement: &dyn Movement) {
        let Some(data) = self.current_data() else {
            self.abort();
            return;
        };

        let arrived = match data.target() {
            Some(target) => movement.has_arrived(target),
            None => true,
        };
        if arrived {
            self.action_timer = data.duration();
            self.state = AgentState::ActionRunning;
        }
    }

    fn run_action(&mut self, world: &mut WorldState, dt: f32) {
        self.action_timer -= dt;
        if self.action_timer > 0.0 {
            return;
        }

        let Some(idx) = self.current_action else {
            self.abort();
            return;
        };

        let action = &mut self.actions[idx];
        if !action.on_action_complete(world) {
            warn!(
                "{}: action '{}' failed to complete, discarding plan",
                self.name,
                action.name()
            );
            self.abort();
            return;
        }

        debug!("{}: completed '{}'", self.name, action.name());
        self.state = AgentState::ActionComplete;
    }

    /// Plan ran to completion; drop the goal if it only needed achieving once
    fn finish_goal(&mut self) {
        self.current_action = None;
        if let Some(name) = self.current_goal.take() {
            let one_shot = self.goals.get(&name).is_some_and(|g| g.remove_on_achieve);
            if one_shot {
                self.goals.remove(&name);
                info!("{}: achieved goal '{}', removing it", self.name, name);
            } else {
                info!("{}: achieved goal '{}'", self.name, name);
            }
        }
        self.state = AgentState::Idle;
    }

    fn abort(&mut self) {
        self.plan.clear();
        self.current_action = None;
        self.current_goal = None;
        self.state = AgentState::Idle;
    }

    fn current_data(&self) -> Option<&ActionData> {
        self.current_action.map(|idx| self.actions[idx].data())
    }
}

//! A* (spec §4.K), grounded on
//! `original_source/src/search/algorithms/astar.cpp` for the g/h/f
//! bookkeeping, duplicate-on-pop skip, and re-insertion-on-improvement
//! shape.

use std::collections::HashMap;

use super::{
    reconstruct_plan, EventHandler, EventOutcome, GoalStrategy, Heuristic, NodeStatus, OpenList, PruningStrategy,
    SearchNode, SearchResult, SearchStatus, StateId, SuccessorGenerator,
};

#[allow(clippy::too_many_arguments)]
pub fn astar(
    start: StateId,
    successors: &mut impl SuccessorGenerator,
    heuristic: &mut impl Heuristic,
    goal: &impl GoalStrategy,
    pruning: &mut impl PruningStrategy,
    events: &mut impl EventHandler,
) -> SearchResult {
    if !goal.is_potentially_solvable() {
        return SearchResult::unsolvable();
    }
    if pruning.prune_initial(start) {
        return SearchResult::exhausted();
    }

    let mut nodes: HashMap<StateId, SearchNode> = HashMap::new();
    let mut open: OpenList<StateId> = OpenList::new();

    let Some(h0) = heuristic.estimate(start) else {
        return SearchResult::exhausted();
    };
    let start_node = SearchNode { status: NodeStatus::Open, g: 0, h: Some(h0), ..SearchNode::new() };
    open.push(start_node.f().expect("h was just set to Some"), start);
    nodes.insert(start, start_node);

    while let Some((_, state)) = open.pop() {
        let status = nodes.get(&state).map(|n| n.status);
        if status != Some(NodeStatus::Open) {
            continue;
        }

        if matches!(events.on_expand(state), EventOutcome::Stop) {
            return SearchResult::cancelled();
        }

        if goal.is_goal(state) {
            let node = &nodes[&state];
            let plan = reconstruct_plan(&nodes, state);
            return SearchResult { status: SearchStatus::Solved, plan, cost: node.g, goal_state: Some(state) };
        }

        let g = nodes[&state].g;
        nodes.get_mut(&state).unwrap().status = NodeStatus::Closed;

        for (action, successor, action_cost) in successors.successors(state) {
            if pruning.prune_successor(successor) {
                continue;
            }
            let tentative_g = g.saturating_add(action_cost);
            let is_improvement = nodes.get(&successor).map(|n| tentative_g < n.g).unwrap_or(true);
            if !is_improvement {
                continue;
            }

            let Some(h) = heuristic.estimate(successor) else {
                nodes.insert(
                    successor,
                    SearchNode { status: NodeStatus::DeadEnd, g: tentative_g, parent: Some(state), creating_action: Some(action), ..SearchNode::new() },
                );
                continue;
            };

            let successor_node = SearchNode {
                status: NodeStatus::Open,
                g: tentative_g,
                h: Some(h),
                parent: Some(state),
                creating_action: Some(action),
            };
            open.push(successor_node.f().expect("h was just set to Some"), successor);
            nodes.insert(successor, successor_node);
        }
    }

    SearchResult::exhausted()
}

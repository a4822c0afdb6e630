//! Serialized/iterative-widening search (spec §4.K: "SIW" skeleton): retry
//! [`iw`] with increasing tuple width, resetting novelty between attempts,
//! until a plan is found or `max_width` is exhausted.

use super::iw::{iw, NoveltyTable};
use super::{EventHandler, GoalStrategy, SearchResult, SearchStatus, StateId, SuccessorGenerator};

pub fn siw(
    max_width: usize,
    start: StateId,
    successors: &mut impl SuccessorGenerator,
    goal: &impl GoalStrategy,
    novelty: &mut impl NoveltyTable,
    events: &mut impl EventHandler,
) -> SearchResult {
    for width in 1..=max_width {
        novelty.reset();
        let result = iw(width, start, successors, goal, novelty, events);
        if matches!(result.status, SearchStatus::Solved | SearchStatus::Cancelled) {
            return result;
        }
    }
    SearchResult::exhausted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::NullEventHandler;
    use std::collections::HashSet;

    struct Chain;
    impl SuccessorGenerator for Chain {
        fn successors(&mut self, state: StateId) -> Vec<(super::super::ActionId, StateId, u64)> {
            if state < 3 {
                vec![(state, state + 1, 1)]
            } else {
                vec![]
            }
        }
    }

    struct GoalAtThree;
    impl GoalStrategy for GoalAtThree {
        fn is_goal(&self, state: StateId) -> bool {
            state == 3
        }
    }

    struct TrivialNovelty(HashSet<StateId>);
    impl NoveltyTable for TrivialNovelty {
        fn is_novel(&mut self, state: StateId, _width: usize) -> bool {
            self.0.insert(state)
        }
        fn reset(&mut self) {
            self.0.clear();
        }
    }

    #[test]
    fn widens_until_solved() {
        let mut novelty = TrivialNovelty(HashSet::new());
        let result = siw(2, 0, &mut Chain, &GoalAtThree, &mut novelty, &mut NullEventHandler);
        assert_eq!(result.status, SearchStatus::Solved);
    }
}

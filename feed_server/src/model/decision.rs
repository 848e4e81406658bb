//! Probability oracle deciding whether a fixture or team advances on a tick.

use rand::Rng;

/// "One in `chance`" coin flip.
///
/// Implementations must be stateless between calls from the caller's point of
/// view and safe to share across threads.
pub trait DecisionGate: Send + Sync {
    /// Returns `true` with probability `1 / chance`; always `false` for `chance == 0`.
    fn decide(&self, chance: u32) -> bool;
}

/// Decision gate backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDecisionGate;

impl DecisionGate for RandomDecisionGate {
    fn decide(&self, chance: u32) -> bool {
        if chance == 0 {
            return false;
        }
        rand::rng().random_ratio(1, chance)
    }
}


#[cfg(test)]
pub(crate) mod stub {
    use super::DecisionGate;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Gate that always answers the same way.
    pub struct FixedDecisionGate(pub bool);

    impl DecisionGate for FixedDecisionGate {
        fn decide(&self, _chance: u32) -> bool {
            self.0
        }
    }

    /// Gate that replays queued answers, then falls back to a fixed one.
    pub struct ScriptedDecisionGate {
        answers: Mutex<VecDeque<bool>>,
        fallback: bool,
    }

    impl ScriptedDecisionGate {
        pub fn new(answers: &[bool], fallback: bool) -> Self {
            ScriptedDecisionGate {
                answers: Mutex::new(answers.iter().copied().collect()),
                fallback,
            }
        }
    }

    impl DecisionGate for ScriptedDecisionGate {
        fn decide(&self, _chance: u32) -> bool {
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.fallback)
        }
    }
}

use super::double::Double;
use super::learner::Learner;
use super::tabular::Tabular;
use std::sync::Arc;

/// The temporal-difference bootstrap a learner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// value of the action actually taken next
    Sarsa,
    /// value of the greedy next action
    QLearning,
    /// expected next value under the epsilon-greedy policy
    ExpectedSarsa,
    /// Q-learning over two tables that evaluate each other's argmax
    DoubleQ,
}

impl Rule {
    pub const fn all() -> [Rule; 4] {
        [Rule::Sarsa, Rule::QLearning, Rule::ExpectedSarsa, Rule::DoubleQ]
    }
    /// a fresh full-size learner following this rule
    pub fn learner(self) -> Arc<dyn Learner> {
        match self {
            Rule::DoubleQ => Arc::new(Double::new()),
            rule => Arc::new(Tabular::new(rule)),
        }
    }
    pub const fn name(&self) -> &'static str {
        match self {
            Rule::Sarsa => "sarsa",
            Rule::QLearning => "qlearning",
            Rule::ExpectedSarsa => "expected",
            Rule::DoubleQ => "double",
        }
    }
}

impl TryFrom<&str> for Rule {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Rule::all()
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown rule {:?}", s))
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!(Rule::try_from("SARSA").unwrap(), Rule::Sarsa);
        assert_eq!(Rule::try_from("double").unwrap(), Rule::DoubleQ);
        assert!(Rule::try_from("montecarlo").is_err());
        for rule in Rule::all() {
            assert_eq!(Rule::try_from(rule.to_string().as_str()).unwrap(), rule);
        }
    }
}

use super::card::Card;

/// An ordered pile of cards: a player's discards
/// or the cards dealt face-up to nobody.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
pub struct Stack(Vec<Card>);

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn last(&self) -> Option<Card> {
        self.0.last().copied()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }
    /// summed face value, the end-of-round tie breaker
    pub fn score(&self) -> i32 {
        self.0.iter().map(|c| c.value() as i32).sum()
    }
    /// card names, oldest first, for rendering
    pub fn strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.to_string()).collect()
    }
}

impl From<Vec<Card>> for Stack {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<Stack> for Vec<Card> {
    fn from(stack: Stack) -> Self {
        stack.0
    }
}

impl FromIterator<Card> for Stack {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// token isomorphism
/// one digit per card, oldest first; the empty stack is the empty string
impl TryFrom<&str> for Stack {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| Card::from(d as u8))
                    .filter(|c| !c.is_none())
                    .ok_or_else(|| anyhow::anyhow!("invalid card digit {:?}", c))
            })
            .collect()
    }
}
impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.iter().map(|c| write!(f, "{}", c.value())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_sums_face_values() {
        let stack = Stack::from(vec![Card::Guard, Card::Prince, Card::Princess]);
        assert_eq!(stack.score(), 1 + 5 + 8);
    }

    #[test]
    fn bijective_token() {
        let stack = Stack::from(vec![Card::King, Card::Guard, Card::Guard]);
        let token = stack.to_string();
        assert_eq!(token, "611");
        assert_eq!(Stack::try_from(token.as_str()).unwrap(), stack);
    }

    #[test]
    fn empty_token() {
        assert_eq!(Stack::new().to_string(), "");
        assert_eq!(Stack::try_from("").unwrap(), Stack::new());
    }

    #[test]
    fn rejects_bad_digits() {
        assert!(Stack::try_from("19").is_err());
        assert!(Stack::try_from("1x").is_err());
    }
}

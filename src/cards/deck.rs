use super::card::Card;
use super::stack::Stack;
use rand::Rng;

/// Number of distinct decks reachable from a fresh one:
/// the product of (multiplicity + 1) over every card.
pub const DECK_SPACE: usize = {
    let cards = Card::all();
    let mut space = 1;
    let mut i = 0;
    while i < cards.len() {
        space *= cards[i].multiplicity() as usize + 1;
        i += 1;
    }
    space
};

/// A multiset of cards stored as per-card counts.
///
/// Used both as the live draw pile and as the tally of every
/// card a player has seen. Counts never exceed a fresh deck's
/// multiplicities, which is what makes the integer index
/// a bijection onto `[0, DECK_SPACE)`.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Deck([u8; 8]);

impl Deck {
    /// the sixteen-card starting deck
    pub fn full() -> Self {
        Self(Card::all().map(|c| c.multiplicity()))
    }
    pub fn empty() -> Self {
        Self::default()
    }
    pub fn size(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
    pub fn count(&self, card: Card) -> u8 {
        match card {
            Card::None => 0,
            card => self.0[card.slot()],
        }
    }
    pub fn add(&mut self, card: Card) {
        if !card.is_none() {
            debug_assert!(self.count(card) < card.multiplicity());
            self.0[card.slot()] += 1;
        }
    }
    /// removes one copy, reporting whether there was one to remove
    pub fn remove(&mut self, card: Card) -> bool {
        match card {
            Card::None => false,
            card if self.0[card.slot()] == 0 => false,
            card => {
                self.0[card.slot()] -= 1;
                true
            }
        }
    }
    pub fn add_stack(&mut self, stack: &Stack) {
        stack.iter().for_each(|&c| self.add(c));
    }
    /// Draws and removes a uniformly random card.
    /// An empty deck yields the `None` sentinel.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Card {
        let n = self.size();
        if n == 0 {
            return Card::None;
        }
        let mut i = rng.random_range(0..n);
        for card in Card::all() {
            let count = self.count(card) as usize;
            if i < count {
                self.remove(card);
                return card;
            }
            i -= count;
        }
        unreachable!("draw index within deck size")
    }
}

/// usize isomorphism
/// little-endian mixed radix, Guard is the least significant digit
/// and each digit's base is that card's multiplicity + 1
impl From<Deck> for usize {
    fn from(deck: Deck) -> usize {
        Card::all()
            .iter()
            .rev()
            .fold(0, |index, card| {
                index * (card.multiplicity() as usize + 1) + deck.count(*card) as usize
            })
    }
}
impl From<usize> for Deck {
    fn from(n: usize) -> Self {
        assert!(n < DECK_SPACE, "deck index {} out of range", n);
        let mut rest = n;
        let mut deck = Deck::empty();
        for card in Card::all() {
            let base = card.multiplicity() as usize + 1;
            deck.0[card.slot()] = (rest % base) as u8;
            rest /= base;
        }
        deck
    }
}

impl From<&Stack> for Deck {
    fn from(stack: &Stack) -> Self {
        let mut deck = Deck::empty();
        deck.add_stack(stack);
        deck
    }
}

impl crate::Arbitrary for Deck {
    fn random() -> Self {
        Self::from(rand::random_range(0..DECK_SPACE))
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        Card::all()
            .iter()
            .filter(|c| self.count(**c) > 0)
            .map(|c| write!(f, "{}x{} ", self.count(*c), c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn space_size() {
        assert_eq!(DECK_SPACE, 6 * 3 * 3 * 3 * 3 * 2 * 2 * 2);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(usize::from(Deck::empty()), 0);
    }

    #[test]
    fn full_is_last() {
        assert_eq!(usize::from(Deck::full()), DECK_SPACE - 1);
    }

    #[test]
    fn guards_are_least_significant() {
        let mut deck = Deck::empty();
        deck.add(Card::Guard);
        deck.add(Card::Guard);
        deck.add(Card::Guard);
        assert_eq!(usize::from(deck), 3);
        deck.add(Card::Priest);
        assert_eq!(usize::from(deck), 9);
    }

    #[test]
    fn bijective_usize_exhaustive() {
        for n in 0..DECK_SPACE {
            assert_eq!(n, usize::from(Deck::from(n)));
        }
    }

    #[test]
    fn bijective_deck() {
        let deck = Deck::random();
        assert_eq!(deck, Deck::from(usize::from(deck)));
    }

    #[test]
    fn drawing_only_card() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut deck = Deck::empty();
        deck.add(Card::Guard);
        assert_eq!(deck.draw(rng), Card::Guard);
        assert_eq!(deck.draw(rng), Card::None);
    }

    #[test]
    fn drawing_empty() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(Deck::empty().draw(rng), Card::None);
    }

    #[test]
    fn drawing_everything() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::full();
        let mut seen = Deck::empty();
        while !deck.is_empty() {
            seen.add(deck.draw(rng));
        }
        assert_eq!(seen, Deck::full());
    }
}

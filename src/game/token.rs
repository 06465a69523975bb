use super::error::GameError;
use super::events::Events;
use super::game::Game;
use crate::cards::Card;
use crate::cards::DECK_SPACE;
use crate::cards::Deck;
use crate::cards::Stack;

/// Resume tokens let a stateless front end hand a game back to us.
///
/// Ten dot-separated fields:
/// `players.deck.faceup.discards.lastplay.known.active.eliminated.hands.drawn`
/// where stacks are digit strings, per-player lists are joined by `-`,
/// the deck is its mixed-radix index, and `eliminated` is a bitmask.
/// The event log and seat names are not carried.
impl Game {
    pub fn token(&self) -> String {
        let mask = self
            .eliminated
            .iter()
            .enumerate()
            .filter(|(_, out)| **out)
            .map(|(p, _)| 1usize << p)
            .sum::<usize>();
        [
            self.players.to_string(),
            usize::from(self.deck).to_string(),
            self.faceup.to_string(),
            joined(&self.discards),
            digits(&self.played),
            self.known
                .iter()
                .map(|row| digits(row))
                .collect::<Vec<_>>()
                .join("-"),
            self.active.to_string(),
            mask.to_string(),
            digits(&self.hands),
            digits(&[self.drawn]),
        ]
        .join(".")
    }
}

fn digits(cards: &[Card]) -> String {
    cards.iter().map(|c| c.value().to_string()).collect()
}

fn joined(stacks: &[Stack]) -> String {
    stacks
        .iter()
        .map(Stack::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

/// digit strings where 0 stands for "no card"
fn cards(s: &str) -> anyhow::Result<Vec<Card>> {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if d <= 8 => Ok(Card::from(d as u8)),
            _ => Err(anyhow::anyhow!("invalid card digit {:?}", c)),
        })
        .collect()
}

fn sized<T>(items: Vec<T>, n: usize, what: &str) -> anyhow::Result<Vec<T>> {
    match items.len() == n {
        true => Ok(items),
        false => Err(anyhow::anyhow!("expected {} {}, found {}", n, what, items.len())),
    }
}

fn parse(s: &str) -> anyhow::Result<Game> {
    let fields = s.trim().split('.').collect::<Vec<_>>();
    let [players, deck, faceup, discards, played, known, active, mask, hands, drawn] =
        fields.as_slice()
    else {
        anyhow::bail!("expected 10 fields, found {}", fields.len());
    };
    let players = players.parse::<usize>()?;
    anyhow::ensure!(
        (crate::MIN_PLAYERS..=crate::MAX_PLAYERS).contains(&players),
        "unsupported player count {}",
        players
    );
    let deck = deck.parse::<usize>()?;
    anyhow::ensure!(deck < DECK_SPACE, "deck index {} out of range", deck);
    let deck = Deck::from(deck);
    anyhow::ensure!(!deck.is_empty(), "a live game needs the face-down card");
    let faceup = Stack::try_from(*faceup)?;
    let discards = discards
        .split('-')
        .map(Stack::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let discards = sized(discards, players, "discard stacks")?;
    let played = sized(cards(played)?, players, "last plays")?;
    let known = known
        .split('-')
        .map(|row| cards(row).and_then(|row| sized(row, players, "known cards")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let known = sized(known, players, "knowledge rows")?;
    let active = active.parse::<usize>()?;
    anyhow::ensure!(active < players, "active player {} out of range", active);
    let mask = mask.parse::<usize>()?;
    anyhow::ensure!(mask < 1 << players, "elimination mask {} out of range", mask);
    let eliminated = (0..players).map(|p| mask & (1 << p) != 0).collect::<Vec<_>>();
    anyhow::ensure!(!eliminated[active], "active player {} is eliminated", active);
    anyhow::ensure!(
        eliminated.iter().filter(|out| !**out).count() > 1,
        "game is already decided"
    );
    let hands = sized(cards(hands)?, players, "hands")?;
    for p in 0..players {
        anyhow::ensure!(
            eliminated[p] == hands[p].is_none(),
            "hand of player {} does not match elimination",
            p
        );
    }
    let drawn = sized(cards(drawn)?, 1, "drawn cards")?[0];
    anyhow::ensure!(!drawn.is_none(), "active player has not drawn");
    let mut counts = [0usize; 9];
    faceup
        .iter()
        .chain(discards.iter().flat_map(|s| s.iter()))
        .chain(hands.iter())
        .chain(std::iter::once(&drawn))
        .for_each(|c| counts[c.value() as usize] += 1);
    for card in Card::all() {
        let total = counts[card.value() as usize] + deck.count(card) as usize;
        anyhow::ensure!(
            total == card.multiplicity() as usize,
            "found {} copies of the {}",
            total,
            card
        );
    }
    let mut events = Events::new(players);
    events.log(format!("Resumed from token {}", s.trim()));
    Ok(Game {
        players,
        deck,
        faceup,
        discards,
        played,
        known,
        active,
        eliminated,
        hands,
        drawn,
        ended: false,
        winner: 0,
        stupid: false,
        last: None,
        events,
    })
}

impl TryFrom<&str> for Game {
    type Error = GameError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse(s).map_err(|e| GameError::Token(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn resumes_where_it_left_off() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let mut game = Game::new(2, rng).unwrap();
        game.apply(Action::new(true, 1, Card::Baron), rng);
        if game.ended() {
            game.reset(rng);
        }
        let token = game.token();
        let resumed = Game::try_from(token.as_str()).unwrap();
        assert_eq!(resumed.token(), token);
        assert_eq!(resumed.hand(0), game.hand(0));
        assert_eq!(resumed.hand(1), game.hand(1));
        assert_eq!(resumed.drawn(), game.drawn());
        assert_eq!(resumed.deck(), game.deck());
        assert_eq!(resumed.active(), game.active());
        assert_eq!(resumed.events().lines().len(), 1);
    }

    #[test]
    fn four_player_token() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let game = Game::new(4, rng).unwrap();
        let token = game.token();
        assert_eq!(token.split('.').count(), 10);
        assert_eq!(Game::try_from(token.as_str()).unwrap().token(), token);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Game::try_from("").is_err());
        assert!(Game::try_from("hello").is_err());
        assert!(Game::try_from("5.0.....0.0.0000.1").is_err());
    }

    #[test]
    fn rejects_an_empty_deck() {
        let live = "2.1.123.11234-1455.45.00-00.0.0.87.6";
        let dead = "2.0.123.11234-11455.45.00-00.0.0.87.6";
        let game = Game::try_from(live).unwrap();
        assert_eq!(game.deck().size(), 1);
        assert_eq!(game.conserved(), 16);
        assert!(Game::try_from(dead).is_err());
    }

    #[test]
    fn rejects_missing_cards() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let game = Game::new(2, rng).unwrap();
        let mut fields = game
            .token()
            .split('.')
            .map(String::from)
            .collect::<Vec<_>>();
        fields[2] = String::new();
        assert!(Game::try_from(fields.join(".").as_str()).is_err());
    }
}

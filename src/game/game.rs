use super::action::Action;
use super::error::GameError;
use super::events::Events;
use super::terminal::Final;
use crate::Position;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Stack;
use rand::Rng;

/// The authoritative state of one Love Letter round.
///
/// Public information lives in the face-up pile, the discard stacks,
/// and each player's last play. Private information is each player's
/// held card, the active player's drawn card, and the knowledge matrix
/// `known[p][q]` of what `p` has seen in `q`'s hand.
///
/// The deck includes the card set aside face-down at the deal, so the
/// round ends once a play leaves a single card in it.
///
/// `apply` never fails. Illegal choices eliminate the player who made
/// them and flag the loss as stupid, so every game reaches an outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub(super) players: usize,
    pub(super) deck: Deck,
    pub(super) faceup: Stack,
    pub(super) discards: Vec<Stack>,
    pub(super) played: Vec<Card>,
    pub(super) known: Vec<Vec<Card>>,
    pub(super) active: Position,
    pub(super) eliminated: Vec<bool>,
    pub(super) hands: Vec<Card>,
    pub(super) drawn: Card,
    pub(super) ended: bool,
    pub(super) winner: Position,
    pub(super) stupid: bool,
    pub(super) last: Option<Final>,
    pub(super) events: Events,
}

// construction
impl Game {
    /// Deals a fresh round. Only 2, 3, or 4 players are supported.
    pub fn new<R: Rng>(players: usize, rng: &mut R) -> Result<Self, GameError> {
        if (crate::MIN_PLAYERS..=crate::MAX_PLAYERS).contains(&players) {
            Ok(Self::deal(players, rng))
        } else {
            Err(GameError::PlayerCount(players))
        }
    }
    /// Deals a two-player round, the only size the learners know.
    pub fn heads_up<R: Rng>(rng: &mut R) -> Self {
        Self::deal(crate::N, rng)
    }
    /// Starts the next round at the same table, keeping seat names.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let names = self.events.names().to_vec();
        *self = Self::deal(self.players, rng);
        self.events.rename(names);
    }
    /// A round with hand-picked cards: `hands[0]` belongs to the active
    /// player, who also holds `drawn`. The deck is whatever remains to be
    /// drawn, including the face-down card. Used to stage scenarios.
    pub fn arranged(deck: Deck, hands: Vec<Card>, drawn: Card) -> Self {
        let players = hands.len();
        assert!((crate::MIN_PLAYERS..=crate::MAX_PLAYERS).contains(&players));
        Self {
            hands,
            drawn,
            deck,
            ..Self::empty(players)
        }
    }
    fn empty(players: usize) -> Self {
        Self {
            players,
            deck: Deck::full(),
            faceup: Stack::new(),
            discards: vec![Stack::new(); players],
            played: vec![Card::None; players],
            known: vec![vec![Card::None; players]; players],
            active: 0,
            eliminated: vec![false; players],
            hands: vec![Card::None; players],
            drawn: Card::None,
            ended: false,
            winner: 0,
            stupid: false,
            last: None,
            events: Events::new(players),
        }
    }
    fn deal<R: Rng>(players: usize, rng: &mut R) -> Self {
        let mut game = Self::empty(players);
        if players == crate::N {
            for _ in 0..crate::FACEUP_HEADSUP {
                let card = game.deck.draw(rng);
                game.faceup.push(card);
            }
        }
        for p in 0..players {
            game.hands[p] = game.deck.draw(rng);
        }
        game.drawn = game.deck.draw(rng);
        let faceup = game.faceup.strings().join(", ");
        match faceup.is_empty() {
            true => game.note(|_| "A new game began".to_string()),
            false => game.note(|_| format!("A new game began with {} face-up", faceup)),
        }
        game
    }
}

// read-only projections
impl Game {
    pub fn players(&self) -> usize {
        self.players
    }
    pub fn active(&self) -> Position {
        self.active
    }
    pub fn ended(&self) -> bool {
        self.ended
    }
    /// meaningful once the game has ended
    pub fn winner(&self) -> Position {
        self.winner
    }
    /// whether the game ended on an avoidable rule violation
    pub fn stupid(&self) -> bool {
        self.stupid
    }
    pub fn final_state(&self) -> Option<Final> {
        self.last
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn faceup(&self) -> &Stack {
        &self.faceup
    }
    pub fn discards(&self, p: Position) -> &Stack {
        &self.discards[p]
    }
    /// the card `p` most recently chose to play
    pub fn last_play(&self, p: Position) -> Card {
        self.played[p]
    }
    /// the card `p` holds (the older card, for the active player)
    pub fn hand(&self, p: Position) -> Card {
        self.hands[p]
    }
    /// the active player's freshly drawn card
    pub fn drawn(&self) -> Card {
        self.drawn
    }
    pub fn is_eliminated(&self, p: Position) -> bool {
        self.eliminated[p]
    }
    /// what `p` has seen in `q`'s hand, if it is still there
    pub fn known(&self, p: Position, q: Position) -> Card {
        self.known[p][q]
    }
    /// summed face value of `p`'s discards
    pub fn score(&self, p: Position) -> i32 {
        self.discards[p].score()
    }
    /// every card anyone can see: face-up burns and all discards
    pub fn seen(&self) -> Deck {
        let mut seen = Deck::from(&self.faceup);
        self.discards.iter().for_each(|s| seen.add_stack(s));
        seen
    }
    pub fn events(&self) -> &Events {
        &self.events
    }
    pub fn rename(&mut self, names: Vec<String>) {
        self.events.rename(names);
    }
    /// Stops recording events for this game and every clone of it.
    /// Self-play has no reader for the log.
    pub fn mute(&mut self) {
        self.events.mute();
    }
    /// cards accounted for across deck, hands, discards, and burns.
    /// always sixteen for a dealt game.
    pub fn conserved(&self) -> usize {
        self.deck.size()
            + self.faceup.len()
            + self.discards.iter().map(Stack::len).sum::<usize>()
            + self.hands.iter().filter(|c| !c.is_none()).count()
            + (!self.drawn.is_none()) as usize
    }
}

// turn resolution
impl Game {
    /// Plays one turn for the active player. Does nothing once ended.
    pub fn apply<R: Rng>(&mut self, action: Action, rng: &mut R) {
        if self.ended {
            return;
        }
        let actor = self.active;
        if !action.recent {
            std::mem::swap(&mut self.drawn, &mut self.hands[actor]);
        }
        let card = std::mem::take(&mut self.drawn);
        let kept = self.hands[actor];
        self.discards[actor].push(card);
        self.played[actor] = card;
        self.forget(actor, card);
        self.note(|e| format!("{} played the {}", e.name(actor), card));
        if kept == Card::Countess && matches!(card, Card::King | Card::Prince) {
            self.note(|e| format!("{} was caught hiding the Countess", e.name(actor)));
            self.eliminate(actor, true);
        } else {
            self.resolve(actor, card, action, rng);
        }
        self.advance(card, rng);
    }

    fn resolve<R: Rng>(&mut self, actor: Position, card: Card, action: Action, rng: &mut R) {
        match card {
            Card::Guard => self.aimed(actor, action, |g, t| g.guard(actor, t, action.guess)),
            Card::Priest => self.aimed(actor, action, |g, t| g.priest(actor, t)),
            Card::Baron => self.aimed(actor, action, |g, t| g.baron(actor, t)),
            Card::King => self.aimed(actor, action, |g, t| g.king(actor, t)),
            Card::Prince => self.prince(actor, action, rng),
            Card::Princess => self.eliminate(actor, true),
            Card::Handmaid | Card::Countess | Card::None => {}
        }
    }

    /// shared targeting for the cards that must land on an opponent
    fn aimed<F>(&mut self, actor: Position, action: Action, effect: F)
    where
        F: FnOnce(&mut Self, Position),
    {
        let target = self.seat(actor, action.target);
        if self.others_protected(actor) {
            self.note(|_| "Every opponent was protected".to_string());
        } else if target == actor || self.eliminated[target] {
            self.note(|e| format!("{} picked an impossible target", e.name(actor)));
            self.eliminate(actor, true);
        } else if self.protected(target) {
            self.note(|e| format!("{} was protected by the Handmaid", e.name(target)));
        } else {
            effect(self, target);
        }
    }

    fn guard(&mut self, actor: Position, target: Position, guess: Card) {
        self.note(|e| format!("{} guessed {} holds the {}", e.name(actor), e.name(target), guess));
        if guess > Card::Guard && self.hands[target] == guess {
            self.eliminate(target, false);
        }
    }

    fn priest(&mut self, actor: Position, target: Position) {
        self.known[actor][target] = self.hands[target];
        self.note(|e| format!("{} looked at {}'s hand", e.name(actor), e.name(target)));
    }

    fn baron(&mut self, actor: Position, target: Position) {
        let mine = self.hands[actor];
        let theirs = self.hands[target];
        match mine.cmp(&theirs) {
            std::cmp::Ordering::Less => self.eliminate(actor, false),
            std::cmp::Ordering::Greater => self.eliminate(target, false),
            std::cmp::Ordering::Equal => {
                self.known[actor][target] = theirs;
                self.known[target][actor] = mine;
                self.note(|_| "The Baron compared equal hands".to_string());
            }
        }
    }

    fn king(&mut self, actor: Position, target: Position) {
        self.hands.swap(actor, target);
        self.known.iter_mut().for_each(|row| row.swap(actor, target));
        self.known[actor][actor] = Card::None;
        self.known[target][target] = Card::None;
        self.known[actor][target] = self.hands[target];
        self.known[target][actor] = self.hands[actor];
        self.note(|e| format!("{} traded hands with {}", e.name(actor), e.name(target)));
    }

    fn prince<R: Rng>(&mut self, actor: Position, action: Action, rng: &mut R) {
        let chosen = self.seat(actor, action.target);
        let target = if chosen == actor {
            actor
        } else if self.eliminated[chosen] {
            self.note(|e| format!("{} picked an impossible target", e.name(actor)));
            return self.eliminate(actor, true);
        } else if self.protected(chosen) && self.others_protected(actor) {
            actor
        } else if self.protected(chosen) {
            return self.note(|e| format!("{} was protected by the Handmaid", e.name(chosen)));
        } else {
            chosen
        };
        let card = std::mem::take(&mut self.hands[target]);
        self.discards[target].push(card);
        self.known.iter_mut().for_each(|row| row[target] = Card::None);
        self.note(|e| format!("{} was made to discard the {}", e.name(target), card));
        if card == Card::Princess {
            // stupid only if some opponent could have been hit instead
            self.eliminate(target, target == actor && !self.others_protected(actor));
        } else {
            self.hands[target] = self.deck.draw(rng);
        }
    }

    /// records an event, formatting it only when someone will read it
    fn note<F>(&mut self, line: F)
    where
        F: FnOnce(&Events) -> String,
    {
        if !self.events.is_muted() {
            let line = line(&self.events);
            self.events.log(line);
        }
    }

    /// knocks `p` out, revealing their hand onto their discards
    fn eliminate(&mut self, p: Position, stupid: bool) {
        if self.eliminated[p] {
            return;
        }
        self.eliminated[p] = true;
        self.stupid = stupid;
        let card = std::mem::take(&mut self.hands[p]);
        if !card.is_none() {
            self.discards[p].push(card);
        }
        self.known.iter_mut().for_each(|row| row[p] = Card::None);
        self.note(|e| format!(
            "{} was eliminated{}",
            e.name(p),
            if stupid { " by their own mistake" } else { "" }
        ));
    }

    fn advance<R: Rng>(&mut self, discard: Card, rng: &mut R) {
        let live = (0..self.players)
            .filter(|p| !self.eliminated[*p])
            .collect::<Vec<_>>();
        if let [only] = live.as_slice() {
            self.finish(*only, discard);
        } else if self.deck.size() > 1 {
            self.active = self.next_live(self.active);
            self.drawn = self.deck.draw(rng);
        } else {
            self.stupid = false;
            let winner = self.showdown();
            self.note(|_| "The deck ran out".to_string());
            self.finish(winner, discard);
        }
    }

    /// highest hand wins, then highest discard score, then
    /// turn order starting from the active player
    fn showdown(&self) -> Position {
        (0..self.players)
            .filter(|p| !self.eliminated[*p])
            .max_by_key(|p| {
                (
                    self.hands[*p],
                    self.discards[*p].score(),
                    std::cmp::Reverse((p + self.players - self.active) % self.players),
                )
            })
            .expect("at least one live player")
    }

    fn finish(&mut self, winner: Position, discard: Card) {
        debug_assert!(!self.ended);
        let actor = self.active;
        let opponent = if winner == actor {
            (actor + 1) % self.players
        } else {
            winner
        };
        self.ended = true;
        self.winner = winner;
        self.last = Some(Final {
            discard,
            retained: self.holding(actor),
            opponent: self.holding(opponent),
            remaining: self.deck.size(),
            won: winner == actor,
        });
        self.note(|e| format!("{} won", e.name(winner)));
    }
}

// seating helpers
impl Game {
    fn seat(&self, actor: Position, offset: usize) -> Position {
        (actor + offset) % self.players
    }
    fn next_live(&self, p: Position) -> Position {
        (1..=self.players)
            .map(|i| (p + i) % self.players)
            .find(|q| !self.eliminated[*q])
            .expect("at least one live player")
    }
    /// a Handmaid shields its player until their next turn
    fn protected(&self, p: Position) -> bool {
        p != self.active && !self.eliminated[p] && self.played[p] == Card::Handmaid
    }
    fn others_protected(&self, actor: Position) -> bool {
        (0..self.players)
            .filter(|p| *p != actor && !self.eliminated[*p])
            .all(|p| self.protected(p))
    }
    /// the card `p` ended with, read back from their discards if eliminated
    fn holding(&self, p: Position) -> Card {
        match self.eliminated[p] {
            true => self.discards[p].last().unwrap_or_default(),
            false => self.hands[p],
        }
    }
    /// once a card is played it no longer sits in the player's hand
    fn forget(&mut self, p: Position, card: Card) {
        self.known
            .iter_mut()
            .filter(|row| row[p] == card)
            .for_each(|row| row[p] = Card::None);
    }
}

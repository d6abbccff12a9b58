//! A face-down stack: take from the front, insert at the back.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::collection::{CardCollection, EventOf, TakenCards};
use crate::core::{Card, GameRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackAction {
    Shuffle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackInsert {
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackTake {
    Top,
}

/// Ordered stack. Index 0 is the top.
///
/// A stack can be locked against inserts and/or takes.
#[derive(Clone, Debug)]
pub struct CardStack {
    cards: Vector<Card>,
    can_insert: bool,
    can_take: bool,
    allow_duplicates: bool,
    events: Vec<EventOf<CardStack>>,
}

impl Default for CardStack {
    fn default() -> Self {
        Self {
            cards: Vector::new(),
            can_insert: true,
            can_take: true,
            allow_duplicates: false,
            events: Vec::new(),
        }
    }
}

impl CardStack {
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Refuse all inserts.
    #[must_use]
    pub fn insert_locked(mut self) -> Self {
        self.can_insert = false;
        self
    }

    /// Refuse all takes.
    #[must_use]
    pub fn take_locked(mut self) -> Self {
        self.can_take = false;
        self
    }

    #[must_use]
    pub fn allow_duplicates(mut self) -> Self {
        self.allow_duplicates = true;
        self
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card a `Top` take would return.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.front()
    }
}

impl CardCollection for CardStack {
    type Action = StackAction;
    type Insert = StackInsert;
    type Take = StackTake;
    type State = Vector<Card>;

    fn action_is_valid(&self, action: &StackAction) -> bool {
        match action {
            StackAction::Shuffle => true,
        }
    }

    fn apply_action(&mut self, action: &StackAction, rng: &mut GameRng) {
        match action {
            StackAction::Shuffle => rng.shuffle_vector(&mut self.cards),
        }
    }

    fn insert_is_valid(&self, insert: &StackInsert, card: &Card) -> bool {
        match insert {
            StackInsert::Bottom => {
                self.can_insert && (self.allow_duplicates || !self.cards.contains(card))
            }
        }
    }

    fn apply_insert(&mut self, insert: &StackInsert, card: Card) {
        match insert {
            StackInsert::Bottom => self.cards.push_back(card),
        }
    }

    fn take_is_valid(&self, take: &StackTake) -> bool {
        match take {
            StackTake::Top => self.can_take && !self.cards.is_empty(),
        }
    }

    fn apply_take(&mut self, take: &StackTake) -> TakenCards {
        match take {
            StackTake::Top => self.cards.pop_front().into_iter().collect(),
        }
    }

    fn state(&self) -> Vector<Card> {
        self.cards.clone()
    }

    fn set_state(&mut self, state: Vector<Card>) {
        self.cards = state;
    }

    fn events_mut(&mut self) -> &mut Vec<EventOf<CardStack>> {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{standard_deck, Rank, Suit};

    #[test]
    fn test_take_from_front_insert_at_back() {
        let a = Card::new(Suit::Clubs, Rank::Two);
        let b = Card::new(Suit::Clubs, Rank::Three);
        let c = Card::new(Suit::Clubs, Rank::Four);
        let mut stack = CardStack::new([a, b]);

        assert_eq!(stack.do_take(&StackTake::Top).as_slice(), &[a]);
        stack.do_insert(&StackInsert::Bottom, c);

        assert_eq!(stack.cards().iter().copied().collect::<Vec<_>>(), vec![b, c]);
    }

    #[test]
    fn test_empty_stack_take_invalid() {
        let mut stack = CardStack::new([]);
        assert!(!stack.take_is_valid(&StackTake::Top));
        assert!(stack.do_take(&StackTake::Top).is_empty());
    }

    #[test]
    fn test_locks() {
        let card = Card::new(Suit::Hearts, Rank::Ace);
        let stack = CardStack::new([card]).insert_locked().take_locked();

        assert!(!stack.take_is_valid(&StackTake::Top));
        assert!(!stack.insert_is_valid(&StackInsert::Bottom, &Card::new(Suit::Hearts, Rank::King)));
    }

    #[test]
    fn test_duplicate_policy() {
        let card = Card::new(Suit::Hearts, Rank::Ace);
        assert!(!CardStack::new([card]).insert_is_valid(&StackInsert::Bottom, &card));
        assert!(CardStack::new([card])
            .allow_duplicates()
            .insert_is_valid(&StackInsert::Bottom, &card));
    }

    #[test]
    fn test_shuffle_preserves_membership() {
        let mut stack = CardStack::new(standard_deck());
        let mut rng = GameRng::new(7);
        let before = stack.state();

        stack.do_action(&StackAction::Shuffle, &mut rng);

        assert_ne!(stack.state(), before);
        let mut after: Vec<_> = stack.cards().iter().copied().collect();
        let mut expected: Vec<_> = before.iter().copied().collect();
        after.sort_by_key(|c| (c.suit, c.rank));
        expected.sort_by_key(|c| (c.suit, c.rank));
        assert_eq!(after, expected);
    }
}

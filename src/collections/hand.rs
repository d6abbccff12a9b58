//! A player's hand: an ordered row of cards.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::collection::{CardCollection, EventOf, NoMove, TakenCards};
use crate::core::{Card, GameRng};

/// Insert a card so that it ends up at this index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandInsert(pub usize);

/// Take the card at this index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandTake(pub usize);

/// Ordered cards with optional size bounds and duplicate policy.
///
/// ```
/// use rust_cards::collections::{CardCollection, Hand, HandInsert, HandTake};
/// use rust_cards::core::{Card, Rank, Suit};
///
/// let mut hand = Hand::new().with_max_cards(2);
/// let seven = Card::new(Suit::Spades, Rank::Seven);
///
/// hand.do_insert(&HandInsert(0), seven);
/// assert!(!hand.insert_is_valid(&HandInsert(1), &seven)); // duplicate
/// assert_eq!(hand.do_take(&HandTake(0)).as_slice(), &[seven]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Hand {
    cards: Vector<Card>,
    allow_duplicates: bool,
    min_cards: Option<usize>,
    max_cards: Option<usize>,
    events: Vec<EventOf<Hand>>,
}

impl Hand {
    /// An empty hand that forbids duplicates and has no size bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A hand holding `cards` in order.
    #[must_use]
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn allow_duplicates(mut self) -> Self {
        self.allow_duplicates = true;
        self
    }

    /// Takes are refused once the hand is down to `min` cards.
    #[must_use]
    pub fn with_min_cards(mut self, min: usize) -> Self {
        self.min_cards = Some(min);
        self
    }

    /// Inserts are refused once the hand holds `max` cards.
    #[must_use]
    pub fn with_max_cards(mut self, max: usize) -> Self {
        self.max_cards = Some(max);
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

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }
}

impl CardCollection for Hand {
    type Action = NoMove;
    type Insert = HandInsert;
    type Take = HandTake;
    type State = Vector<Card>;

    fn action_is_valid(&self, action: &NoMove) -> bool {
        match *action {}
    }

    fn apply_action(&mut self, action: &NoMove, _rng: &mut GameRng) {
        match *action {}
    }

    fn insert_is_valid(&self, insert: &HandInsert, card: &Card) -> bool {
        let HandInsert(index) = *insert;
        index <= self.cards.len()
            && (self.allow_duplicates || !self.cards.contains(card))
            && self.max_cards.map_or(true, |max| self.cards.len() < max)
    }

    fn apply_insert(&mut self, insert: &HandInsert, card: Card) {
        self.cards.insert(insert.0, card);
    }

    fn take_is_valid(&self, take: &HandTake) -> bool {
        let HandTake(index) = *take;
        index < self.cards.len() && self.min_cards.map_or(true, |min| self.cards.len() > min)
    }

    fn apply_take(&mut self, take: &HandTake) -> TakenCards {
        TakenCards::from_elem(self.cards.remove(take.0), 1)
    }

    fn state(&self) -> Vector<Card> {
        self.cards.clone()
    }

    fn set_state(&mut self, state: Vector<Card>) {
        self.cards = state;
    }

    fn events_mut(&mut self) -> &mut Vec<EventOf<Hand>> {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CollectionEvent;
    use crate::core::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(Suit::Hearts, rank)
    }

    #[test]
    fn test_insert_positions() {
        let mut hand = Hand::with_cards([card(Rank::Two), card(Rank::Four)]);

        hand.do_insert(&HandInsert(1), card(Rank::Three));
        hand.do_insert(&HandInsert(3), card(Rank::Five));

        let ranks: Vec<_> = hand.cards().iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let hand = Hand::with_cards([card(Rank::Two)]);
        assert!(hand.insert_is_valid(&HandInsert(1), &card(Rank::Three)));
        assert!(!hand.insert_is_valid(&HandInsert(2), &card(Rank::Three)));
    }

    #[test]
    fn test_duplicates() {
        let hand = Hand::with_cards([card(Rank::Two)]);
        assert!(!hand.insert_is_valid(&HandInsert(0), &card(Rank::Two)));

        let hand = Hand::with_cards([card(Rank::Two)]).allow_duplicates();
        assert!(hand.insert_is_valid(&HandInsert(0), &card(Rank::Two)));
    }

    #[test]
    fn test_size_bounds() {
        let hand = Hand::with_cards([card(Rank::Two), card(Rank::Three)])
            .with_min_cards(2)
            .with_max_cards(2);

        assert!(!hand.insert_is_valid(&HandInsert(0), &card(Rank::Four)));
        assert!(!hand.take_is_valid(&HandTake(0)));
    }

    #[test]
    fn test_invalid_take_is_noop() {
        let mut hand = Hand::with_cards([card(Rank::Two)]);
        let before = hand.state();

        assert!(hand.do_take(&HandTake(5)).is_empty());
        assert_eq!(hand.state(), before);
        assert!(hand.drain_events().is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid insert")]
    fn test_invalid_insert_panics() {
        let mut hand = Hand::with_cards([card(Rank::Two)]);
        hand.do_insert(&HandInsert(0), card(Rank::Two));
    }

    #[test]
    fn test_events() {
        let mut hand = Hand::new();
        hand.do_insert(&HandInsert(0), card(Rank::Ace));
        hand.do_take(&HandTake(0));

        let events = hand.drain_events();
        assert_eq!(
            events,
            vec![
                CollectionEvent::Insert(HandInsert(0), card(Rank::Ace)),
                CollectionEvent::Take(HandTake(0)),
            ]
        );
        assert!(hand.drain_events().is_empty());
    }

    #[test]
    fn test_speculative_take_restores() {
        let mut hand = Hand::with_cards([card(Rank::Two), card(Rank::Three)]);
        let before = hand.state();

        let taken = hand.speculative_take(&HandTake(1));
        assert_eq!(taken.as_deref(), Some(&[card(Rank::Three)][..]));
        assert_eq!(hand.state(), before);
        assert!(hand.drain_events().is_empty());

        assert_eq!(hand.speculative_take(&HandTake(2)), None);
        assert_eq!(hand.state(), before);
    }
}

//! The shared Sjuan pile: one run per suit, built outwards from the seven.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::collections::{CardCollection, EventOf, NoMove, TakenCards};
use crate::core::{Card, GameRng, Rank, Suit};

/// Place a card on the ladder. The suit and rank decide where it goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LadderInsert {
    Place,
}

impl std::fmt::Display for LadderInsert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("insert")
    }
}

/// Runs of consecutive ranks, keyed by suit.
///
/// A run starts with a seven and grows one rank at a time at either end.
/// The low end stops at Ace (which sits below Two) and the high end stops
/// at King. Cards never leave the ladder.
#[derive(Clone, Debug, Default)]
pub struct SuitLadder {
    runs: OrdMap<Suit, Vector<Card>>,
    events: Vec<EventOf<SuitLadder>>,
}

impl SuitLadder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All runs, by suit.
    #[must_use]
    pub fn cards(&self) -> &OrdMap<Suit, Vector<Card>> {
        &self.runs
    }

    /// The run for one suit, lowest rank first.
    #[must_use]
    pub fn run(&self, suit: Suit) -> Option<&Vector<Card>> {
        self.runs.get(&suit)
    }

    /// Total cards on the ladder.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.values().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Ranks that can currently be placed in `suit`.
    #[must_use]
    pub fn open_ranks(&self, suit: Suit) -> Vec<Rank> {
        match self.ends(suit) {
            None => vec![Rank::Seven],
            Some((low, high)) => {
                let mut ranks = Vec::with_capacity(2);
                if low != Rank::Ace {
                    ranks.push(low.pred());
                }
                if high != Rank::King {
                    ranks.push(high.succ());
                }
                ranks
            }
        }
    }

    fn ends(&self, suit: Suit) -> Option<(Rank, Rank)> {
        let run = self.runs.get(&suit)?;
        Some((run.front()?.rank, run.back()?.rank))
    }
}

impl CardCollection for SuitLadder {
    type Action = NoMove;
    type Insert = LadderInsert;
    type Take = NoMove;
    type State = OrdMap<Suit, Vector<Card>>;

    fn action_is_valid(&self, action: &NoMove) -> bool {
        match *action {}
    }

    fn apply_action(&mut self, action: &NoMove, _rng: &mut GameRng) {
        match *action {}
    }

    fn insert_is_valid(&self, insert: &LadderInsert, card: &Card) -> bool {
        match insert {
            LadderInsert::Place => self.open_ranks(card.suit).contains(&card.rank),
        }
    }

    fn apply_insert(&mut self, insert: &LadderInsert, card: Card) {
        match insert {
            LadderInsert::Place => match self.runs.get_mut(&card.suit) {
                None => {
                    self.runs.insert(card.suit, Vector::unit(card));
                }
                Some(run) => {
                    let below = run.front().map(|low| low.rank.pred());
                    if below == Some(card.rank) {
                        run.push_front(card);
                    } else {
                        run.push_back(card);
                    }
                }
            },
        }
    }

    fn take_is_valid(&self, take: &NoMove) -> bool {
        match *take {}
    }

    fn apply_take(&mut self, take: &NoMove) -> TakenCards {
        match *take {}
    }

    fn state(&self) -> Self::State {
        self.runs.clone()
    }

    fn set_state(&mut self, state: Self::State) {
        self.runs = state;
    }

    fn events_mut(&mut self) -> &mut Vec<EventOf<SuitLadder>> {
        &mut self.events
    }
}

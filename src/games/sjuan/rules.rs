//! Sjuan rules: routing, per-phase legality and batch application.

use smallvec::SmallVec;
use tracing::debug;

use super::ladder::LadderInsert;
use super::moves::{SjuanAction, SjuanInsert, SjuanMove, SjuanTake};
use super::phase::Phase;
use super::state::{SjuanEvent, SjuanState};
use crate::collections::{
    bind_insert, bind_take, CardCollection, HandInsert, HandTake, InsertSite, TakeSite,
};
use crate::core::Rank;
use crate::rules::{ActionRoute, Move, RulesEngine, Snapshot};

/// A side effect applied after the moves of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredEffect {
    /// The acting player succumbed; the previous player starts giving.
    EnterGiveCards,
}

/// What the rules make of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub is_valid: bool,
    /// The batch ends the current phase.
    pub ends_turn: bool,
    pub deferred: Option<DeferredEffect>,
    /// New `can_skip` value when the phase does not end.
    pub skippable: Option<bool>,
}

impl MoveInfo {
    fn invalid() -> Self {
        Self {
            is_valid: false,
            ends_turn: false,
            deferred: None,
            skippable: None,
        }
    }

    fn valid(ends_turn: bool) -> Self {
        Self {
            is_valid: true,
            ends_turn,
            deferred: None,
            skippable: None,
        }
    }
}

/// A move playable for one card, with its participants spelled out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateMove {
    pub mv: SjuanMove,
    pub take: SjuanTake,
    pub insert: SjuanInsert,
}

/// The Sjuan rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct SjuanRules;

impl SjuanRules {
    /// Classify a batch against the current phase.
    ///
    /// Leaves the state unchanged.
    pub fn move_info(&self, moves: &[SjuanMove], state: &mut SjuanState) -> MoveInfo {
        if state.is_over() {
            return MoveInfo::invalid();
        }

        let mut info = match state.phase().clone() {
            Phase::DoQueue(_) => {
                // Queued moves apply in order; a batch may cover any prefix.
                let queue = state.queue();
                let in_order = moves.len() <= queue.len()
                    && moves.iter().zip(queue.iter()).all(|(a, b)| a == b);
                let ends_turn = moves.len() == queue.len();
                return MoveInfo {
                    is_valid: in_order && self.queued_moves_are_valid(moves, state),
                    ..MoveInfo::valid(ends_turn)
                };
            }
            Phase::PlayerTurn(i) => match moves {
                [mv] => self.turn_move_info(mv, i, state),
                _ => MoveInfo::invalid(),
            },
            Phase::GiveCards(i, _) => match moves {
                [Move::FromTo(SjuanTake::Myself(_), SjuanInsert::Player(target, _))] => {
                    if *target == state.turn_incr(i, 1) {
                        MoveInfo::valid(true)
                    } else if *target == i {
                        MoveInfo::valid(false)
                    } else {
                        MoveInfo::invalid()
                    }
                }
                _ => MoveInfo::invalid(),
            },
        };

        info.is_valid = info.is_valid && moves.iter().all(|mv| self.single_move_is_valid(mv, state));
        info
    }

    /// Check queued moves one after another, each against the state the
    /// previous ones leave behind, then put everything back.
    fn queued_moves_are_valid(&self, moves: &[SjuanMove], state: &mut SjuanState) -> bool {
        let saved = state.save();
        let mut valid = true;
        for mv in moves {
            if !self.single_move_is_valid(mv, state) {
                valid = false;
                break;
            }
            self.apply_move(mv, state);
        }
        state.restore(saved);
        valid
    }

    fn turn_move_info(&self, mv: &SjuanMove, turn: usize, state: &mut SjuanState) -> MoveInfo {
        match mv {
            Move::FromTo(SjuanTake::Myself(HandTake(k)), SjuanInsert::Ladder(_)) => {
                let played = state
                    .hand_mut(turn)
                    .and_then(|hand| hand.speculative_take(&HandTake(*k)));
                let extra_move = played
                    .and_then(|cards| cards.first().copied())
                    .map_or(false, |card| matches!(card.rank, Rank::Ace | Rank::King));
                if extra_move {
                    MoveInfo {
                        skippable: Some(true),
                        ..MoveInfo::valid(false)
                    }
                } else {
                    MoveInfo::valid(true)
                }
            }
            Move::FromTo(SjuanTake::Myself(_), SjuanInsert::Player(j, _)) if *j == turn => {
                MoveInfo::valid(false)
            }
            Move::Action(SjuanAction::Skip) if state.can_skip() => MoveInfo::valid(true),
            Move::Action(SjuanAction::AskForCards) if state.can_succumb() => MoveInfo {
                deferred: Some(DeferredEffect::EnterGiveCards),
                ..MoveInfo::valid(false)
            },
            _ => MoveInfo::invalid(),
        }
    }

    /// Candidate moves for the card at `card_index` in the acting player's
    /// hand. Every candidate is legal under `move_info`.
    #[must_use]
    pub fn moves_for_card(&self, card_index: usize, state: &SjuanState) -> Vec<CandidateMove> {
        let Some(turn) = state.turn_index() else {
            return Vec::new();
        };
        if state.is_over() || state.phase().is_do_queue() {
            return Vec::new();
        }
        let hand = &state.players()[turn];
        let Some(card) = hand.get(card_index).copied() else {
            return Vec::new();
        };

        let take = SjuanTake::Myself(HandTake(card_index));
        let mut inserts: SmallVec<[SjuanInsert; 16]> = (0..hand.len())
            .filter(|&j| j != card_index)
            .map(|j| SjuanInsert::Player(turn, HandInsert(j)))
            .collect();

        match state.phase() {
            Phase::PlayerTurn(_) => {
                if state.ladder().insert_is_valid(&LadderInsert::Place, &card) {
                    inserts.push(SjuanInsert::Ladder(LadderInsert::Place));
                }
            }
            Phase::GiveCards(..) => {
                let asker = state.turn_incr(turn, 1);
                let receives = state.players()[asker].insert_is_valid(&HandInsert(0), &card);
                if asker != turn && receives {
                    inserts.push(SjuanInsert::Player(asker, HandInsert(0)));
                }
            }
            Phase::DoQueue(_) => {}
        }

        inserts
            .into_iter()
            .map(|insert| CandidateMove {
                mv: Move::FromTo(take, insert),
                take,
                insert,
            })
            .collect()
    }

    /// Stand-alone actions currently open to the acting player.
    #[must_use]
    pub fn available_actions(&self, state: &SjuanState) -> Vec<SjuanAction> {
        if state.is_over() || !state.phase().is_player_turn() {
            return Vec::new();
        }
        let mut actions = Vec::with_capacity(2);
        if state.can_skip() {
            actions.push(SjuanAction::Skip);
        }
        if state.can_succumb() {
            actions.push(SjuanAction::AskForCards);
        }
        actions
    }
}

impl RulesEngine for SjuanRules {
    type State = SjuanState;
    type Action = SjuanAction;
    type Take = SjuanTake;
    type Insert = SjuanInsert;

    fn reference_action<'s>(&self, _action: &SjuanAction, _state: &'s mut SjuanState) -> ActionRoute<'s> {
        ActionRoute::SelfContained
    }

    fn reference_take<'s>(
        &self,
        take: &SjuanTake,
        state: &'s mut SjuanState,
    ) -> Option<Box<dyn TakeSite + 's>> {
        match take {
            SjuanTake::SourceStack(m) => Some(bind_take(state.source_stack_mut(), *m)),
            SjuanTake::Myself(m) => {
                let turn = state.turn_index()?;
                state.hand_mut(turn).map(|hand| bind_take(hand, *m))
            }
        }
    }

    fn reference_insert<'s>(
        &self,
        insert: &SjuanInsert,
        state: &'s mut SjuanState,
    ) -> Option<Box<dyn InsertSite + 's>> {
        match insert {
            SjuanInsert::Ladder(m) => Some(bind_insert(state.ladder_mut(), *m)),
            SjuanInsert::Player(i, m) => state.hand_mut(*i).map(|hand| bind_insert(hand, *m)),
        }
    }

    fn move_is_valid(&self, moves: &[SjuanMove], state: &mut SjuanState) -> bool {
        self.move_info(moves, state).is_valid
    }

    /// Apply a batch if the current phase allows it.
    ///
    /// Order: moves, deferred effect, then either the phase advances or the
    /// skip flag updates, and finally the acting player is removed if their
    /// hand is empty.
    fn do_moves(&self, moves: &[SjuanMove], state: &mut SjuanState) -> bool {
        let info = self.move_info(moves, state);
        if !info.is_valid {
            debug!(phase = %state.phase(), count = moves.len(), "rejected illegal batch");
            return false;
        }

        let dealing = state.phase().is_do_queue();
        let actor = state.turn_index();

        for mv in moves {
            self.apply_move(mv, state);
            if dealing {
                state.pop_queue();
            }
        }
        state.push_event(SjuanEvent::MoveApplied {
            moves: moves.iter().cloned().collect(),
        });

        if let (Some(DeferredEffect::EnterGiveCards), Some(asker)) = (info.deferred, actor) {
            state.enter_give_cards(asker);
        }

        if info.ends_turn {
            state.advance_phase();
        } else if let Some(skippable) = info.skippable {
            state.set_can_skip(skippable);
        }

        if let Some(actor) = actor.filter(|_| !dealing) {
            if state.players()[actor].is_empty() {
                state.remove_player(actor);
            }
        }

        true
    }
}

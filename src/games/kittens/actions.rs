//! Moves of the card game.
//!
//! Every move names the cards and players it touches by id. Playing a card
//! ends the turn, as does drawing.

use serde::{Deserialize, Serialize};

use super::cards::{find_in_hand, hand, kind_of, CardKind};
use super::frames::{BarterFrame, FavorFrame, KittensFrame};
use super::game::Kittens;
use crate::actions::{Capability, GameAction, Resolution};
use crate::containers::{Position, Visibility};
use crate::core::entity::ComponentId;
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::turns::TurnModifier;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KittensAction {
    /// Take the top card of the draw pile and end the turn.
    Draw { player: PlayerId },
    Attack { player: PlayerId, card: ComponentId, target: PlayerId },
    Skip { player: PlayerId, card: ComponentId },
    Shield { player: PlayerId, card: ComponentId },
    Swap { player: PlayerId, card: ComponentId, target: PlayerId },
    Favor { player: PlayerId, card: ComponentId, target: PlayerId },
    Barter { player: PlayerId, card: ComponentId },
    /// Hand one card over inside a Favor or Barter.
    Give { from: PlayerId, to: PlayerId, card: ComponentId },
    /// Keep your cards during a Barter.
    Keep { player: PlayerId },
    /// Cancel the pending card.
    Nope { player: PlayerId, card: ComponentId },
    /// Let the pending card through.
    Decline { player: PlayerId },
}

type Outcome = EngineResult<Resolution<KittensFrame>>;

impl GameAction<Kittens> for KittensAction {
    fn capability(&self) -> Capability {
        match self {
            Self::Attack { .. } | Self::Skip { .. } | Self::Swap { .. } | Self::Favor { .. } => {
                Capability::Contestable
            }
            Self::Nope { .. } => Capability::Cancel,
            Self::Decline { .. } => Capability::Decline,
            _ => Capability::Primary,
        }
    }

    /// Contestable cards hit the discard pile before anyone can react.
    fn stage(&self, state: &mut GameState<Kittens>) -> EngineResult<()> {
        match self {
            Self::Attack { card, .. } | Self::Skip { card, .. } | Self::Swap { card, .. } | Self::Favor { card, .. } => {
                discard(state, *card)
            }
            _ => Ok(()),
        }
    }

    fn execute(&self, state: &mut GameState<Kittens>) -> Outcome {
        match *self {
            Self::Draw { player } => draw(state, player),
            Self::Attack { target, .. } => {
                state.push_turn_modifier(TurnModifier::Attack {
                    target,
                    extra_turns: 1,
                });
                Ok(Resolution::Committed)
            }
            Self::Skip { .. } => {
                state.push_turn_modifier(TurnModifier::Skip);
                Ok(Resolution::Committed)
            }
            Self::Shield { player, card } => {
                discard(state, card)?;
                state.data_mut().protected[player] = true;
                Ok(Resolution::Committed)
            }
            Self::Swap { player, target, .. } => swap_hands(state, player, target),
            Self::Favor { player, target, .. } => {
                if hand(state, target).is_empty() {
                    tracing::trace!(%target, "favor on an empty hand");
                    return Ok(Resolution::Committed);
                }
                Ok(Resolution::Extended(KittensFrame::Favor(FavorFrame::new(player, target))))
            }
            Self::Barter { player, card } => {
                discard(state, card)?;
                Ok(Resolution::Extended(KittensFrame::Barter(BarterFrame::new(player))))
            }
            Self::Give { from, to, card } => {
                let destination = state.data().layout.hands[to];
                state.containers_mut().move_with_visibility(
                    card,
                    destination,
                    Position::Top,
                    Some(Visibility::only(to).with(from)),
                )?;
                Ok(Resolution::Committed)
            }
            Self::Nope { card, .. } => {
                discard(state, card)?;
                Ok(Resolution::Committed)
            }
            Self::Keep { .. } | Self::Decline { .. } => Ok(Resolution::Committed),
        }
    }
}

fn discard(state: &mut GameState<Kittens>, card: ComponentId) -> EngineResult<()> {
    let pile = state.data().layout.discard;
    state
        .containers_mut()
        .move_component(card, pile, Position::Top)?;
    Ok(())
}

/// Shuffle the discard pile back in as the new draw pile.
fn refill(state: &mut GameState<Kittens>) -> EngineResult<usize> {
    let layout = state.data().layout.clone();
    let cards = state.containers().contents(layout.discard)?;
    for card in &cards {
        state
            .containers_mut()
            .move_component(*card, layout.draw_pile, Position::Top)?;
    }
    state.shuffle(layout.draw_pile)?;
    tracing::debug!(cards = cards.len(), "discard pile reshuffled into draw pile");
    Ok(cards.len())
}

fn draw(state: &mut GameState<Kittens>, player: PlayerId) -> Outcome {
    let layout = state.data().layout.clone();
    let hand_id = layout.hands[player];

    let card = match state.containers_mut().draw_with_visibility(
        layout.draw_pile,
        hand_id,
        Some(Visibility::only(player)),
    ) {
        Ok(card) => card,
        Err(EngineError::EmptyContainer { .. }) => {
            if refill(state)? == 0 {
                tracing::debug!(%player, "nothing left to draw");
                return Ok(Resolution::Committed);
            }
            state.containers_mut().draw_with_visibility(
                layout.draw_pile,
                hand_id,
                Some(Visibility::only(player)),
            )?
        }
        Err(err) => return Err(err),
    };

    if kind_of(state, card) != Some(CardKind::Bomb) {
        return Ok(Resolution::Committed);
    }

    match find_in_hand(state, player, CardKind::Defuse) {
        Some(defuse) => {
            discard(state, defuse)?;
            let depth = state.containers().len(layout.draw_pile);
            let index = state.rng_mut().gen_index(depth + 1);
            state
                .containers_mut()
                .move_component(card, layout.draw_pile, Position::Index(index))?;
            tracing::debug!(%player, index, "bomb defused");
        }
        None => {
            discard(state, card)?;
            state.eliminate_player(player);
        }
    }
    Ok(Resolution::Committed)
}

/// Trade hands unless `target` is shielded. Traded cards are known to both.
fn swap_hands(state: &mut GameState<Kittens>, player: PlayerId, target: PlayerId) -> Outcome {
    if state.data().protected[target] {
        tracing::debug!(%player, %target, "swap blocked by shield");
        return Ok(Resolution::Committed);
    }

    let mine = hand(state, player);
    let theirs = hand(state, target);
    let (my_hand, their_hand) = {
        let hands = &state.data().layout.hands;
        (hands[player], hands[target])
    };
    let seen_by_both = Visibility::only(player).with(target);

    for card in mine {
        state.containers_mut().move_with_visibility(
            card,
            their_hand,
            Position::Top,
            Some(seen_by_both.clone()),
        )?;
    }
    for card in theirs {
        state.containers_mut().move_with_visibility(
            card,
            my_hand,
            Position::Top,
            Some(seen_by_both.clone()),
        )?;
    }
    Ok(Resolution::Committed)
}

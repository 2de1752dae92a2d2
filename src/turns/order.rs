//! Seat rotation, round counting and turn modifiers.
//!
//! Only the Forward Model ends turns. Actions queue `TurnModifier`s through
//! the game state and the queue is drained at the next `end_player_turn`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::modifier::TurnModifier;
use crate::core::config::GameConfig;
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::{PlayerId, PlayerMap};

/// Whose turn it is, plus the counters and queue that decide who is next.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnOrder {
    player_count: usize,
    first_player: PlayerId,
    current: PlayerId,
    round: u32,
    turn: u32,
    turns_this_round: u32,
    max_rounds: Option<u32>,
    modifiers: VecDeque<TurnModifier>,
    owed_turns: PlayerMap<u32>,
    eliminated: PlayerMap<bool>,
}

impl TurnOrder {
    /// Start at `first_player` in round 0.
    #[must_use]
    pub fn new(player_count: usize, first_player: PlayerId) -> Self {
        assert!(
            first_player.index() < player_count,
            "First player must be seated"
        );
        Self {
            player_count,
            first_player,
            current: first_player,
            round: 0,
            turn: 0,
            turns_this_round: 0,
            max_rounds: None,
            modifiers: VecDeque::new(),
            owed_turns: PlayerMap::with_value(player_count, 0),
            eliminated: PlayerMap::with_value(player_count, false),
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let mut order = Self::new(config.player_count, config.first_player);
        order.max_rounds = config.max_rounds;
        order
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    /// Seat whose outer turn it is. Ignores any active sequence frame.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Turns completed since the start of the game.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn max_rounds(&self) -> Option<u32> {
        self.max_rounds
    }

    /// True once the round limit has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.max_rounds.is_some_and(|max| self.round >= max)
    }

    /// Modifiers waiting for the next turn end, oldest first.
    pub fn modifiers(&self) -> impl Iterator<Item = &TurnModifier> {
        self.modifiers.iter()
    }

    /// Queue a modifier for the next turn end.
    pub fn push_modifier(&mut self, modifier: TurnModifier) {
        tracing::trace!(%modifier, "turn modifier queued");
        self.modifiers.push_back(modifier);
    }

    /// Extra turns `player` still has to take.
    #[must_use]
    pub fn owed_turns(&self, player: PlayerId) -> u32 {
        self.owed_turns[player]
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        player.index() < self.player_count && !self.eliminated[player]
    }

    /// Seats still in the game, in seat order.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all(self.player_count).filter(|p| !self.eliminated[*p])
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.eliminated.values().filter(|out| !**out).count()
    }

    /// Remove a seat from rotation. Its owed turns are dropped.
    pub fn eliminate(&mut self, player: PlayerId) {
        if self.eliminated[player] {
            return;
        }
        self.eliminated[player] = true;
        self.owed_turns[player] = 0;
        tracing::debug!(%player, "eliminated");
    }

    /// The first active seat after `player` in rotation order.
    ///
    /// Falls back to `player` itself when it is the only one left.
    #[must_use]
    pub fn next_active_after(&self, player: PlayerId) -> Option<PlayerId> {
        player
            .others(self.player_count)
            .find(|p| self.is_active(*p))
            .or_else(|| self.is_active(player).then_some(player))
    }

    /// Finish the current player's turn and decide who acts next.
    ///
    /// Queued modifiers are drained first: an attack jumps straight to its
    /// target; skips and extra turns are tallied. Without a jump the current
    /// player keeps the turn while it owes turns, otherwise the rotation
    /// moves on past any skipped seats.
    pub fn end_player_turn(&mut self) -> EngineResult<PlayerId> {
        self.turn += 1;
        self.turns_this_round += 1;

        let mut jumped = false;
        let mut skips = 0usize;
        while let Some(modifier) = self.modifiers.pop_front() {
            match modifier {
                TurnModifier::Attack { target, extra_turns } => {
                    if !self.is_active(target) {
                        tracing::trace!(%target, "attack on an eliminated seat dropped");
                        continue;
                    }
                    self.owed_turns[self.current] = 0;
                    self.owed_turns[target] += extra_turns;
                    self.current = target;
                    jumped = true;
                }
                TurnModifier::Skip => skips += 1,
                TurnModifier::ExtraTurn { player, count } => {
                    if self.is_active(player) {
                        self.owed_turns[player] += count;
                    }
                }
            }
        }

        if self.active_count() == 0 {
            return Err(EngineError::NoActivePlayers);
        }

        if !jumped {
            if self.is_active(self.current) && self.owed_turns[self.current] > 0 {
                self.owed_turns[self.current] -= 1;
            } else {
                let mut next = self
                    .next_active_after(self.current)
                    .ok_or(EngineError::NoActivePlayers)?;
                for _ in 0..skips {
                    next = self
                        .next_active_after(next)
                        .ok_or(EngineError::NoActivePlayers)?;
                }
                self.current = next;
            }
        }

        if self.turns_this_round as usize >= self.active_count() {
            self.end_round();
        }

        tracing::trace!(current = %self.current, turn = self.turn, round = self.round, "turn ended");
        Ok(self.current)
    }

    /// Close the round. Pending modifiers stay queued.
    pub fn end_round(&mut self) {
        self.round += 1;
        self.turns_this_round = 0;
        tracing::debug!(round = self.round, "round ended");
    }

    /// Fail with `MalformedFrame` unless the current seat is a seated,
    /// active player.
    pub fn validate(&self) -> EngineResult<()> {
        if self.is_active(self.current) {
            Ok(())
        } else {
            tracing::error!(seat = %self.current, "turn order left on an inactive seat");
            Err(EngineError::MalformedFrame {
                seat: self.current.index(),
                player_count: self.player_count,
            })
        }
    }

    #[cfg(test)]
    pub(crate) fn force_current(&mut self, seat: PlayerId) {
        self.current = seat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(seat: u8) -> PlayerId {
        PlayerId::new(seat)
    }

    #[test]
    fn test_plain_rotation() {
        let mut order = TurnOrder::new(3, p(0));

        assert_eq!(order.end_player_turn(), Ok(p(1)));
        assert_eq!(order.end_player_turn(), Ok(p(2)));
        assert_eq!(order.round(), 0);
        assert_eq!(order.end_player_turn(), Ok(p(0)));
        assert_eq!(order.round(), 1);
        assert_eq!(order.turn(), 3);
    }

    #[test]
    fn test_attack_passes_two_turns_to_target() {
        // A attacks B: B takes two turns, then C plays.
        let mut order = TurnOrder::new(3, p(0));
        order.push_modifier(TurnModifier::Attack {
            target: p(1),
            extra_turns: 1,
        });

        assert_eq!(order.end_player_turn(), Ok(p(1)));
        assert_eq!(order.owed_turns(p(1)), 1);
        assert_eq!(order.modifiers().count(), 0);

        assert_eq!(order.end_player_turn(), Ok(p(1)));
        assert_eq!(order.owed_turns(p(1)), 0);

        assert_eq!(order.end_player_turn(), Ok(p(2)));
    }

    #[test]
    fn test_attack_forfeits_attackers_owed_turns() {
        let mut order = TurnOrder::new(3, p(0));
        order.push_modifier(TurnModifier::ExtraTurn {
            player: p(0),
            count: 2,
        });
        assert_eq!(order.end_player_turn(), Ok(p(0)));
        assert_eq!(order.owed_turns(p(0)), 1);

        order.push_modifier(TurnModifier::Attack {
            target: p(2),
            extra_turns: 1,
        });
        assert_eq!(order.end_player_turn(), Ok(p(2)));
        assert_eq!(order.owed_turns(p(0)), 0);
        assert_eq!(order.owed_turns(p(2)), 1);
    }

    #[test]
    fn test_skip_passes_over_next_seat() {
        let mut order = TurnOrder::new(4, p(0));
        order.push_modifier(TurnModifier::Skip);

        assert_eq!(order.end_player_turn(), Ok(p(2)));
        assert_eq!(order.modifiers().count(), 0);
        assert_eq!(order.end_player_turn(), Ok(p(3)));
    }

    #[test]
    fn test_elimination_removes_seat_from_rotation() {
        let mut order = TurnOrder::new(3, p(0));
        order.eliminate(p(1));

        assert_eq!(order.active_count(), 2);
        assert_eq!(order.end_player_turn(), Ok(p(2)));
        assert_eq!(order.end_player_turn(), Ok(p(0)));
        assert_eq!(order.round(), 1);
    }

    #[test]
    fn test_attack_on_eliminated_target_is_dropped() {
        let mut order = TurnOrder::new(3, p(0));
        order.eliminate(p(1));
        order.push_modifier(TurnModifier::Attack {
            target: p(1),
            extra_turns: 1,
        });

        assert_eq!(order.end_player_turn(), Ok(p(2)));
    }

    #[test]
    fn test_no_active_players() {
        let mut order = TurnOrder::new(2, p(0));
        order.eliminate(p(0));
        order.eliminate(p(1));

        assert_eq!(order.end_player_turn(), Err(EngineError::NoActivePlayers));
    }

    #[test]
    fn test_last_player_keeps_turn() {
        let mut order = TurnOrder::new(2, p(0));
        order.eliminate(p(1));

        assert_eq!(order.next_active_after(p(0)), Some(p(0)));
        assert_eq!(order.end_player_turn(), Ok(p(0)));
    }

    #[test]
    fn test_round_limit() {
        let mut order = TurnOrder::new(2, p(0)).with_max_rounds(1);
        assert!(!order.is_exhausted());

        order.end_player_turn().unwrap();
        order.end_player_turn().unwrap();
        assert!(order.is_exhausted());
    }

    #[test]
    fn test_validate() {
        let mut order = TurnOrder::new(3, p(1));
        assert_eq!(order.validate(), Ok(()));

        order.eliminate(p(1));
        assert_eq!(
            order.validate(),
            Err(EngineError::MalformedFrame {
                seat: 1,
                player_count: 3
            })
        );

        order.force_current(p(7));
        assert_eq!(
            order.validate(),
            Err(EngineError::MalformedFrame {
                seat: 7,
                player_count: 3
            })
        );
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig::new(4)
            .with_first_player(p(3))
            .with_max_rounds(12);
        let order = TurnOrder::from_config(&config);

        assert_eq!(order.current(), p(3));
        assert_eq!(order.first_player(), p(3));
        assert_eq!(order.max_rounds(), Some(12));
        assert_eq!(order.active_players().count(), 4);
    }
}

//! Rules and setup.

use super::actions::KittensAction;
use super::cards::{find_in_hand, hand, representatives, CardKind, KittensData, KittensLayout};
use super::frames::KittensFrame;
use crate::containers::Position;
use crate::core::config::{ContainerConfig, ContainerId, GameConfig};
use crate::core::error::EngineResult;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;
use crate::forward::ForwardModel;
use crate::rules::{GameResult, Rules};

/// Rules of the card game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Kittens;

impl Rules for Kittens {
    type Payload = CardKind;
    type Data = KittensData;
    type Action = KittensAction;
    type Frame = KittensFrame;

    fn legal_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<KittensAction> {
        if !state.turn_order().is_active(player) {
            return Vec::new();
        }

        let opponents: Vec<PlayerId> = player
            .others(state.player_count())
            .filter(|p| state.turn_order().is_active(*p))
            .collect();
        let left = state.turn_order().next_active_after(player);

        let mut actions = vec![KittensAction::Draw { player }];
        for (kind, card) in representatives(state, player) {
            match kind {
                CardKind::Attack => {
                    if let Some(target) = left.filter(|t| *t != player) {
                        actions.push(KittensAction::Attack { player, card, target });
                    }
                }
                CardKind::Skip => actions.push(KittensAction::Skip { player, card }),
                CardKind::Shield if !state.data().protected[player] => {
                    actions.push(KittensAction::Shield { player, card });
                }
                CardKind::Swap => actions.extend(
                    opponents
                        .iter()
                        .map(|&target| KittensAction::Swap { player, card, target }),
                ),
                CardKind::Favor => actions.extend(
                    opponents
                        .iter()
                        .filter(|t| !hand(state, **t).is_empty())
                        .map(|&target| KittensAction::Favor { player, card, target }),
                ),
                CardKind::Barter => actions.push(KittensAction::Barter { player, card }),
                CardKind::Bomb
                | CardKind::Defuse
                | CardKind::Nope
                | CardKind::Shield
                | CardKind::Cat => {}
            }
        }
        actions
    }

    fn response_actions(
        &self,
        state: &GameState<Self>,
        responder: PlayerId,
        _pending: &KittensAction,
    ) -> Vec<KittensAction> {
        let mut actions = Vec::with_capacity(2);
        if let Some(card) = find_in_hand(state, responder, CardKind::Nope) {
            actions.push(KittensAction::Nope {
                player: responder,
                card,
            });
        }
        actions.push(KittensAction::Decline { player: responder });
        actions
    }

    fn can_respond(&self, state: &GameState<Self>, responder: PlayerId, _pending: &KittensAction) -> bool {
        find_in_hand(state, responder, CardKind::Nope).is_some()
    }

    fn on_turn_start(&self, state: &mut GameState<Self>, player: PlayerId) -> EngineResult<()> {
        state.data_mut().protected[player] = false;
        Ok(())
    }

    /// A drawn Bomb resolves at once, so hidden Bombs belong in the draw pile.
    fn can_hide_in(data: &KittensData, payload: &CardKind, container: ContainerId) -> bool {
        *payload != CardKind::Bomb || container == data.layout.draw_pile
    }

    fn is_terminal(&self, state: &GameState<Self>) -> Option<GameResult> {
        let mut survivors = state.turn_order().active_players();
        match (survivors.next(), survivors.next()) {
            (Some(winner), None) => Some(GameResult::Winner(winner)),
            (None, _) => Some(GameResult::Draw),
            _ => None,
        }
    }
}

/// Builder for creating a game of Kittens.
#[derive(Clone, Debug)]
pub struct KittensBuilder {
    player_count: usize,
    hand_size: usize,
    max_rounds: u32,
    deck: Vec<(CardKind, usize)>,
    spare_defuses: usize,
}

impl Default for KittensBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            hand_size: 4,
            max_rounds: 200,
            deck: vec![
                (CardKind::Attack, 4),
                (CardKind::Skip, 4),
                (CardKind::Nope, 5),
                (CardKind::Shield, 4),
                (CardKind::Swap, 4),
                (CardKind::Favor, 4),
                (CardKind::Barter, 3),
                (CardKind::Cat, 8),
            ],
            spare_defuses: 2,
        }
    }
}

impl KittensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=5).contains(&count), "Player count must be 2-5");
        self.player_count = count;
        self
    }

    /// Cards dealt to each player on top of their Defuse.
    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Replace the count of one card kind in the draw pile.
    pub fn with_cards(mut self, kind: CardKind, count: usize) -> Self {
        assert!(
            !matches!(kind, CardKind::Bomb | CardKind::Defuse),
            "Bombs and Defuses are fixed by the player count"
        );
        self.deck.retain(|(k, _)| *k != kind);
        self.deck.push((kind, count));
        self
    }

    /// Build the model and the initial state.
    ///
    /// Each player gets one Defuse plus `hand_size` cards from the shuffled
    /// pile; then the spare Defuses and `player_count - 1` Bombs are shuffled in.
    pub fn build(self, seed: u64) -> EngineResult<(ForwardModel<Kittens>, GameState<Kittens>)> {
        let draw_pile = ContainerId::new(0);
        let discard = ContainerId::new(1);
        let hands = PlayerMap::new(self.player_count, |p| ContainerId::new(2 + p.index() as u16));

        let mut config = GameConfig::new(self.player_count)
            .with_seed(seed)
            .with_max_rounds(self.max_rounds)
            .with_container(ContainerConfig::new(draw_pile, "Draw Pile").hidden())
            .with_container(ContainerConfig::new(discard, "Discard Pile"));
        for (player, id) in hands.iter() {
            config = config.with_container(
                ContainerConfig::new(*id, format!("{player} Hand"))
                    .with_owner(player)
                    .owner_only()
                    .partially_observable(),
            );
        }

        let data = KittensData {
            layout: KittensLayout {
                draw_pile,
                discard,
                hands: hands.clone(),
            },
            protected: PlayerMap::with_value(self.player_count, false),
        };
        let mut state = GameState::new(&config, data);

        let register = |state: &mut GameState<Kittens>, kind: CardKind| {
            state
                .registry_mut()
                .register(kind.component_type(), kind.name(), kind)
        };

        for &(kind, count) in &self.deck {
            for _ in 0..count {
                let card = register(&mut state, kind);
                state.containers_mut().place(card, draw_pile, Position::Top)?;
            }
        }
        state.shuffle(draw_pile)?;

        for (player, hand_id) in hands.iter() {
            let defuse = register(&mut state, CardKind::Defuse);
            state.containers_mut().place(defuse, *hand_id, Position::Top)?;
            for _ in 0..self.hand_size {
                if state.containers().len(draw_pile) == 0 {
                    break;
                }
                state.containers_mut().draw(draw_pile, *hand_id)?;
            }
            tracing::trace!(%player, cards = state.containers().len(*hand_id), "dealt");
        }

        for _ in 0..self.spare_defuses {
            let defuse = register(&mut state, CardKind::Defuse);
            state.containers_mut().place(defuse, draw_pile, Position::Top)?;
        }
        for _ in 1..self.player_count {
            let bomb = register(&mut state, CardKind::Bomb);
            state.containers_mut().place(bomb, draw_pile, Position::Top)?;
        }
        state.shuffle(draw_pile)?;

        tracing::debug!(
            players = self.player_count,
            components = state.registry().len(),
            seed,
            "kittens game built"
        );
        Ok((ForwardModel::new(Kittens), state))
    }
}

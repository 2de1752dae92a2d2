//! Game state: the root aggregate of a simulation.
//!
//! ## GameState
//!
//! Complete game state including:
//! - Component registry and containers
//! - Turn order
//! - The active extended-sequence frame and reaction window, if any
//! - Game-specific data
//! - RNG, tick counter and action history
//!
//! A state is *stable* when neither a frame nor a reaction window is active;
//! the acting player is then the turn order's current player. Otherwise the
//! window or frame decides who acts.
//!
//! Every field is a value or a persistent `im` structure, so `copy` is a
//! structurally independent snapshot and cloning stays cheap enough to do
//! once per search rollout.

use im::Vector;

use super::config::GameConfig;
use super::error::EngineResult;
use super::player::PlayerId;
use super::rng::GameRng;
use crate::actions::{ActionRecord, ExtendedSequence, ReactionWindow};
use crate::components::ComponentRegistry;
use crate::containers::ContainerSet;
use crate::rules::{GameResult, Rules};
use crate::turns::{TurnModifier, TurnOrder};

/// Full game state, generic over the game's rules.
pub struct GameState<R: Rules> {
    pub(crate) registry: ComponentRegistry<R::Payload>,
    pub(crate) containers: ContainerSet,
    pub(crate) turn_order: TurnOrder,
    pub(crate) action_in_progress: Option<R::Frame>,
    pub(crate) reaction: Option<ReactionWindow<R::Action>>,
    pub(crate) data: R::Data,
    pub(crate) rng: GameRng,
    pub(crate) tick: u64,
    pub(crate) history: Vector<ActionRecord<R::Action>>,
    pub(crate) result: Option<GameResult>,
}

impl<R: Rules> GameState<R> {
    /// Create the initial state: empty containers from the config, turn
    /// order at the first player, RNG seeded from the config.
    #[must_use]
    pub fn new(config: &GameConfig, data: R::Data) -> Self {
        Self {
            registry: ComponentRegistry::new(),
            containers: ContainerSet::from_configs(&config.containers),
            turn_order: TurnOrder::from_config(config),
            action_in_progress: None,
            reaction: None,
            data,
            rng: GameRng::new(config.seed),
            tick: 0,
            history: Vector::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.turn_order.player_count()
    }

    /// Player who must decide next.
    ///
    /// An open reaction window wins over an active frame, which wins over
    /// the turn order.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        if let Some(responder) = self.reaction.as_ref().and_then(ReactionWindow::responder) {
            return responder;
        }
        if let Some(frame) = &self.action_in_progress {
            return frame.current_decider(self);
        }
        self.turn_order.current()
    }

    /// True when no frame or reaction window is active.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.action_in_progress.is_none() && self.reaction.is_none()
    }

    // === Components and containers ===

    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry<R::Payload> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ComponentRegistry<R::Payload> {
        &mut self.registry
    }

    #[must_use]
    pub fn containers(&self) -> &ContainerSet {
        &self.containers
    }

    pub fn containers_mut(&mut self) -> &mut ContainerSet {
        &mut self.containers
    }

    /// Shuffle a container with the state's own RNG.
    pub fn shuffle(&mut self, container: super::config::ContainerId) -> EngineResult<()> {
        self.containers.shuffle(container, &mut self.rng)
    }

    // === Turn order ===

    #[must_use]
    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn_order
    }

    pub(crate) fn turn_order_mut(&mut self) -> &mut TurnOrder {
        &mut self.turn_order
    }

    /// Queue a modifier for the end of the current turn.
    pub fn push_turn_modifier(&mut self, modifier: TurnModifier) {
        self.turn_order.push_modifier(modifier);
    }

    /// Take a player out of the rotation.
    pub fn eliminate_player(&mut self, player: PlayerId) {
        self.turn_order.eliminate(player);
    }

    // === Resolution state ===

    /// The active extended-sequence frame.
    #[must_use]
    pub fn action_in_progress(&self) -> Option<&R::Frame> {
        self.action_in_progress.as_ref()
    }

    /// The open reaction window.
    #[must_use]
    pub fn reaction(&self) -> Option<&ReactionWindow<R::Action>> {
        self.reaction.as_ref()
    }

    // === Game data ===

    #[must_use]
    pub fn data(&self) -> &R::Data {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut R::Data {
        &mut self.data
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    // === Progress ===

    /// Forward Model cycles applied so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<R::Action>> {
        &self.history
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: R::Action) {
        self.history.push_back(ActionRecord {
            player,
            action,
            round: self.turn_order.round(),
            turn: self.turn_order.turn(),
            tick: self.tick,
        });
        self.tick += 1;
    }

    // === Copying ===

    /// Exact, independent copy. RNG position included.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Copy with a freshly forked RNG stream.
    ///
    /// Takes `&mut self` because forking advances the fork counter, so
    /// successive branches see different futures.
    #[must_use]
    pub fn branch(&mut self) -> Self {
        let rng = self.rng.fork();
        let mut copy = self.clone();
        copy.rng = rng;
        copy
    }

    /// Copy as `viewer` could imagine it: everything hidden from `viewer`
    /// is reshuffled among the hidden slots.
    ///
    /// The original is untouched; the copy's RNG is forked from its own
    /// clone so the result is reproducible.
    #[must_use]
    pub fn copy_for_player(&self, viewer: PlayerId) -> Self {
        let mut copy = self.clone();
        copy.rng = copy.rng.fork();
        copy.redeterminize(viewer);
        copy
    }

    /// Reshuffle everything hidden from `viewer` in place, using the
    /// state's RNG.
    ///
    /// Components only land where [`Rules::can_hide_in`] allows.
    pub fn redeterminize(&mut self, viewer: PlayerId) {
        let registry = &self.registry;
        let data = &self.data;
        self.containers
            .redeterminize_where(viewer, &mut self.rng, |component, container| {
                registry
                    .get(component)
                    .map_or(true, |c| R::can_hide_in(data, &c.payload, container))
            });
    }
}

impl<R: Rules> Clone for GameState<R> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            containers: self.containers.clone(),
            turn_order: self.turn_order.clone(),
            action_in_progress: self.action_in_progress.clone(),
            reaction: self.reaction.clone(),
            data: self.data.clone(),
            rng: self.rng.clone(),
            tick: self.tick,
            history: self.history.clone(),
            result: self.result.clone(),
        }
    }
}

impl<R: Rules> PartialEq for GameState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.registry == other.registry
            && self.containers == other.containers
            && self.turn_order == other.turn_order
            && self.action_in_progress == other.action_in_progress
            && self.reaction == other.reaction
            && self.data == other.data
            && self.rng == other.rng
            && self.tick == other.tick
            && self.history == other.history
            && self.result == other.result
    }
}

impl<R: Rules> Eq for GameState<R> {}

impl<R: Rules> std::fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("turn_order", &self.turn_order)
            .field("action_in_progress", &self.action_in_progress)
            .field("reaction", &self.reaction)
            .field("data", &self.data)
            .field("tick", &self.tick)
            .field("result", &self.result)
            .field("containers", &self.containers)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

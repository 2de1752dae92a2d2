//! Engine error taxonomy.
//!
//! Every failure is detected next to the violating call and returned up the
//! Forward Model's call stack. Nothing is retried: retrying would apply an
//! effect twice.

use super::config::ContainerId;
use super::entity::ComponentId;
use super::player::PlayerId;

/// How a caller should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Game content may degrade gracefully (refill an empty deck, pick another move).
    Recoverable,

    /// A lookup with a bad id; the caller built an invalid reference.
    Validation,

    /// Contract violation. The simulation run must be abandoned.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if game content may handle the error itself.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors raised by the engine and by game content running on it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{player} chose an action outside the legal set: {action}")]
    IllegalAction { player: PlayerId, action: String },

    #[error("{player} has no legal actions")]
    NoLegalActions { player: PlayerId },

    #[error("response by {player} tried to open an extended sequence inside a reaction window")]
    ExtendedResponse { player: PlayerId },

    #[error("extended sequence finished with seat {seat} invalid for {player_count} players")]
    MalformedFrame { seat: usize, player_count: usize },

    #[error("{viewer} may not inspect slot {index} of {container}")]
    VisibilityViolation {
        viewer: PlayerId,
        container: ContainerId,
        index: usize,
    },

    #[error("{container} is empty")]
    EmptyContainer { container: ContainerId },

    #[error("{container} is full ({capacity} components)")]
    ContainerFull {
        container: ContainerId,
        capacity: usize,
    },

    #[error("unknown {0}")]
    UnknownComponent(ComponentId),

    #[error("unknown {0}")]
    UnknownContainer(ContainerId),

    #[error("{component} is not in {container}")]
    NotInContainer {
        component: ComponentId,
        container: ContainerId,
    },

    #[error("{component} is already held by {container}")]
    AlreadyPlaced {
        component: ComponentId,
        container: ContainerId,
    },

    #[error("no active players remain")]
    NoActivePlayers,

    #[error("the game is already over")]
    GameOver,
}

impl EngineError {
    /// Classify this error.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyContainer { .. } | Self::ContainerFull { .. } => ErrorSeverity::Recoverable,
            Self::UnknownComponent(_)
            | Self::UnknownContainer(_)
            | Self::NotInContainer { .. }
            | Self::AlreadyPlaced { .. } => ErrorSeverity::Validation,
            Self::IllegalAction { .. }
            | Self::NoLegalActions { .. }
            | Self::ExtendedResponse { .. }
            | Self::MalformedFrame { .. }
            | Self::VisibilityViolation { .. }
            | Self::NoActivePlayers
            | Self::GameOver => ErrorSeverity::Fatal,
        }
    }
}

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        let empty = EngineError::EmptyContainer {
            container: ContainerId::new(0),
        };
        assert!(empty.severity().is_recoverable());

        let illegal = EngineError::IllegalAction {
            player: PlayerId::new(0),
            action: "Draw".to_string(),
        };
        assert_eq!(illegal.severity(), ErrorSeverity::Fatal);

        let unknown = EngineError::UnknownComponent(ComponentId(4));
        assert_eq!(unknown.severity().as_str(), "validation");
    }

    #[test]
    fn test_messages_name_the_culprit() {
        let err = EngineError::VisibilityViolation {
            viewer: PlayerId::new(1),
            container: ContainerId::new(3),
            index: 2,
        };
        assert_eq!(
            err.to_string(),
            "Player 1 may not inspect slot 2 of Container(3)"
        );

        let err = EngineError::UnknownComponent(ComponentId(9));
        assert_eq!(err.to_string(), "unknown Component(9)");
    }
}

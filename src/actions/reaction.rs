//! Reaction windows.
//!
//! After a contestable action is staged, the other players are asked in
//! seat order, starting after the actor, whether to cancel it. The first
//! cancel closes the window and nobody else is asked. If every responder
//! declines, the pending action commits.

use smallvec::SmallVec;

use crate::core::player::PlayerId;

/// An open priority window around one pending action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReactionWindow<A> {
    pending: A,
    actor: PlayerId,
    responders: SmallVec<[PlayerId; 4]>,
    cursor: usize,
}

impl<A> ReactionWindow<A> {
    /// Open a window. Hands `pending` back when nobody can respond and it
    /// should commit at once.
    pub fn open(pending: A, actor: PlayerId, responders: impl IntoIterator<Item = PlayerId>) -> Result<Self, A> {
        let responders: SmallVec<[PlayerId; 4]> = responders.into_iter().collect();
        if responders.is_empty() {
            return Err(pending);
        }
        Ok(Self {
            pending,
            actor,
            responders,
            cursor: 0,
        })
    }

    /// The action waiting to commit.
    pub fn pending(&self) -> &A {
        &self.pending
    }

    /// Who played the pending action.
    #[must_use]
    pub fn actor(&self) -> PlayerId {
        self.actor
    }

    /// Whose decision it is.
    #[must_use]
    pub fn responder(&self) -> Option<PlayerId> {
        self.responders.get(self.cursor).copied()
    }

    /// Responders not yet asked, current one included.
    #[must_use]
    pub fn remaining(&self) -> &[PlayerId] {
        &self.responders[self.cursor.min(self.responders.len())..]
    }

    /// The current responder passes. Returns true while someone is left
    /// to ask.
    pub fn decline(&mut self) -> bool {
        self.cursor += 1;
        self.cursor < self.responders.len()
    }

    pub fn into_pending(self) -> A {
        self.pending
    }
}

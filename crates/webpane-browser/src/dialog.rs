//! JavaScript dialog interception.
//!
//! Page content raising `alert`/`confirm`/`prompt` produces a
//! [`DialogRequest`] carrying a single-shot [`DialogResponder`]. The
//! browser routes the request to its bound [`DialogHost`], which
//! presents native chrome and resolves the responder with the user's
//! answer. Every responder resolves exactly once: `resolve` consumes
//! it, and an unanswered responder resolves with its cancel outcome on
//! drop.

use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    Alert {
        message: String,
    },
    Confirm {
        message: String,
    },
    Prompt {
        message: String,
        default_text: String,
    },
}

impl DialogKind {
    /// The outcome a host reports when the user dismisses the dialog
    /// without answering, and the outcome an unanswered responder
    /// falls back to.
    pub fn cancel_outcome(&self) -> DialogOutcome {
        match self {
            DialogKind::Alert { .. } => DialogOutcome::Acknowledged,
            DialogKind::Confirm { .. } => DialogOutcome::Confirmed(false),
            DialogKind::Prompt { .. } => DialogOutcome::Text(None),
        }
    }

    /// The outcome for an accepted prompt. Empty entered text falls
    /// back to the prompt's original default text.
    pub fn prompt_accept_outcome(&self, entered: &str) -> DialogOutcome {
        match self {
            DialogKind::Prompt { default_text, .. } if entered.is_empty() => {
                DialogOutcome::Text(Some(default_text.clone()))
            }
            _ => DialogOutcome::Text(Some(entered.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    /// Alert was acknowledged.
    Acknowledged,
    /// Confirm answered true/false.
    Confirmed(bool),
    /// Prompt answered with text, or `None` on cancel.
    Text(Option<String>),
}

/// Resolved dialog outcomes queued for delivery back into the surface
/// that raised them, keyed by dialog id.
#[derive(Clone, Default)]
pub struct OutcomeSink(Arc<Mutex<Vec<(u64, DialogOutcome)>>>);

impl OutcomeSink {
    pub fn push(&self, id: u64, outcome: DialogOutcome) {
        if let Ok(mut outcomes) = self.0.lock() {
            outcomes.push((id, outcome));
        }
    }

    pub fn drain(&self) -> Vec<(u64, DialogOutcome)> {
        match self.0.lock() {
            Ok(mut outcomes) => std::mem::take(&mut *outcomes),
            Err(_) => Vec::new(),
        }
    }
}

/// Single-shot resolution handle for one intercepted dialog.
pub struct DialogResponder {
    id: u64,
    cancel: DialogOutcome,
    outcomes: OutcomeSink,
    resolved: bool,
}

impl DialogResponder {
    pub fn new(id: u64, kind: &DialogKind, outcomes: OutcomeSink) -> Self {
        Self {
            id,
            cancel: kind.cancel_outcome(),
            outcomes,
            resolved: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deliver the outcome. Consumes the responder, so a second
    /// resolution is unrepresentable.
    pub fn resolve(mut self, outcome: DialogOutcome) {
        self.deliver(outcome);
    }

    fn deliver(&mut self, outcome: DialogOutcome) {
        if !self.resolved {
            self.resolved = true;
            self.outcomes.push(self.id, outcome);
        }
    }
}

impl Drop for DialogResponder {
    fn drop(&mut self) {
        if !self.resolved {
            warn!(dialog_id = self.id, "dialog responder dropped unanswered, cancelling");
            let cancel = self.cancel.clone();
            self.deliver(cancel);
        }
    }
}

impl std::fmt::Debug for DialogResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogResponder")
            .field("id", &self.id)
            .field("resolved", &self.resolved)
            .finish()
    }
}

/// One intercepted dialog, as emitted by a surface.
#[derive(Debug)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub responder: DialogResponder,
}

/// Presents intercepted dialogs as native chrome. The analogue of the
/// presenting screen a host anchors modal dialogs to.
pub trait DialogHost {
    fn present(&mut self, kind: &DialogKind, responder: DialogResponder);
}

/// Fallback host: answers every dialog immediately with its cancel
/// outcome, so page content never stalls when no host is bound.
#[derive(Debug, Default)]
pub struct NullDialogHost;

impl DialogHost for NullDialogHost {
    fn present(&mut self, kind: &DialogKind, responder: DialogResponder) {
        responder.resolve(kind.cancel_outcome());
    }
}

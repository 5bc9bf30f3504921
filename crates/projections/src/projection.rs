//! Core projection trait and position tracking.

use event_store::{EventEnvelope, Position};
use serde_json::Value;

use crate::Result;

/// Tracks how far a projection has read the global log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionPosition {
    /// Commit position of the next event to read.
    pub next: Position,
    /// Number of category events folded so far.
    pub events_processed: u64,
}

impl ProjectionPosition {
    /// Creates a new position at the start of the log.
    pub fn zero() -> Self {
        Self {
            next: Position::start(),
            events_processed: 0,
        }
    }

    /// Moves past `position` without folding it.
    pub fn skip(&self, position: Position) -> Self {
        Self {
            next: position.next(),
            events_processed: self.events_processed,
        }
    }

    /// Moves past `position` after folding it.
    pub fn advance(&self, position: Position) -> Self {
        Self {
            next: position.next(),
            events_processed: self.events_processed + 1,
        }
    }
}

impl std::fmt::Display for ProjectionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position({}, processed {})",
            self.next.as_u64(),
            self.events_processed
        )
    }
}

/// A fold over all events of one stream category, partitioned by stream.
///
/// State is held as JSON by the engine so projections of different shapes
/// can be registered side by side. Folding must be pure: the same events in
/// the same order always produce the same state.
pub trait Projection: Send + Sync {
    /// Category whose streams this projection folds.
    fn category(&self) -> &str;

    /// State of a partition before any event was folded.
    fn init(&self) -> Result<Value>;

    /// Folds one event into a partition's state.
    fn apply(&self, state: Value, event: &EventEnvelope) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_starts_at_zero() {
        let pos = ProjectionPosition::zero();
        assert_eq!(pos.events_processed, 0);
        assert_eq!(pos.next, Position::start());
    }

    #[test]
    fn position_advances() {
        let pos = ProjectionPosition::zero();
        let pos = pos.advance(Position::new(0));
        assert_eq!(pos.events_processed, 1);
        let pos = pos.skip(Position::new(1));
        assert_eq!(pos.events_processed, 1);
        assert_eq!(pos.next, Position::new(2));
    }

    #[test]
    fn position_display() {
        let pos = ProjectionPosition {
            next: Position::new(7),
            events_processed: 3,
        };
        assert_eq!(pos.to_string(), "position(7, processed 3)");
    }
}

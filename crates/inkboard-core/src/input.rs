//! Pointer events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas. Finishes a gesture like `Up`.
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up { position: Point::new(x, y) }
    }

    /// Position of the event, if it carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }

    /// Check if this event ends a gesture.
    pub fn is_release(&self) -> bool {
        matches!(self, PointerEvent::Up { .. } | PointerEvent::Leave)
    }
}

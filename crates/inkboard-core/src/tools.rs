//! Drawing tools and the in-progress pointer action.

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pen,
    Rectangle,
    Circle,
    Arrow,
    Text,
    Note,
    Image,
    Eraser,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Select,
        ToolKind::Pen,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Arrow,
        ToolKind::Text,
        ToolKind::Note,
        ToolKind::Image,
        ToolKind::Eraser,
    ];

    /// Tools that create an element and size it by dragging.
    pub fn is_drawing_tool(&self) -> bool {
        matches!(
            self,
            ToolKind::Pen | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow
        )
    }

    /// Tools that place an overlay element with a single click.
    pub fn is_placement_tool(&self) -> bool {
        matches!(self, ToolKind::Text | ToolKind::Note)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Pen => "Pen",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Arrow => "Arrow",
            ToolKind::Text => "Text",
            ToolKind::Note => "Note",
            ToolKind::Image => "Image",
            ToolKind::Eraser => "Eraser",
        }
    }
}

/// What the current pointer gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// No gesture in progress.
    #[default]
    None,
    /// Sizing the last element of the scene.
    Drawing,
    /// Dragging a selected element.
    Moving,
    /// Removing whatever the pointer passes over.
    Erasing,
}

impl Action {
    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Action::None)
    }
}

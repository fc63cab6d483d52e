//! The caret repositioning routine the controller delegates to.

use crate::editor::EditorHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    LineStart,
    LineEnd,
}

impl Direction {
    pub fn toward_end(forward: bool) -> Self {
        if forward {
            Direction::LineEnd
        } else {
            Direction::LineStart
        }
    }

    pub fn is_forward(self) -> bool {
        self == Direction::LineEnd
    }
}

/// Moves the caret to a line end point at an inline boundary.
///
/// Implementations own all caret geometry and boundary edge cases. The
/// controller only decides when to call this and never inspects the outcome.
pub trait Navigator: Send + Sync {
    fn move_to_line_end_point(&self, editor: &dyn EditorHost, direction: Direction);
}

impl<F> Navigator for F
where
    F: Fn(&dyn EditorHost, Direction) + Send + Sync,
{
    fn move_to_line_end_point(&self, editor: &dyn EditorHost, direction: Direction) {
        self(editor, direction)
    }
}

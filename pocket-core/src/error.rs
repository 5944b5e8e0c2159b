use std::error;
use std::fmt;

/// Failures when installing a menu.
///
/// A failed install leaves the previously active menu untouched; there is no
/// half-installed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuError {
    /// Binding table length does not match the menu's item count.
    BindingMismatch { items: usize, bindings: usize },
    /// A menu needs a title row plus at least one selectable item.
    TooFewItems { items: usize },
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindingMismatch { items, bindings } => write!(
                f,
                "binding table has {bindings} slots but the menu has {items} items"
            ),
            Self::TooFewItems { items } => write!(
                f,
                "a menu needs a title and at least one item, got {items} labels"
            ),
        }
    }
}

impl error::Error for MenuError {}

use std::fmt;
use std::rc::Rc;

use crate::console::Console;
use crate::error::MenuError;

/// A menu level: an ordered list of labels where index 0 is the
/// non-selectable title and indices 1.. are the items the cursor can reach.
///
/// Immutable once built; navigating to a different level installs a fresh
/// definition rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDefinition {
    labels: Vec<String>,
}

impl MenuDefinition {
    /// Build a definition from a title followed by at least one item label.
    pub fn new<L, S>(labels: L) -> Result<Self, MenuError>
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() < 2 {
            return Err(MenuError::TooFewItems {
                items: labels.len(),
            });
        }
        Ok(Self { labels })
    }

    /// Total label count, title included.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.labels[0]
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of the last selectable item.
    pub fn last_item(&self) -> usize {
        self.labels.len() - 1
    }
}

/// Callback invoked when its menu item is selected.
///
/// Bindings receive the whole console so they can re-enter it: install a
/// submenu, talk to the audio sink, or hand the input/screen pair to a game
/// for the duration of a session.
pub type Binding = Rc<dyn Fn(&mut Console)>;

/// Wrap a closure as a bound menu slot.
pub fn bind<F>(f: F) -> Option<Binding>
where
    F: Fn(&mut Console) + 'static,
{
    Some(Rc::new(f))
}

/// Callback table parallel to a [`MenuDefinition`].
///
/// Slot 0 belongs to the title and is never invoked; unbound slots make
/// select a no-op. Bindings are addressed by index, not label: renaming an
/// item never changes behaviour, reordering does.
#[derive(Clone, Default)]
pub struct Bindings {
    slots: Vec<Option<Binding>>,
}

impl Bindings {
    pub fn new(slots: Vec<Option<Binding>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Binding> {
        self.slots.get(index).cloned().flatten()
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
            .collect();
        f.debug_struct("Bindings")
            .field("len", &self.slots.len())
            .field("bound", &bound)
            .finish()
    }
}

/// A definition and its binding table, always installed together.
#[derive(Debug, Clone)]
pub struct MenuPage {
    pub definition: MenuDefinition,
    pub bindings: Bindings,
}

impl MenuPage {
    pub fn new(definition: MenuDefinition, bindings: Bindings) -> Self {
        Self {
            definition,
            bindings,
        }
    }
}

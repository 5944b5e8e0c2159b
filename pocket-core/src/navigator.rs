use crate::error::MenuError;
use crate::menu::{Binding, Bindings, MenuDefinition};
use crate::screen::{RowStyle, Screen};

/// Rows the display fits below the title.
pub const DEFAULT_VISIBLE_ROWS: usize = 7;

/// The currently installed menu level plus cursor state.
///
/// Replaced wholesale on install; only the move operations mutate it in
/// place. Invariants held between operations:
/// `1 <= selected <= definition.last_item()` and
/// `page_start <= selected < page_start + visible_rows`.
struct ActiveMenu {
    definition: MenuDefinition,
    bindings: Bindings,
    selected: usize,
    page_start: usize,
}

impl ActiveMenu {
    fn row_of(&self, index: usize) -> usize {
        1 + index - self.page_start
    }

    /// Move the highlight without scrolling: re-render exactly the two rows
    /// whose style changed, old selection first. Only valid while both rows
    /// sit on the current page.
    fn highlight_move(&mut self, next: usize, screen: &mut dyn Screen) {
        screen.draw_row(
            self.row_of(self.selected),
            self.definition.label(self.selected).unwrap_or(""),
            RowStyle::Normal,
        );
        screen.draw_row(
            self.row_of(next),
            self.definition.label(next).unwrap_or(""),
            RowStyle::Highlighted,
        );
        self.selected = next;
    }

    /// Repaint the whole window: title plus up to `visible_rows` items from
    /// `page_start`. Rows past the last item stay blank.
    fn redraw(&self, visible_rows: usize, screen: &mut dyn Screen) {
        screen.clear();
        screen.draw_row(0, self.definition.title(), RowStyle::Title);
        let end = (self.page_start + visible_rows).min(self.definition.len());
        for index in self.page_start..end {
            let style = if index == self.selected {
                RowStyle::Highlighted
            } else {
                RowStyle::Normal
            };
            screen.draw_row(
                self.row_of(index),
                self.definition.label(index).unwrap_or(""),
                style,
            );
        }
    }
}

/// The paginated menu cursor.
///
/// Owns the active definition/bindings pair exclusively. Selection moves
/// within the visible page re-render only the two affected rows; any page
/// scroll or wraparound forces a full repaint, because a stale row outside
/// the repainted pair would otherwise survive on screen.
pub struct Navigator {
    visible_rows: usize,
    active: Option<ActiveMenu>,
}

impl Navigator {
    pub fn new(visible_rows: usize) -> Self {
        Self {
            visible_rows: visible_rows.max(1),
            active: None,
        }
    }

    /// Replace the active menu wholesale and repaint.
    ///
    /// The cursor resets to the first item on the first page. Fails without
    /// touching the current menu when the binding table and definition
    /// disagree on length.
    pub fn install(
        &mut self,
        definition: MenuDefinition,
        bindings: Bindings,
        screen: &mut dyn Screen,
    ) -> Result<(), MenuError> {
        if bindings.len() != definition.len() {
            return Err(MenuError::BindingMismatch {
                items: definition.len(),
                bindings: bindings.len(),
            });
        }
        log::debug!(
            "menu '{}' installed ({} items)",
            definition.title(),
            definition.last_item()
        );
        let active = ActiveMenu {
            definition,
            bindings,
            selected: 1,
            page_start: 1,
        };
        active.redraw(self.visible_rows, screen);
        self.active = Some(active);
        Ok(())
    }

    pub fn move_up(&mut self, screen: &mut dyn Screen) {
        let visible_rows = self.visible_rows;
        let Some(active) = &mut self.active else {
            return;
        };
        let last = active.definition.last_item();
        if last <= visible_rows {
            // Everything fits on one page; page_start never moves.
            let next = if active.selected == 1 {
                last
            } else {
                active.selected - 1
            };
            active.highlight_move(next, screen);
        } else if active.selected == 1 {
            // Wrap to the bottom with the last page fully visible.
            active.page_start = active.definition.len() - visible_rows;
            active.selected = last;
            active.redraw(visible_rows, screen);
        } else if active.selected == active.page_start {
            // Top of the page but not of the list: scroll back one row.
            active.page_start -= 1;
            active.selected -= 1;
            active.redraw(visible_rows, screen);
        } else {
            let next = active.selected - 1;
            active.highlight_move(next, screen);
        }
    }

    pub fn move_down(&mut self, screen: &mut dyn Screen) {
        let visible_rows = self.visible_rows;
        let Some(active) = &mut self.active else {
            return;
        };
        let last = active.definition.last_item();
        if last <= visible_rows {
            let next = if active.selected == last {
                1
            } else {
                active.selected + 1
            };
            active.highlight_move(next, screen);
        } else if active.selected == last {
            // Wrap to the top of the list.
            active.page_start = 1;
            active.selected = 1;
            active.redraw(visible_rows, screen);
        } else if active.selected - active.page_start == visible_rows - 1 {
            // Bottom visible row: scroll forward one row, never a full page.
            active.page_start += 1;
            active.selected += 1;
            active.redraw(visible_rows, screen);
        } else {
            let next = active.selected + 1;
            active.highlight_move(next, screen);
        }
    }

    /// Binding of the current selection, if any is bound.
    pub fn selected_binding(&self) -> Option<Binding> {
        let active = self.active.as_ref()?;
        active.bindings.get(active.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.selected)
    }

    pub fn page_start(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.page_start)
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }
}

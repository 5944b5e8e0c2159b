use super::provider::{RowStyle, Screen};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOp {
    Clear,
    Row {
        row: usize,
        text: String,
        style: RowStyle,
    },
}

/// Test surface that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingScreen {
    pub ops: Vec<ScreenOp>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take_ops(&mut self) -> Vec<ScreenOp> {
        std::mem::take(&mut self.ops)
    }

    /// Row indices touched by `draw_row` since the last drain, in call order.
    pub fn rows_touched(&self) -> Vec<usize> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                ScreenOp::Row { row, .. } => Some(*row),
                ScreenOp::Clear => None,
            })
            .collect()
    }

    pub fn cleared(&self) -> bool {
        self.ops.contains(&ScreenOp::Clear)
    }
}

impl Screen for RecordingScreen {
    fn clear(&mut self) {
        self.ops.push(ScreenOp::Clear);
    }

    fn draw_row(&mut self, row: usize, text: &str, style: RowStyle) {
        self.ops.push(ScreenOp::Row {
            row,
            text: text.to_string(),
            style,
        });
    }
}

/// Shared handle, so a test can keep inspecting the recording after handing
/// the screen to a console that boxes it away.
impl Screen for std::rc::Rc<std::cell::RefCell<RecordingScreen>> {
    fn clear(&mut self) {
        self.borrow_mut().ops.push(ScreenOp::Clear);
    }

    fn draw_row(&mut self, row: usize, text: &str, style: RowStyle) {
        self.borrow_mut().ops.push(ScreenOp::Row {
            row,
            text: text.to_string(),
            style,
        });
    }
}

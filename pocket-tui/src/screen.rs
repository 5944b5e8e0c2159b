use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use unicode_width::UnicodeWidthChar;

use pocket_core::screen::{RowStyle, Screen};

use crate::theme::Theme;

/// Rows reserved for the title and the rule drawn under it.
const HEADER_ROWS: u16 = 2;

/// The handheld's TFT panel, rendered on a terminal.
///
/// Owns the terminal for its lifetime: raw mode plus (unless
/// `POCKET_NO_ALT_SCREEN` is set) the alternate screen buffer, both restored
/// on drop. The row-oriented contract maps straight onto cursor-addressed
/// line writes; menu row 0 becomes the top line with a rule under it, item
/// rows follow.
pub struct TerminalScreen {
    theme: Theme,
    width: u16,
    alt_screen: bool,
}

impl TerminalScreen {
    pub fn new(theme: Theme) -> Result<Self> {
        let alt_screen = !no_alt_screen();
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if alt_screen {
            crossterm::queue!(out, EnterAlternateScreen)?;
        }
        crossterm::queue!(out, cursor::Hide, terminal::Clear(ClearType::All))?;
        out.flush()?;
        let (width, _) = terminal::size()?;
        Ok(Self {
            theme,
            width,
            alt_screen,
        })
    }

    fn terminal_row(row: usize) -> u16 {
        // Menu row 1 lands just below the title rule.
        match u16::try_from(row) {
            Ok(0) => 0,
            Ok(r) => r + HEADER_ROWS - 1,
            Err(_) => u16::MAX,
        }
    }

    fn colors(&self, style: RowStyle) -> (Color, Color) {
        match style {
            RowStyle::Title => (self.theme.title, Color::Reset),
            RowStyle::Normal => (self.theme.text, Color::Reset),
            RowStyle::Highlighted => (self.theme.highlight_fg, self.theme.highlight_bg),
        }
    }

    /// Pad to the panel width so stale characters are always overwritten.
    fn padded(&self, text: &str) -> String {
        let width = usize::from(self.width.max(1));
        let mut line = String::with_capacity(width);
        let mut used = 0;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            line.push(ch);
            used += w;
        }
        line.push_str(&" ".repeat(width.saturating_sub(used)));
        line
    }

    fn try_clear(&mut self) -> Result<()> {
        let mut out = io::stdout();
        crossterm::queue!(out, ResetColor, terminal::Clear(ClearType::All))?;
        out.flush()?;
        Ok(())
    }

    fn try_draw_row(&mut self, row: usize, text: &str, style: RowStyle) -> Result<()> {
        let (fg, bg) = self.colors(style);
        let mut out = io::stdout();
        crossterm::queue!(
            out,
            cursor::MoveTo(0, Self::terminal_row(row)),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(self.padded(text)),
        )?;
        if style == RowStyle::Title {
            let rule = "─".repeat(usize::from(self.width.max(1)));
            crossterm::queue!(
                out,
                cursor::MoveTo(0, 1),
                SetBackgroundColor(Color::Reset),
                Print(rule),
            )?;
        }
        crossterm::queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

impl Screen for TerminalScreen {
    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            log::warn!("screen clear failed: {e}");
        }
    }

    fn draw_row(&mut self, row: usize, text: &str, style: RowStyle) {
        if let Err(e) = self.try_draw_row(row, text, style) {
            log::warn!("screen write failed: {e}");
        }
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = crossterm::queue!(out, ResetColor, cursor::Show);
        if self.alt_screen {
            let _ = crossterm::queue!(out, LeaveAlternateScreen);
        }
        let _ = out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

fn no_alt_screen() -> bool {
    // Drawing in the primary buffer keeps tmux capture-pane output usable
    // for automation/debugging.
    match std::env::var("POCKET_NO_ALT_SCREEN") {
        Ok(value) => {
            let value = value.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_row_mapping() {
        assert_eq!(TerminalScreen::terminal_row(0), 0);
        assert_eq!(TerminalScreen::terminal_row(1), 2);
        assert_eq!(TerminalScreen::terminal_row(7), 8);
    }
}

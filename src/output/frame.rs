//! Boxed menus for the interactive navigator

use std::io::{self, Write};

/// A titled box of menu items.
///
/// ```text
/// +═══[ MENU ]════════+
/// ║ 1 - settings      ║
/// +═══════════════════+
/// ```
#[derive(Debug, Clone)]
pub struct Frame {
    title: String,
    items: Vec<String>,
}

const TITLE_OFFSET: usize = 3;

impl Frame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, text: impl Into<String>) -> Self {
        self.items.push(text.into());
        self
    }

    /// Room between the borders, grown to fit the title and every item.
    fn inner_width(&self) -> usize {
        let title = self.title.chars().count() + 4 + 2 * TITLE_OFFSET;
        let widest = self
            .items
            .iter()
            .map(|i| i.chars().count() + 2)
            .max()
            .unwrap_or(0);
        title.max(widest)
    }

    pub fn lines(&self) -> Vec<String> {
        let inner = self.inner_width();
        let label = format!("[ {} ]", self.title.to_uppercase());
        let tail = inner - TITLE_OFFSET - label.chars().count();

        let mut lines = Vec::with_capacity(self.items.len() + 2);
        lines.push(format!(
            "+{}{}{}+",
            "═".repeat(TITLE_OFFSET),
            label,
            "═".repeat(tail)
        ));
        for item in &self.items {
            let width = inner - 2;
            lines.push(format!("║ {:<width$} ║", item));
        }
        lines.push(format!("+{}+", "═".repeat(inner)));
        lines
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

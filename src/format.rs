//! Text layout of the history listing.

#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

#[cfg(feature = "chrono")]
use chrono::{DateTime, Local, Utc};
#[cfg(feature = "colored")]
use colored::Colorize;
use std::fmt::{self, Write};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
    pub saved: bool,
}

/// One entry of the listing, or the initial state when `message` is `None`.
pub(crate) struct Row<'a> {
    pub index: usize,
    pub head: bool,
    pub saved: bool,
    /// The record is on the redo stack.
    pub undone: bool,
    pub message: Option<&'a dyn fmt::Display>,
    #[cfg(feature = "chrono")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone)]
enum Paint {
    Plain,
    Index,
    Time,
    Head,
    Saved,
    Undone,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
            saved: true,
        }
    }
}

impl Format {
    /// Writes `index [LABELS] message`, with the message on indented lines
    /// below when detailed.
    pub fn row(self, f: &mut fmt::Formatter, row: &Row) -> fmt::Result {
        self.paint(f, &row.index.to_string(), Paint::Index)?;

        #[cfg(feature = "chrono")]
        if let Some(timestamp) = row.timestamp.filter(|_| self.detailed) {
            let time = timestamp.with_timezone(&Local).format("%H:%M:%S");
            f.write_char(' ')?;
            self.paint(f, &time.to_string(), Paint::Time)?;
        }

        let labels = [
            (self.head && row.head, "HEAD", Paint::Head),
            (self.saved && row.saved, "SAVED", Paint::Saved),
        ];
        let mut labels = labels.iter().filter(|(on, ..)| *on).peekable();
        if labels.peek().is_some() {
            f.write_str(" [")?;
            for (i, (_, label, paint)) in labels.enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                self.paint(f, label, *paint)?;
            }
            f.write_char(']')?;
        }

        let Some(message) = row.message else {
            return f.write_char('\n');
        };
        let paint = if row.undone { Paint::Undone } else { Paint::Plain };
        let message = message.to_string();
        if self.detailed {
            f.write_char('\n')?;
            for line in message.lines() {
                f.write_str("  ")?;
                self.paint(f, line.trim(), paint)?;
                f.write_char('\n')?;
            }
            Ok(())
        } else {
            if let Some(line) = message.lines().map(str::trim).find(|s| !s.is_empty()) {
                f.write_char(' ')?;
                self.paint(f, line, paint)?;
            }
            f.write_char('\n')
        }
    }

    fn paint(self, f: &mut fmt::Formatter, text: &str, paint: Paint) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            let text = match paint {
                Paint::Plain => text.normal(),
                Paint::Index => text.yellow().bold(),
                Paint::Time => text.yellow(),
                Paint::Head => text.cyan().bold(),
                Paint::Saved => text.green().bold(),
                Paint::Undone => text.dimmed(),
            };
            return write!(f, "{text}");
        }
        f.write_str(text)
    }
}

//! Display sanitization for server-provided text.
//!
//! Offer titles, descriptions, review comments and error bodies all come from
//! the network. Before they reach the terminal, escape sequences and control
//! characters are removed so they cannot move the cursor, rewrite the screen
//! or set the clipboard.

use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Text,
    /// Saw ESC, deciding what kind of sequence follows.
    Escape,
    /// Inside `ESC [` (or C1 CSI) until a final byte.
    Csi,
    /// Inside an OSC/DCS/APC/PM string until BEL or `ESC \`.
    StringCmd,
    /// Saw ESC inside a string command; `\` ends it.
    StringCmdEscape,
}

/// Remove escape sequences and control characters other than `\n` and `\t`.
///
/// Returns the input unchanged (borrowed) when nothing needs stripping.
#[must_use]
pub fn sanitize_display_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_unsafe) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut state = Scan::Text;

    for c in input.chars() {
        state = match state {
            Scan::Text => {
                if c == ESC {
                    Scan::Escape
                } else if c == '\u{9b}' {
                    Scan::Csi
                } else {
                    if !is_unsafe(c) {
                        out.push(c);
                    }
                    Scan::Text
                }
            }
            Scan::Escape => match c {
                '[' => Scan::Csi,
                ']' | 'P' | '_' | '^' => Scan::StringCmd,
                _ => Scan::Text,
            },
            Scan::Csi => {
                if ('\x40'..='\x7e').contains(&c) {
                    Scan::Text
                } else {
                    Scan::Csi
                }
            }
            Scan::StringCmd => match c {
                BEL => Scan::Text,
                ESC => Scan::StringCmdEscape,
                _ => Scan::StringCmd,
            },
            Scan::StringCmdEscape => {
                if c == '\\' {
                    Scan::Text
                } else {
                    Scan::StringCmd
                }
            }
        };
    }

    Cow::Owned(out)
}

fn is_unsafe(c: char) -> bool {
    match c {
        '\n' | '\t' => false,
        '\r' => true,
        c if c <= '\x1f' || c == '\x7f' => true,
        c => ('\u{80}'..='\u{9f}').contains(&c),
    }
}

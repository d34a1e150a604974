//! Editable form state for the login page and the review form.

use unicode_segmentation::UnicodeSegmentation;

use six_cities_types::{
    CommentDraft, Credentials, MAX_COMMENT_CHARS, MAX_RATING, MIN_COMMENT_CHARS, MIN_RATING,
    ValidationError,
};

/// Single-line text with a grapheme cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text left of the cursor, for placing the terminal caret.
    #[must_use]
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index_at(self.cursor)]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn enter_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let index = self.byte_index_at(self.cursor);
        self.text.insert(index, ch);
        self.move_cursor_right();
    }

    /// Insert pasted text; line breaks become spaces.
    pub fn enter_text(&mut self, text: &str) {
        let cleaned: String = text
            .chars()
            .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
            .filter(|ch| !ch.is_control())
            .collect();
        if cleaned.is_empty() {
            return;
        }
        let index = self.byte_index_at(self.cursor);
        self.text.insert_str(index, &cleaned);
        self.cursor = (self.cursor + cleaned.graphemes(true).count()).min(self.grapheme_count());
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }
        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Default, Clone)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginField,
    /// Client-side validation message.
    pub error: Option<String>,
}

impl LoginForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        self.error = None;
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn credentials(&self) -> Result<Credentials, ValidationError> {
        Credentials::new(self.email.text(), self.password.text())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The "Your review" form on the offer page.
#[derive(Debug, Default, Clone)]
pub struct CommentForm {
    pub text: TextField,
    pub rating: Option<u8>,
    /// Keystrokes go to the text field while set.
    pub editing: bool,
}

impl CommentForm {
    pub fn set_rating(&mut self, rating: u8) {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            self.rating = Some(rating);
        }
    }

    /// Characters counted the way the server counts them.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.text().trim().chars().count()
    }

    /// Submit is enabled only with a rating and a comment of allowed length.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.rating.is_some() && (MIN_COMMENT_CHARS..=MAX_COMMENT_CHARS).contains(&self.char_count())
    }

    pub fn draft(&self) -> Result<CommentDraft, ValidationError> {
        let rating = self.rating.unwrap_or(0);
        CommentDraft::new(self.text.text(), rating)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Editing-interaction state machine over one text buffer.
//!
//! The highlight is pure data over a buffer snapshot; rendering it is a
//! stateless derived step and never touches the logical text. Any buffer
//! mutation invalidates the highlight and selection, since both are defined
//! only relative to one snapshot.

use serde::Serialize;

use crate::sentence::{locate_sentence, replace_sentence, SentenceSpan};

/// Phases of the sentence-editing interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditPhase {
    Idle,
    SentenceSelected,
    AwaitingSuggestions,
    SuggestionsReady,
    SuggestionsUnavailable,
}

/// A `(start, end)` half-open byte span marking the selected sentence,
/// valid only until the buffer is next mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
}

/// The buffer split around a highlight, for rendering. Concatenating the
/// three segments always reproduces the buffer exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedView<'a> {
    pub before: &'a str,
    pub focus: &'a str,
    pub after: &'a str,
}

/// Derives the visual highlight segments. Stateless: calling this never
/// changes the buffer or the offsets.
pub fn render_highlight(text: &str, highlight: Highlight) -> HighlightedView<'_> {
    HighlightedView {
        before: &text[..highlight.start],
        focus: &text[highlight.start..highlight.end],
        after: &text[highlight.end..],
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("no sentence is selected")]
    NothingSelected,
    #[error("invalid phase transition from {0:?}")]
    InvalidTransition(EditPhase),
}

/// One editing session: a text buffer plus at most one sentence in focus.
#[derive(Debug)]
pub struct EditSession {
    text: String,
    phase: EditPhase,
    selected: Option<SentenceSpan>,
    highlight: Option<Highlight>,
}

impl EditSession {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            phase: EditPhase::Idle,
            selected: None,
            highlight: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn selected(&self) -> Option<&SentenceSpan> {
        self.selected.as_ref()
    }

    /// Selects the sentence at `caret`. A new selection implicitly clears
    /// any prior highlight; a blank sentence leaves the session idle.
    pub fn select(&mut self, caret: usize) -> Option<&SentenceSpan> {
        self.clear_selection();

        let span = locate_sentence(&self.text, caret);
        if span.is_blank() {
            return None;
        }

        self.highlight = Some(Highlight {
            start: span.start,
            end: span.end,
        });
        self.selected = Some(span);
        self.phase = EditPhase::SentenceSelected;
        self.selected.as_ref()
    }

    /// Marks the selected sentence as sent off for rewriting.
    pub fn begin_rewrite(&mut self) -> Result<(), EditError> {
        match self.phase {
            EditPhase::SentenceSelected => {
                self.phase = EditPhase::AwaitingSuggestions;
                Ok(())
            }
            other => Err(EditError::InvalidTransition(other)),
        }
    }

    pub fn suggestions_ready(&mut self) -> Result<(), EditError> {
        match self.phase {
            EditPhase::AwaitingSuggestions => {
                self.phase = EditPhase::SuggestionsReady;
                Ok(())
            }
            other => Err(EditError::InvalidTransition(other)),
        }
    }

    pub fn suggestions_unavailable(&mut self) -> Result<(), EditError> {
        match self.phase {
            EditPhase::AwaitingSuggestions => {
                self.phase = EditPhase::SuggestionsUnavailable;
                Ok(())
            }
            other => Err(EditError::InvalidTransition(other)),
        }
    }

    /// Replaces the selected sentence, returning to idle. The highlight is
    /// dropped before the splice so it can never leak into the new buffer,
    /// and all offsets are invalidated by the mutation.
    pub fn replace(&mut self, replacement: &str) -> Result<&str, EditError> {
        let span = self.selected.take().ok_or(EditError::NothingSelected)?;
        self.highlight = None;
        self.text = replace_sentence(&self.text, span.start, span.end, replacement);
        self.phase = EditPhase::Idle;
        Ok(&self.text)
    }

    /// Closes the interaction without editing.
    pub fn close(&mut self) {
        self.clear_selection();
    }

    /// Replaces the whole buffer. Mutation invalidates selection offsets.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.highlight = None;
        self.phase = EditPhase::Idle;
    }
}

//! Bounded-length phrase splitting for speech utterances
//!
//! A speech engine voices one phrase at a time, and phrases must stay within
//! an engine-imposed length bound. `split_phrases` normalizes whitespace and
//! greedily packs words into phrases at most `max_chars` characters long,
//! breaking at whitespace so words stay intact whenever possible.

use std::collections::VecDeque;

/// Maximum phrase length accepted by the speech engine, in characters.
pub const DEFAULT_MAX_PHRASE_CHARS: usize = 640;

/// Split `text` into phrases of at most `max_chars` characters.
///
/// Whitespace runs are collapsed to single spaces and the input is trimmed
/// first. Joining the result with single spaces reproduces that normalized
/// text, unless a single word exceeded the bound and had to be hard-split at
/// character boundaries. Empty or whitespace-only input yields no phrases.
/// A zero bound is treated as one, so a misconfigured caller still speaks.
pub fn split_phrases(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);

    let mut phrases = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if word_chars > max_chars {
            if !current.is_empty() {
                phrases.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            hard_split(word, max_chars, &mut phrases);
        } else if current_chars == 0 {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            phrases.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }

    if !current.is_empty() {
        phrases.push(current);
    }
    phrases
}

/// Split a single oversized word into bound-sized pieces, respecting UTF-8
/// character boundaries.
fn hard_split(word: &str, max_chars: usize, out: &mut Vec<String>) {
    let mut piece = String::new();
    let mut count = 0usize;
    for ch in word.chars() {
        piece.push(ch);
        count += 1;
        if count == max_chars {
            out.push(std::mem::take(&mut piece));
            count = 0;
        }
    }
    if !piece.is_empty() {
        out.push(piece);
    }
}

/// FIFO of phrases awaiting dispatch to the engine.
#[derive(Debug, Default)]
pub struct PhraseQueue {
    phrases: VecDeque<String>,
}

impl PhraseQueue {
    pub fn new(text: &str, max_chars: usize) -> Self {
        Self {
            phrases: split_phrases(text, max_chars).into(),
        }
    }

    /// Pop the next phrase to speak, in input order.
    pub fn next_phrase(&mut self) -> Option<String> {
        self.phrases.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Discard all queued phrases (session replacement or user stop).
    pub fn clear(&mut self) {
        self.phrases.clear();
    }
}

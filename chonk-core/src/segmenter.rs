//! Heuristic sentence segmentation
//!
//! A boundary is a whitespace character that directly follows `.`, `?` or
//! `!`. Two fixed look-behind patterns suppress the boundary:
//!
//! - `W.W?` before the whitespace (initials and dotted abbreviations such as
//!   `e.g.` or `U.S.`), where `W` is a word character;
//! - `Xx.` before the whitespace (short title-case abbreviations such as
//!   `Mr.` or `Dr.`).
//!
//! No abbreviation dictionary is consulted, so the rules both over- and
//! under-trigger on real text.

/// Returns true for sentence-terminal punctuation
#[inline]
pub fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '?' | '!')
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Split `text` into trimmed, non-empty sentences in document order
pub fn segment_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, &(offset, ch)) in chars.iter().enumerate() {
        if !ch.is_whitespace() || !is_boundary(&chars, i) {
            continue;
        }
        push_trimmed(&mut sentences, &text[start..offset]);
        start = offset + ch.len_utf8();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}

/// Whether the whitespace at `chars[i]` ends a sentence
fn is_boundary(chars: &[(usize, char)], i: usize) -> bool {
    let before = |back: usize| -> Option<char> { i.checked_sub(back).map(|j| chars[j].1) };

    match before(1) {
        Some(ch) if is_terminator(ch) => {}
        _ => return false,
    }

    // W . W <terminator>
    if let (Some(a), Some('.'), Some(b)) = (before(4), before(3), before(2)) {
        if is_word_char(a) && is_word_char(b) {
            return false;
        }
    }

    // X x .
    if let (Some(upper), Some(lower), Some('.')) = (before(3), before(2), before(1)) {
        if upper.is_ascii_uppercase() && lower.is_ascii_lowercase() {
            return false;
        }
    }

    true
}

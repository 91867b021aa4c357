//! Levenshtein distance and best-window similarity over chars.

/// Edit distance with a two-row buffer.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// `(max_len - distance) / max_len`, 1.0 for two empty inputs.
pub fn similarity(a: &[char], b: &[char]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    (max_len - levenshtein(a, b)) as f64 / max_len as f64
}

/// 1.0 if `text` contains `term`; otherwise the best similarity between
/// `term` and any window of `text` of the same char length. A text shorter
/// than the term is compared whole.
pub fn best_window_similarity(term: &str, text: &str) -> f64 {
    if term.is_empty() {
        return 0.0;
    }
    if text.contains(term) {
        return 1.0;
    }
    let term: Vec<char> = term.chars().collect();
    let text: Vec<char> = text.chars().collect();
    if text.len() <= term.len() {
        return similarity(&term, &text);
    }
    text.windows(term.len())
        .map(|w| similarity(&term, w))
        .fold(0.0, f64::max)
}

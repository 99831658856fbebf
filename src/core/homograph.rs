/// Homograph numbers for the entries sharing one lexeme form, in creation
/// order. A lone entry is unnumbered (0); two or more get 1..n.
pub fn renumber(count: usize) -> Vec<u32> {
    match count {
        0 => Vec::new(),
        1 => vec![0],
        n => (1..=n as u32).collect(),
    }
}

/// Number for a new entry appended to `existing` entries with the same form.
pub fn next_number(existing: usize) -> u32 {
    if existing == 0 {
        0
    } else {
        existing as u32 + 1
    }
}

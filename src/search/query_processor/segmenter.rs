//! Query segmentation over a fixed separator set.
//!
//! Punctuation always closes a segment; conjunctions and sequencing adverbs close
//! one only as whole words, so "museus" is never cut at its "e".

pub const PUNCTUATION_SEPARATORS: &[char] = &[',', ';', '.', '!', '?', ':', '\n', '\r'];

pub const WORD_SEPARATORS: &[&str] = &[
    "e", "and", "depois", "então", "entao", "também", "tambem", "then", "next", "also",
];


pub fn segment(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for chunk in lowered.split(PUNCTUATION_SEPARATORS) {
        for word in chunk.split_whitespace() {
            if WORD_SEPARATORS.contains(&word) {
                flush(&mut current, &mut segments);
            } else {
                current.push(word);
            }
        }
        flush(&mut current, &mut segments);
    }

    segments
}

fn flush(current: &mut Vec<&str>, segments: &mut Vec<String>) {
    if !current.is_empty() {
        segments.push(current.join(" "));
        current.clear();
    }
}

use std::collections::HashMap;

/// Counts words in a text
pub struct WordCounter {
    counts: HashMap<String, usize>,
}

impl WordCounter {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        for word in text.split_whitespace() {
            *self.counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
}

fn main() {
	let mut counter = WordCounter::new();
	counter.add("the quick brown fox jumps over the lazy dog");
	println!("{:?}", counter.counts.get("the"));
}

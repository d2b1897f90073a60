use khiin_core::lomaji::{expand, normalize};

/// Print every key sequence generated for `word`, one per line, in the
/// order the database builder would insert them.
pub fn keys(word: &str) {
    let word = normalize(word, false);
    let candidates = die!(expand(&word), "Error: {}");
    println!("{word}");
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "  {}\t{}\t{} syl{}",
            c.numeric,
            c.telex,
            c.n_syls,
            if c.is_fuzzy(i) { "\tfuzzy" } else { "" }
        );
    }
}

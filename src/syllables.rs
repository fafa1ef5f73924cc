//! Syllable estimation by vowel groups.

const VOWELS: &str = "aeiouy";

/// Estimate the syllables in `word`. Never less than 1.
///
/// Words of three characters or fewer count as one syllable. Longer words
/// count runs of vowels (`y` included), less one for a silent final `e`
/// when more than one group was found.
pub fn count_syllables(word: &str) -> usize {
    let word = word.trim().to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let is_vowel = VOWELS.contains(c);
        if is_vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = is_vowel;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::count_syllables;

    #[test]
    fn short_words_are_one_syllable() {
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("I"), 1);
        assert_eq!(count_syllables(""), 1);
    }

    #[test]
    fn counts_vowel_groups() {
        assert_eq!(count_syllables("lesson"), 2);
        assert_eq!(count_syllables("valuable"), 2);
        assert_eq!(count_syllables("quickly"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn silent_e_is_dropped_once() {
        assert_eq!(count_syllables("improve"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("free"), 1);
        assert_eq!(count_syllables("tree"), 1);
    }

    #[test]
    fn case_and_padding_are_ignored() {
        assert_eq!(count_syllables("  Learned "), count_syllables("learned"));
        assert_eq!(count_syllables("HOWEVER"), 3);
    }

    #[test]
    fn consonant_clusters_still_count_one() {
        assert_eq!(count_syllables("strengths"), 1);
        assert_eq!(count_syllables("pfft"), 1);
    }
}

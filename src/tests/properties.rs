use std::sync::Arc;

use proptest::prelude::*;

use crate::features::{lexical, syntactic, AnalyzedText};
use crate::{
    segment_t_units, FeatureExtractor, FixedChecker, InMemoryLexicon, RuleBasedAnalyzer,
    SyntacticAnalyzer,
};

const VOCABULARY: &[&str] = &[
    "the", "cat", "dog", "and", "but", "because", "she", "he", "ran", "saw", "quickly", "who",
    "to", "go", "if", "however", ",", ".", "?", "!", "a", "lesson", "learned", "will", "not",
];

fn essay() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|words| words.join(" "))
}

fn extractor() -> FeatureExtractor {
    FeatureExtractor::builder()
        .senses(Arc::new(InMemoryLexicon::new()))
        .grammar_checker(Arc::new(FixedChecker::count(0)))
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn every_record_has_twenty_keys(text in essay()) {
        let record = extractor().extract(&text);
        prop_assert_eq!(record.len(), 20);
        prop_assert!(record.keys().all(|key| key.starts_with("OST_")));
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,80}") {
        let record = extractor().extract(&text);
        prop_assert_eq!(record.len(), 20);
    }

    #[test]
    fn t_units_partition_each_sentence(text in essay()) {
        for sentence in RuleBasedAnalyzer::new().parse(&text) {
            let units = segment_t_units(&sentence);
            let covered: usize = units.iter().map(|unit| unit.len()).sum();
            prop_assert_eq!(covered, sentence.len());

            let mut next = 0;
            for unit in &units {
                prop_assert_eq!(unit.tokens.start, next);
                next = unit.tokens.end;
            }
        }
    }

    #[test]
    fn parses_have_one_root_and_heads_in_range(text in essay()) {
        for sentence in RuleBasedAnalyzer::new().parse(&text) {
            let roots = sentence
                .tokens()
                .iter()
                .filter(|token| token.dep == crate::DepLabel::Root)
                .count();
            prop_assert_eq!(roots, 1);
            prop_assert!(sentence.tokens().iter().all(|token| token.head < sentence.len()));
        }
    }

    #[test]
    fn ratios_stay_in_range(text in essay()) {
        let analyzer = RuleBasedAnalyzer::new();
        let doc = AnalyzedText::new(&text, &analyzer);

        let diversity = lexical::lexical_diversity(&doc);
        prop_assert!((0.0..=1.0).contains(&diversity));

        let simplicity = syntactic::syntactic_simplicity(&doc);
        prop_assert!((0.0..=1.0).contains(&simplicity));

        let types = syntactic::sentence_type_diversity(&doc) * 5.0;
        prop_assert!((types - types.round()).abs() < 1e-9);
        prop_assert!(types.round() <= 5.0);
    }
}

use std::sync::Arc;

use crate::{Feature, FeatureExtractor, FeatureValue, FixedChecker, InMemoryLexicon};

fn extractor() -> FeatureExtractor {
    FeatureExtractor::builder()
        .senses(Arc::new(InMemoryLexicon::new()))
        .grammar_checker(Arc::new(FixedChecker::count(1)))
        .build()
        .unwrap()
}

const ESSAYS: [&str; 4] = [
    "She smiled and he laughed.",
    "",
    "I learned a valuable lesson because I failed the test. However, I improved quickly.",
    "Did it work?",
];

#[test]
fn batch_preserves_input_order() {
    let extractor = extractor();
    let batch = extractor.extract_batch(&ESSAYS);
    assert_eq!(batch.len(), 4);

    for (record, essay) in batch.iter().zip(ESSAYS) {
        assert_eq!(record, &extractor.extract(essay));
    }
    assert_eq!(
        batch.column(Feature::WordCount),
        vec![
            FeatureValue::Int(5),
            FeatureValue::Int(0),
            FeatureValue::Int(14),
            FeatureValue::Int(3),
        ]
    );
}

#[test]
fn batch_accepts_owned_strings() {
    let owned: Vec<String> = ESSAYS.iter().map(|essay| essay.to_string()).collect();
    let batch = extractor().extract_batch(&owned);
    assert_eq!(batch.len(), 4);
    assert!(extractor().extract_batch::<String>(&[]).is_empty());
}

#[test]
fn batch_writes_csv() {
    let batch = extractor().extract_batch(&ESSAYS[..2]);
    let mut out = Vec::new();
    batch.write_csv(&mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();

    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("OST_word_count,OST_avg_sentence_length,"));
    assert_eq!(header.split(',').count(), 20);

    let first: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(first.len(), 20);
    assert_eq!(first[0], "5");
    assert_eq!(first[1], "5.0");

    let empty = lines.next().unwrap();
    assert_eq!(empty, vec!["0"; 20].join(","));
    assert_eq!(lines.next(), None);
}

#[test]
fn batch_serializes_as_a_list_of_records() {
    let batch = extractor().extract_batch(&["", "Did it work?"]);
    let json = serde_json::to_value(&batch).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["OST_error_count"], serde_json::json!(0));
    assert_eq!(records[1]["OST_error_count"], serde_json::json!(1));
    assert_eq!(records[1]["OST_sentence_type_diversity"], serde_json::json!(0.2));
}

//! Morphological base-form lookup, matching NLTK's `morphy`.
//!
//! Exception lists take precedence. Otherwise the detachment rules are
//! applied once and every candidate present in the index is returned (the
//! input form included); if none is, the rules are reapplied to the
//! candidates until something matches or the candidates run out.

use crate::Pos;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => NOUN_RULES,
        Pos::Verb => VERB_RULES,
        Pos::Adj => ADJ_RULES,
        Pos::Adv => &[],
    }
}

fn apply_rules(forms: &[String], pos: Pos) -> Vec<String> {
    let mut out = Vec::new();
    for form in forms {
        for (old, new) in rules(pos) {
            if let Some(stem) = form.strip_suffix(old) {
                out.push(format!("{stem}{new}"));
            }
        }
    }
    out
}

/// Candidates that `known` accepts, deduplicated, in order.
fn filter_forms(forms: impl IntoIterator<Item = String>, known: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for form in forms {
        if known(&form) && !result.contains(&form) {
            result.push(form);
        }
    }
    result
}

/// Base forms of `form` under `pos`. `known` reports whether a lemma is in
/// the index for `pos`; `exceptions` returns the irregular bases, if any.
pub(crate) fn morphy<'e>(
    form: &str,
    pos: Pos,
    exceptions: impl Fn(&str) -> Option<&'e [String]>,
    known: &dyn Fn(&str) -> bool,
) -> Vec<String> {
    if let Some(bases) = exceptions(form) {
        let candidates = std::iter::once(form.to_string()).chain(bases.iter().cloned());
        return filter_forms(candidates, known);
    }

    let mut forms = apply_rules(&[form.to_string()], pos);
    let results = filter_forms(std::iter::once(form.to_string()).chain(forms.iter().cloned()), known);
    if !results.is_empty() {
        return results;
    }

    while !forms.is_empty() {
        forms = apply_rules(&forms, pos);
        let results = filter_forms(forms.iter().cloned(), known);
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

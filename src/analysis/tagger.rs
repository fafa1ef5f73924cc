//! Rule-based part-of-speech tagging.
//!
//! Tagging runs in two passes. The lexical pass assigns closed-class tags
//! from word lists and guesses open-class tags from a verb lexicon and
//! suffixes. The contextual pass then resolves the ambiguous cases by
//! looking at neighbours (noun/verb readings, "that", "before"/"since",
//! "have"/"do" as auxiliaries, "to" as a particle).

use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::PartOfSpeech;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "these", "those", "every", "each", "some", "any", "no", "all",
    "both", "either", "neither", "another", "such", "many", "much", "few", "several",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "yourselves", "themselves", "who",
    "whom", "whose", "which", "what", "someone", "something", "anyone", "anything", "everyone",
    "everything", "nobody", "nothing", "somebody", "everybody", "mine", "yours", "hers", "ours",
    "theirs", "my", "your", "his", "its", "our", "their",
];

pub(crate) const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their", "whose"];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "above", "below", "from", "up", "down", "out", "off", "over", "under", "without",
    "within", "along", "across", "behind", "beyond", "around", "among", "toward", "towards",
    "upon", "like", "near", "despite", "except", "per", "via", "onto", "throughout", "than",
];

const COORDINATORS: &[&str] = &["and", "but", "or", "nor"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "if", "unless", "whereas", "while", "whether", "whenever",
    "wherever",
];

/// Words that are subordinators before a clause and adpositions before a noun phrase.
const CLAUSE_OR_PHRASE: &[&str] = &["before", "after", "since", "until", "till", "when", "once"];

const BE_FORMS: &[&str] = &["be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re"];
const MODALS: &[&str] = &[
    "will", "would", "shall", "should", "can", "could", "may", "might", "must", "ca", "wo", "'ll",
    "'d",
];
const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve"];
const DO_FORMS: &[&str] = &["do", "does", "did"];

const NEGATIONS: &[&str] = &["not", "n't", "never"];

const ADVERBS: &[&str] = &[
    "very", "quite", "too", "also", "just", "only", "really", "always", "never", "often",
    "sometimes", "then", "now", "here", "there", "however", "therefore", "thus", "still", "even",
    "already", "soon", "again", "almost", "perhaps", "maybe", "rather", "well", "moreover",
    "furthermore", "additionally", "consequently", "hence", "together", "instead", "ago", "away",
    "back", "later", "nevertheless", "nonetheless", "otherwise", "yet", "so", "ever", "once",
    "indeed", "meanwhile", "first", "second", "next", "finally", "last", "how", "why", "where",
    "when",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "great", "high", "low", "big", "small", "large", "long", "short",
    "young", "important", "different", "easy", "hard", "difficult", "happy", "sad", "simple",
    "complex", "able", "free", "full", "sure", "true", "real", "best", "better", "worse", "worst",
    "own", "other", "same", "whole", "clear", "early", "late", "strong", "weak", "right", "wrong",
    "poor", "rich", "nice", "fine", "hot", "cold", "dark", "light", "quick", "slow", "fast",
    "certain", "main", "major", "final", "general", "common", "open", "ready", "close", "deep",
    "wide", "busy", "quiet", "angry", "afraid", "tired", "proud", "glad", "huge", "tiny",
];

const INTERJECTIONS: &[&str] = &["oh", "wow", "hey", "hello", "yes", "ok", "okay", "ah", "oops", "hi"];

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "thirty", "hundred", "thousand", "million",
];

const VERB_LEMMAS: &[&str] = &[
    "accept", "add", "agree", "allow", "answer", "appear", "arrive", "ask", "believe", "belong",
    "call", "change", "check", "clean", "climb", "close", "complete", "consider", "continue",
    "cook", "cry", "dance", "decide", "depend", "describe", "develop", "die", "discover", "enjoy",
    "enter", "explain", "fail", "fill", "finish", "follow", "happen", "hate", "help", "hope",
    "improve", "include", "increase", "invite", "join", "jump", "kill", "laugh", "learn", "like",
    "listen", "live", "look", "love", "manage", "marry", "miss", "move", "need", "notice", "offer",
    "open", "order", "pass", "plan", "play", "prefer", "prepare", "promise", "provide", "pull",
    "push", "reach", "realize", "receive", "remember", "reply", "report", "require", "rest",
    "return", "save", "seem", "share", "show", "smile", "start", "stay", "stop", "study",
    "succeed", "suggest", "talk", "thank", "travel", "try", "turn", "use", "visit", "wait", "walk",
    "want", "wash", "watch", "wish", "work", "worry", "graduate", "practice", "practise",
    "struggle", "earn", "solve", "attend", "achieve", "create", "carry", "cause", "cover",
    "expect", "form", "involve", "mention", "produce", "raise", "remain", "support", "test",
    "treat", "obtain", "pray", "relax", "shout", "kick", "borrow", "decline", "review",
];

/// (base, past, past participle) for irregular verbs.
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("become", "became", "become"),
    ("begin", "began", "begun"),
    ("break", "broke", "broken"),
    ("bring", "brought", "brought"),
    ("build", "built", "built"),
    ("buy", "bought", "bought"),
    ("catch", "caught", "caught"),
    ("choose", "chose", "chosen"),
    ("come", "came", "come"),
    ("cut", "cut", "cut"),
    ("draw", "drew", "drawn"),
    ("drink", "drank", "drunk"),
    ("drive", "drove", "driven"),
    ("eat", "ate", "eaten"),
    ("fall", "fell", "fallen"),
    ("feel", "felt", "felt"),
    ("fight", "fought", "fought"),
    ("find", "found", "found"),
    ("forget", "forgot", "forgotten"),
    ("get", "got", "gotten"),
    ("give", "gave", "given"),
    ("go", "went", "gone"),
    ("grow", "grew", "grown"),
    ("hear", "heard", "heard"),
    ("hold", "held", "held"),
    ("keep", "kept", "kept"),
    ("know", "knew", "known"),
    ("lead", "led", "led"),
    ("leave", "left", "left"),
    ("lend", "lent", "lent"),
    ("let", "let", "let"),
    ("lose", "lost", "lost"),
    ("make", "made", "made"),
    ("mean", "meant", "meant"),
    ("meet", "met", "met"),
    ("pay", "paid", "paid"),
    ("put", "put", "put"),
    ("read", "read", "read"),
    ("ride", "rode", "ridden"),
    ("rise", "rose", "risen"),
    ("run", "ran", "run"),
    ("say", "said", "said"),
    ("see", "saw", "seen"),
    ("sell", "sold", "sold"),
    ("send", "sent", "sent"),
    ("set", "set", "set"),
    ("sing", "sang", "sung"),
    ("sit", "sat", "sat"),
    ("sleep", "slept", "slept"),
    ("speak", "spoke", "spoken"),
    ("spend", "spent", "spent"),
    ("stand", "stood", "stood"),
    ("swim", "swam", "swum"),
    ("take", "took", "taken"),
    ("teach", "taught", "taught"),
    ("tell", "told", "told"),
    ("think", "thought", "thought"),
    ("throw", "threw", "thrown"),
    ("understand", "understood", "understood"),
    ("wear", "wore", "worn"),
    ("win", "won", "won"),
    ("write", "wrote", "written"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Regular inflections of a verb lemma: 3rd person singular, past, gerund.
fn inflect(lemma: &str) -> [String; 3] {
    let chars: Vec<char> = lemma.chars().collect();
    let last = chars[chars.len() - 1];
    let before_last = chars.len().checked_sub(2).map(|i| chars[i]);

    let third = if lemma.ends_with('y') && before_last.map_or(false, |c| !is_vowel(c)) {
        format!("{}ies", &lemma[..lemma.len() - 1])
    } else if ["s", "x", "z", "ch", "sh", "o"].iter().any(|s| lemma.ends_with(s)) {
        format!("{lemma}es")
    } else {
        format!("{lemma}s")
    };

    // Short consonant-vowel-consonant stems double their final consonant.
    let doubles = chars.len() <= 4
        && chars.len() >= 3
        && !is_vowel(last)
        && !matches!(last, 'w' | 'x' | 'y')
        && before_last.map_or(false, is_vowel)
        && !is_vowel(chars[chars.len() - 3]);

    let (past, gerund) = if lemma.ends_with('e') {
        (format!("{lemma}d"), format!("{}ing", &lemma[..lemma.len() - 1]))
    } else if lemma.ends_with('y') && before_last.map_or(false, |c| !is_vowel(c)) {
        (format!("{}ied", &lemma[..lemma.len() - 1]), format!("{lemma}ing"))
    } else if doubles {
        (format!("{lemma}{last}ed"), format!("{lemma}{last}ing"))
    } else {
        (format!("{lemma}ed"), format!("{lemma}ing"))
    };

    [third, past, gerund]
}

static VERB_FORMS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut forms = HashSet::new();
    for lemma in VERB_LEMMAS {
        forms.insert(lemma.to_string());
        forms.extend(inflect(lemma));
    }
    for (base, past, participle) in IRREGULAR_VERBS {
        forms.insert(base.to_string());
        forms.insert(past.to_string());
        forms.insert(participle.to_string());
        let [third, _, gerund] = inflect(base);
        forms.insert(third);
        forms.insert(gerund);
    }
    forms
});

/// True for a known verb form that is inflected (so not a bare noun reading).
fn is_inflected_verb(lower: &str) -> bool {
    VERB_FORMS.contains(lower)
        && (lower.ends_with("ed")
            || lower.ends_with("ing")
            || IRREGULAR_VERBS
                .iter()
                .any(|(base, past, participle)| lower != *base && (lower == *past || lower == *participle)))
}

fn has_adjective_suffix(lower: &str) -> bool {
    lower.len() > 5
        && ["ous", "ful", "able", "ible", "ive", "al", "ic", "less", "ish"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
}

fn lexical_tag(text: &str, sentence_initial: bool) -> PartOfSpeech {
    use PartOfSpeech::*;

    if text.chars().all(|c| !c.is_alphanumeric()) {
        return Punct;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        return Num;
    }

    let lower = text.to_lowercase();
    let word = lower.as_str();

    if word.chars().all(|c| !c.is_alphabetic()) {
        return Sym;
    }
    if NEGATIONS.contains(&word) && word != "never" {
        return Part;
    }
    if word == "'s" || word == "\u{2019}s" {
        return Part;
    }
    if BE_FORMS.contains(&word) || MODALS.contains(&word) {
        return Aux;
    }
    if HAVE_FORMS.contains(&word) || DO_FORMS.contains(&word) {
        return Verb;
    }
    if COORDINATORS.contains(&word) {
        return Cconj;
    }
    if SUBORDINATORS.contains(&word) {
        return Sconj;
    }
    if CLAUSE_OR_PHRASE.contains(&word) {
        return Adp;
    }
    if word == "that" || DETERMINERS.contains(&word) {
        return Det;
    }
    if PRONOUNS.contains(&word) {
        return Pron;
    }
    if word == "to" {
        return Part;
    }
    if ADPOSITIONS.contains(&word) {
        return Adp;
    }
    if INTERJECTIONS.contains(&word) {
        return Intj;
    }
    if NUMBER_WORDS.contains(&word) {
        return Num;
    }
    if ADVERBS.contains(&word) {
        return Adv;
    }
    if ADJECTIVES.contains(&word) {
        return Adj;
    }
    if VERB_FORMS.contains(word) {
        return Verb;
    }
    if !sentence_initial && text.chars().next().map_or(false, char::is_uppercase) {
        return Propn;
    }
    if word.len() > 3 && word.ends_with("ly") {
        return Adv;
    }
    if has_adjective_suffix(word) {
        return Adj;
    }
    if word.len() > 4 && (word.ends_with("ed") || word.ends_with("ing")) {
        return Verb;
    }
    Noun
}

pub(crate) fn is_determiner(lower: &str) -> bool {
    DETERMINERS.contains(&lower) || POSSESSIVES.contains(&lower)
}

/// Closed-class words: anything a capitalized proper name cannot be.
pub(crate) fn is_function_word(lower: &str) -> bool {
    [
        DETERMINERS,
        PRONOUNS,
        ADPOSITIONS,
        COORDINATORS,
        SUBORDINATORS,
        CLAUSE_OR_PHRASE,
        BE_FORMS,
        MODALS,
        HAVE_FORMS,
        DO_FORMS,
        NEGATIONS,
        ADVERBS,
        INTERJECTIONS,
    ]
    .iter()
    .any(|list| list.contains(&lower))
}

/// Tag every token of one sentence.
pub(crate) fn tag(words: &[&str]) -> Vec<PartOfSpeech> {
    let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let mut tags: Vec<PartOfSpeech> = words
        .iter()
        .enumerate()
        .map(|(idx, word)| lexical_tag(word, idx == 0))
        .collect();

    resolve_auxiliaries(&lowers, &mut tags);
    resolve_verbs(&lowers, &mut tags);
    resolve_function_words(&lowers, &mut tags);
    tags
}

fn next_content(tags: &[PartOfSpeech], from: usize) -> Option<usize> {
    (from..tags.len()).find(|&i| !matches!(tags[i], PartOfSpeech::Adv | PartOfSpeech::Part))
}

/// "have"/"do" directly governing a verb are auxiliaries.
fn resolve_auxiliaries(lowers: &[String], tags: &mut [PartOfSpeech]) {
    for idx in 0..tags.len() {
        let word = lowers[idx].as_str();
        if !(HAVE_FORMS.contains(&word) || DO_FORMS.contains(&word)) {
            continue;
        }
        if let Some(next) = next_content(tags, idx + 1) {
            let next_word = lowers[next].as_str();
            let next_is_verb = tags[next] == PartOfSpeech::Verb
                && !HAVE_FORMS.contains(&next_word)
                || (HAVE_FORMS.contains(&word) && next_word == "been");
            let negated = lowers.get(idx + 1).map_or(false, |w| w == "n't" || w == "not");
            if next_is_verb || (DO_FORMS.contains(&word) && negated) {
                tags[idx] = PartOfSpeech::Aux;
            }
        }
    }
}

/// Settle noun/verb ambiguity of lexicon verbs and guessed -ed/-ing forms.
fn resolve_verbs(lowers: &[String], tags: &mut [PartOfSpeech]) {
    use PartOfSpeech::*;

    for idx in 0..tags.len() {
        if tags[idx] != Verb {
            continue;
        }
        let word = lowers[idx].as_str();
        if HAVE_FORMS.contains(&word) || DO_FORMS.contains(&word) {
            continue;
        }

        let prev = idx.checked_sub(1).map(|p| (tags[p], lowers[p].as_str()));
        let next = tags.get(idx + 1).copied();

        let nominal_reading = match prev {
            // "the test", "my work", "a good run", "in love"
            Some((Det, p)) if p != "that" => true,
            Some((Adj, _)) | Some((Num, _)) => true,
            Some((Pron, p)) if POSSESSIVES.contains(&p) && p != "her" => true,
            Some((Adp, _)) => !word.ends_with("ing"),
            // "the school bus stops": a bare form after a noun is a compound
            Some((Noun, _)) | Some((Propn, _)) => {
                !(is_inflected_verb(word) || word.ends_with('s') || word.ends_with("ed"))
            }
            // Sentence-initial bare forms are imperatives only before an object.
            None => !matches!(next, Some(Det) | Some(Pron) | Some(Propn) | Some(Adv) | Some(Part)),
            _ => false,
        };

        // A subject pronoun, auxiliary or infinitival "to" forces the verb reading.
        let verbal_context = matches!(prev, Some((Aux, _)) | Some((Part, _)))
            || matches!(prev, Some((Pron, p)) if SUBJECT_PRONOUNS.contains(&p));

        if nominal_reading && !verbal_context {
            tags[idx] = Noun;
        }
    }
}

/// True when a subject followed by a verb comes before the next clause break.
fn clause_follows(tags: &[PartOfSpeech], from: usize) -> bool {
    use PartOfSpeech::*;

    let mut seen_subject = false;
    for &tag in &tags[from.min(tags.len())..] {
        match tag {
            Punct | Cconj | Sconj => return false,
            Pron | Noun | Propn => seen_subject = true,
            Verb | Aux => return seen_subject,
            _ => {}
        }
    }
    false
}

/// Contextual readings of "that", "to", "like", "'s" and clause-or-phrase words.
fn resolve_function_words(lowers: &[String], tags: &mut [PartOfSpeech]) {
    use PartOfSpeech::*;

    for idx in 0..tags.len() {
        let word = lowers[idx].as_str();
        let prev = idx.checked_sub(1).map(|p| tags[p]);
        let next = tags.get(idx + 1).copied();

        match word {
            "that" => {
                tags[idx] = match (prev, next) {
                    (_, Some(Noun)) | (_, Some(Adj)) | (_, Some(Propn)) => Det,
                    (Some(Noun), _) | (Some(Propn), _) => Pron,
                    (Some(Verb), _) | (Some(Adj), _) => Sconj,
                    _ => Pron,
                };
            }
            "to" => {
                if next != Some(Verb) && next != Some(Aux) {
                    tags[idx] = Adp;
                }
            }
            "like" => {
                let after_subject = idx > 0 && SUBJECT_PRONOUNS.contains(&lowers[idx - 1].as_str());
                if after_subject || prev == Some(Aux) || prev == Some(Part) {
                    tags[idx] = Verb;
                }
            }
            "'s" | "\u{2019}s" => {
                let after_subject = idx > 0
                    && (SUBJECT_PRONOUNS.contains(&lowers[idx - 1].as_str())
                        || matches!(lowers[idx - 1].as_str(), "that" | "there" | "here" | "what" | "who"));
                if after_subject {
                    tags[idx] = Aux;
                }
            }
            "so" | "yet" => {
                if prev == Some(Punct) && clause_follows(tags, idx + 1) {
                    tags[idx] = Cconj;
                }
            }
            _ if CLAUSE_OR_PHRASE.contains(&word) => {
                if clause_follows(tags, idx + 1) {
                    tags[idx] = Sconj;
                } else if word == "when" || word == "once" {
                    tags[idx] = Adv;
                }
            }
            _ => {}
        }
    }
}

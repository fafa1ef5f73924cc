//! Rule-based dependency parsing.
//!
//! The parser works clause first. A left-to-right pass chunks each sentence
//! into clauses opened by subordinators, relative pronouns, infinitival "to"
//! and coordinators that join two verb-headed clauses. Each clause picks a
//! verbal head, clause heads are linked to their governors with clausal
//! relations (`advcl`, `relcl`, `ccomp`, `xcomp`, `conj`), and the remaining
//! tokens are attached inside their clause by noun-phrase chunking.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::sentences::SentenceSplitter;
use super::tagger::{self, POSSESSIVES};
use super::tokenize::tokenize;
use super::{DepLabel, PartOfSpeech, Sentence, SyntacticAnalyzer, Token};

const RELATIVE_PRONOUNS: &[&str] = &["who", "whom", "whose", "which", "that"];

static SHARED: Lazy<Arc<RuleBasedAnalyzer>> = Lazy::new(|| {
    tracing::debug!("initializing shared rule-based analyzer");
    Arc::new(RuleBasedAnalyzer::new())
});

/// Tokenizer, sentence splitter, tagger and dependency parser in one,
/// driven entirely by built-in word lists and rules.
pub struct RuleBasedAnalyzer {
    splitter: SentenceSplitter,
}

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        RuleBasedAnalyzer {
            splitter: SentenceSplitter::new(),
        }
    }

    /// The process-wide instance. Initialized by the first caller; concurrent
    /// callers wait for that initialization and share the result.
    pub fn shared() -> Arc<RuleBasedAnalyzer> {
        Arc::clone(&SHARED)
    }
}

impl Default for RuleBasedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleBasedAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RuleBasedAnalyzer")
    }
}

impl SyntacticAnalyzer for RuleBasedAnalyzer {
    fn parse(&self, text: &str) -> Vec<Sentence> {
        let pieces = tokenize(text);

        self.splitter
            .split(&pieces)
            .into_iter()
            .map(|range| {
                let slice = &pieces[range];
                let start = slice[0].0;
                let (last_start, last) = slice[slice.len() - 1];
                let end = last_start + last.len();

                let words: Vec<&str> = slice.iter().map(|(_, word)| *word).collect();
                let tags = tagger::tag(&words);
                let arcs = parse_dependencies(&words, &tags);

                let tokens = words
                    .iter()
                    .zip(tags)
                    .zip(arcs)
                    .map(|((word, pos), (dep, head))| Token::new(*word, pos, dep, head))
                    .collect();

                Sentence::new(&text[start..end], (start, end), tokens)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseKind {
    Main,
    Coordinate,
    Adverbial,
    Relative,
    Complement,
    OpenComplement,
}

impl ClauseKind {
    fn is_subordinate(&self) -> bool {
        !matches!(self, Self::Main | Self::Coordinate)
    }
}

#[derive(Debug)]
struct Clause {
    kind: ClauseKind,
    parent: Option<usize>,
    /// Noun a relative clause modifies.
    anchor: Option<usize>,
    /// Subordinator, coordinator or infinitival "to" that opened the clause.
    marker: Option<usize>,
    members: Vec<usize>,
    has_verb: bool,
    head: Option<usize>,
}

impl Clause {
    fn new(kind: ClauseKind, parent: Option<usize>) -> Self {
        Clause {
            kind,
            parent,
            anchor: None,
            marker: None,
            members: Vec::new(),
            has_verb: false,
            head: None,
        }
    }
}

fn is_verbal(tag: PartOfSpeech) -> bool {
    matches!(tag, PartOfSpeech::Verb | PartOfSpeech::Aux)
}

/// A verb directly after an auxiliary, negation, "to" or adverb extends the
/// current verb group rather than starting a new predicate.
fn continues_verb_group(tags: &[PartOfSpeech], idx: usize) -> bool {
    idx > 0
        && matches!(
            tags[idx - 1],
            PartOfSpeech::Aux | PartOfSpeech::Part | PartOfSpeech::Adv
        )
}

fn verb_ahead(words: &[String], tags: &[PartOfSpeech], from: usize) -> bool {
    for idx in from..tags.len() {
        match tags[idx] {
            PartOfSpeech::Cconj | PartOfSpeech::Sconj => return false,
            PartOfSpeech::Punct if words[idx] != "," => return false,
            tag if is_verbal(tag) => return true,
            _ => {}
        }
    }
    false
}

fn previous_nominal(words: &[String], tags: &[PartOfSpeech], idx: usize) -> Option<usize> {
    let prev = (0..idx).rev().find(|&i| words[i] != ",")?;
    matches!(tags[prev], PartOfSpeech::Noun | PartOfSpeech::Propn).then(|| prev)
}

fn segment(words: &[String], tags: &[PartOfSpeech]) -> Vec<Clause> {
    let mut clauses = vec![Clause::new(ClauseKind::Main, None)];
    let mut current = 0;

    for idx in 0..tags.len() {
        let tag = tags[idx];
        let word = words[idx].as_str();

        // A comma closes a finished adverbial or relative clause.
        if word == ","
            && matches!(clauses[current].kind, ClauseKind::Adverbial | ClauseKind::Relative)
            && clauses[current].has_verb
        {
            if let Some(parent) = clauses[current].parent {
                current = parent;
            }
            clauses[current].members.push(idx);
            continue;
        }

        // A fresh predicate after a finished subordinate clause belongs to the
        // nearest enclosing clause still waiting for its verb.
        if is_verbal(tag) && !continues_verb_group(tags, idx) {
            let mut candidate = current;
            while clauses[candidate].kind.is_subordinate() && clauses[candidate].has_verb {
                match clauses[candidate].parent {
                    Some(parent) => candidate = parent,
                    None => break,
                }
                if !clauses[candidate].has_verb {
                    current = candidate;
                    break;
                }
            }
        }

        let opened = match tag {
            PartOfSpeech::Sconj => {
                let kind = if word == "that" {
                    ClauseKind::Complement
                } else {
                    ClauseKind::Adverbial
                };
                Some((kind, None))
            }
            PartOfSpeech::Pron if RELATIVE_PRONOUNS.contains(&word) => {
                previous_nominal(words, tags, idx).map(|noun| (ClauseKind::Relative, Some(noun)))
            }
            PartOfSpeech::Part
                if word == "to"
                    && clauses[current].has_verb
                    && tags.get(idx + 1).map_or(false, |next| is_verbal(*next)) =>
            {
                Some((ClauseKind::OpenComplement, None))
            }
            PartOfSpeech::Cconj
                if clauses[current].has_verb && verb_ahead(words, tags, idx + 1) =>
            {
                Some((ClauseKind::Coordinate, None))
            }
            _ => None,
        };

        if let Some((kind, anchor)) = opened {
            let mut clause = Clause::new(kind, Some(current));
            clause.anchor = anchor;
            if kind != ClauseKind::Relative {
                clause.marker = Some(idx);
            }
            clauses.push(clause);
            current = clauses.len() - 1;
        }

        clauses[current].members.push(idx);
        if is_verbal(tag) {
            clauses[current].has_verb = true;
        }
    }

    clauses
}

fn choose_head(clause: &Clause, tags: &[PartOfSpeech]) -> Option<usize> {
    clause
        .members
        .iter()
        .copied()
        .find(|&idx| tags[idx] == PartOfSpeech::Verb)
        .or_else(|| {
            clause
                .members
                .iter()
                .copied()
                .find(|&idx| tags[idx] == PartOfSpeech::Aux)
        })
}

/// Fold verbless subordinate and coordinate clauses back into their parents.
fn merge_verbless(clauses: &mut [Clause], tags: &[PartOfSpeech]) {
    for idx in (1..clauses.len()).rev() {
        clauses[idx].head = choose_head(&clauses[idx], tags);
        if clauses[idx].head.is_some() || clauses[idx].members.is_empty() {
            continue;
        }
        if let Some(parent) = clauses[idx].parent {
            let members = std::mem::take(&mut clauses[idx].members);
            clauses[parent].members.extend(members);
            clauses[parent].members.sort_unstable();
            clauses[idx].marker = None;
        }
    }
    clauses[0].head = choose_head(&clauses[0], tags);
}

type Attachment = Option<(DepLabel, usize)>;

/// Assign `(label, head)` to every token of one sentence.
pub(crate) fn parse_dependencies(words: &[&str], tags: &[PartOfSpeech]) -> Vec<(DepLabel, usize)> {
    if words.is_empty() {
        return Vec::new();
    }
    let lowers: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let mut clauses = segment(&lowers, tags);
    merge_verbless(&mut clauses, tags);

    let root = clauses[0]
        .head
        .or_else(|| clauses.iter().filter_map(|c| c.head).min())
        .or_else(|| (0..tags.len()).find(|&i| tags[i].is_nominal()))
        .unwrap_or(0);

    let clause_head = |c: usize| clauses[c].head.unwrap_or(root);
    let mut arcs: Vec<Attachment> = vec![None; tags.len()];

    for clause in clauses.iter().filter(|c| c.head.is_some() || c.kind == ClauseKind::Main) {
        let head = clause.head.unwrap_or(root);
        if arcs[head].is_none() {
            let governor = match clause.kind {
                ClauseKind::Main => root,
                ClauseKind::Relative => clause.anchor.unwrap_or(root),
                _ => clause.parent.map_or(root, clause_head),
            };
            let label = match clause.kind {
                _ if head == root => DepLabel::Root,
                ClauseKind::Main => DepLabel::Dep,
                ClauseKind::Coordinate => DepLabel::Conj,
                ClauseKind::Adverbial => DepLabel::Advcl,
                ClauseKind::Relative => DepLabel::Relcl,
                ClauseKind::Complement => DepLabel::Ccomp,
                ClauseKind::OpenComplement => DepLabel::Xcomp,
            };
            arcs[head] = Some((label, if head == root { root } else { governor }));
        }

        if let Some(marker) = clause.marker {
            arcs[marker] = Some(match clause.kind {
                ClauseKind::Coordinate => (DepLabel::Cc, clause.parent.map_or(root, clause_head)),
                ClauseKind::OpenComplement => (DepLabel::Aux, head),
                _ => (DepLabel::Mark, head),
            });
        }
    }

    let last = tags.len() - 1;
    if tags[last] == PartOfSpeech::Punct && arcs[last].is_none() {
        arcs[last] = Some((DepLabel::Punct, root));
    }

    for clause in clauses.iter().filter(|c| !c.members.is_empty()) {
        let head = clause.head.unwrap_or(root);
        attach_members(&lowers, tags, &clause.members, head, &mut arcs);
    }

    arcs.into_iter()
        .map(|arc| arc.unwrap_or((DepLabel::Dep, root)))
        .collect()
}

fn is_possessive(words: &[String], tags: &[PartOfSpeech], idx: usize) -> bool {
    tags[idx] == PartOfSpeech::Pron && POSSESSIVES.contains(&words[idx].as_str())
}

fn np_continues(words: &[String], tags: &[PartOfSpeech], cur: usize, next: usize) -> bool {
    use PartOfSpeech::*;

    let prenominal = match tags[cur] {
        Det | Adj | Num | Noun | Propn => true,
        Pron => is_possessive(words, tags, cur),
        _ => false,
    };
    prenominal && matches!(tags[next], Adj | Num | Noun | Propn)
}

/// Attach the non-head tokens of one clause to each other and to `head`.
fn attach_members(
    words: &[String],
    tags: &[PartOfSpeech],
    members: &[usize],
    head: usize,
    arcs: &mut [Attachment],
) {
    use PartOfSpeech::*;

    let copula = tags[head] == Aux;
    let mut pending_adp: Option<usize> = None;
    let mut pending_cc: Option<usize> = None;
    let mut last_conjunct: Option<usize> = None;
    let mut seen_object = false;

    let mut k = 0;
    while k < members.len() {
        let idx = members[k];
        if idx == head || arcs[idx].is_some() {
            k += 1;
            continue;
        }

        match tags[idx] {
            Det | Adj | Num | Noun | Propn | Pron => {
                let mut end = k + 1;
                while end < members.len()
                    && members[end] == members[end - 1] + 1
                    && members[end] != head
                    && arcs[members[end]].is_none()
                    && np_continues(words, tags, members[end - 1], members[end])
                {
                    end += 1;
                }
                let run = &members[k..end];

                let np_head = run
                    .iter()
                    .rev()
                    .copied()
                    .find(|&i| tags[i].is_nominal() && !is_possessive(words, tags, i))
                    .or_else(|| run.last().copied().filter(|&i| tags[i] == Pron));

                match np_head {
                    Some(noun) => {
                        for &modifier in run.iter().filter(|&&i| i != noun) {
                            let label = match tags[modifier] {
                                Det => DepLabel::Det,
                                Adj => DepLabel::Amod,
                                Num => DepLabel::Nummod,
                                Pron => DepLabel::Poss,
                                _ => DepLabel::Compound,
                            };
                            arcs[modifier] = Some((label, noun));
                        }
                        arcs[noun] = Some(if let Some(adp) = pending_adp.take() {
                            (DepLabel::Pobj, adp)
                        } else if let Some(first) = pending_cc.take() {
                            (DepLabel::Conj, first)
                        } else if noun < head {
                            (DepLabel::Nsubj, head)
                        } else if !seen_object {
                            seen_object = true;
                            (if copula { DepLabel::Attr } else { DepLabel::Dobj }, head)
                        } else {
                            (DepLabel::Npadvmod, head)
                        });
                        last_conjunct = Some(noun);
                    }
                    None => {
                        for &modifier in run {
                            arcs[modifier] = Some(match (tags[modifier], pending_cc.take()) {
                                (_, Some(first)) => (DepLabel::Conj, first),
                                (Adj, None) if modifier > head => (DepLabel::Acomp, head),
                                (Adj, None) => (DepLabel::Amod, head),
                                (Num, None) => match pending_adp.take() {
                                    Some(adp) => (DepLabel::Pobj, adp),
                                    None => (DepLabel::Nummod, head),
                                },
                                _ => (DepLabel::Det, head),
                            });
                        }
                        last_conjunct = run.last().copied();
                    }
                }
                k = end;
                continue;
            }
            Aux => arcs[idx] = Some((DepLabel::Aux, head)),
            Part => {
                let word = words[idx].as_str();
                arcs[idx] = Some(if word == "not" || word == "n't" {
                    (DepLabel::Neg, head)
                } else if word == "to" {
                    (DepLabel::Aux, head)
                } else {
                    (DepLabel::Case, last_conjunct.unwrap_or(head))
                });
            }
            Adv => arcs[idx] = Some((DepLabel::Advmod, head)),
            Adp => {
                let after_noun = idx > 0 && last_conjunct == Some(idx - 1) && words[idx] == "of";
                let governor = if after_noun { idx - 1 } else { head };
                arcs[idx] = Some((DepLabel::Prep, governor));
                pending_adp = Some(idx);
            }
            Cconj => {
                arcs[idx] = Some((DepLabel::Cc, last_conjunct.unwrap_or(head)));
                pending_cc = last_conjunct;
            }
            Sconj => arcs[idx] = Some((DepLabel::Mark, head)),
            Verb => {
                let after_noun = idx > head && idx > 0 && last_conjunct == Some(idx - 1);
                arcs[idx] = Some(if after_noun {
                    (DepLabel::Acl, idx - 1)
                } else {
                    (DepLabel::Xcomp, head)
                });
            }
            Intj => arcs[idx] = Some((DepLabel::Intj, head)),
            Punct => arcs[idx] = Some((DepLabel::Punct, head)),
            Sym | X => arcs[idx] = Some((DepLabel::Dep, head)),
        }
        k += 1;
    }
}

//! WordNet sense inventory for ost-writing.
//!
//! Reads a WordNet 3.x dictionary directory (the `index.*`, `data.*` and
//! `*.exc` files shipped with WordNet and with NLTK's `wordnet` corpus) and
//! answers sense lookups the way `nltk.corpus.wordnet.synsets(word)` does:
//!
//! - parts of speech are tried in the order noun, verb, adjective, adverb;
//! - within each, every base form found by [`WordNet::morphy`] is
//!   looked up, and its synsets follow index order;
//! - a sense's primary lemma is the first word of its synset, with any
//!   adjective marker removed;
//! - its depth is the synset's `min_depth`: the length of the shortest
//!   hypernym (or instance hypernym) path to a root.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use ost_wordnet::WordNet;
//! use ost_writing::FeatureExtractor;
//!
//! let wordnet = WordNet::shared_from_env()?;
//! let extractor = FeatureExtractor::builder()
//!     .senses(wordnet)
//!     .grammar_checker(checker)
//!     .build()?;
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use ost_writing::{ConfigError, Sense, SenseInventory};
use thiserror::Error;

mod files;
mod morphy;

/// Environment variable naming the dictionary directory.
pub const SEARCH_DIR_VAR: &str = "WNSEARCHDIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Lookup order of `synsets(word)`.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Suffix of the dictionary files for this part of speech.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }

    /// Satellite adjectives (`s`) share the adjective files.
    pub(crate) fn from_code(code: &str) -> Option<Pos> {
        match code {
            "n" => Some(Pos::Noun),
            "v" => Some(Pos::Verb),
            "a" | "s" => Some(Pos::Adj),
            "r" => Some(Pos::Adv),
            _ => None,
        }
    }
}

/// A synset's part of speech and byte offset in its data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u64,
}

impl SynsetId {
    pub fn new(pos: Pos, offset: u64) -> Self {
        SynsetId { pos, offset }
    }
}

#[derive(Debug, Error)]
pub enum WordNetError {
    #[error("WordNet file {path} not found")]
    MissingFile { path: PathBuf },

    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("{file} line {line}: {message}")]
    Malformed {
        file: String,
        line: usize,
        message: String,
    },

    #[error("no WordNet directory given and WNSEARCHDIR is not set")]
    NoSearchDir,
}

impl From<WordNetError> for ConfigError {
    fn from(error: WordNetError) -> Self {
        ConfigError::resource("WordNet", error)
    }
}

#[derive(Debug, Clone)]
struct Synset {
    first_word: String,
    min_depth: u32,
}

/// An in-memory WordNet database.
#[derive(Debug, Default)]
pub struct WordNet {
    index: HashMap<Pos, HashMap<String, Vec<u64>>>,
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
    synsets: HashMap<SynsetId, Synset>,
}

static SHARED: OnceCell<Arc<WordNet>> = OnceCell::new();

fn read(path: &Path) -> Result<String, WordNetError> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(WordNetError::MissingFile {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(WordNetError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
    }
}

impl WordNet {
    /// Load every part of speech from a dictionary directory. Index and data
    /// files are required; exception lists are optional.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, WordNetError> {
        let dir = dir.as_ref();
        let mut index = HashMap::new();
        let mut exceptions = HashMap::new();
        let mut records = Vec::new();

        for pos in Pos::ALL {
            let suffix = pos.file_suffix();

            let name = format!("index.{suffix}");
            index.insert(pos, files::parse_index(&name, &read(&dir.join(&name))?)?);

            let name = format!("data.{suffix}");
            records.extend(files::parse_data(&name, &read(&dir.join(&name))?)?);

            let path = dir.join(format!("{suffix}.exc"));
            let table = match read(&path) {
                Ok(source) => files::parse_exceptions(&source),
                Err(WordNetError::MissingFile { .. }) => {
                    tracing::debug!(path = %path.display(), "no exception list");
                    HashMap::new()
                }
                Err(err) => return Err(err),
            };
            exceptions.insert(pos, table);
        }

        let synsets = resolve_depths(records);
        tracing::info!(
            dir = %dir.display(),
            synsets = synsets.len(),
            lemmas = index.values().map(HashMap::len).sum::<usize>(),
            "loaded WordNet"
        );

        Ok(WordNet {
            index,
            exceptions,
            synsets,
        })
    }

    /// Load from the directory named by `WNSEARCHDIR`.
    pub fn from_env() -> Result<Self, WordNetError> {
        let dir = std::env::var_os(SEARCH_DIR_VAR).ok_or(WordNetError::NoSearchDir)?;
        Self::load(dir)
    }

    /// The process-wide database, loaded from `dir` on first use. Later calls
    /// return the same handle whatever directory they name.
    pub fn shared(dir: impl AsRef<Path>) -> Result<Arc<WordNet>, WordNetError> {
        SHARED
            .get_or_try_init(|| Self::load(dir).map(Arc::new))
            .map(Arc::clone)
    }

    /// [`WordNet::shared`], with the directory taken from `WNSEARCHDIR`.
    pub fn shared_from_env() -> Result<Arc<WordNet>, WordNetError> {
        SHARED
            .get_or_try_init(|| Self::from_env().map(Arc::new))
            .map(Arc::clone)
    }

    /// Base forms of `word` present in the index for `pos`.
    pub fn morphy(&self, word: &str, pos: Pos) -> Vec<String> {
        let known = |lemma: &str| self.index.get(&pos).map_or(false, |lemmas| lemmas.contains_key(lemma));
        morphy::morphy(
            word,
            pos,
            |form| {
                self.exceptions
                    .get(&pos)
                    .and_then(|table| table.get(form))
                    .map(Vec::as_slice)
            },
            &known,
        )
    }

    /// Synsets of `word` in lookup order.
    pub fn synsets(&self, word: &str) -> Vec<SynsetId> {
        let word = word.to_lowercase();
        let mut found = Vec::new();
        for pos in Pos::ALL {
            let Some(lemmas) = self.index.get(&pos) else {
                continue;
            };
            for form in self.morphy(&word, pos) {
                if let Some(offsets) = lemmas.get(&form) {
                    found.extend(offsets.iter().map(|&offset| SynsetId::new(pos, offset)));
                }
            }
        }
        found
    }

    pub fn min_depth(&self, id: SynsetId) -> Option<u32> {
        self.synsets.get(&id).map(|synset| synset.min_depth)
    }

    /// Number of synsets loaded.
    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }
}

impl SenseInventory for WordNet {
    fn senses(&self, normalized: &str) -> Vec<Sense> {
        self.synsets(normalized)
            .into_iter()
            .filter_map(|id| self.synsets.get(&id))
            .map(|synset| Sense::new(synset.first_word.as_str(), synset.min_depth))
            .collect()
    }
}

/// Compute `min_depth` for every synset. Hypernyms pointing outside the
/// loaded files are ignored; a synset on a hypernym cycle counts the cycle
/// edge as absent.
fn resolve_depths(records: Vec<files::SynsetRecord>) -> HashMap<SynsetId, Synset> {
    let hypernyms: HashMap<SynsetId, Vec<SynsetId>> = records
        .iter()
        .map(|record| (record.id, record.hypernyms.clone()))
        .collect();

    let mut depths: HashMap<SynsetId, u32> = HashMap::with_capacity(records.len());
    for record in &records {
        depth_of(record.id, &hypernyms, &mut depths, &mut Vec::new());
    }

    records
        .into_iter()
        .map(|record| {
            let min_depth = depths.get(&record.id).copied().unwrap_or(0);
            (
                record.id,
                Synset {
                    first_word: record.first_word,
                    min_depth,
                },
            )
        })
        .collect()
}

fn depth_of(
    id: SynsetId,
    hypernyms: &HashMap<SynsetId, Vec<SynsetId>>,
    depths: &mut HashMap<SynsetId, u32>,
    path: &mut Vec<SynsetId>,
) -> Option<u32> {
    if let Some(&depth) = depths.get(&id) {
        return Some(depth);
    }
    if path.contains(&id) {
        return None;
    }
    let parents = hypernyms.get(&id)?;

    path.push(id);
    let depth = parents
        .iter()
        .filter_map(|&parent| depth_of(parent, hypernyms, depths, path))
        .min()
        .map_or(0, |shallowest| shallowest + 1);
    path.pop();

    depths.insert(id, depth);
    Some(depth)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const INDEX_NOUN: &str = "  1 license header\n\
entity n 1 1 ~ 1 0 00001740\n\
abstraction n 1 2 @ ~ 1 0 00002137\n\
lesson n 2 1 @ 2 0 00000300 00000400\n\
test n 1 1 @ 1 0 00000500\n\
trial n 1 1 @ 1 0 00000500\n\
learning n 1 1 @ 1 0 00000600\n";

    const DATA_NOUN: &str = "  1 license header\n\
00001740 03 n 01 entity 0 000 | that which exists\n\
00002137 03 n 01 abstraction 0 001 @ 00001740 n 0000 | a general concept\n\
00000300 09 n 01 lesson 0 001 @ 00000600 n 0000 | a unit of instruction\n\
00000400 09 n 02 example 0 lesson 0 001 @ 00002137 n 0000 | a warning\n\
00000500 04 n 02 trial 0 test 0 001 @ 00002137 n 0000 | trying something\n\
00000600 09 n 01 learning 0 001 @ 00002137 n 0000 | acquiring knowledge\n";

    const INDEX_VERB: &str = "learn v 1 1 @ 1 0 00000700\nrun v 1 1 @ 1 0 00000800\n";
    const DATA_VERB: &str = "00000700 31 v 01 learn 0 000 00 | gain knowledge\n\
00000800 38 v 01 run 0 000 00 | move fast\n";
    const VERB_EXC: &str = "ran run\n";

    const INDEX_ADJ: &str = "valuable a 1 0 1 0 00000900\nelder a 1 0 1 0 00001000\n";
    const DATA_ADJ: &str = "00000900 00 a 01 valuable 0 000 | having worth\n\
00001000 00 s 01 elder(a) 0 000 | older\n";
    const ADJ_EXC: &str = "";

    const INDEX_ADV: &str = "quickly r 1 0 1 0 00001100\n";
    const DATA_ADV: &str = "00001100 02 r 01 quickly 0 000 | with speed\n";

    fn dictionary() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in [
            ("index.noun", INDEX_NOUN),
            ("data.noun", DATA_NOUN),
            ("index.verb", INDEX_VERB),
            ("data.verb", DATA_VERB),
            ("verb.exc", VERB_EXC),
            ("index.adj", INDEX_ADJ),
            ("data.adj", DATA_ADJ),
            ("adj.exc", ADJ_EXC),
            ("index.adv", INDEX_ADV),
            ("data.adv", DATA_ADV),
        ] {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn depth_is_the_shortest_hypernym_path() {
        let dir = dictionary();
        let wordnet = WordNet::load(dir.path()).unwrap();
        assert_eq!(wordnet.len(), 11);
        assert_eq!(wordnet.min_depth(SynsetId::new(Pos::Noun, 1740)), Some(0));
        assert_eq!(wordnet.min_depth(SynsetId::new(Pos::Noun, 2137)), Some(1));
        assert_eq!(wordnet.min_depth(SynsetId::new(Pos::Noun, 300)), Some(3));
        assert_eq!(wordnet.min_depth(SynsetId::new(Pos::Noun, 400)), Some(2));
        assert_eq!(wordnet.min_depth(SynsetId::new(Pos::Verb, 700)), Some(0));
    }

    #[test]
    fn senses_follow_lookup_order() {
        let dir = dictionary();
        let wordnet = WordNet::load(dir.path()).unwrap();

        assert_eq!(
            wordnet.senses("lesson"),
            vec![Sense::new("lesson", 3), Sense::new("example", 2)]
        );
        assert_eq!(wordnet.senses("test"), vec![Sense::new("trial", 2)]);
        assert_eq!(wordnet.senses("learned"), vec![Sense::new("learn", 0)]);
        assert_eq!(wordnet.senses("ran"), vec![Sense::new("run", 0)]);
        assert_eq!(wordnet.senses("elder"), vec![Sense::new("elder", 0)]);
        assert_eq!(wordnet.senses("Quickly"), vec![Sense::new("quickly", 0)]);
        assert!(wordnet.senses("the").is_empty());
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let error = WordNet::load(dir.path()).unwrap_err();
        assert!(matches!(error, WordNetError::MissingFile { ref path } if path.ends_with("index.noun")));

        let config: ConfigError = error.into();
        assert!(config.to_string().starts_with("failed to initialize WordNet: WordNet file"));
    }

    #[test]
    fn missing_exception_lists_are_tolerated() {
        let dir = dictionary();
        fs::remove_file(dir.path().join("verb.exc")).unwrap();
        let wordnet = WordNet::load(dir.path()).unwrap();
        assert!(wordnet.senses("ran").is_empty());
        assert_eq!(wordnet.senses("learning"), vec![Sense::new("learning", 2), Sense::new("learn", 0)]);
    }

    #[test]
    fn shared_database_loads_once() {
        let dir = dictionary();
        let first = WordNet::shared(dir.path()).unwrap();
        assert_eq!(first.len(), 11);

        let empty = tempfile::tempdir().unwrap();
        assert!(Arc::ptr_eq(&first, &WordNet::shared(empty.path()).unwrap()));
        assert!(Arc::ptr_eq(&first, &WordNet::shared_from_env().unwrap()));
    }

    #[test]
    fn hypernym_cycles_terminate() {
        let records = vec![
            files::SynsetRecord {
                id: SynsetId::new(Pos::Verb, 1),
                first_word: "a".into(),
                hypernyms: vec![SynsetId::new(Pos::Verb, 2)],
            },
            files::SynsetRecord {
                id: SynsetId::new(Pos::Verb, 2),
                first_word: "b".into(),
                hypernyms: vec![SynsetId::new(Pos::Verb, 1)],
            },
        ];
        let synsets = resolve_depths(records);
        assert_eq!(synsets[&SynsetId::new(Pos::Verb, 1)].min_depth, 1);
        assert_eq!(synsets[&SynsetId::new(Pos::Verb, 2)].min_depth, 0);
    }
}

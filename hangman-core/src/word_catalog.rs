use anyhow::{Context, Result, anyhow};
use hangman_types::GameError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{info, warn};

const WORD_LIST_EXTENSION: &str = "txt";

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Animals",
        &["ELEPHANT", "GIRAFFE", "TIGER", "PENGUIN", "ZEBRA", "PANTHER"],
    ),
    (
        "Fruits",
        &["APPLE", "BANANA", "ORANGE", "GRAPE", "MANGO", "GUAVA"],
    ),
    (
        "Countries",
        &["JAPAN", "BRAZIL", "CANADA", "EGYPT", "INDIA", "KENYA", "CHAD"],
    ),
    ("Sport", &["TENNIS", "FOOTBALL", "RUGBY", "CRICKET", "SQUASH"]),
    (
        "Cities",
        &["MACAU", "NAIROBI", "LONDON", "MADRID", "PRETORIA"],
    ),
];

/// A named list of candidate words. Every word is plain uppercase A-Z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCategory {
    name: String,
    words: Vec<String>,
}

impl WordCategory {
    /// Words are trimmed and uppercased; anything that is not plain A-Z is dropped
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            name: name.into(),
            words: normalize_words(words.iter().map(String::as_str)),
        }
    }

    /// Build a category from a word list file body
    pub fn from_word_list(name: impl Into<String>, word_list: &str) -> Self {
        Self::new(name, parse_word_list(word_list))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The category table rounds draw their words from. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct WordCatalog {
    categories: Vec<WordCategory>,
}

impl WordCatalog {
    pub fn new(categories: Vec<WordCategory>) -> Self {
        Self { categories }
    }

    /// The five categories the game ships with
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, words)| {
                WordCategory::new(*name, words.iter().map(|w| w.to_string()).collect())
            })
            .collect();

        Self::new(categories)
    }

    /// Load one category per `<Category>.txt` file in `words_dir`.
    /// Files that contain no usable word are skipped.
    pub fn from_directory<P: AsRef<Path>>(words_dir: P) -> Result<Self> {
        let words_dir = words_dir.as_ref();
        let mut paths: Vec<_> = std::fs::read_dir(words_dir)
            .with_context(|| format!("Failed to read words directory {}", words_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(WORD_LIST_EXTENSION)
            })
            .collect();
        paths.sort();

        let mut categories = Vec::new();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read word list {}", path.display()))?;
            let category = WordCategory::from_word_list(name, &contents);

            if category.is_empty() {
                warn!("Skipping category '{}': no usable words in {}", name, path.display());
                continue;
            }

            info!("Loaded {} words for category '{}'", category.words().len(), name);
            categories.push(category);
        }

        if categories.is_empty() {
            return Err(anyhow!(
                "No word lists found in {}",
                words_dir.display()
            ));
        }

        Ok(Self::new(categories))
    }

    /// Names of the categories a round can start in, in display order
    pub fn category_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.words.as_slice())
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.words(category).is_some_and(|words| !words.is_empty())
    }

    /// Pick a word uniformly at random from `category`
    pub fn pick_word<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Result<&str, GameError> {
        self.words(category)
            .and_then(|words| words.choose(rng))
            .map(String::as_str)
            .ok_or_else(|| GameError::InvalidCategory {
                category: category.to_string(),
            })
    }
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One word per line. Comments (`#`) and blank lines are ignored, words are
/// uppercased, anything that is not plain A-Z is dropped, duplicates keep
/// their first position.
pub fn parse_word_list(word_list: &str) -> Vec<String> {
    normalize_words(
        word_list
            .lines()
            .filter(|line| !line.trim_start().starts_with('#')),
    )
}

fn normalize_words<'a>(candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();

    for candidate in candidates {
        let word = candidate.trim();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }

        let word = word.to_ascii_uppercase();
        if !words.contains(&word) {
            words.push(word);
        }
    }

    words
}

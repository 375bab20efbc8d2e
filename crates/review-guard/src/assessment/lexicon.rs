use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Keyword groups consulted by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconCategory {
    Positive,
    Negative,
    Spam,
    Irrelevant,
    RantWithoutVisit,
}

impl LexiconCategory {
    pub const ALL: [LexiconCategory; 5] = [
        LexiconCategory::Positive,
        LexiconCategory::Negative,
        LexiconCategory::Spam,
        LexiconCategory::Irrelevant,
        LexiconCategory::RantWithoutVisit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LexiconCategory::Positive => "positive",
            LexiconCategory::Negative => "negative",
            LexiconCategory::Spam => "spam",
            LexiconCategory::Irrelevant => "irrelevant",
            LexiconCategory::RantWithoutVisit => "rant_without_visit",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("unable to read lexicon file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("lexicon is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lexicon category '{}' contains an empty keyword", .0.label())]
    EmptyKeyword(LexiconCategory),
}

/// Immutable keyword sets. Entries are case-sensitive substrings matched
/// against lower-cased review text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordLexicon {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
    spam: BTreeSet<String>,
    irrelevant: BTreeSet<String>,
    rant_without_visit: BTreeSet<String>,
}

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|word| word.to_string()).collect()
}

impl KeywordLexicon {
    /// Built-in bilingual lexicon used when no override file is configured.
    pub fn standard() -> Self {
        Self {
            positive: set(&[
                "好", "棒", "优秀", "推荐", "满意", "喜欢", "美味", "舒适",
                "great", "excellent", "recommend", "satisfied", "delicious",
                "comfortable", "friendly",
            ]),
            negative: set(&[
                "差", "糟糕", "失望", "不好", "难吃", "脏", "吵",
                "terrible", "awful", "disappointing", "dirty", "noisy", "rude",
                "horrible",
            ]),
            spam: set(&[
                "www.", "http", "优惠", "折扣", "广告", "推广",
                "discount", "coupon", "promo code",
            ]),
            irrelevant: set(&[
                "手机", "电脑", "汽车", "房子", "股票", "投资",
                "smartphone", "laptop", "stock market", "cryptocurrency",
                "real estate",
            ]),
            rant_without_visit: set(&[
                "没去过", "听说", "据说", "never been", "heard that", "never visited",
            ]),
        }
    }

    /// Build a lexicon from explicit keyword lists, rejecting empty keywords.
    pub fn from_parts<I, S>(parts: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (LexiconCategory, Vec<S>)>,
        S: Into<String>,
    {
        let mut lexicon = Self {
            positive: BTreeSet::new(),
            negative: BTreeSet::new(),
            spam: BTreeSet::new(),
            irrelevant: BTreeSet::new(),
            rant_without_visit: BTreeSet::new(),
        };
        for (category, words) in parts {
            lexicon
                .set_mut(category)
                .extend(words.into_iter().map(Into::into));
        }
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LexiconError> {
        let lexicon: Self = serde_json::from_reader(reader)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn keywords(&self, category: LexiconCategory) -> &BTreeSet<String> {
        match category {
            LexiconCategory::Positive => &self.positive,
            LexiconCategory::Negative => &self.negative,
            LexiconCategory::Spam => &self.spam,
            LexiconCategory::Irrelevant => &self.irrelevant,
            LexiconCategory::RantWithoutVisit => &self.rant_without_visit,
        }
    }

    /// Keywords of `category` occurring anywhere in `lowered`. Each keyword is
    /// reported once no matter how often it occurs.
    pub fn matches<'a>(
        &'a self,
        category: LexiconCategory,
        lowered: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.keywords(category)
            .iter()
            .map(String::as_str)
            .filter(move |keyword| lowered.contains(*keyword))
    }

    pub fn contains_any(&self, category: LexiconCategory, lowered: &str) -> bool {
        self.matches(category, lowered).next().is_some()
    }

    fn set_mut(&mut self, category: LexiconCategory) -> &mut BTreeSet<String> {
        match category {
            LexiconCategory::Positive => &mut self.positive,
            LexiconCategory::Negative => &mut self.negative,
            LexiconCategory::Spam => &mut self.spam,
            LexiconCategory::Irrelevant => &mut self.irrelevant,
            LexiconCategory::RantWithoutVisit => &mut self.rant_without_visit,
        }
    }

    fn validate(&self) -> Result<(), LexiconError> {
        for category in LexiconCategory::ALL {
            for keyword in self.keywords(category) {
                if keyword.is_empty() {
                    return Err(LexiconError::EmptyKeyword(category));
                }
                if keyword.chars().any(char::is_uppercase) {
                    warn!(
                        category = category.label(),
                        keyword = %keyword,
                        "keyword contains upper-case characters and can never match lower-cased text"
                    );
                }
            }
        }
        Ok(())
    }
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        Self::standard()
    }
}

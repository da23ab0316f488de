//! Word dictionary partitioned by word length.
//! This module exists to own word-list ingestion and the length-indexed lookup.
//! It does not choose words; see `words` for placement.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("word list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("word list does not contain a \"words\" property")]
    MissingWords,
    #[error("word list contains no usable words")]
    Empty,
}

#[derive(Deserialize)]
struct WordListFile {
    words: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    by_length: BTreeMap<usize, Vec<String>>,
}

impl Dictionary {
    /// Lowercases every entry. Empty entries and entries with non-alphabetic
    /// characters are skipped, since spaces separate words on the board.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_length: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        let mut skipped = 0_usize;
        for word in words {
            let word = word.as_ref().to_lowercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                skipped += 1;
                continue;
            }
            by_length.entry(word.chars().count()).or_default().push(word);
        }
        if skipped > 0 {
            log::debug!("skipped {skipped} unusable dictionary entries");
        }
        Self { by_length }
    }

    /// Parses a `{ "words": [...] }` document.
    pub fn from_json_str(source: &str) -> Result<Self, DictionaryError> {
        let file: WordListFile = serde_json::from_str(source)?;
        let words = file.words.ok_or(DictionaryError::MissingWords)?;
        let dictionary = Self::from_words(words);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(dictionary)
    }

    /// Small embedded English list used when no external list is available.
    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_WORDS.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    pub fn has_length(&self, length: usize) -> bool {
        self.by_length.contains_key(&length)
    }

    pub fn words_of_length(&self, length: usize) -> &[String] {
        self.by_length.get(&length).map_or(&[], Vec::as_slice)
    }

    /// Lengths present in the dictionary, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    /// Words of exactly `length` whose first letter is not in `blocked_first`
    /// and whose last letter is not in `blocked_last`.
    pub fn constrained_words(
        &self,
        length: usize,
        blocked_first: &[char],
        blocked_last: &[char],
    ) -> Vec<&str> {
        self.words_of_length(length)
            .iter()
            .filter(|word| !word.chars().next().is_some_and(|c| blocked_first.contains(&c)))
            .filter(|word| !word.chars().last().is_some_and(|c| blocked_last.contains(&c)))
            .map(String::as_str)
            .collect()
    }
}

const BUILTIN_WORDS: &str = "
a i
an as at be by do go he if in is it me my no of on or so to up us we
all and any are ask bad big boy but can car cat day did dog eat end far
few for fun get got had has her him his hot how its job let lot man may
new not now old one our out own put red run saw say see set she sit six
sun ten the too top two use way who why yes yet you
able also area away back ball bank best bird blue boat body book both
call came city cold come cook dark door down draw each easy even face
fact fall farm fast feel fire fish five food foot form four free from
full game girl give gold good grow hand hard have head hear help here
high hold home hope idea into just keep kind king know lake land last
late left life like line list live long look lose love made make many
mind more most move much must name near need next nice note once only
open over page part pick plan play pull read real rest ride road rock
room rule same save seat seem ship shop show side sing size slow snow
some song soon star stay step stop sure take talk tell than that them
then they this time tree true turn type very wait walk wall want warm
wash wave week well went what when wide will wind word work year your
about above after again along among begin below black board bread bring
build carry catch cause chair check child clean clear close color count
cover cross dream drink drive early earth eight every field final first
floor found fresh front fruit glass grass great green group happy heart
heavy horse house large laugh learn level light maybe money month mouth
music never night north ocean order other paper party peace place plant
point power quick quiet radio reach ready river round seven shape short
sleep small smile sound south space speak stand start state still stone
story study sugar table teach thank there thing think three today touch
train water where which while white whole woman world write young
across animal answer appear better bottle branch bridge bright castle
center change choose circle corner course design dinner double during
energy engine enough family father finger flower follow forest friend
garden gentle ground happen island letter listen little market middle
minute mirror mother number object orange parent people period person
planet pretty rabbit remain rocket school screen second secret silver
simple single spring street strong summer system ticket travel valley
window winter wonder yellow
another balance between brother capital century chicken climate collect
company country current evening example explain feeling history holiday
imagine journey kitchen machine morning natural nothing outside picture
plastic problem quickly respect science several special station stomach
student support thought through tonight weather welcome without
building children computer distance exercise fountain language mountain
neighbor question remember sentence shoulder strength surprise together
tomorrow vacation
adventure beautiful butterfly chocolate community dangerous direction
equipment important knowledge necessary recognize something sometimes
telephone yesterday
";

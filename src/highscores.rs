/// Highscore ledger: a ranked list of at most `MAX_HIGHSCORES` records,
/// persisted as newline-separated `name:score` lines.
///
/// Malformed lines are skipped (and reported) when loading; the rest of the
/// file is still used.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{LedgerError, NameError, RecordError};

pub const MAX_HIGHSCORES: usize = 5;
pub const SEPARATOR: char = ':';
pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 10;

/// Characters a name may contain, both when typed and when loaded.
pub fn is_name_char(glyph: char) -> bool {
    glyph != SEPARATOR && !glyph.is_whitespace() && !glyph.is_control()
}

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highscore {
    pub name: String,
    pub score: u32,
}

impl Highscore {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let parts: Vec<&str> = line.split(SEPARATOR).collect();
        let &[name, score] = parts.as_slice() else {
            return Err(RecordError::Separator {
                found: parts.len() - 1,
            });
        };

        let len = name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(RecordError::NameLength { len });
        }
        if let Some(glyph) = name.chars().find(|glyph| !is_name_char(*glyph)) {
            return Err(RecordError::NameChar { glyph });
        }

        let invalid = || RecordError::Score {
            found: score.to_string(),
        };
        if score.is_empty() || !score.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let score = score.parse().map_err(|_| invalid())?;
        Ok(Self::new(name, score))
    }
}

impl fmt::Display for Highscore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, SEPARATOR, self.score)
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Always sorted by descending score; equal scores keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<Highscore>,
}

impl Ledger {
    /// Read the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(LedgerError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let (ledger, rejected) = Self::parse(&text);
        for err in &rejected {
            tracing::warn!(path = %path.display(), "skipping record: {err}");
        }
        tracing::info!(entries = ledger.len(), skipped = rejected.len(), "highscores loaded");
        Ok(ledger)
    }

    /// Parse ledger text, keeping every valid record and returning the
    /// rejected ones alongside. Blank lines are ignored.
    pub fn parse(text: &str) -> (Self, Vec<LedgerError>) {
        let mut entries = Vec::new();
        let mut rejected = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Highscore::parse(line) {
                Ok(record) => entries.push(record),
                Err(reason) => rejected.push(LedgerError::Malformed {
                    line: index + 1,
                    reason,
                }),
            }
        }

        let mut ledger = Self { entries };
        ledger.normalize();
        (ledger, rejected)
    }

    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        std::fs::write(path, self.serialize()).map_err(|source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File contents: one record per line, no trailing newline.
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(Highscore::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether `score` earns a place: the ledger has room, or it beats the
    /// lowest kept score.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_HIGHSCORES || self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    pub fn insert(&mut self, record: Highscore) {
        self.entries.push(record);
        self.normalize();
    }

    pub fn entries(&self) -> &[Highscore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&mut self) {
        // stable: ties stay in discovery order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGHSCORES);
    }
}

// ── Name entry ────────────────────────────────────────────────────────────────

/// In-progress name typed after a qualifying game over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameEntry {
    name: String,
    warn: bool,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the length warning should be shown.
    pub fn warning(&self) -> bool {
        self.warn
    }

    /// Append a character. Refused when the name is full or the character
    /// cannot be stored in the ledger file.
    pub fn push(&mut self, glyph: char) -> bool {
        if !is_name_char(glyph) {
            return false;
        }
        if self.name.chars().count() >= NAME_MAX {
            self.warn = true;
            return false;
        }
        self.name.push(glyph);
        true
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    pub fn submit(&mut self) -> Result<String, NameError> {
        let len = self.name.chars().count();
        if len < NAME_MIN {
            self.warn = true;
            return Err(NameError::TooShort { len });
        }
        Ok(self.name.clone())
    }
}

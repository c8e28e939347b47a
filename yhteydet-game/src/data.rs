//! Puzzle definitions and the validated catalog they are drawn from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of hidden categories in every puzzle.
pub const CATEGORY_COUNT: usize = 4;
/// Number of words in every category.
pub const WORDS_PER_CATEGORY: usize = 4;
/// Total tiles per puzzle instantiation.
pub const TILE_COUNT: usize = CATEGORY_COUNT * WORDS_PER_CATEGORY;

/// Validation errors raised while constructing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("puzzle '{id}' has {found} categories, expected {CATEGORY_COUNT}")]
    CategoryCount { id: String, found: usize },
    #[error("category '{name}' has {found} words, expected {WORDS_PER_CATEGORY}")]
    WordCount { name: String, found: usize },
    #[error("catalog contains no puzzles")]
    Empty,
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One hidden word group within a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.words.len() == WORDS_PER_CATEGORY {
            Ok(())
        } else {
            Err(CatalogError::WordCount {
                name: self.name.clone(),
                found: self.words.len(),
            })
        }
    }
}

/// A titled set of exactly four categories, forming one playable round.
/// Immutable once defined; owned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub id: String,
    pub title: String,
    pub categories: Vec<Category>,
}

impl PuzzleDefinition {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.len() != CATEGORY_COUNT {
            return Err(CatalogError::CategoryCount {
                id: self.id.clone(),
                found: self.categories.len(),
            });
        }
        for category in &self.categories {
            category.validate()?;
        }
        Ok(())
    }
}

/// Ordered, non-empty collection of puzzles. Content is supplied by the
/// caller; the engine only indexes into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogShape")]
pub struct Catalog {
    puzzles: Vec<PuzzleDefinition>,
}

#[derive(Deserialize)]
struct CatalogShape {
    puzzles: Vec<PuzzleDefinition>,
}

impl TryFrom<CatalogShape> for Catalog {
    type Error = CatalogError;

    fn try_from(shape: CatalogShape) -> Result<Self, Self::Error> {
        Self::new(shape.puzzles)
    }
}

impl Catalog {
    /// Build a catalog from pre-parsed puzzles, validating every shape
    /// invariant up front.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog is empty or any puzzle does not
    /// hold exactly four categories of four words.
    pub fn new(puzzles: Vec<PuzzleDefinition>) -> Result<Self, CatalogError> {
        if puzzles.is_empty() {
            return Err(CatalogError::Empty);
        }
        for puzzle in &puzzles {
            puzzle.validate()?;
        }
        Ok(Self { puzzles })
    }

    /// Load a catalog from a JSON document of shape `{"puzzles": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    // A catalog is non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PuzzleDefinition> {
        self.puzzles.get(index)
    }

    #[must_use]
    pub fn puzzles(&self) -> &[PuzzleDefinition] {
        &self.puzzles
    }
}

/// Test fixture: a well-formed puzzle with synthetic labels.
#[cfg(test)]
pub(crate) fn sample_puzzle(id: &str) -> PuzzleDefinition {
    let categories = (0..CATEGORY_COUNT)
        .map(|ci| Category {
            name: format!("group-{ci}"),
            words: (0..WORDS_PER_CATEGORY)
                .map(|wi| format!("{id}-{ci}-{wi}"))
                .collect(),
        })
        .collect();
    PuzzleDefinition {
        id: id.to_string(),
        title: format!("Puzzle {id}"),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_accepts_well_formed_puzzles() {
        let catalog = Catalog::new(vec![sample_puzzle("a"), sample_puzzle("b")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().id, "b");
        assert!(!catalog.is_empty());
    }

    #[test]
    fn catalog_rejects_empty() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn catalog_rejects_short_category() {
        let mut puzzle = sample_puzzle("a");
        puzzle.categories[2].words.pop();
        let err = Catalog::new(vec![puzzle]).unwrap_err();
        assert!(matches!(err, CatalogError::WordCount { found: 3, .. }));
    }

    #[test]
    fn catalog_rejects_wrong_category_count() {
        let mut puzzle = sample_puzzle("a");
        puzzle.categories.pop();
        let err = Catalog::new(vec![puzzle]).unwrap_err();
        assert!(matches!(err, CatalogError::CategoryCount { found: 3, .. }));
    }

    #[test]
    fn catalog_from_json_validates_shape() {
        let json = r#"{
            "puzzles": [
                {
                    "id": "week-1",
                    "title": "Viikon peli 1",
                    "categories": [
                        { "name": "A", "words": ["1", "2", "3", "4"] },
                        { "name": "B", "words": ["5", "6", "7", "8"] },
                        { "name": "C", "words": ["9", "10", "11", "12"] },
                        { "name": "D", "words": ["13", "14", "15", "16"] }
                    ]
                }
            ]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().categories[3].words[0], "13");

        let truncated = json.replace(r#", "4""#, "");
        assert!(Catalog::from_json(&truncated).is_err());
    }
}

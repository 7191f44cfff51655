//! Level packs
//!
//! A pack is an ordered list of level plans; a plan is the row map handed to
//! the parser. On disk a pack is a JSON array of arrays of strings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Symbolic row map of a single level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPlan {
    rows: Vec<String>,
}

impl LevelPlan {
    pub fn new<S: Into<String>>(rows: impl IntoIterator<Item = S>) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Ordered list of level plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPack {
    levels: Vec<LevelPlan>,
}

const BUILTIN_LEVELS: &[&[&str]] = &[
    &[
        "                    ",
        "   o           o    ",
        "  xxx    =    xxx   ",
        "                    ",
        " @      o           ",
        "xxxxxxxxxxxxxxxxxxxx",
    ],
    &[
        "      v       v     ",
        "                    ",
        "  o             o   ",
        "  xx    |     xxx   ",
        "                    ",
        " @     o    o       ",
        "xxxxxx!!!!xxxxxxxxxx",
    ],
];

impl LevelPack {
    pub fn new(levels: Vec<LevelPlan>) -> Result<Self, LoadError> {
        if levels.is_empty() {
            return Err(LoadError::EmptyPack);
        }
        Ok(Self { levels })
    }

    /// Levels bundled with the crate
    pub fn builtin() -> Self {
        Self {
            levels: BUILTIN_LEVELS
                .iter()
                .map(|rows| LevelPlan::new(rows.iter().copied()))
                .collect(),
        }
    }

    /// Parse a pack from JSON (`[["row", ...], ...]`)
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let levels: Vec<LevelPlan> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Load a pack from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let pack = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", pack.len(), path.display());
        Ok(pack)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelPlan> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelPlan> {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let pack = LevelPack::from_json(r#"[["@o", "x!"], ["  v", "@ o", "xxx"]]"#).unwrap();
        assert_eq!(pack.len(), 2);
        assert_eq!(pack.get(0).unwrap().rows(), &["@o", "x!"]);
        assert_eq!(pack.get(1).unwrap().rows().len(), 3);
        assert!(pack.get(2).is_none());
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let pack = LevelPack::from_json(r#"[["@", "xxxxx", ""]]"#).unwrap();
        assert_eq!(pack.get(0).unwrap().rows()[2], "");
    }

    #[test]
    fn test_empty_pack_is_rejected() {
        assert!(matches!(LevelPack::from_json("[]"), Err(LoadError::EmptyPack)));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(matches!(
            LevelPack::from_json(r#"{"levels": []}"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            LevelPack::from_json(r#"[[1, 2]]"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("lava_platformer_missing_pack.json");
        assert!(matches!(LevelPack::load(&path), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_builtin_levels_have_player_and_coins() {
        let pack = LevelPack::builtin();
        assert_eq!(pack.len(), 2);
        for plan in pack.iter() {
            let text = plan.rows().concat();
            assert_eq!(text.matches('@').count(), 1);
            assert!(text.contains('o'));
        }
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let pack = LevelPack::new(vec![LevelPlan::new(["@o", "xx"])]).unwrap();
        assert_eq!(serde_json::to_string(&pack).unwrap(), r#"[["@o","xx"]]"#);
    }
}

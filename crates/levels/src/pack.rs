//! Level pack loading and lookup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use tui_mordicus_core::{Grid, GridError};
use tui_mordicus_types::Unit;

use crate::error::LevelError;
use crate::password::{bump_password, password_hash};
use crate::{Level, LevelKind};

const BUNDLED_PACK: &str = include_str!("../data/levels.json");

/// A level grid as stored in the pack: rows of glyph strings.
type RawGrid = Vec<Vec<String>>;

#[derive(Debug, Deserialize)]
struct RawPack {
    #[serde(default)]
    original: Vec<RawGrid>,
    #[serde(default)]
    custom: Vec<RawGrid>,
}

/// Every level of a pack, in file order, with derived stage numbers and
/// passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPack {
    original: Vec<Level>,
    custom: Vec<Level>,
}

impl LevelPack {
    /// Parse a pack from its JSON text.
    ///
    /// ```
    /// use tui_mordicus_levels::LevelPack;
    ///
    /// let pack = LevelPack::from_json_str(r#"{ "original": [[["😮", "🟡"]]] }"#).unwrap();
    /// assert_eq!(pack.original().len(), 1);
    /// assert!(pack.custom().is_empty());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let raw: RawPack = serde_json::from_str(json)?;
        let pack = Self {
            original: build_levels(raw.original, LevelKind::Original)?,
            custom: build_levels(raw.custom, LevelKind::Custom)?,
        };
        info!(
            "loaded {} original and {} custom levels",
            pack.original.len(),
            pack.custom.len()
        );
        Ok(pack)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        debug!("reading level pack from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Build a pack from already parsed grids.
    ///
    /// Passwords are derived from the canonical glyph of each unit, so they
    /// match a pack file written with the same glyphs.
    pub fn from_grids(original: Vec<Grid>, custom: Vec<Grid>) -> Result<Self, LevelError> {
        let to_raw = |grids: Vec<Grid>| -> Vec<RawGrid> {
            grids
                .iter()
                .map(|grid| {
                    grid.rows()
                        .map(|row| row.iter().map(|unit| unit.glyph().to_string()).collect::<Vec<_>>())
                        .collect()
                })
                .collect()
        };
        Ok(Self {
            original: build_levels(to_raw(original), LevelKind::Original)?,
            custom: build_levels(to_raw(custom), LevelKind::Custom)?,
        })
    }

    /// The pack shipped with the game.
    pub fn bundled() -> Result<Self, LevelError> {
        Self::from_json_str(BUNDLED_PACK)
    }

    pub fn original(&self) -> &[Level] {
        &self.original
    }

    pub fn custom(&self) -> &[Level] {
        &self.custom
    }

    pub fn levels(&self, kind: LevelKind) -> &[Level] {
        match kind {
            LevelKind::Original => &self.original,
            LevelKind::Custom => &self.custom,
        }
    }

    /// Level with this password, original levels first.
    pub fn find_by_password(&self, password: &str) -> Option<&Level> {
        self.original
            .iter()
            .chain(self.custom.iter())
            .find(|level| level.password == password)
    }

    /// Level at the 1-based `stage` of one list; `None` past the end.
    pub fn find_by_stage(&self, stage: u32, is_custom: bool) -> Result<Option<&Level>, LevelError> {
        if stage == 0 {
            return Err(LevelError::InvalidStage(stage));
        }
        let list = self.levels(LevelKind::from_custom(is_custom));
        Ok(list.get(stage as usize - 1))
    }
}

fn build_levels(raw: Vec<RawGrid>, kind: LevelKind) -> Result<Vec<Level>, LevelError> {
    let mut taken = HashSet::new();
    let mut levels = Vec::with_capacity(raw.len());

    for (index, rows) in raw.into_iter().enumerate() {
        let mut password = password_hash(&serde_json::to_string(&rows)?);
        while taken.contains(&password) {
            let bumped = bump_password(&password);
            debug!("{kind} level #{}: password {password} taken, trying {bumped}", index + 1);
            password = bumped;
        }
        taken.insert(password.clone());

        let grid = parse_grid(&rows).map_err(|source| LevelError::Grid {
            kind,
            index,
            source,
        })?;
        if grid.locate(Unit::Player).is_none() {
            return Err(LevelError::MissingPlayer { kind, index });
        }

        levels.push(Level {
            grid,
            is_custom: kind == LevelKind::Custom,
            stage: index as u32 + 1,
            password,
        });
    }

    Ok(levels)
}

fn parse_grid(rows: &[Vec<String>]) -> Result<Grid, GridError> {
    let mut units = Vec::with_capacity(rows.len());
    for (row, glyphs) in rows.iter().enumerate() {
        let parsed = glyphs
            .iter()
            .enumerate()
            .map(|(col, glyph)| {
                Unit::from_glyph(glyph).ok_or_else(|| GridError::UnknownGlyph {
                    row,
                    col,
                    glyph: glyph.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        units.push(parsed);
    }
    Grid::from_rows(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const P: &str = "\u{1F62E}";
    const E: &str = "\u{2B1B}";
    const C: &str = "\u{1F7E1}";

    fn load(pack: serde_json::Value) -> Result<LevelPack, LevelError> {
        LevelPack::from_json_str(&pack.to_string())
    }

    #[test]
    fn test_stages_follow_file_order() {
        let pack = load(json!({
            "original": [[[P, C]], [[C, P]]],
            "custom": [[[P, E, C]]]
        }))
        .unwrap();

        let stages: Vec<u32> = pack.original().iter().map(|l| l.stage).collect();
        assert_eq!(stages, vec![1, 2]);
        assert!(pack.original().iter().all(|l| !l.is_custom));
        assert_eq!(pack.custom()[0].stage, 1);
        assert!(pack.custom()[0].is_custom);
    }

    #[test]
    fn test_identical_grids_get_distinct_passwords() {
        let pack = load(json!({ "original": [[[P, C]], [[P, C]]] })).unwrap();
        let first = &pack.original()[0].password;
        let second = &pack.original()[1].password;
        assert_ne!(first, second);
        assert_eq!(*second, bump_password(first));
    }

    #[test]
    fn test_same_grid_in_both_lists_shares_password() {
        let pack = load(json!({ "original": [[[P, C]]], "custom": [[[P, C]]] })).unwrap();
        assert_eq!(pack.original()[0].password, pack.custom()[0].password);

        let found = pack.find_by_password(&pack.custom()[0].password).unwrap();
        assert!(!found.is_custom);
    }

    #[test]
    fn test_find_by_stage() {
        let pack = load(json!({ "original": [[[P, C]]] })).unwrap();

        assert_eq!(pack.find_by_stage(1, false).unwrap().map(|l| l.stage), Some(1));
        assert!(pack.find_by_stage(2, false).unwrap().is_none());
        assert!(pack.find_by_stage(1, true).unwrap().is_none());
        assert!(matches!(
            pack.find_by_stage(0, false),
            Err(LevelError::InvalidStage(0))
        ));
    }

    #[test]
    fn test_missing_player_rejected() {
        assert!(matches!(
            load(json!({ "original": [], "custom": [[[E, C]]] })),
            Err(LevelError::MissingPlayer {
                kind: LevelKind::Custom,
                index: 0
            })
        ));
    }

    #[test]
    fn test_unknown_glyph_rejected() {
        match load(json!({ "original": [[[P, "x"]]] })) {
            Err(LevelError::Grid {
                kind: LevelKind::Original,
                index: 0,
                source: GridError::UnknownGlyph { row, col, glyph },
            }) => {
                assert_eq!((row, col), (0, 1));
                assert_eq!(glyph, "x");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ragged_grid_rejected() {
        assert!(matches!(
            load(json!({ "original": [[[P, C], [E]]] })),
            Err(LevelError::Grid {
                source: GridError::Ragged { row: 1, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            LevelPack::from_json_str("{ \"original\": 3 }"),
            Err(LevelError::Json(_))
        ));
    }

    #[test]
    fn test_from_grids_matches_json_passwords() {
        let grid = Grid::parse("@ o").unwrap();
        let from_grids = LevelPack::from_grids(vec![grid], vec![]).unwrap();
        let from_json = load(json!({ "original": [[[P, C]]] })).unwrap();
        assert_eq!(from_grids, from_json);
    }

    #[test]
    fn test_bundled_pack_is_playable() {
        let pack = LevelPack::bundled().unwrap();
        assert!(!pack.original().is_empty());
        assert!(!pack.custom().is_empty());
        for level in pack.original().iter().chain(pack.custom()) {
            assert_eq!(level.password.len(), 6);
            assert!(level.grid.locate(Unit::Player).is_some());
        }
    }
}

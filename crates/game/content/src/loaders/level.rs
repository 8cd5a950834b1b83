//! Level loader.
//!
//! Levels are drawn as ASCII grids inside a RON file. The first layout row is
//! the top of the level. Legend:
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `#` | wall |
//! | `.` or space | floor |
//! | `P` | player start |
//! | `s` `k` `g` `t` | sword, key, gem, trinket |
//! | `M` | monster |
//! | `D` | door needing one key |
//! | `O` | open door (no keys needed) |
//!
//! Door requirements other than 0 or 1 are set through `doors`, keyed by the
//! door's grid position.

use std::collections::HashMap;
use std::path::Path;

use game_core::{ItemKind, LevelState, Position};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Level structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelRon {
    layout: Vec<String>,
    #[serde(default)]
    doors: Vec<DoorOverride>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DoorOverride {
    x: i32,
    y: i32,
    keys_needed: u32,
}

/// Loader for levels from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level from a RON file.
    pub fn load(path: &Path) -> LoadResult<LevelState> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid level {}: {}", path.display(), e))
    }

    /// Parse a level from RON text.
    pub fn parse(content: &str) -> LoadResult<LevelState> {
        let data: LevelRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;
        Self::from_layout(&data.layout, &data.doors)
    }

    /// Build a level from layout rows alone (every `D` needs one key).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> LoadResult<LevelState> {
        let rows: Vec<String> = rows.iter().map(|row| row.as_ref().to_owned()).collect();
        Self::from_layout(&rows, &[])
    }

    fn from_layout(rows: &[String], overrides: &[DoorOverride]) -> LoadResult<LevelState> {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 || height == 0 {
            anyhow::bail!("Level layout is empty");
        }

        let door_keys: HashMap<Position, u32> = overrides
            .iter()
            .map(|door| (Position::new(door.x, door.y), door.keys_needed))
            .collect();
        let mut used_overrides = 0usize;

        let mut builder = LevelState::builder(width as u32, height as u32);
        for (row_index, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_index) as i32;
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y);
                builder = match glyph {
                    '#' => builder.wall(position),
                    '.' | ' ' => builder,
                    'P' => builder.player(position),
                    's' => builder.item(position, ItemKind::Sword),
                    'k' => builder.item(position, ItemKind::Key),
                    'g' => builder.item(position, ItemKind::Gem),
                    't' => builder.item(position, ItemKind::Trinket),
                    'M' => builder.monster(position),
                    'D' | 'O' => {
                        let default_keys = if glyph == 'D' { 1 } else { 0 };
                        let keys = match door_keys.get(&position) {
                            Some(keys) => {
                                used_overrides += 1;
                                *keys
                            }
                            None => default_keys,
                        };
                        builder.door(position, keys)
                    }
                    other => anyhow::bail!("Unknown glyph {:?} at {}", other, position),
                };
            }
        }

        if used_overrides != door_keys.len() {
            anyhow::bail!("Door override does not point at a door");
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rows_are_read_top_down() {
        let level = LevelLoader::from_rows(&["#M#", "Pks", "###"]).unwrap();

        assert_eq!(level.grid.width(), 3);
        assert_eq!(level.grid.height(), 3);
        assert_eq!(level.player.position, Position::new(0, 1));
        assert_eq!(level.entities.monsters[0].position, Position::new(1, 2));
        assert!(level.grid.is_wall(Position::new(0, 0)));
        assert!(!level.grid.is_wall(Position::new(1, 1)));

        let kinds: Vec<_> = level.entities.items.iter().map(|i| i.item.kind).collect();
        assert_eq!(kinds, vec![ItemKind::Key, ItemKind::Sword]);
    }

    #[test]
    fn ron_level_with_door_override() {
        let level = LevelLoader::parse(
            r######"(
                layout: [
                    "#####",
                    "#P.D#",
                    "#O..#",
                    "#####",
                ],
                doors: [(x: 3, y: 2, keys_needed: 3)],
            )"######,
        )
        .unwrap();

        let keys: Vec<_> = level
            .entities
            .doors
            .iter()
            .map(|door| (door.position, door.keys_needed))
            .collect();
        assert_eq!(
            keys,
            vec![(Position::new(3, 2), 3), (Position::new(1, 1), 0)]
        );
    }

    #[test]
    fn rejects_bad_layouts() {
        assert!(LevelLoader::from_rows(&["P?"]).is_err());
        assert!(LevelLoader::from_rows(&["..."]).is_err());
        assert!(LevelLoader::from_rows::<&str>(&[]).is_err());
        assert!(
            LevelLoader::parse(r#"(layout: ["P."], doors: [(x: 1, y: 0, keys_needed: 2)])"#)
                .is_err()
        );
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.ron");
        std::fs::write(&path, r#"(layout: ["PkO"])"#).unwrap();

        let level = LevelLoader::load(&path).unwrap();
        assert_eq!(level.entities.items.len(), 1);
        assert!(level.entities.doors[0].is_open());
    }
}

use super::tile::TerrainKind;
use super::World;
use crate::error::{SimError, SimResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MapFile {
    #[serde(default)]
    tiles: Vec<String>,
}

/// Parses a `{"tiles": [...]}` document into a terrain grid. Any `legend`
/// field is ignored.
pub fn parse_map(json: &str) -> SimResult<Vec<Vec<TerrainKind>>> {
    let map: MapFile =
        serde_json::from_str(json).map_err(|e| SimError::InvalidMap(e.to_string()))?;

    let width = map
        .tiles
        .first()
        .map(|row| row.chars().count())
        .ok_or_else(|| SimError::InvalidMap("missing tiles".to_string()))?;

    map.tiles
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let len = row.chars().count();
            if len != width {
                return Err(SimError::InvalidMap(format!(
                    "row {} has {} tiles, expected {}",
                    y, len, width
                )));
            }
            row.chars().map(TerrainKind::from_symbol).collect()
        })
        .collect()
}

impl World {
    pub fn from_map_str(json: &str) -> SimResult<Self> {
        World::from_terrain(parse_map(json)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_map_str(&content)
    }
}

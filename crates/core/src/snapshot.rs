//! Read-only view of a session for renderers and tooling

use serde::Serialize;

use crate::types::{ItemFamily, Position, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    pub name: String,
    pub family: ItemFamily,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` entries
    pub cells: Vec<CellSnapshot>,
    pub moves_remaining: u32,
    pub score: u32,
    pub goal_score: u32,
    pub state: SessionState,
    /// Pending first pick, if any
    pub selection: Vec<Position>,
    /// A stepped resolution is still in progress
    pub resolving: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.moves_remaining = 0;
        self.score = 0;
        self.goal_score = 0;
        self.state = SessionState::Playing;
        self.selection.clear();
        self.resolving = false;
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&CellSnapshot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn playable(&self) -> bool {
        !self.state.is_terminal() && !self.resolving
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            moves_remaining: 0,
            score: 0,
            goal_score: 0,
            state: SessionState::Playing,
            selection: Vec::new(),
            resolving: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup_is_row_major() {
        let mut snap = GameSnapshot {
            width: 2,
            height: 1,
            ..GameSnapshot::default()
        };
        snap.cells.push(CellSnapshot {
            name: "bear".to_string(),
            family: ItemFamily::Ordinary,
        });
        snap.cells.push(CellSnapshot {
            name: "universal".to_string(),
            family: ItemFamily::Universal,
        });

        assert_eq!(snap.cell(1, 0).unwrap().name, "universal");
        assert!(snap.cell(2, 0).is_none());
    }

    #[test]
    fn test_json_shape() {
        let snap = GameSnapshot {
            width: 1,
            height: 1,
            cells: vec![CellSnapshot {
                name: "frog".to_string(),
                family: ItemFamily::Ordinary,
            }],
            moves_remaining: 3,
            score: 120,
            goal_score: 1000,
            ..GameSnapshot::default()
        };
        let value: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(value["cells"][0]["name"], "frog");
        assert_eq!(value["cells"][0]["family"], "Ordinary");
        assert_eq!(value["state"], "Playing");
        assert_eq!(value["moves_remaining"], 3);
    }

    #[test]
    fn test_clear_resets() {
        let mut snap = GameSnapshot {
            score: 10,
            resolving: true,
            ..GameSnapshot::default()
        };
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
        assert!(snap.playable());
    }
}

use std::path::Path;

use crate::components::{PelletKind, Vector2};
use crate::constants::{
    PELLET_POINTS, PELLET_RADIUS, PELLET_SYMBOLS, POWER_FLASH_SECONDS, POWER_PELLET_POINTS,
    POWER_PELLET_RADIUS, POWER_PELLET_SYMBOLS,
};
use crate::error::Result;
use crate::maze::Grid;
use crate::nodes::PixelKey;

#[derive(Debug, Clone, PartialEq)]
pub struct Pellet {
    pub position: Vector2,
    pub kind: PelletKind,
    pub radius: f32,
    pub points: u32,
    pub visible: bool,
    timer: f32,
}

impl Pellet {
    fn new(position: Vector2, kind: PelletKind) -> Self {
        let (radius, points) = match kind {
            PelletKind::Normal => (PELLET_RADIUS, PELLET_POINTS),
            PelletKind::Power => (POWER_PELLET_RADIUS, POWER_PELLET_POINTS),
        };
        Self {
            position,
            kind,
            radius,
            points,
            visible: true,
            timer: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        if self.kind != PelletKind::Power {
            return;
        }
        self.timer += dt;
        if self.timer >= POWER_FLASH_SECONDS {
            self.visible = !self.visible;
            self.timer = 0.0;
        }
    }
}

/// Every pellet still on the board, laid out from the maze tokens.
#[derive(Debug, Clone, Default)]
pub struct PelletGroup {
    pellets: Vec<Pellet>,
    pub num_eaten: usize,
}

impl PelletGroup {
    pub fn from_file(path: impl AsRef<Path>) -> Result<PelletGroup> {
        Ok(PelletGroup::from_grid(&Grid::from_file(path)?))
    }

    pub fn from_grid(grid: &Grid) -> PelletGroup {
        let mut pellets = Vec::new();
        for (col, row, token) in grid.cells() {
            let kind = if PELLET_SYMBOLS.contains(&token) {
                PelletKind::Normal
            } else if POWER_PELLET_SYMBOLS.contains(&token) {
                PelletKind::Power
            } else {
                continue;
            };
            let key = i32::try_from(col)
                .ok()
                .zip(i32::try_from(row).ok())
                .and_then(|(c, r)| PixelKey::from_tiles(c, r));
            if let Some(key) = key {
                pellets.push(Pellet::new(key.position(), kind));
            }
        }
        PelletGroup {
            pellets,
            num_eaten: 0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        for pellet in &mut self.pellets {
            pellet.update(dt);
        }
    }

    pub fn remove(&mut self, index: usize) -> Pellet {
        self.num_eaten += 1;
        self.pellets.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pellet> {
        self.pellets.iter()
    }

    pub fn len(&self) -> usize {
        self.pellets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pellets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pellets_from_tokens() {
        let grid = Grid::parse("+ . X\nP p -").unwrap();
        let group = PelletGroup::from_grid(&grid);
        assert_eq!(group.len(), 4);
        let kinds: Vec<_> = group.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PelletKind::Normal,
                PelletKind::Normal,
                PelletKind::Power,
                PelletKind::Power
            ]
        );
        let power = group.iter().nth(3).unwrap();
        assert_eq!(power.position, Vector2::new(16.0, 16.0));
        assert_eq!(power.points, POWER_PELLET_POINTS);
    }

    #[test]
    fn test_power_pellets_flash() {
        let grid = Grid::parse("P .").unwrap();
        let mut group = PelletGroup::from_grid(&grid);
        group.update(0.25);
        let visible: Vec<_> = group.iter().map(|p| p.visible).collect();
        assert_eq!(visible, vec![false, true]);
        group.update(0.25);
        assert!(group.iter().all(|p| p.visible));
    }

    #[test]
    fn test_remove_counts_eaten() {
        let grid = Grid::parse(". .").unwrap();
        let mut group = PelletGroup::from_grid(&grid);
        let eaten = group.remove(0);
        assert_eq!(eaten.points, PELLET_POINTS);
        assert_eq!(group.num_eaten, 1);
        assert_eq!(group.len(), 1);
    }
}

//! Incremental construction of a [`LevelState`].

use crate::state::{
    DoorEntity, EntitiesState, EntityId, ItemDefinition, ItemEntity, LevelOutcome, LevelState,
    MonsterEntity, PlayerState, Position, StateError, TileGrid,
};

/// Collects walls and entity placements, validating everything on [`build`](Self::build).
///
/// Entity IDs are handed out sequentially from 1 in placement order; 0 is the player.
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    width: u32,
    height: u32,
    walls: Vec<Position>,
    player: Vec<Position>,
    items: Vec<(Position, ItemDefinition)>,
    monsters: Vec<Position>,
    doors: Vec<(Position, u32)>,
}

impl LevelBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: Vec::new(),
            player: Vec::new(),
            items: Vec::new(),
            monsters: Vec::new(),
            doors: Vec::new(),
        }
    }

    pub fn wall(mut self, position: Position) -> Self {
        self.walls.push(position);
        self
    }

    pub fn walls(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(positions);
        self
    }

    pub fn player(mut self, position: Position) -> Self {
        self.player.push(position);
        self
    }

    pub fn item(mut self, position: Position, item: impl Into<ItemDefinition>) -> Self {
        self.items.push((position, item.into()));
        self
    }

    pub fn monster(mut self, position: Position) -> Self {
        self.monsters.push(position);
        self
    }

    pub fn door(mut self, position: Position, keys_needed: u32) -> Self {
        self.doors.push((position, keys_needed));
        self
    }

    pub fn build(self) -> Result<LevelState, StateError> {
        if self.width == 0 || self.height == 0 {
            return Err(StateError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }

        let mut grid = TileGrid::new(self.width, self.height);
        for wall in &self.walls {
            if !grid.add_wall(*wall) {
                return Err(self.out_of_bounds(*wall));
            }
        }

        let mut players = self.player.iter().copied();
        let start = players.next().ok_or(StateError::MissingPlayer)?;
        if let Some(position) = players.next() {
            return Err(StateError::DuplicatePlayer { position });
        }
        self.check_floor(&grid, start)?;

        let mut next_id = 1u32;
        let mut allocate = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };

        let mut entities = EntitiesState::empty();
        for (position, item) in &self.items {
            self.check_floor(&grid, *position)?;
            entities.items.push(ItemEntity {
                id: allocate(),
                position: *position,
                item: item.clone(),
            });
        }
        for position in &self.monsters {
            self.check_floor(&grid, *position)?;
            entities.monsters.push(MonsterEntity {
                id: allocate(),
                position: *position,
            });
        }
        for (position, keys_needed) in &self.doors {
            self.check_floor(&grid, *position)?;
            entities.doors.push(DoorEntity {
                id: allocate(),
                position: *position,
                keys_needed: *keys_needed,
            });
        }

        Ok(LevelState {
            grid,
            entities,
            player: PlayerState::new(start),
            outcome: LevelOutcome::InProgress,
            nonce: 0,
        })
    }

    fn check_floor(&self, grid: &TileGrid, position: Position) -> Result<(), StateError> {
        if !grid.contains(position) {
            return Err(self.out_of_bounds(position));
        }
        if grid.is_wall(position) {
            return Err(StateError::PlacedOnWall { position });
        }
        Ok(())
    }

    fn out_of_bounds(&self, position: Position) -> StateError {
        StateError::PositionOutOfBounds {
            position,
            width: self.width,
            height: self.height,
        }
    }
}

use std::collections::{HashSet, VecDeque};

use super::types::{DeathReason, Direction, FieldSize, Point};

/// The snake body: an ordered segment list with the head at the front,
/// mirrored by a packed-index set for O(1) occupancy checks. The two
/// stay consistent across every mutation.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    occupancy: HashSet<usize>,
    direction: Option<Direction>,
    width: usize,
}

impl Snake {
    pub fn new(start: Point, field: &FieldSize) -> Self {
        let mut body = VecDeque::new();
        let mut occupancy = HashSet::new();

        body.push_back(start);
        occupancy.insert(start.to_index(field.width));

        Self {
            body,
            occupancy,
            direction: None,
            width: field.width,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn segments(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.occupancy.contains(&point.to_index(self.width))
    }

    /// The head's neighbor cell in `direction`. Does not mutate.
    /// `Err(WallCollision)` when the neighbor lies outside the field;
    /// resolving that into a game-over is the caller's decision.
    pub fn propose_move(
        &self,
        direction: Direction,
        field: &FieldSize,
    ) -> Result<Point, DeathReason> {
        let head = self.head();

        let next = match direction {
            Direction::Up => {
                if head.y == 0 {
                    return Err(DeathReason::WallCollision);
                }
                Point::new(head.x, head.y - 1)
            }
            Direction::Down => {
                if head.y >= field.height - 1 {
                    return Err(DeathReason::WallCollision);
                }
                Point::new(head.x, head.y + 1)
            }
            Direction::Left => {
                if head.x == 0 {
                    return Err(DeathReason::WallCollision);
                }
                Point::new(head.x - 1, head.y)
            }
            Direction::Right => {
                if head.x >= field.width - 1 {
                    return Err(DeathReason::WallCollision);
                }
                Point::new(head.x + 1, head.y)
            }
        };

        Ok(next)
    }

    /// Accepts `direction` unless moving the head one step that way
    /// would land on a cell the body currently occupies. With a body
    /// longer than one segment this blocks the 180-degree reversal,
    /// since the neighbor in reverse is always the second segment.
    /// Rejection is a silent no-op.
    pub fn change_direction(&mut self, direction: Direction, field: &FieldSize) {
        if let Ok(next) = self.propose_move(direction, field)
            && self.occupies(next)
        {
            return;
        }
        self.direction = Some(direction);
    }

    /// Prepends `point` and marks it occupied. The caller is
    /// responsible for having validated the move.
    pub fn advance_head(&mut self, point: Point) {
        self.occupancy.insert(point.to_index(self.width));
        self.body.push_front(point);
    }

    pub fn remove_tail(&mut self) {
        let tail = self.body.pop_back().expect("Snake body should never be empty");
        self.occupancy.remove(&tail.to_index(self.width));
    }

    #[cfg(test)]
    pub(crate) fn from_segments(
        segments: &[Point],
        direction: Option<Direction>,
        field: &FieldSize,
    ) -> Self {
        let body: VecDeque<Point> = segments.iter().copied().collect();
        let occupancy = segments.iter().map(|p| p.to_index(field.width)).collect();
        Self {
            body,
            occupancy,
            direction,
            width: field.width,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.body.len() == self.occupancy.len()
            && self
                .body
                .iter()
                .all(|p| self.occupancy.contains(&p.to_index(self.width)))
    }
}

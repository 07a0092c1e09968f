#![allow(dead_code)]
//! Swap path search
//!
//! A tile may only travel to its destination through empty cells. The path
//! is shown to the player and validates the move; only the two end cells
//! are ever written.

use super::grid::{Grid, Position, CELL_COUNT};
use std::collections::VecDeque;

/// Ordered cells from origin to destination, both inclusive.
/// An empty path means the move is illegal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Position>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn positions(&self) -> &[Position] {
        &self.steps
    }

    pub fn indices(&self) -> Vec<usize> {
        self.steps.iter().map(Position::index).collect()
    }

    /// Origin and destination are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.steps.len() == 1
    }
}

pub struct PathFinder;

impl PathFinder {
    /// Shortest 4-connected path from `origin` to `destination`.
    ///
    /// Breadth-first, exploring up, down, left, right. A neighbor is
    /// enterable when it is the destination or an empty cell not yet seen.
    pub fn find(grid: &Grid, origin: Position, destination: Position) -> Path {
        if origin == destination {
            return Path {
                steps: vec![origin],
            };
        }

        let mut came_from: [Option<Position>; CELL_COUNT] = [None; CELL_COUNT];
        let mut visited = [false; CELL_COUNT];
        let mut queue = VecDeque::from([origin]);
        visited[origin.index()] = true;

        let mut reached = false;
        while let Some(current) = queue.pop_front() {
            if current == destination {
                reached = true;
                break;
            }

            for next in current.neighbors() {
                let index = next.index();
                if visited[index] {
                    continue;
                }
                if next == destination || grid.is_empty_at(index) {
                    visited[index] = true;
                    came_from[index] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        if !reached {
            return Path::default();
        }

        let mut steps = vec![destination];
        let mut step = destination;
        while let Some(previous) = came_from[step.index()] {
            steps.push(previous);
            step = previous;
        }
        steps.reverse();
        Path { steps }
    }
}

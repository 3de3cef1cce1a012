//! Compact feature observations for external controllers

use crate::game::{DepotState, Direction};

/// Number of features in an observation
pub const OBSERVATION_LEN: usize = 14;

/// Feature vector describing the state from the drone's point of view
pub type Observation = [f32; OBSERVATION_LEN];

/// Build the observation for the current state
///
/// Features:
/// - 0-2: boundary danger at the straight / right / left candidate cells
/// - 3-5: rack column occupancy at those candidate cells
/// - 6-9: heading one-hot (right, down, left, up)
/// - 10-13: cargo left / right / above / below the head
pub fn observe(state: &DepotState) -> Observation {
    let head = state.drone.head();
    let heading = state.drone.heading;

    let probes = [
        head.stepped(heading, state.cell),
        head.stepped(heading.turned_right(), state.cell),
        head.stepped(heading.turned_left(), state.cell),
    ];

    let mut features = [0.0; OBSERVATION_LEN];

    for (i, probe) in probes.iter().enumerate() {
        features[i] = flag(state.is_collision(*probe));
        features[3 + i] = flag(state.rack_in_column(probe.x));
    }

    features[6] = flag(heading == Direction::Right);
    features[7] = flag(heading == Direction::Down);
    features[8] = flag(heading == Direction::Left);
    features[9] = flag(heading == Direction::Up);

    features[10] = flag(state.cargo.x < head.x);
    features[11] = flag(state.cargo.x > head.x);
    features[12] = flag(state.cargo.y < head.y);
    features[13] = flag(state.cargo.y > head.y);

    features
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DepotConfig, DepotEngine, Position};

    fn state_at(head: Position, heading: Direction) -> DepotState {
        let mut engine = DepotEngine::with_seed(DepotConfig::default(), 11);
        let mut state = engine.reset();
        state.drone.trail[0] = head;
        state.drone.heading = heading;
        state
    }

    #[test]
    fn test_open_floor_has_no_danger() {
        let mut state = state_at(Position::new(320, 240), Direction::Up);
        state.cargo = Position::new(320, 240);

        let obs = observe(&state);

        assert_eq!(&obs[0..3], &[0.0, 0.0, 0.0]);
        // heading one-hot: up
        assert_eq!(&obs[6..10], &[0.0, 0.0, 0.0, 1.0]);
        // cargo on the head sets no direction flag
        assert_eq!(&obs[10..14], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_boundary_danger_flags() {
        // head in the top-left corner heading up: straight and left leave
        // the grid, right stays inside
        let state = state_at(Position::new(0, 0), Direction::Up);

        let obs = observe(&state);

        assert_eq!(obs[0], 1.0);
        assert_eq!(obs[1], 0.0);
        assert_eq!(obs[2], 1.0);
    }

    #[test]
    fn test_rack_column_flags() {
        // heading right at x = 60: the straight probe lands in the first
        // rack column at x = 80
        let state = state_at(Position::new(60, 240), Direction::Right);

        let obs = observe(&state);

        assert_eq!(obs[3], 1.0);
        // side probes stay in column x = 60
        assert_eq!(obs[4], 0.0);
        assert_eq!(obs[5], 0.0);
    }

    #[test]
    fn test_cargo_direction_flags() {
        let mut state = state_at(Position::new(320, 240), Direction::Up);
        state.cargo = Position::new(100, 400);

        let obs = observe(&state);

        // cargo is to the left and below
        assert_eq!(&obs[10..14], &[1.0, 0.0, 0.0, 1.0]);
    }
}

use super::action::Direction;

/// A pixel-aligned position on the depot grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step of `cell` away in the given heading
    pub fn stepped(self, heading: Direction, cell: i32) -> Self {
        let (dx, dy) = heading.delta(cell);
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The drone and the trail of cells it occupies
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    /// Occupied cells, head at index 0
    pub trail: Vec<Position>,
    /// Current heading
    pub heading: Direction,
}

impl Drone {
    pub fn new(head: Position, heading: Direction) -> Self {
        Self {
            trail: vec![head],
            heading,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.trail[0]
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    /// The drone left the grid
    LeftGrid,
    /// The stall timeout expired
    Stalled,
    /// The pick quota was reached
    QuotaMet,
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq)]
pub struct DepotState {
    pub drone: Drone,
    /// Current cargo item position
    pub cargo: Position,
    /// Fixed rack cells, built once per episode
    pub racks: Vec<Position>,
    /// Dock cell at the bottom-left corner
    pub door: Position,
    pub width: i32,
    pub height: i32,
    pub cell: i32,
    /// Items picked up this episode
    pub score: u32,
    /// Frames elapsed this episode
    pub frames: u32,
    /// Set when a terminal step result has been produced
    pub done: bool,
    /// Why the episode ended, once it has
    pub end: Option<EndCause>,
}

impl DepotState {
    /// Boundary test for a probe point
    pub fn is_collision(&self, pt: Position) -> bool {
        // leaves the grid
        if pt.x > self.width - self.cell
            || pt.x < 0
            || pt.y > self.height - self.cell
            || pt.y < 0
        {
            return true;
        }

        // hits a rack
        // if self.racks.contains(&pt) {
        //     return true;
        // }

        false
    }

    /// Whether a point sits on a rack cell
    pub fn is_rack(&self, pt: Position) -> bool {
        self.racks.contains(&pt)
    }

    /// Whether any rack cell occupies pixel column `x`
    pub fn rack_in_column(&self, x: i32) -> bool {
        self.racks.iter().any(|p| p.x == x)
    }
}

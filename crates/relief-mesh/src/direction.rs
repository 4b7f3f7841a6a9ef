use relief_geom::IVec3;

/// Axis-aligned face directions, in the order faces are stored per cell and
/// visited by the emitter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
    Forward = 4,
    Back = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
        Direction::Forward,
        Direction::Back,
    ];

    pub const LATERAL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Forward,
        Direction::Back,
    ];

    /// Returns the `[0..6)` index of this direction.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the integer grid delta when stepping out of this face.
    #[inline]
    pub fn step(self) -> IVec3 {
        match self {
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::Right => IVec3::new(1, 0, 0),
            Direction::Left => IVec3::new(-1, 0, 0),
            Direction::Forward => IVec3::new(0, 0, 1),
            Direction::Back => IVec3::new(0, 0, -1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Forward => Direction::Back,
            Direction::Back => Direction::Forward,
        }
    }

    /// Cell-corner offsets of this direction's face, clockwise as seen from
    /// outside along the face normal. The order feeds straight into the
    /// `(0,1,2) + (0,2,3)` triangle fan.
    #[inline]
    pub fn corner_offsets(self) -> [IVec3; 4] {
        match self {
            Direction::Up => [
                IVec3::new(0, 1, 1),
                IVec3::new(1, 1, 1),
                IVec3::new(1, 1, 0),
                IVec3::new(0, 1, 0),
            ],
            Direction::Down => [
                IVec3::new(1, 0, 1),
                IVec3::new(0, 0, 1),
                IVec3::new(0, 0, 0),
                IVec3::new(1, 0, 0),
            ],
            Direction::Right => [
                IVec3::new(1, 0, 1),
                IVec3::new(1, 0, 0),
                IVec3::new(1, 1, 0),
                IVec3::new(1, 1, 1),
            ],
            Direction::Left => [
                IVec3::new(0, 0, 0),
                IVec3::new(0, 0, 1),
                IVec3::new(0, 1, 1),
                IVec3::new(0, 1, 0),
            ],
            Direction::Forward => [
                IVec3::new(0, 0, 1),
                IVec3::new(1, 0, 1),
                IVec3::new(1, 1, 1),
                IVec3::new(0, 1, 1),
            ],
            Direction::Back => [
                IVec3::new(1, 0, 0),
                IVec3::new(0, 0, 0),
                IVec3::new(0, 1, 0),
                IVec3::new(1, 1, 0),
            ],
        }
    }
}

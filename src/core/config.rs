/// Side length of the standard square grid.
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Shortest ship the hunt pattern is guaranteed to find.
pub const MIN_SHIP_LENGTH: usize = 2;

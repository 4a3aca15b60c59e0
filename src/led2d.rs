//! Grid coordinates for the 5×5 game matrix and their mapping onto the LED chain.
//!
//! The matrix is wired as a serpentine: even rows run left-to-right, odd rows
//! run right-to-left. [`led_index`] reproduces that wiring so callers can work
//! in `(x, y)` space.
//!
//! ```rust
//! use simon_matrix::led2d::{Coordinate, led_index};
//!
//! assert_eq!(led_index(0, 0), 0);
//! assert_eq!(led_index(4, 0), 4);
//! assert_eq!(led_index(0, 1), 9);
//! assert_eq!(led_index(4, 1), 5);
//!
//! let corner = Coordinate::new(4, 4).expect("in range");
//! assert_eq!(corner.led_index(), 24);
//! ```

pub mod layout;

pub use layout::LedLayout;

/// Columns in the game matrix.
pub const WIDTH: usize = 5;

/// Rows in the game matrix.
pub const HEIGHT: usize = 5;

/// LEDs in the game matrix.
pub const LED_COUNT: usize = WIDTH * HEIGHT;

/// Wiring of the game matrix.
pub const LED_LAYOUT_5X5: LedLayout<LED_COUNT, WIDTH, HEIGHT> = LedLayout::serpentine_row_major();

/// Chain index of every cell, row-major. [`Coordinate::led_index`] reads this.
pub const LED_INDEX_TABLE: [u16; LED_COUNT] = LED_LAYOUT_5X5.xy_to_index();

// The wiring table and the closed-form mapping must agree on every cell.
const _: () = {
    let mut y = 0;
    while y < HEIGHT {
        let mut x = 0;
        while x < WIDTH {
            assert!(
                LED_INDEX_TABLE[y * WIDTH + x] as usize == led_index(x, y),
                "serpentine table disagrees with led_index"
            );
            x += 1;
        }
        y += 1;
    }
};

const MAX_X: u8 = (WIDTH - 1) as u8;
const MAX_Y: u8 = (HEIGHT - 1) as u8;

/// Map a grid position to its index on the LED chain.
///
/// Callers must pass `x < WIDTH` and `y < HEIGHT`; [`Coordinate`] enforces this.
#[must_use]
pub const fn led_index(x: usize, y: usize) -> usize {
    if y % 2 == 0 {
        y * WIDTH + x
    } else {
        y * WIDTH + (WIDTH - 1 - x)
    }
}

/// A cell of the game matrix, always within `[0, 4] × [0, 4]`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    /// Top-left cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a coordinate, or `None` when it falls outside the matrix.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x <= MAX_X && y <= MAX_Y {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// Create a coordinate, pulling each axis back onto the matrix.
    #[must_use]
    pub const fn clamped(x: u8, y: u8) -> Self {
        Self {
            x: if x > MAX_X { MAX_X } else { x },
            y: if y > MAX_Y { MAX_Y } else { y },
        }
    }

    /// Column, `0..WIDTH`.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row, `0..HEIGHT`.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Index of this cell on the LED chain.
    #[must_use]
    pub const fn led_index(self) -> usize {
        LED_INDEX_TABLE[self.y as usize * WIDTH + self.x as usize] as usize
    }

    /// The cell wired at `index`, or `None` past the end of the chain.
    #[must_use]
    pub fn from_led_index(index: usize) -> Option<Self> {
        let &(x, y) = LED_LAYOUT_5X5.index_to_xy().get(index)?;
        Self::new(u8::try_from(x).ok()?, u8::try_from(y).ok()?)
    }

    /// Move one cell along each axis by `dx` and `dy` (each -1, 0 or 1), stopping
    /// at the edges.
    #[must_use]
    pub const fn step(self, dx: i8, dy: i8) -> Self {
        Self {
            x: step_axis(self.x, dx, MAX_X),
            y: step_axis(self.y, dy, MAX_Y),
        }
    }
}

const fn step_axis(value: u8, delta: i8, max: u8) -> u8 {
    if delta < 0 {
        value.saturating_sub(1)
    } else if delta > 0 && value < max {
        value + 1
    } else {
        value
    }
}

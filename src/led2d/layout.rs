//! Chain wiring of a rectangular LED panel, worked out at compile time.
//!
//! See [`LedLayout`] for the serpentine wiring used by the game matrix.

/// Wiring of a `W × H` panel whose `N` LEDs form one chain.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
/// `x` increases to the right, and `y` increases downward. Entry `i` of
/// [`index_to_xy`](Self::index_to_xy) is the cell of the `i`-th LED on the chain.
///
/// ```text
/// Serpentine 3×2:
///     LED0  LED1  LED2
///     LED5  LED4  LED3
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// Serpentine row-major wiring: even rows run left-to-right, odd rows run
    /// right-to-left.
    ///
    /// ```rust
    /// use simon_matrix::led2d::layout::LedLayout;
    ///
    /// const SERPENTINE: LedLayout<9, 3, 3> = LedLayout::serpentine_row_major();
    /// assert_eq!(SERPENTINE.index_to_xy()[3], (2, 1));
    /// ```
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");
        assert!(N <= u16::MAX as usize, "total LEDs must fit in u16");

        let mut map = [(0_u16, 0_u16); N];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                let chain_x = if y % 2 == 0 { x } else { W - 1 - x };
                map[y * W + chain_x] = (x as u16, y as u16);
                x += 1;
            }
            y += 1;
        }
        Self { map }
    }

    /// Cell of each LED, in chain order.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// Chain index of each cell, in row-major order: entry `y * W + x` holds
    /// the index of cell `(x, y)`.
    #[must_use]
    pub const fn xy_to_index(&self) -> [u16; N] {
        let mut table = [0_u16; N];
        let mut index = 0;
        while index < N {
            let (x, y) = self.map[index];
            table[y as usize * W + x as usize] = index as u16;
            index += 1;
        }
        table
    }
}

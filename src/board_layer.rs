//! Bit-packed boolean field over every cell of the grid.
//!
//! Cells are addressed by their linear index (`row * cols + col`). Bits past
//! the last cell are always kept clear so that population counts and shifts
//! never see garbage.

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, PartialEq, Eq)]
pub struct BoardLayer {
    words: Vec<u64>,
    num_cells: usize,
}

impl Clone for BoardLayer {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            num_cells: self.num_cells,
        }
    }

    // Reuses the word buffer; the search copies states into a fixed arena
    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
        self.num_cells = source.num_cells;
    }
}

impl BoardLayer {
    /// Create an empty layer covering `num_cells` cells
    pub fn new(num_cells: usize) -> Self {
        let num_words = (num_cells + WORD_BITS - 1) / WORD_BITS;
        Self {
            words: vec![0u64; num_words],
            num_cells,
        }
    }

    /// Build a layer with exactly the given cells set
    pub fn from_cells<I>(num_cells: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut layer = Self::new(num_cells);
        for cell in cells {
            layer.set(cell, true);
        }
        layer
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    #[inline]
    pub fn get(&self, cell: usize) -> bool {
        debug_assert!(cell < self.num_cells);
        (self.words[cell / WORD_BITS] >> (cell % WORD_BITS)) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, cell: usize, value: bool) {
        debug_assert!(cell < self.num_cells);
        let mask = 1u64 << (cell % WORD_BITS);
        if value {
            self.words[cell / WORD_BITS] |= mask;
        } else {
            self.words[cell / WORD_BITS] &= !mask;
        }
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of set cells
    #[inline]
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// `self |= other`
    #[inline]
    pub fn union_with(&mut self, other: &BoardLayer) {
        debug_assert_eq!(self.num_cells, other.num_cells);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    /// `self &= other`
    #[inline]
    pub fn intersect_with(&mut self, other: &BoardLayer) {
        debug_assert_eq!(self.num_cells, other.num_cells);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
    }

    /// `self &= !other`
    #[inline]
    pub fn subtract(&mut self, other: &BoardLayer) {
        debug_assert_eq!(self.num_cells, other.num_cells);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !*b;
        }
    }

    /// Complement over the valid cells only
    pub fn negated(&self) -> BoardLayer {
        let mut out = self.clone();
        for w in out.words.iter_mut() {
            *w = !*w;
        }
        out.mask_tail();
        out
    }

    /// Move every set cell by `offset` linear positions, in place.
    ///
    /// Bits pushed past either end of the field are dropped.
    pub fn shift(&mut self, offset: isize) {
        if offset > 0 {
            self.shift_toward_higher(offset as usize);
        } else if offset < 0 {
            self.shift_toward_lower(offset.unsigned_abs());
        }
    }

    /// Copy of the layer moved by `offset`
    pub fn shifted(&self, offset: isize) -> BoardLayer {
        let mut out = self.clone();
        out.shift(offset);
        out
    }

    /// Iterate over the indices of set cells in ascending order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(word_index * WORD_BITS + bit)
            })
        })
    }

    fn shift_toward_higher(&mut self, n: usize) {
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        let len = self.words.len();

        // Descending order reads only words that have not been overwritten yet
        for i in (0..len).rev() {
            let mut value = 0u64;
            if i >= word_shift {
                value = self.words[i - word_shift] << bit_shift;
                if bit_shift > 0 && i > word_shift {
                    value |= self.words[i - word_shift - 1] >> (WORD_BITS - bit_shift);
                }
            }
            self.words[i] = value;
        }
        self.mask_tail();
    }

    fn shift_toward_lower(&mut self, n: usize) {
        let word_shift = n / WORD_BITS;
        let bit_shift = n % WORD_BITS;
        let len = self.words.len();

        for i in 0..len {
            let mut value = 0u64;
            if i + word_shift < len {
                value = self.words[i + word_shift] >> bit_shift;
                if bit_shift > 0 && i + word_shift + 1 < len {
                    value |= self.words[i + word_shift + 1] << (WORD_BITS - bit_shift);
                }
            }
            self.words[i] = value;
        }
    }

    fn mask_tail(&mut self) {
        let used = self.num_cells % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}

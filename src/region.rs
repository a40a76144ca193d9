use crate::error::UsageError;

/// An axis-aligned box of blocks, stored as its minimum corner and a positive extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRegion {
    origin: [i32; 3],
    size: [u32; 3],
}

impl RenderRegion {
    pub fn from_corner_size(corner: [i32; 3], size: [i32; 3]) -> Result<Self, UsageError> {
        if size.iter().any(|&s| s <= 0) {
            return Err(UsageError::NonPositiveSize(size));
        }
        Ok(Self {
            origin: corner,
            size: size.map(|s| s as u32),
        })
    }

    /// Both corners are inclusive and may be given in any order.
    pub fn from_corners(a: [i32; 3], b: [i32; 3]) -> Result<Self, UsageError> {
        let mut origin = [0; 3];
        let mut size = [0; 3];
        for i in 0..3 {
            origin[i] = a[i].min(b[i]);
            size[i] = a[i]
                .abs_diff(b[i])
                .checked_add(1)
                .ok_or(UsageError::RegionTooLarge(a, b))?;
        }
        Ok(Self { origin, size })
    }

    /// Builds a region from the `--pos`/`--size` combination: one corner plus a size,
    /// or two corners and no size. Anything else is rejected.
    pub fn from_positions(
        positions: &[[i32; 3]],
        size: Option<[i32; 3]>,
    ) -> Result<Self, UsageError> {
        match (positions, size) {
            ([corner], Some(size)) => Self::from_corner_size(*corner, size),
            ([a, b], None) => Self::from_corners(*a, *b),
            _ => Err(UsageError::RegionNotSpecified),
        }
    }

    pub fn origin(&self) -> [i32; 3] {
        self.origin
    }

    pub fn size(&self) -> [u32; 3] {
        self.size
    }

    /// The inclusive maximum corner. Widened so boxes touching `i32::MAX` don't overflow.
    pub fn max_corner(&self) -> [i64; 3] {
        let mut max = [0; 3];
        for i in 0..3 {
            max[i] = self.origin[i] as i64 + self.size[i] as i64 - 1;
        }
        max
    }
}

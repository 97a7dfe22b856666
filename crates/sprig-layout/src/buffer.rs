//! Append-only box storage.
//!
//! Block boxes are pushed before their content and have their height fixed
//! up afterwards. Later pushes may reallocate the storage, so that fixup
//! addresses the box by [`BoxIndex`]; no reference into the buffer is ever
//! held across a push.

use crate::error::LayoutError;
use crate::layout_box::LayoutBox;

/// Capacity reserved by the first push.
const INITIAL_CAPACITY: usize = 16;

/// Stable handle to a box in a [`BoxBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxIndex(pub usize);

/// Growable, append-only sequence of boxes.
///
/// Growth is geometric (16, then doubling) and fallible: an allocation
/// failure or the optional box limit is returned as an error instead of
/// aborting, leaving every box pushed so far intact.
#[derive(Debug, Clone, Default)]
pub struct BoxBuffer {
    boxes: Vec<LayoutBox>,
    limit: Option<usize>,
}

impl BoxBuffer {
    /// Create an empty, unlimited buffer. Nothing is allocated until the first push.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            boxes: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty buffer that refuses boxes beyond `limit`.
    #[must_use]
    pub const fn with_limit(limit: Option<usize>) -> Self {
        Self {
            boxes: Vec::new(),
            limit,
        }
    }

    /// Append a box and return its index.
    ///
    /// # Errors
    ///
    /// [`LayoutError::BoxLimitReached`] if the buffer is at its limit, or
    /// [`LayoutError::AllocationFailed`] if the storage could not grow. The
    /// buffer is unchanged in both cases.
    pub fn push(&mut self, layout_box: LayoutBox) -> Result<BoxIndex, LayoutError> {
        let emitted = self.boxes.len();
        if let Some(limit) = self.limit
            && emitted >= limit
        {
            return Err(LayoutError::BoxLimitReached { emitted, limit });
        }

        if emitted == self.boxes.capacity() {
            let additional = emitted.max(INITIAL_CAPACITY);
            self.boxes
                .try_reserve_exact(additional)
                .map_err(|source| LayoutError::AllocationFailed { emitted, source })?;
        }

        self.boxes.push(layout_box);
        Ok(BoxIndex(emitted))
    }

    /// Set the height of a previously pushed box. Unknown indices are ignored.
    pub fn fix_height(&mut self, index: BoxIndex, height: i32) {
        if let Some(b) = self.boxes.get_mut(index.0) {
            b.height = height.max(0);
        }
    }

    /// Get a box by index.
    #[must_use]
    pub fn get(&self, index: BoxIndex) -> Option<&LayoutBox> {
        self.boxes.get(index.0)
    }

    /// Number of boxes pushed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.boxes.len()
    }

    /// True if no box has been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Current capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.boxes.capacity()
    }

    /// All boxes in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Iterate over boxes in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, LayoutBox> {
        self.boxes.iter()
    }

    /// Take the boxes out of the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<LayoutBox> {
        self.boxes
    }
}

impl<'a> IntoIterator for &'a BoxBuffer {
    type Item = &'a LayoutBox;
    type IntoIter = std::slice::Iter<'a, LayoutBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use sprig_dom::NodeId;

    use super::*;
    use crate::layout_box::Hints;

    fn make_box(y: i32) -> LayoutBox {
        LayoutBox {
            x: 0,
            y,
            width: 10,
            height: 0,
            node: NodeId::ROOT,
            href: None,
            hints: Hints::default(),
        }
    }

    #[test]
    fn test_push_returns_sequential_indices() {
        let mut buffer = BoxBuffer::new();
        assert_eq!(buffer.capacity(), 0);
        for i in 0..40 {
            assert_eq!(buffer.push(make_box(i)), Ok(BoxIndex(usize::try_from(i).unwrap())));
        }
        assert_eq!(buffer.len(), 40);
        assert!(buffer.capacity() >= 40);
    }

    #[test]
    fn test_growth_is_geometric() {
        let mut buffer = BoxBuffer::new();
        let _ = buffer.push(make_box(0)).unwrap();
        assert_eq!(buffer.capacity(), 16);
        for i in 1..17 {
            let _ = buffer.push(make_box(i)).unwrap();
        }
        assert_eq!(buffer.capacity(), 32);
    }

    #[test]
    fn test_fix_height_survives_reallocation() {
        let mut buffer = BoxBuffer::new();
        let first = buffer.push(make_box(0)).unwrap();
        for i in 1..100 {
            let _ = buffer.push(make_box(i)).unwrap();
        }
        buffer.fix_height(first, 55);
        assert_eq!(buffer.get(first).map(|b| b.height), Some(55));

        buffer.fix_height(BoxIndex(1000), 5);
        buffer.fix_height(BoxIndex(1), -3);
        assert_eq!(buffer.get(BoxIndex(1)).map(|b| b.height), Some(0));
    }

    #[test]
    fn test_limit() {
        let mut buffer = BoxBuffer::with_limit(Some(2));
        let _ = buffer.push(make_box(0)).unwrap();
        let _ = buffer.push(make_box(1)).unwrap();
        assert_eq!(
            buffer.push(make_box(2)),
            Err(LayoutError::BoxLimitReached {
                emitted: 2,
                limit: 2
            })
        );
        assert_eq!(buffer.len(), 2);
    }
}

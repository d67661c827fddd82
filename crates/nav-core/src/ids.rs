//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s, but callers should prefer the index helpers
//! for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of a navigation-graph node.  Node ids are dense and
    /// **1-based**: id 0 never names a node (the id map uses 0 for "free
    /// cell"), so the first detected node is `NodeId(1)`.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of an agent in an [`AgentSet`]-style store.  0-based.
    pub struct AgentId(u32);
}

impl NodeId {
    /// Slot in the mesh's dense node array (`id - 1`).
    ///
    /// # Panics
    /// Panics in debug mode when called on `NodeId(0)` or `INVALID`.
    #[inline(always)]
    pub fn slot(self) -> usize {
        debug_assert!(self.0 >= 1 && self != Self::INVALID);
        self.0 as usize - 1
    }

    /// The id as it appears in the cell id map (`+k` labels).
    #[inline(always)]
    pub fn label(self) -> i32 {
        self.0 as i32
    }
}

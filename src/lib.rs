//! Towerset - an ordered set backed by a probabilistic skip list.
//!
//! Sorted storage with expected O(log n) insert, remove, and lookup, and no
//! rebalancing: structure comes from randomized tower heights instead of
//! rotations.
//!
//! # Quick Start
//!
//! ```
//! use towerset::SkipListSet;
//!
//! let mut set = SkipListSet::new();
//! set.insert(3);
//! set.insert(1);
//! set.insert(2);
//!
//! assert!(set.contains(&2));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(set.min(), Ok(&1));
//! ```

pub mod height;
pub mod set;

pub use set::EmptyError;
pub use set::SkipListSet;

//! Flat-buffer serialization (spec §4.A/§4.B).
//!
//! A tag-driven Layout/Builder/View triad, grounded on
//! `original_source/include/mimir/buffer/flatter/**`: every shape that can
//! be embedded in a finished buffer (primitives, [`builder::FlatVec`],
//! [`builder::Tuple2`], [`builder::Tuple3`]) implements [`layout::FlatLayout`]
//! for its static shape, [`builder::FlatBuilder`] for construction, and
//! [`view::FlatView`] for zero-copy reads. The state repository (`src::state`)
//! and the PDDL repository's ground-atom interning both build on this module
//! rather than reaching for `serde`/`bincode` — the wire layout is part of
//! the hash-consing contract, not an incidental encoding choice.

pub mod builder;
pub mod byte_stream;
pub mod layout;
pub mod view;

pub use builder::{FlatBuilder, FlatVec, Tuple2, Tuple3};
pub use byte_stream::ByteStream;
pub use layout::{FlatLayout, LayoutError};
pub use view::FlatView;

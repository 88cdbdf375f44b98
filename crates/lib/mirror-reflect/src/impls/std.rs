use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};

use crate::{self as mirror_reflect, container::{List, ListIter, WeakPointer}, Reflect, ReflectRef, Typed};
use crate::{attr::{self, usage}, descriptor_cell::{GenericDescriptorCell, NonGenericDescriptorCell}, value_list, TypeDescriptor};
use mirror_reflect_derive::impl_reflect_primitive;

impl_reflect_primitive!(u8(Display, Clone));
impl_reflect_primitive!(u16(Display, Clone));
impl_reflect_primitive!(u32(Display, Clone));
impl_reflect_primitive!(u64(Display, Clone));
impl_reflect_primitive!(u128(Display, Clone));
impl_reflect_primitive!(usize(Display, Clone));

impl_reflect_primitive!(i8(Display, Clone));
impl_reflect_primitive!(i16(Display, Clone));
impl_reflect_primitive!(i32(Display, Clone));
impl_reflect_primitive!(i64(Display, Clone));
impl_reflect_primitive!(i128(Display, Clone));
impl_reflect_primitive!(isize(Display, Clone));

impl_reflect_primitive!(f32(Display, Clone));
impl_reflect_primitive!(f64(Display, Clone));

impl_reflect_primitive!(bool(Display, Clone));
impl_reflect_primitive!(char(Display, Clone));

/// The `Reflect` methods shared by the std types below, `$reflect_ref` classifies a value.
macro_rules! impl_reflect_common {
    (|$this:ident| $reflect_ref:expr) => {
        fn type_name(&self) -> &'static str {
            std::any::type_name::<Self>()
        }

        fn get_type_descriptor(&self) -> &'static TypeDescriptor {
            <Self as Typed>::type_descriptor()
        }

        fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
            self
        }

        fn as_reflect(&self) -> &dyn Reflect {
            self
        }

        fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
            self
        }

        fn reflect_ref(&self) -> ReflectRef<'_> {
            let $this = self;
            $reflect_ref
        }
    };
}

/// Writes `value` between double quotes, escaping quotes and backslashes.
fn write_quoted(out: &mut dyn fmt::Write, value: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    out.write_char('"')
}

/// Strings are debug printed quoted, unlike their `Display` output.
fn string_descriptor<T: Reflect + AsRef<str>>() -> TypeDescriptor {
    let printer = attr::Debug::new::<T, _>(|out, value: &T| write_quoted(out, value.as_ref()));
    TypeDescriptor::value::<T>().with_attributes(attr::make_attributes::<usage::Type, _>(value_list![printer]))
}

impl Typed for String {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
        CELL.get_or_set(string_descriptor::<Self>)
    }
}

impl Reflect for String {
    impl_reflect_common!(|this| ReflectRef::Value(this));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(self.clone()))
    }

    fn display(&self, out: &mut dyn fmt::Write) -> Option<fmt::Result> {
        Some(out.write_str(self))
    }
}

impl Typed for &'static str {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
        CELL.get_or_set(string_descriptor::<Self>)
    }
}

impl Reflect for &'static str {
    impl_reflect_common!(|this| ReflectRef::Value(this));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(*self))
    }

    fn display(&self, out: &mut dyn fmt::Write) -> Option<fmt::Result> {
        Some(out.write_str(self))
    }
}

impl Typed for () {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
        CELL.get_or_set(TypeDescriptor::value::<Self>)
    }
}

impl Reflect for () {
    impl_reflect_common!(|this| ReflectRef::Value(this));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(()))
    }

    fn display(&self, out: &mut dyn fmt::Write) -> Option<fmt::Result> {
        Some(out.write_str("()"))
    }
}

fn clone_elements<'a, T, C>(elements: impl Iterator<Item = &'a T>) -> Option<C>
where
    T: Reflect,
    C: FromIterator<T>,
{
    elements
        .map(|element| element.clone_value().and_then(|value| value.take::<T>().ok()))
        .collect()
}

/// Lists over a std collection, `$bound`s are what the collection asks of its elements.
///
/// Sets are listed in their iteration order, which is unspecified for `HashSet`.
macro_rules! impl_reflect_list {
    ($list:ident $(+ $bound:ident)*, |$this:ident, $index:ident| $get:expr) => {
        impl<T: Reflect $(+ $bound)*> Typed for $list<T> {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self, _>(TypeDescriptor::list::<Self>)
            }
        }

        impl<T: Reflect $(+ $bound)*> Reflect for $list<T> {
            impl_reflect_common!(|this| ReflectRef::List(this));

            fn clone_value(&self) -> Option<Box<dyn Reflect>> {
                let cloned: $list<T> = clone_elements(IntoIterator::into_iter(self))?;
                Some(Box::new(cloned))
            }
        }

        impl<T: Reflect $(+ $bound)*> List for $list<T> {
            fn len(&self) -> usize {
                $list::len(self)
            }

            fn get(&self, $index: usize) -> Option<&dyn Reflect> {
                let $this = self;
                $get.map(|element: &T| element as &dyn Reflect)
            }

            fn iter(&self) -> ListIter<'_> {
                ListIter::new(IntoIterator::into_iter(self))
            }
        }
    };
}

impl_reflect_list!(Vec, |this, index| this.as_slice().get(index));
impl_reflect_list!(VecDeque, |this, index| VecDeque::get(this, index));
impl_reflect_list!(LinkedList, |this, index| this.iter().nth(index));
impl_reflect_list!(HashSet + Eq + Hash, |this, index| this.iter().nth(index));
impl_reflect_list!(BTreeSet + Ord, |this, index| this.iter().nth(index));

impl<T: Reflect> Typed for &'static [T] {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::list::<Self>)
    }
}

impl<T: Reflect> Reflect for &'static [T] {
    impl_reflect_common!(|this| ReflectRef::List(this));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(*self))
    }
}

impl<T: Reflect> List for &'static [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|element| element as &dyn Reflect)
    }

    fn iter(&self) -> ListIter<'_> {
        ListIter::new(<[T]>::iter(self))
    }
}

impl<T: Reflect, const N: usize> Typed for [T; N] {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::list::<Self>)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    impl_reflect_common!(|this| ReflectRef::List(this));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        let cloned: Vec<T> = clone_elements(self.as_slice().iter())?;
        let array: [T; N] = cloned.try_into().ok()?;
        Some(Box::new(array))
    }
}

impl<T: Reflect, const N: usize> List for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|element| element as &dyn Reflect)
    }

    fn iter(&self) -> ListIter<'_> {
        ListIter::new(self.as_slice().iter())
    }
}

impl<T: Reflect> Typed for Box<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::pointer::<Self>)
    }
}

impl<T: Reflect> Reflect for Box<T> {
    impl_reflect_common!(|this| ReflectRef::Pointer(Some(&**this)));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        let pointee = (**self).clone_value()?.take::<T>().ok()?;
        Some(Box::new(Box::new(pointee)))
    }
}

impl<T: Reflect> Typed for Arc<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::pointer::<Self>)
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    impl_reflect_common!(|this| ReflectRef::Pointer(Some(&**this)));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(Arc::clone(self)))
    }
}

impl<T: Reflect> Typed for Option<Box<T>> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::pointer::<Self>)
    }
}

impl<T: Reflect> Reflect for Option<Box<T>> {
    impl_reflect_common!(|this| ReflectRef::Pointer(this.as_deref().map(|pointee| pointee as &dyn Reflect)));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        let cloned: Option<Box<T>> = match self {
            Some(pointee) => Some(Box::new((**pointee).clone_value()?.take::<T>().ok()?)),
            None => None,
        };
        Some(Box::new(cloned))
    }
}

impl<T: Reflect> Typed for Option<Arc<T>> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::pointer::<Self>)
    }
}

impl<T: Reflect> Reflect for Option<Arc<T>> {
    impl_reflect_common!(|this| ReflectRef::Pointer(this.as_deref().map(|pointee| pointee as &dyn Reflect)));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(self.clone()))
    }
}

impl<T: Reflect> Typed for Weak<T> {
    fn type_descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self, _>(TypeDescriptor::pointer::<Self>)
    }
}

impl<T: Reflect> Reflect for Weak<T> {
    impl_reflect_common!(|this| ReflectRef::Weak(this));

    fn clone_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(Weak::clone(self)))
    }
}

impl<T: Reflect> WeakPointer for Weak<T> {
    fn upgrade(&self) -> Option<Arc<dyn Reflect>> {
        Weak::upgrade(self).map(|pointee| pointee as Arc<dyn Reflect>)
    }
}

macro_rules! impl_reflect_tuple {
    ($($element:ident . $index:tt),+) => {
        impl<$($element: Reflect),+> Typed for ($($element,)+) {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self, _>(TypeDescriptor::tuple::<Self>)
            }
        }

        impl<$($element: Reflect),+> Reflect for ($($element,)+) {
            impl_reflect_common!(|this| ReflectRef::Tuple(this));

            fn clone_value(&self) -> Option<Box<dyn Reflect>> {
                let cloned = ($(self.$index.clone_value()?.take::<$element>().ok()?,)+);
                Some(Box::new(cloned))
            }
        }

        impl<$($element: Reflect),+> List for ($($element,)+) {
            fn len(&self) -> usize {
                [$($index),+].len()
            }

            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                match index {
                    $($index => Some(&self.$index as &dyn Reflect),)+
                    _ => None,
                }
            }

            fn iter(&self) -> ListIter<'_> {
                ListIter::from_refs([$(&self.$index as &dyn Reflect),+])
            }
        }
    };
}

impl_reflect_tuple!(A.0);
impl_reflect_tuple!(A.0, B.1);
impl_reflect_tuple!(A.0, B.1, C.2);
impl_reflect_tuple!(A.0, B.1, C.2, D.3);
impl_reflect_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_reflect_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_reflect_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_reflect_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_descriptors() {
        let descriptor = <i32 as Typed>::type_descriptor();
        assert_eq!(descriptor.name(), "i32");
        assert!(descriptor.is::<i32>());
        assert!(!crate::is_reflectable::<i32>());
        assert!(std::ptr::eq(descriptor, 5i32.get_type_descriptor()));

        assert_eq!(<String as Typed>::type_descriptor().name(), "String");
    }

    #[test]
    fn strings_are_quoted() {
        let mut out = String::new();
        write_quoted(&mut out, r#"say "hi" \ bye"#).unwrap();
        assert_eq!(out, r#""say \"hi\" \\ bye""#);

        assert!(<&'static str as Typed>::type_descriptor().attributes().has::<attr::Debug>());
    }

    #[test]
    fn generic_descriptors_per_instantiation() {
        let ints = <Vec<i32> as Typed>::type_descriptor();
        let floats = <Vec<f32> as Typed>::type_descriptor();

        assert_eq!(ints.name(), "Vec<i32>");
        assert_eq!(floats.name(), "Vec<f32>");
        assert_eq!(ints.get_simple_name(), "Vec");
        assert!(std::ptr::eq(ints, <Vec<i32> as Typed>::type_descriptor()));
        assert!(!std::ptr::eq(ints, floats));
    }

    #[test]
    fn clone_through_reflection() {
        let values = vec![1u8, 2, 3];
        let cloned = values.clone_value().unwrap().take::<Vec<u8>>().unwrap();
        assert_eq!(cloned, values);

        let array = [String::from("a"), String::from("b")];
        let cloned = array.clone_value().unwrap().take::<[String; 2]>().unwrap();
        assert_eq!(cloned, array);

        let boxed: Option<Box<f64>> = Some(Box::new(0.5));
        let cloned = boxed.clone_value().unwrap().take::<Option<Box<f64>>>().unwrap();
        assert_eq!(cloned, boxed);
    }

    #[test]
    fn list_access() {
        let values: VecDeque<u32> = [4, 5, 6].into_iter().collect();
        let list: &dyn List = &values;

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).and_then(|value| value.downcast_ref::<u32>()), Some(&5));
        assert!(list.get(3).is_none());
        assert_eq!(list.iter().count(), 3);
    }

    #[test]
    fn sets_and_linked_lists() {
        let ordered: BTreeSet<u8> = [3, 1, 2].into_iter().collect();
        let elements: Vec<u8> = List::iter(&ordered).map(|value| *value.downcast_ref::<u8>().unwrap()).collect();
        assert_eq!(elements, [1, 2, 3]);
        assert_eq!(List::get(&ordered, 2).and_then(|value| value.downcast_ref::<u8>()), Some(&3));

        let hashed: HashSet<String> = [String::from("a")].into_iter().collect();
        assert_eq!(List::len(&hashed), 1);
        let cloned = hashed.clone_value().unwrap().take::<HashSet<String>>().unwrap();
        assert_eq!(cloned, hashed);

        let linked: LinkedList<i64> = [7, 8].into_iter().collect();
        assert_eq!(List::get(&linked, 1).and_then(|value| value.downcast_ref::<i64>()), Some(&8));
        assert_eq!(<LinkedList<i64> as Typed>::type_descriptor().name(), "LinkedList<i64>");
    }

    #[test]
    fn static_slices() {
        static PRIMES: [u32; 3] = [2, 3, 5];
        let slice: &'static [u32] = &PRIMES;

        assert_eq!(List::len(&slice), 3);
        assert_eq!(List::get(&slice, 2).and_then(|value| value.downcast_ref::<u32>()), Some(&5));
        assert_eq!(<&'static [u32] as Typed>::type_descriptor().name(), "&[u32]");

        let cloned = slice.clone_value().unwrap().take::<&'static [u32]>().unwrap();
        assert!(std::ptr::eq(cloned, slice));
    }

    #[test]
    fn tuples() {
        let pair = (1i32, String::from("one"));
        let descriptor = <(i32, String) as Typed>::type_descriptor();
        assert_eq!(descriptor.name(), "(i32, String)");
        assert_eq!(descriptor.kind(), crate::TypeKind::Tuple);

        assert_eq!(List::len(&pair), 2);
        assert_eq!(List::get(&pair, 1).and_then(|value| value.downcast_ref::<String>()), Some(&pair.1));
        assert!(List::get(&pair, 2).is_none());
        assert_eq!(List::iter(&pair).len(), 2);

        let cloned = pair.clone_value().unwrap().take::<(i32, String)>().unwrap();
        assert_eq!(cloned, pair);
    }

    #[test]
    fn weak_pointers() {
        let owner = Arc::new(3u8);
        let weak = Arc::downgrade(&owner);
        assert_eq!(WeakPointer::upgrade(&weak).and_then(|value| value.downcast_ref::<u8>().copied()), Some(3));

        let cloned = weak.clone_value().unwrap().take::<Weak<u8>>().unwrap();
        drop(owner);
        assert!(WeakPointer::upgrade(&cloned).is_none());
    }
}

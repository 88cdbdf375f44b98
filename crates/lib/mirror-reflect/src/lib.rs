//! Runtime reflection over declared members.
//!
//! A type becomes reflectable by declaring its fields and functions, either with
//! `#[derive(Reflect)]` or with the batch [`reflect!`] macro. Its [`TypeDescriptor`]
//! then lists the members with their attributes, resolves inherited members
//! through the declared bases, and drives the dynamic operations of [`runtime`].

extern crate log as glog;
extern crate self as mirror_reflect;

mod args;
mod container;
mod descriptor;
mod descriptor_cell;
mod error;
mod impls;
mod reflect;
mod type_registry;

pub mod attr;
pub mod property;
pub mod runtime;
pub mod type_list;

pub use args::*;
pub use container::*;
pub use descriptor::*;
pub use descriptor_cell::*;
pub use error::*;
pub use reflect::*;
pub use type_registry::*;

pub use mirror_reflect_derive::{impl_reflect_primitive, reflect, Reflect};

#[cfg(test)]
mod tests {
    use crate::{self as mirror_reflect, attr::Property, property, type_list};
    use mirror_reflect::*;

    #[test]
    fn test_reflect_struct() {
        #[derive(Reflect)]
        struct Test {
            a: u32,
            #[reflect(property = "Letter")]
            b: char,
        }

        dbg!(Test::type_descriptor());

        let test = Test { a: 123, b: 'a' };
        let descriptor = test.get_type_descriptor();

        assert_eq!(descriptor.name(), "Test");
        assert_eq!(descriptor.declared_members().len(), 2);

        let field_a = descriptor.member("a").and_then(MemberDescriptor::as_field).unwrap();
        let field_b = descriptor.member("b").unwrap();

        assert_eq!(field_a.get_as::<u32>(&test).unwrap(), &123);
        assert!(field_a.is_writable());
        assert!(property::is_property(field_b));
        assert_eq!(property::get_display_name(field_b), "Letter");
        assert_eq!(property::get_debug_name(field_b), "Test::b");
    }

    #[test]
    fn test_reflect_batch() {
        struct Counter {
            count: i32,
        }

        impl Counter {
            fn get(&self) -> i32 {
                self.count
            }

            fn add(&mut self, by: i32) {
                self.count += by;
            }

            fn add_twice(&mut self, by: i32, times: i32) {
                self.count += by * times;
            }
        }

        reflect! {
            type(Counter),
            field(count, readonly),
            func(fn get(&self) -> i32),
            func(fn add(&mut self, by: i32)),
            func(fn add(&mut self, by: i32, times: i32) = Counter::add_twice),
        }

        dbg!(Counter::type_descriptor());

        let mut counter = Counter { count: 1 };
        let add = Counter::type_descriptor().member("add").and_then(MemberDescriptor::as_function).unwrap();

        assert!(!add.is_resolved());
        assert!(add.pointer().is_none());
        assert!(add.resolve::<type_list![i32], ()>(ReceiverKind::Mut).is_some());

        add.invoke(Receiver::Mut(&mut counter), ArgList::new().with(2i32).with(3i32)).unwrap();
        assert_eq!(counter.count, 7);

        let count = Counter::type_descriptor().member("count").and_then(MemberDescriptor::as_field).unwrap();
        assert!(!count.is_writable());
        assert!(count.set_value(&mut counter, 0i32).is_err());
        assert!(count.attributes().get::<Property>().is_none());
    }
}

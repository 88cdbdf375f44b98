use std::any::TypeId;

use mirror_reflect::{inherits, reflect, runtime, type_list::TypedList, type_list, upcast, Typed};

pub struct Base {
    foo: i32,
    bar: i32,
    baz: i32,
}

pub struct Derived {
    base: Base,
    foo: i32,
    bar: i32,
}

inherits!(Derived => base: Base);

pub struct Animal {
    name: String,
}

impl Animal {
    fn speak(&self) -> String {
        format!("{} makes a sound", self.name)
    }

    fn rename(&mut self, name: String) {
        self.name = name;
    }
}

pub struct Dog {
    animal: Animal,
    tricks: u32,
}

inherits!(Dog => animal: Animal);

pub struct Root {
    id: u32,
}

pub struct Left {
    root: Root,
}

pub struct Right {
    root: Root,
}

pub struct Bottom {
    left: Left,
    right: Right,
}

inherits!(Left => root: Root);
inherits!(Right => root: Root);
inherits!(Bottom => left: Left);
inherits!(Bottom => right: Right);

reflect! {
    type(Base),
    field(foo),
    field(bar),
    field(baz),

    type(Derived, bases<Base>),
    field(foo),
    field(bar),

    type(Animal),
    field(name),
    func(fn speak(&self) -> String),
    func(fn rename(&mut self, name: String)),

    type(Dog, bases<Animal>),
    field(tricks),

    type(Root),
    field(id),
    type(Left, bases<Root>),
    type(Right, bases<Root>),
    type(Bottom, bases<Left, Right>),
}

fn derived() -> Derived {
    Derived {
        base: Base { foo: 1, bar: 2, baz: 3 },
        foo: 10,
        bar: 20,
    }
}

#[test]
fn shadowed_members_are_flattened() {
    let members = Derived::type_descriptor().member_types();

    assert_eq!(Derived::type_descriptor().declared_members().len(), 2);
    assert_eq!(members.len(), 3);
    assert_eq!(members.map(|member| member.name()), vec!["foo", "bar", "baz"]);

    let declaring = members.map(|member| member.declaring_type_id());
    assert_eq!(declaring, vec![TypeId::of::<Derived>(), TypeId::of::<Derived>(), TypeId::of::<Base>()]);
}

#[test]
fn shadowed_members_resolve_to_derived_values() {
    let mut value = derived();

    assert_eq!(runtime::invoke::<i32>(&mut value, "foo", ()).unwrap(), 10);
    assert_eq!(runtime::invoke::<i32>(&mut value, "bar", ()).unwrap(), 20);
    assert_eq!(runtime::invoke::<i32>(&mut value, "baz", ()).unwrap(), 3);

    assert_eq!(runtime::invoke::<i32>(&mut value, "baz", (30,)).unwrap(), 30);
    assert_eq!(value.base.baz, 30);
    assert_eq!(value.base.foo, 1);
}

#[test]
fn base_functions_run_on_the_base_sub_object() {
    let mut dog = Dog {
        animal: Animal { name: "Rex".to_string() },
        tricks: 2,
    };

    assert_eq!(runtime::invoke_ref::<String>(&dog, "speak", ()).unwrap(), "Rex makes a sound");
    runtime::invoke::<()>(&mut dog, "rename", ("Max".to_string(),)).unwrap();
    assert_eq!(dog.animal.name, "Max");
    assert_eq!(runtime::invoke_ref::<u32>(&dog, "tricks", ()).unwrap(), 2);

    // a setter needs a mutable receiver
    assert!(runtime::invoke_ref::<()>(&dog, "rename", ("Bob".to_string(),)).is_err());
}

#[test]
fn diamond_ancestry_is_deduplicated() {
    let descriptor = Bottom::type_descriptor();

    let names = descriptor.base_types().iter().map(|base| base.name()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Left", "Right", "Root"]);

    let declared = descriptor.declared_base_types().iter().map(|base| base.name().to_string()).collect::<Vec<_>>();
    assert_eq!(declared, vec!["Left", "Right"]);

    assert!(descriptor.derives_from(TypeId::of::<Root>()));
    assert!(!descriptor.derives_from(TypeId::of::<Bottom>()));
    assert!(descriptor.is_or_derives_from(TypeId::of::<Bottom>()));
    assert!(!Root::type_descriptor().derives_from(TypeId::of::<Left>()));

    assert_eq!(descriptor.member_types().map(|member| member.name()), vec!["id"]);
}

#[test]
fn upcast_follows_the_first_path() {
    let bottom = Bottom {
        left: Left { root: Root { id: 1 } },
        right: Right { root: Root { id: 2 } },
    };

    let root = upcast(&bottom, TypeId::of::<Root>()).unwrap();
    assert_eq!(root.downcast_ref::<Root>().map(|root| root.id), Some(1));

    let right = upcast(&bottom, TypeId::of::<Right>()).unwrap();
    assert_eq!(right.downcast_ref::<Right>().map(|right| right.root.id), Some(2));

    assert!(upcast(&bottom.left, TypeId::of::<Right>()).is_none());
    assert_eq!(runtime::invoke_ref::<u32>(&bottom, "id", ()).unwrap(), 1);
}

#[test]
fn typed_lists_see_base_types() {
    type L = type_list![Root, Derived, Bottom, Derived];

    assert_eq!(<L as TypedList>::index_of_base::<Base>(), Some(1));
    assert_eq!(<L as TypedList>::index_of_base::<Left>(), Some(2));
    assert!(!<L as TypedList>::contains_base::<Animal>());

    let unique = <L as TypedList>::unique().iter().map(|descriptor| descriptor.name()).collect::<Vec<_>>();
    assert_eq!(unique, vec!["Root", "Derived", "Bottom"]);
}

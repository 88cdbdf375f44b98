use mirror_reflect::{reflect, runtime, Reflect, TypeRegistry, Typed};

pub struct Wrapper<T> {
    value: T,
}

impl<T: Clone> Wrapper<T> {
    fn get(&self) -> T {
        self.value.clone()
    }

    fn set(&mut self, value: T) {
        self.value = value;
    }
}

reflect! {
    template(<T: Reflect + Clone>, Wrapper<T>),
    field(value),
    func(fn get(&self) -> T),
    func(fn set(&mut self, value: T)),
}

#[derive(Reflect)]
pub struct Pair<T> {
    first: T,
    second: T,
}

#[test]
fn declared_templates() {
    let mut wrapper = Wrapper { value: 5i32 };
    assert_eq!(runtime::debug_str(&wrapper, true), "Wrapper<i32> { value = 5 }");

    assert_eq!(runtime::invoke_ref::<i32>(&wrapper, "get", ()).unwrap(), 5);
    runtime::invoke::<()>(&mut wrapper, "set", (8i32,)).unwrap();
    assert_eq!(wrapper.value, 8);

    // the argument type follows the instantiation
    assert!(runtime::invoke::<()>(&mut wrapper, "set", (8u8,)).is_err());

    let text = Wrapper { value: String::from("text") };
    assert_eq!(runtime::invoke_ref::<String>(&text, "get", ()).unwrap(), "text");
}

#[test]
fn derived_generic_structs() {
    let pair = Pair { first: 1u8, second: 2u8 };
    assert_eq!(runtime::debug_str(&pair, true), "Pair<u8> { first = 1, second = 2 }");

    let nested = Pair { first: Pair { first: 'a', second: 'b' }, second: Pair { first: 'c', second: 'd' } };
    assert_eq!(
        runtime::debug_str(&nested, true),
        "Pair<Pair<char>> { first = Pair<char> { first = a, second = b }, second = Pair<char> { first = c, second = d } }"
    );
}

#[test]
fn one_descriptor_per_instantiation() {
    let ints = <Wrapper<i32> as Typed>::type_descriptor();
    let strings = <Wrapper<String> as Typed>::type_descriptor();

    assert!(!std::ptr::eq(ints, strings));
    assert!(std::ptr::eq(ints, Wrapper { value: 0i32 }.get_type_descriptor()));
    assert_eq!(ints.get_simple_name(), "Wrapper");
    assert_eq!(ints.declared_members().len(), 3);

    let mut registry = TypeRegistry::empty();
    registry.register::<Wrapper<i32>>();
    registry.register::<Wrapper<String>>();
    registry.register::<Pair<u8>>();

    assert_eq!(registry.len(), 3);
    assert!(registry.get_with_short_name("Wrapper<String>").unwrap().is::<Wrapper<String>>());
    assert!(registry.get_with_short_name("Pair<u8>").unwrap().is::<Pair<u8>>());
}

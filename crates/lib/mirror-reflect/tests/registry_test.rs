use std::any::TypeId;

use mirror_reflect::{Reflect, TypeRegistry};

mod shapes {
    use mirror_reflect::Reflect;

    #[derive(Reflect)]
    pub struct Shape {
        pub sides: u32,
    }

    #[derive(Reflect)]
    #[reflect(bases<Shape>)]
    pub struct Square {
        pub shape: Shape,
        pub side: f32,
    }

    mirror_reflect::inherits!(Square => shape: Shape);

    #[derive(Reflect)]
    pub struct Item;
}

mod inventory {
    use mirror_reflect::Reflect;

    #[derive(Reflect)]
    pub struct Item {
        pub count: u32,
    }
}

#[derive(Reflect)]
pub struct Unused(u8);

#[test]
fn bases_are_registered_along() {
    let mut registry = TypeRegistry::empty();
    registry.register::<shapes::Square>();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(TypeId::of::<shapes::Shape>()));
    assert!(!registry.contains(TypeId::of::<Unused>()));

    let square = registry.get_with_short_name("Square").unwrap();
    assert!(square.is::<shapes::Square>());
    assert_eq!(square.base_types().len(), 1);

    // registering twice changes nothing
    registry.register::<shapes::Shape>();
    assert_eq!(registry.len(), 2);
}

#[test]
fn short_and_full_names() {
    let mut registry = TypeRegistry::new();
    let primitives = registry.len();

    registry.register::<shapes::Item>();
    assert!(registry.get_with_short_name("Item").is_some());
    assert!(!registry.is_ambiguous("Item"));

    registry.register::<inventory::Item>();
    assert_eq!(registry.len(), primitives + 2);
    assert!(registry.is_ambiguous("Item"));
    assert!(registry.get_with_short_name("Item").is_none());

    let full = std::any::type_name::<inventory::Item>();
    assert!(registry.get_with_name(full).is_some_and(|descriptor| descriptor.is::<inventory::Item>()));
    assert_eq!(
        registry.get(TypeId::of::<shapes::Item>()).map(|descriptor| descriptor.type_name()),
        Some(std::any::type_name::<shapes::Item>())
    );
}

#[test]
fn descriptors_are_found_from_values() {
    let mut registry = TypeRegistry::empty();
    registry.register::<inventory::Item>();

    let value: Box<dyn Reflect> = Box::new(inventory::Item { count: 3 });
    let descriptor = registry.get(value.reflect_type_id()).unwrap();
    assert_eq!(descriptor.name(), "Item");
    assert_eq!(descriptor.declared_members().len(), 1);

    assert_eq!(registry.iter().count(), 1);
}

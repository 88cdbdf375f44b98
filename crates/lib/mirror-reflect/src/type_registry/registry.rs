use std::{collections::{HashMap, HashSet}, any::TypeId};

use crate::{TypeDescriptor, Typed};

/// Registry of reflected types, for lookups by [`TypeId`] or by name.
///
/// The registry is a plain value owned by its user, there is no global instance.
pub struct TypeRegistry {
    descriptors: HashMap<TypeId, &'static TypeDescriptor>,
    short_name_to_id: HashMap<String, TypeId>,
    full_name_to_id: HashMap<String, TypeId>,
    /// Type names on different crates might be the same,
    /// if we found collided short names, we use full name to remove ambiguity.
    ambiguous_names: HashSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a new empty type registry.
    pub fn empty() -> Self {
        Self {
            descriptors: Default::default(),
            short_name_to_id: Default::default(),
            full_name_to_id: Default::default(),
            ambiguous_names: Default::default(),
        }
    }

    /// Create a type registry with the primitive types registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<char>();
        registry.register::<bool>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    /// Registers `T` along with all of its base types.
    pub fn register<T: Typed>(&mut self) {
        self.register_descriptor(T::type_descriptor());
    }

    pub fn register_descriptor(&mut self, descriptor: &'static TypeDescriptor) {
        if !self.add_descriptor(descriptor) {
            return;
        }

        for base in descriptor.base_types() {
            self.add_descriptor(*base);
        }
    }

    /// Returns false if the type was already registered.
    fn add_descriptor(&mut self, descriptor: &'static TypeDescriptor) -> bool {
        if self.descriptors.contains_key(&descriptor.type_id()) {
            return false;
        }

        let short_name = descriptor.name().to_string();
        if self.short_name_to_id.contains_key(&short_name)
            || self.ambiguous_names.contains(&short_name)
        {
            // name is ambiguous. fall back to long names for all ambiguous types
            glog::debug!("short type name `{}` is ambiguous, use full type names instead", short_name);
            self.short_name_to_id.remove(&short_name);
            self.ambiguous_names.insert(short_name);
        } else {
            self.short_name_to_id.insert(short_name, descriptor.type_id());
        }

        self.full_name_to_id.insert(descriptor.type_name().to_string(), descriptor.type_id());
        self.descriptors.insert(descriptor.type_id(), descriptor);
        true
    }

    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        self.descriptors.get(&type_id).copied()
    }

    /// Return Some() type's descriptor by its full type name,
    /// None() if this type doesn't exist.
    pub fn get_with_name(&self, type_name: &str) -> Option<&'static TypeDescriptor> {
        self.full_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Return Some() type's descriptor by its short type name,
    /// None() if this type doesn't exist.
    /// Notice that ambiguous short type name will also return None.
    pub fn get_with_short_name(&self, short_name: &str) -> Option<&'static TypeDescriptor> {
        self.short_name_to_id
            .get(short_name)
            .and_then(|id| self.get(*id))
    }

    /// Whether several registered types share the short name `short_name`.
    pub fn is_ambiguous(&self, short_name: &str) -> bool {
        self.ambiguous_names.contains(short_name)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains_key(&type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.descriptors.values().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_registered() {
        let registry = TypeRegistry::new();

        assert!(registry.contains(TypeId::of::<f32>()));
        assert!(registry.get_with_short_name("u64").is_some_and(|descriptor| descriptor.is::<u64>()));
        assert!(registry.get_with_name(std::any::type_name::<String>()).is_some());
        assert!(registry.get_with_short_name("Vec<u8>").is_none());
    }

    #[test]
    fn ambiguous_short_names() {
        mod first {
            #[derive(Clone)]
            pub struct Handle;
            crate::impl_reflect_primitive!(Handle(Clone));
        }

        mod second {
            pub struct Handle;
            crate::impl_reflect_primitive!(Handle());
        }

        let mut registry = TypeRegistry::empty();
        registry.register::<first::Handle>();
        registry.register::<first::Handle>();
        assert_eq!(registry.len(), 1);
        assert!(registry.get_with_short_name("Handle").is_some());

        registry.register::<second::Handle>();
        assert_eq!(registry.len(), 2);
        assert!(registry.is_ambiguous("Handle"));
        assert!(registry.get_with_short_name("Handle").is_none());
        assert!(registry
            .get_with_name(std::any::type_name::<second::Handle>())
            .is_some_and(|descriptor| descriptor.is::<second::Handle>()));
    }
}

use mirror_reflect::{property, reflect, AccessorRole, MemberDescriptor, ReflectError, Typed};

pub struct Thermometer {
    celsius: f32,
    label: String,
    serial: u32,
}

impl Thermometer {
    fn get_celsius(&self) -> f32 {
        self.celsius
    }

    fn set_celsius(&mut self, celsius: f32) {
        self.celsius = celsius;
    }

    fn get_kelvin(&self) -> f32 {
        self.celsius + 273.15
    }

    fn reset(&mut self) {
        self.celsius = 0.0;
    }
}

// the setter is declared before the getter
pub struct UnorderedProperties {
    value: i32,
}

impl UnorderedProperties {
    fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    fn get_value(&self) -> i32 {
        self.value
    }
}

pub struct Renamed {
    x: i32,
}

impl Renamed {
    fn get_x(&self) -> i32 {
        self.x
    }

    fn set_x(&mut self, x: i32) {
        self.x = x;
    }
}

pub struct Ambiguous {
    amount: i32,
}

#[allow(non_snake_case)]
impl Ambiguous {
    fn get_amount(&self) -> i32 {
        self.amount
    }

    fn getAmount(&self) -> i32 {
        self.amount
    }

    fn set_amount(&mut self, amount: i32) {
        self.amount = amount;
    }
}

reflect! {
    type(Thermometer),
    field(label, property("Label")),
    field(serial, readonly, property()),
    func(fn get_celsius(&self) -> f32, property()),
    func(fn set_celsius(&mut self, celsius: f32), property()),
    func(fn get_kelvin(&self) -> f32, property()),
    func(fn reset(&mut self)),

    type(UnorderedProperties),
    func(fn set_value(&mut self, value: i32), property()),
    func(fn get_value(&self) -> i32, property()),

    type(Renamed),
    func(fn get_x(&self) -> i32, property("x")),
    func(fn set_x(&mut self, x: i32), property("x")),

    type(Ambiguous),
    func(fn get_amount(&self) -> i32, property()),
    func(fn getAmount(&self) -> i32, property()),
    func(fn set_amount(&mut self, amount: i32), property()),
}

fn member<T: Typed>(name: &str) -> &'static MemberDescriptor {
    T::type_descriptor().member(name).unwrap()
}

#[test]
fn readable_and_writable_members() {
    let getter = member::<Thermometer>("get_celsius");
    let setter = member::<Thermometer>("set_celsius");
    let reset = member::<Thermometer>("reset");
    let serial = member::<Thermometer>("serial");

    assert!(property::is_readable(getter));
    assert!(!property::is_writable(getter));
    assert!(property::is_writable(setter));
    assert!(!property::is_readable(setter));

    // plain functions are never accessors
    assert!(!property::is_property(reset));
    assert!(!property::is_readable(reset));
    assert!(!property::is_writable(reset));

    assert!(property::is_readable(serial));
    assert!(!property::is_writable(serial));
}

#[test]
fn display_names() {
    assert_eq!(property::get_display_name(member::<Thermometer>("get_celsius")), "celsius");
    assert_eq!(property::get_display_name(member::<Thermometer>("set_celsius")), "celsius");
    assert_eq!(property::get_display_name(member::<Thermometer>("label")), "Label");
    assert_eq!(property::get_display_name(member::<Thermometer>("reset")), "reset");
    assert_eq!(property::get_display_name(member::<Renamed>("set_x")), "x");

    assert_eq!(property::get_debug_name(member::<Thermometer>("get_kelvin")), "Thermometer::get_kelvin");
    assert_eq!(property::get_property(member::<Renamed>("get_x")).and_then(|property| property.friendly_name), Some("x"));
}

#[test]
fn accessors_pair_by_display_name() {
    let getter = member::<Thermometer>("get_celsius");
    let setter = member::<Thermometer>("set_celsius");

    assert_eq!(property::get_writer(getter).unwrap(), setter);
    assert_eq!(property::get_reader(setter).unwrap(), getter);
    assert_eq!(property::get_reader(getter).unwrap(), getter);
    assert_eq!(property::get_writer(setter).unwrap(), setter);

    assert!(property::has_writer(getter));
    assert!(property::has_reader(setter));
}

#[test]
fn pairing_ignores_declaration_order() {
    let getter = member::<UnorderedProperties>("get_value");
    let setter = member::<UnorderedProperties>("set_value");

    assert_eq!(property::get_writer(getter).unwrap(), setter);
    assert_eq!(property::get_reader(setter).unwrap(), getter);

    let getter = member::<Renamed>("get_x");
    let setter = member::<Renamed>("set_x");
    assert_eq!(property::get_writer(getter).unwrap(), setter);
    assert_eq!(property::get_reader(setter).unwrap(), getter);
}

#[test]
fn pairing_failures() {
    let kelvin = member::<Thermometer>("get_kelvin");
    assert!(!property::has_writer(kelvin));
    assert!(matches!(
        property::get_writer(kelvin),
        Err(ReflectError::NoAccessor { role: AccessorRole::Writer, ref display_name }) if display_name == "kelvin"
    ));

    let serial = member::<Thermometer>("serial");
    assert!(matches!(property::get_writer(serial), Err(ReflectError::NoAccessor { .. })));

    let reset = member::<Thermometer>("reset");
    assert!(matches!(property::get_reader(reset), Err(ReflectError::NotAProperty(_))));

    let setter = member::<Ambiguous>("set_amount");
    let error = property::get_reader(setter).unwrap_err();
    assert!(matches!(error, ReflectError::AmbiguousAccessor { count: 2, .. }));
    assert_eq!(error.to_string(), "property `amount` has 2 candidate readers");
}

#[test]
fn properties_drive_the_debug_printer() {
    let thermometer = Thermometer {
        celsius: 21.5,
        label: "kitchen".to_string(),
        serial: 7,
    };

    // setters and plain functions are not printed
    let printed = mirror_reflect::runtime::debug_str(&thermometer, true);
    assert!(printed.starts_with("Thermometer { Label = \"kitchen\", serial = 7, celsius = 21.5, kelvin = "));
    assert!(!printed.contains("reset"));
}

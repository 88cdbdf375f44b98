use mirror_reflect::{reflect, runtime, Reflect, type_list, ArgList, MemberDescriptor, Receiver, ReceiverKind, ReflectError, Typed};

pub struct Target {
    value: i32,
    name: String,
}

impl Target {
    const LIMIT: u32 = 64;

    fn get_value(&self) -> i32 {
        self.value
    }

    fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    fn add(&mut self, by: i32) -> i32 {
        self.value += by;
        self.value
    }

    fn add_scaled(&mut self, by: i32, scale: i32) -> i32 {
        self.value += by * scale;
        self.value
    }

    fn label(&self) -> &String {
        &self.name
    }

    fn rename(&mut self, name: &String) {
        self.name.clone_from(name);
    }

    fn append(&mut self, suffix: &mut String) {
        self.name.push_str(suffix);
        suffix.clear();
    }

    fn create(value: i32) -> Target {
        Target {
            value,
            name: String::new(),
        }
    }
}

reflect! {
    type(Target),
    field(value),
    field(name),
    field(static LIMIT: u32),
    func(fn get_value(&self) -> i32, property()),
    func(fn set_value(&mut self, value: i32), property()),
    func(fn add(&mut self, by: i32) -> i32),
    func(fn add(&mut self, by: i32, scale: i32) -> i32 = Target::add_scaled),
    func(fn label(&self) -> &String),
    func(fn rename(&mut self, name: &String)),
    func(fn append(&mut self, suffix: &mut String)),
    func(fn create(value: i32) -> Target),
}

fn target() -> Target {
    Target {
        value: 1,
        name: String::from("first"),
    }
}

fn function(name: &str) -> &'static mirror_reflect::FunctionDescriptor {
    Target::type_descriptor()
        .member(name)
        .and_then(MemberDescriptor::as_function)
        .unwrap()
}

#[test]
fn fields_are_read_and_assigned() {
    let mut target = target();

    let value: i32 = runtime::invoke(&mut target, "value", (10i32,)).unwrap();
    assert_eq!(value, 10);
    assert_eq!(target.value, 10);

    let read: i32 = runtime::invoke_ref(&target, "value", ()).unwrap();
    assert_eq!(read, 10);

    let name: String = runtime::invoke_ref(&target, "name", ()).unwrap();
    assert_eq!(name, "first");
}

#[test]
fn functions_take_arguments() {
    let mut target = target();

    let value: i32 = runtime::invoke(&mut target, "add", (4i32,)).unwrap();
    assert_eq!(value, 5);

    let value: i32 = runtime::invoke(&mut target, "add", (1i32, 10i32)).unwrap();
    assert_eq!(value, 15);

    let () = runtime::invoke(&mut target, "set_value", (3i32,)).unwrap();
    let value: i32 = runtime::invoke_ref(&target, "get_value", ()).unwrap();
    assert_eq!(value, 3);
}

#[test]
fn mismatches_are_reported() {
    let mut target = target();

    let error = runtime::invoke::<i32>(&mut target, "value", (1u8,)).unwrap_err();
    assert!(matches!(error, ReflectError::NoMatchingMember { .. }));
    assert_eq!(
        error.to_string(),
        "The member Target::value is not compatible with the provided parameters or return type, is not reflected or does not exist!"
    );

    assert!(runtime::invoke::<i32>(&mut target, "missing", ()).is_err());
    assert!(runtime::invoke::<u64>(&mut target, "get_value", ()).is_err());
}

#[test]
fn shared_receivers_cannot_mutate() {
    let target = target();

    assert!(runtime::invoke_ref::<()>(&target, "set_value", (2i32,)).is_err());
    assert!(runtime::invoke_ref::<i32>(&target, "value", (2i32,)).is_err());
    assert_eq!(target.value, 1);
}

#[test]
fn static_members() {
    let mut target = target();

    let created = function("create")
        .invoke_r::<Target>(Receiver::Static, ArgList::new().with(42i32))
        .unwrap();
    assert_eq!(created.value, 42);

    let created: Target = runtime::invoke(&mut target, "create", (7i32,)).unwrap();
    assert_eq!(created.value, 7);

    let limit = Target::type_descriptor().member("LIMIT").and_then(MemberDescriptor::as_field).unwrap();
    assert!(limit.is_static());
    assert!(!limit.is_writable());
    assert_eq!(limit.get_static().and_then(|value| value.downcast_ref::<u32>()), Some(&64));

    let read: u32 = runtime::invoke_ref(&target, "LIMIT", ()).unwrap();
    assert_eq!(read, 64);
    assert!(matches!(limit.set_value(&mut target, 1u32), Err(ReflectError::NotWritable(_))));
}

#[test]
fn overloads_are_resolved_by_signature() {
    let add = function("add");
    assert!(!add.is_resolved());
    assert!(add.pointer().is_none());

    let single = add.resolve::<type_list![i32], i32>(ReceiverKind::Mut).unwrap();
    let scaled = add.resolve::<type_list![i32, i32], i32>(ReceiverKind::Mut).unwrap();
    assert_eq!(single.arity(), 1);
    assert_eq!(scaled.arity(), 2);
    assert!(add.resolve::<type_list![i32], ()>(ReceiverKind::Mut).is_none());

    let mut target = target();
    let value = scaled
        .invoke(Receiver::Mut(&mut target), ArgList::new().with(2i32).with(3i32))
        .unwrap()
        .take::<i32>()
        .unwrap();
    assert_eq!(value, 7);
}

#[test]
fn references_are_passed_and_returned() {
    let mut target = target();

    let () = runtime::invoke(&mut target, "rename", (String::from("second"),)).unwrap();
    assert_eq!(target.name, "second");

    let label: String = runtime::invoke_ref(&target, "label", ()).unwrap();
    assert_eq!(label, "second");

    let () = runtime::invoke(&mut target, "append", (String::from("!"),)).unwrap();
    assert_eq!(target.name, "second!");

    assert_eq!(function("label").pointer().unwrap().return_info().type_name(), "alloc::string::String");
}

#[test]
fn argument_count_is_checked() {
    let get_value = function("get_value").pointer().unwrap();
    let mut target = target();

    let error = get_value
        .invoke(Receiver::Mut(&mut target), ArgList::new().with(1i32))
        .unwrap_err();
    assert!(matches!(error, ReflectError::ArgumentCount { expected: 0, found: 1, .. }));
}

#[derive(Reflect)]
pub struct Settings {
    volume: u8,
}

#[derive(Reflect)]
pub struct Profile {
    settings: Settings,
}

#[test]
fn failed_assignments_leave_the_target_untouched() {
    let mut profile = Profile {
        settings: Settings { volume: 3 },
    };

    let error = runtime::invoke::<Settings>(&mut profile, "settings", (Settings { volume: 42 },)).err().unwrap();
    assert!(matches!(error, ReflectError::NotCloneable(_)));
    assert_eq!(profile.settings.volume, 3);
}

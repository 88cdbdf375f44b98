use mirror_reflect::{
    attr::{Bases, Debug, Property},
    impl_attribute, reflect, MemberDescriptor, Reflect, Typed,
};

pub struct Serializable;
impl_attribute!(Serializable: Member);

pub struct Range(pub f32, pub f32);
impl_attribute!(Range: Field, "range");

pub struct Category(pub &'static str);
impl_attribute!(Category: Type);

#[derive(Reflect)]
#[reflect(Category("lighting"))]
pub struct Light {
    #[reflect(Range(0.0, 1.0), Serializable)]
    intensity: f32,
    #[reflect(property("Color"), Serializable)]
    color: u32,
    plain: bool,
}

pub struct Camera {
    fov: f32,
}

impl Camera {
    fn get_fov(&self) -> f32 {
        self.fov
    }
}

reflect! {
    type(Camera, Category("view"), debug(|out: &mut dyn std::fmt::Write, _: &Camera| out.write_str("camera"))),
    field(fov, Range(30.0, 120.0), readonly),
    func(fn get_fov(&self) -> f32, property("FieldOfView"), Serializable),
}

fn member<T: Typed>(name: &str) -> &'static MemberDescriptor {
    T::type_descriptor().member(name).unwrap()
}

#[test]
fn user_attributes_on_derived_types() {
    let light = Light::type_descriptor();
    assert_eq!(light.attributes().get::<Category>().map(|category| category.0), Some("lighting"));
    assert!(!light.attributes().has::<Bases>());

    let intensity = member::<Light>("intensity");
    let range = intensity.get_attribute::<Range>().unwrap();
    assert_eq!((range.0, range.1), (0.0, 1.0));
    assert!(intensity.has_attribute::<Serializable>());
    assert_eq!(intensity.attributes().index_of_instance("range"), Some(0));

    let color = member::<Light>("color");
    assert_eq!(color.get_attribute::<Property>().and_then(|property| property.friendly_name), Some("Color"));
    assert!(color.attributes().contains_instance("Serializable"));

    assert!(member::<Light>("plain").attributes().is_empty());
}

#[test]
fn user_attributes_on_batch_types() {
    let camera = Camera::type_descriptor();
    assert_eq!(camera.attributes().get::<Category>().map(|category| category.0), Some("view"));
    assert_eq!(camera.attributes().get::<Debug>().map(Debug::value_type), Some(std::any::type_name::<Camera>()));
    assert_eq!(camera.attributes().len(), 2);

    let fov = member::<Camera>("fov");
    assert!(fov.has_attribute::<Range>());
    assert!(!fov.as_field().unwrap().is_writable());

    let get_fov = member::<Camera>("get_fov");
    assert!(get_fov.has_attribute::<Serializable>());
    assert!(get_fov.has_attribute::<Property>());
    assert!(!get_fov.has_attribute::<Range>());
}

#[test]
fn attributes_are_filtered_on_member_lists() {
    let serializable = Light::type_descriptor()
        .member_types()
        .filter(|member| member.has_attribute::<Serializable>())
        .map(MemberDescriptor::name);
    assert_eq!(serializable, ["intensity", "color"]);
}

pub struct Limit<T>(pub T);

impl<T: Send + Sync + 'static> mirror_reflect::attr::Attribute for Limit<T> {
    type Usage = mirror_reflect::attr::usage::Field;
    const KIND: &'static str = "limit";
}

mod audio {
    pub struct Tag;
    mirror_reflect::impl_attribute!(Tag: Any);
}

mod video {
    pub struct Tag;
    mirror_reflect::impl_attribute!(Tag: Any);
}

#[derive(Reflect)]
#[reflect(audio::Tag, video::Tag)]
pub struct Clip {
    #[reflect(Limit(0i32), Limit(1.5f64))]
    length: i32,
}

#[test]
fn attributes_are_unique_by_type() {
    let clip = Clip::type_descriptor();
    assert_eq!(clip.attributes().len(), 2);
    assert!(clip.attributes().has::<audio::Tag>());
    assert!(clip.attributes().has::<video::Tag>());
    assert_eq!(clip.attributes().index_of_instance("video::Tag"), Some(1));

    let length = member::<Clip>("length");
    assert_eq!(length.get_attribute::<Limit<i32>>().map(|limit| limit.0), Some(0));
    assert_eq!(length.get_attribute::<Limit<f64>>().map(|limit| limit.0), Some(1.5));
    assert_eq!(length.attributes().index_of_instance("limit"), Some(0));
}

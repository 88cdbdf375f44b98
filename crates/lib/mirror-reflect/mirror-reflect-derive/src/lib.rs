extern crate proc_macro;

mod field_attributes;
mod trait_attributes;

mod reflect_meta;
mod reflect_gen;

mod crate_manifest;
mod quoted;
mod primitive_parser;

use proc_macro::TokenStream;
use reflect_gen::{gen_primitive, gen_type};
use reflect_meta::{ReflectMeta, TypeModel, batch::BatchInput};
use syn::{parse_macro_input, DeriveInput};

pub(crate) static REFLECT_ATTR: &str = "reflect";

/// Reflects the fields of a struct.
///
/// Container attribute `#[reflect(..)]` takes type attributes (`bases<A, B>`,
/// `debug(printer)`, any attribute value) and `impl Display` / `impl Clone`.
/// Field attribute `#[reflect(..)]` takes `skip`, `readonly`, `property`,
/// `property = "Name"`, `debug = printer` and any attribute value.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);

    let model = match TypeModel::from_derive_input(&derive_input) {
        Ok(model) => model,
        Err(err) => return err.into_compile_error().into(),
    };

    let meta = ReflectMeta::default();
    gen_type(&meta, &model).into()
}

/// Reflects types declared anywhere, member by member.
///
/// ```ignore
/// reflect! {
///     type(Point, impl Display, impl Clone),
///     field(x, property("X")),
///     field(y: f32, readonly),
///     field(static ORIGIN),
///     func(fn length(&self) -> f32),
///     func(fn scale(&mut self, by: f32)),
///     func(fn scale(&mut self, x: f32, y: f32) = Point::scale_xy),
///
///     template(<T: Reflect + Clone>, Wrapper<T>, bases<Base>),
///     field(value: T),
/// }
/// ```
///
/// Every `type(..)` or `template(..)` entry starts a new type, the entries after
/// it are its members until the next one. Functions sharing a name are overloads
/// of one reflected function. A function defaults to calling `Self::name`, the
/// `= callee` suffix calls another path or closure with the same signature.
#[proc_macro]
pub fn reflect(input: TokenStream) -> TokenStream {
    let batch = parse_macro_input!(input as BatchInput);

    let models = match batch.into_models() {
        Ok(models) => models,
        Err(err) => return err.into_compile_error().into(),
    };

    let meta = ReflectMeta::default();
    let impls = models.iter().map(|model| gen_type(&meta, model));
    quote::quote!(#(#impls)*).into()
}

/// Macro to generate Reflect implementations for primitive types.
///
/// Since we cannot alter the foreign types (e.g. primitive types (u32, u16, etc.) and std types (String, Vec, etc.)),
/// we cannot use #[derive(Reflect)] to implement Reflect for them.
/// But we can use function-like procedural macro to generate implementations for us.
#[proc_macro]
pub fn impl_reflect_primitive(input: TokenStream) -> TokenStream {
    let parser = parse_macro_input!(input as primitive_parser::PrimitiveParser);

    let meta = ReflectMeta::default();
    gen_primitive(
        &meta,
        &parser.type_name,
        &parser.generics,
        &parser.traits.unwrap_or_default(),
    ).into()
}

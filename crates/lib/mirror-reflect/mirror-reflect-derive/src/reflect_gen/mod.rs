mod gen_attributes;
mod gen_members;
mod gen_primitive;
mod gen_type;
mod gen_typed;

pub(crate) use gen_attributes::*;
pub(crate) use gen_members::*;
pub(crate) use gen_primitive::*;
pub(crate) use gen_type::*;
pub(crate) use gen_typed::*;

use std::any::TypeId;
use std::fmt;

use crate::{attr::Attributes, args::ArgList, type_list::TypeList, Reflect, ReflectError, Typed};

use super::{Receiver, ReceiverKind, TypeDescriptor};

/// Type erased call of one candidate: checks and unpacks the receiver and the
/// arguments, calls the function and boxes what it returns.
pub type Invoker = for<'a> fn(Receiver<'a>, ArgList) -> Result<Box<dyn Reflect>, ReflectError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
}

impl ParamInfo {
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnInfo {
    type_id: TypeId,
    type_name: &'static str,
}

impl ReturnInfo {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The function returns nothing.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.type_id == TypeId::of::<()>()
    }
}

/// One signature of a reflected function.
#[derive(Clone)]
pub struct FunctionCandidate {
    receiver: ReceiverKind,
    params: Box<[ParamInfo]>,
    ret: ReturnInfo,
    invoker: Invoker,
}

impl FunctionCandidate {
    pub fn new(receiver: ReceiverKind, params: Vec<ParamInfo>, ret: ReturnInfo, invoker: Invoker) -> Self {
        Self {
            receiver,
            params: params.into_boxed_slice(),
            ret,
            invoker,
        }
    }

    #[inline]
    pub fn receiver_kind(&self) -> ReceiverKind {
        self.receiver
    }

    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    #[inline]
    pub fn return_info(&self) -> ReturnInfo {
        self.ret
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether a call with this receiver and these argument types is well formed.
    pub fn accepts(&self, receiver: ReceiverKind, args: &[TypeId]) -> bool {
        self.receiver.accepts(receiver)
            && self.params.len() == args.len()
            && self.params.iter().zip(args).all(|(param, arg)| param.type_id == *arg)
    }

    /// [`accepts`](Self::accepts), with the result required to be a `ret`.
    #[inline]
    pub fn accepts_r(&self, receiver: ReceiverKind, args: &[TypeId], ret: TypeId) -> bool {
        self.ret.type_id == ret && self.accepts(receiver, args)
    }

    /// Whether this is exactly the signature `receiver (params) -> ret`.
    pub fn matches_signature(&self, receiver: ReceiverKind, params: &[TypeId], ret: TypeId) -> bool {
        self.receiver == receiver
            && self.ret.type_id == ret
            && self.params.iter().map(ParamInfo::type_id).eq(params.iter().copied())
    }

    /// Calls the candidate, the receiver must already be of the declaring type.
    pub fn invoke(&self, receiver: Receiver<'_>, args: ArgList) -> Result<Box<dyn Reflect>, ReflectError> {
        if args.len() != self.params.len() {
            return Err(ReflectError::ArgumentCount {
                member: self.to_string(),
                expected: self.params.len(),
                found: args.len(),
            });
        }
        (self.invoker)(receiver, args)
    }
}

impl fmt::Display for FunctionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        let receiver = match self.receiver {
            ReceiverKind::Ref => Some("&self"),
            ReceiverKind::Mut => Some("&mut self"),
            ReceiverKind::Static => None,
        };
        let params = self.params.iter().map(ParamInfo::type_name);
        for (index, param) in receiver.into_iter().chain(params).enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param)?;
        }
        f.write_str(")")?;
        if !self.ret.is_unit() {
            write!(f, " -> {}", self.ret.type_name)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FunctionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A reflected member function, possibly overloaded.
///
/// Overloads share one name and differ by signature. A function with a single
/// candidate is resolved and exposes it through [`pointer`](Self::pointer), an
/// overload set has no pointer until one signature is picked with
/// [`resolve`](Self::resolve).
pub struct FunctionDescriptor {
    name: &'static str,
    declaring_type: fn() -> &'static TypeDescriptor,
    declaring_type_id: TypeId,
    declaring_type_name: &'static str,
    overloads: Box<[FunctionCandidate]>,
    attributes: Attributes,
}

impl FunctionDescriptor {
    pub fn new<T: Typed + Reflect>(
        name: &'static str,
        overloads: Vec<FunctionCandidate>,
        attributes: Attributes,
    ) -> Self {
        Self {
            name,
            declaring_type: T::type_descriptor,
            declaring_type_id: TypeId::of::<T>(),
            declaring_type_name: std::any::type_name::<T>(),
            overloads: overloads.into_boxed_slice(),
            attributes,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn declaring_type(&self) -> &'static TypeDescriptor {
        (self.declaring_type)()
    }

    #[inline]
    pub fn declaring_type_id(&self) -> TypeId {
        self.declaring_type_id
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[inline]
    pub fn overloads(&self) -> &[FunctionCandidate] {
        &self.overloads
    }

    /// Whether the name designates a single function.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.overloads.len() == 1
    }

    /// The only candidate, `None` when the function is overloaded.
    pub fn pointer(&self) -> Option<&FunctionCandidate> {
        match &*self.overloads {
            [single] => Some(single),
            _ => None,
        }
    }

    /// Picks the overload with exactly the parameters `P` and the result `R`.
    ///
    /// ```
    /// use mirror_reflect::{reflect, type_list, ReceiverKind};
    ///
    /// pub struct Counter(i32);
    ///
    /// impl Counter {
    ///     fn add(&mut self, by: i32) { self.0 += by; }
    ///     fn add_twice(&mut self, by: i32, times: u8) { self.0 += by * times as i32; }
    /// }
    ///
    /// reflect! {
    ///     type(Counter),
    ///     func(fn add(&mut self, by: i32)),
    ///     func(fn add(&mut self, by: i32, times: u8) = Counter::add_twice),
    /// }
    ///
    /// let add = mirror_reflect::reflect::<Counter>().member("add").unwrap().as_function().unwrap();
    /// assert!(!add.is_resolved());
    /// assert!(add.resolve::<type_list![i32, u8], ()>(ReceiverKind::Mut).is_some());
    /// assert!(add.resolve::<type_list![u8], ()>(ReceiverKind::Mut).is_none());
    /// ```
    pub fn resolve<P: TypeList, R: 'static>(&self, receiver: ReceiverKind) -> Option<&FunctionCandidate> {
        let params: Vec<TypeId> = (0..P::SIZE).filter_map(P::type_id_at).collect();
        self.resolve_with(receiver, &params, TypeId::of::<R>())
    }

    pub fn resolve_with(&self, receiver: ReceiverKind, params: &[TypeId], ret: TypeId) -> Option<&FunctionCandidate> {
        self.overloads
            .iter()
            .find(|candidate| candidate.matches_signature(receiver, params, ret))
    }

    /// The first overload callable with this receiver and these argument types.
    pub fn find_overload(&self, receiver: ReceiverKind, args: &[TypeId]) -> Option<&FunctionCandidate> {
        self.overloads.iter().find(|candidate| candidate.accepts(receiver, args))
    }

    pub fn is_invocable(&self, receiver: ReceiverKind, args: &[TypeId]) -> bool {
        self.find_overload(receiver, args).is_some()
    }

    /// Some overload accepts the arguments and returns a `ret`.
    pub fn is_invocable_r(&self, receiver: ReceiverKind, args: &[TypeId], ret: TypeId) -> bool {
        self.overloads
            .iter()
            .any(|candidate| candidate.accepts_r(receiver, args, ret))
    }

    /// Calls the first overload accepting the arguments.
    ///
    /// A receiver of a derived type is viewed as the declaring base first.
    pub fn invoke(&self, receiver: Receiver<'_>, args: ArgList) -> Result<Box<dyn Reflect>, ReflectError> {
        let candidate = self
            .find_overload(receiver.kind(), &args.type_ids())
            .ok_or_else(|| ReflectError::NoMatchingOverload(self.debug_name()))?;

        let receiver = match candidate.receiver_kind() {
            ReceiverKind::Static => Receiver::Static,
            _ => receiver.upcast(self.declaring_type_id, self.declaring_type_name)?,
        };
        candidate.invoke(receiver, args)
    }

    /// Typed flavor of [`invoke`](Self::invoke).
    pub fn invoke_r<R: Reflect>(&self, receiver: Receiver<'_>, args: ArgList) -> Result<R, ReflectError> {
        self.invoke(receiver, args)?.take_as::<R>()
    }

    fn debug_name(&self) -> String {
        format!("{}::{}", self.declaring_type().name(), self.name)
    }
}

impl fmt::Debug for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDescriptor")
            .field("name", &self.name)
            .field("overloads", &self.overloads)
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_invoker(_receiver: Receiver<'_>, _args: ArgList) -> Result<Box<dyn Reflect>, ReflectError> {
        Err(ReflectError::Unresolved("test".into()))
    }

    #[test]
    fn candidate_matching() {
        let candidate = FunctionCandidate::new(
            ReceiverKind::Ref,
            vec![ParamInfo::of::<i32>("lhs"), ParamInfo::of::<f32>("rhs")],
            ReturnInfo::of::<f64>(),
            unreachable_invoker,
        );

        let args = [TypeId::of::<i32>(), TypeId::of::<f32>()];
        assert!(candidate.accepts(ReceiverKind::Ref, &args));
        assert!(candidate.accepts(ReceiverKind::Mut, &args));
        assert!(!candidate.accepts(ReceiverKind::Static, &args));
        assert!(!candidate.accepts(ReceiverKind::Ref, &args[..1]));

        assert!(candidate.accepts_r(ReceiverKind::Ref, &args, TypeId::of::<f64>()));
        assert!(!candidate.accepts_r(ReceiverKind::Ref, &args, TypeId::of::<f32>()));

        assert!(candidate.matches_signature(ReceiverKind::Ref, &args, TypeId::of::<f64>()));
        assert!(!candidate.matches_signature(ReceiverKind::Mut, &args, TypeId::of::<f64>()));

        assert_eq!(candidate.to_string(), "fn(&self, i32, f32) -> f64");
    }

    #[test]
    fn static_candidate_ignores_receiver() {
        let candidate = FunctionCandidate::new(ReceiverKind::Static, Vec::new(), ReturnInfo::of::<()>(), unreachable_invoker);

        assert!(candidate.accepts(ReceiverKind::Static, &[]));
        assert!(candidate.accepts(ReceiverKind::Mut, &[]));
        assert!(candidate.return_info().is_unit());
        assert_eq!(candidate.to_string(), "fn()");
    }
}

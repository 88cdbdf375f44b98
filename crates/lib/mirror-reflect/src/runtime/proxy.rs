use std::fmt;
use std::marker::PhantomData;

use crate::{args::{ArgList, IntoArgs}, MemberDescriptor, MemberList, ReflectError, Typed};

/// Intercepts every member access made through a [`Proxy`].
///
/// ```
/// use mirror_reflect::{reflect, runtime::{Proxy, ProxyHandler}, ArgList, MemberDescriptor};
///
/// pub struct Point { pub x: f32, pub y: f32 }
///
/// reflect! { type(Point), field(x), field(y) }
///
/// /// Records the name of every member accessed.
/// #[derive(Default)]
/// struct Recorder(Vec<&'static str>);
///
/// impl ProxyHandler for Recorder {
///     type Target = Point;
///     type Output = ();
///
///     fn invoke_impl(&mut self, member: &'static MemberDescriptor, _args: ArgList) {
///         self.0.push(member.name());
///     }
/// }
///
/// let mut proxy = Proxy::new(Recorder::default());
/// proxy.call("y", ()).unwrap();
/// proxy.call("x", (1.0f32,)).unwrap();
/// assert!(proxy.call("z", ()).is_err());
/// assert_eq!(proxy.handler().0, ["y", "x"]);
/// ```
pub trait ProxyHandler: Sized + 'static {
    /// The type whose members the proxy exposes.
    type Target: Typed;
    type Output;

    /// Called with the member targeted by the access and the provided arguments.
    fn invoke_impl(&mut self, member: &'static MemberDescriptor, args: ArgList) -> Self::Output;
}

/// Exposes the members of `H::Target` and forwards every access to `H`.
///
/// The dispatch table is the shadow resolved member list of the target, so a
/// member redeclared by the target hides the one of its base.
#[repr(transparent)]
pub struct Proxy<H: ProxyHandler> {
    handler: H,
}

impl<H: ProxyHandler> Proxy<H> {
    const ZERO_OVERHEAD: () = assert!(
        std::mem::size_of::<Proxy<H>>() == std::mem::size_of::<H>(),
        "a proxy must not add storage to its handler"
    );

    pub fn new(handler: H) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::ZERO_OVERHEAD;
        Self { handler }
    }

    #[inline]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[inline]
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    #[inline]
    pub fn into_inner(self) -> H {
        self.handler
    }

    /// Every member reachable through the proxy.
    pub fn members() -> &'static MemberList {
        <H::Target as Typed>::type_descriptor().member_types()
    }

    pub fn functions() -> MemberList {
        Self::members().functions()
    }

    pub fn fields() -> MemberList {
        Self::members().fields()
    }

    /// Looks up a member once, so it can be accessed repeatedly without a name lookup.
    pub fn token(name: &str) -> Option<MemberToken<H::Target>> {
        let members = Self::members();
        members.index_of(name).and_then(|index| {
            members.get(index).map(|member| MemberToken {
                member,
                index,
                _target: PhantomData,
            })
        })
    }

    /// Forwards an access to the member called `name`.
    pub fn call(&mut self, name: &str, args: impl IntoArgs) -> Result<H::Output, ReflectError> {
        let token = Self::token(name).ok_or_else(|| ReflectError::NoMatchingMember {
            type_name: <H::Target as Typed>::type_descriptor().name().to_string(),
            member: name.to_string(),
        })?;
        Ok(self.call_token(token, args))
    }

    pub fn call_token(&mut self, token: MemberToken<H::Target>, args: impl IntoArgs) -> H::Output {
        self.handler.invoke_impl(token.member, args.into_args())
    }
}

impl<H: ProxyHandler + Default> Default for Proxy<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: ProxyHandler + fmt::Debug> fmt::Debug for Proxy<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("target", &<H::Target as Typed>::type_descriptor().name())
            .field("handler", &self.handler)
            .finish()
    }
}

/// A member of `T` resolved ahead of the access.
pub struct MemberToken<T> {
    member: &'static MemberDescriptor,
    index: usize,
    _target: PhantomData<fn() -> T>,
}

impl<T> MemberToken<T> {
    #[inline]
    pub fn member(&self) -> &'static MemberDescriptor {
        self.member
    }

    /// Position of the member in the dispatch table.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for MemberToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MemberToken<T> {}

impl<T> fmt::Debug for MemberToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberToken")
            .field("member", &self.member.name())
            .field("index", &self.index)
            .finish()
    }
}

use std::collections::HashSet;
use std::fmt;

use crate::ReflectError;

use super::MemberDescriptor;

/// An ordered sequence of member descriptors.
///
/// Every operation returns a new list and keeps the relative order of the
/// members it retains. Callbacks run from the first member to the last.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MemberList(Box<[&'static MemberDescriptor]>);

pub type MemberIter<'a> = std::iter::Copied<std::slice::Iter<'a, &'static MemberDescriptor>>;

impl MemberList {
    pub fn new(members: Vec<&'static MemberDescriptor>) -> Self {
        Self(members.into_boxed_slice())
    }

    /// The list of the members declared in `members`.
    pub fn from_declared(members: &'static [MemberDescriptor]) -> Self {
        members.iter().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> MemberIter<'_> {
        self.0.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[&'static MemberDescriptor] {
        &self.0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'static MemberDescriptor> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn first(&self) -> Option<&'static MemberDescriptor> {
        self.0.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<&'static MemberDescriptor> {
        self.0.last().copied()
    }

    /// Every member but the first `count`.
    pub fn skip(&self, count: usize) -> Self {
        self.iter().skip(count).collect()
    }

    /// The first `count` members, or all of them when there are fewer.
    pub fn take(&self, count: usize) -> Self {
        self.iter().take(count).collect()
    }

    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&'static MemberDescriptor) -> bool,
    {
        self.iter().filter(|member| predicate(*member)).collect()
    }

    pub fn map<R, F>(&self, func: F) -> Vec<R>
    where
        F: FnMut(&'static MemberDescriptor) -> R,
    {
        self.iter().map(func).collect()
    }

    pub fn concat(&self, other: &MemberList) -> Self {
        self.iter().chain(other.iter()).collect()
    }

    pub fn reverse(&self) -> Self {
        self.iter().rev().collect()
    }

    /// Drops the repeated occurrences of a member, keeping the first one.
    pub fn unique(&self) -> Self {
        let mut unique: Vec<&'static MemberDescriptor> = Vec::with_capacity(self.len());
        for member in self.iter() {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self::new(unique)
    }

    /// Keeps only the first member of each name.
    pub fn skip_shadowed(&self) -> Self {
        let mut seen = HashSet::new();
        self.filter(|member| seen.insert(member.name()))
    }

    /// Whether a member is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn contains_member(&self, member: &MemberDescriptor) -> bool {
        self.iter().any(|candidate| candidate == member)
    }

    pub fn find_first<P>(&self, mut predicate: P) -> Option<&'static MemberDescriptor>
    where
        P: FnMut(&'static MemberDescriptor) -> bool,
    {
        self.iter().find(|member| predicate(*member))
    }

    /// The single member satisfying `predicate`.
    pub fn find_one<P>(&self, predicate: P) -> Result<&'static MemberDescriptor, ReflectError>
    where
        P: FnMut(&'static MemberDescriptor) -> bool,
    {
        let found = self.filter(predicate);
        match found.as_slice() {
            [member] => Ok(*member),
            other => Err(ReflectError::NotExactlyOne(other.len())),
        }
    }

    pub fn count_if<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&'static MemberDescriptor) -> bool,
    {
        self.iter().filter(|member| predicate(*member)).count()
    }

    /// Position of the first member named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.iter().position(|member| member.name() == name)
    }

    /// Calls `func` with every member and its index.
    pub fn for_each<F>(&self, mut func: F)
    where
        F: FnMut(&'static MemberDescriptor, usize),
    {
        for (index, member) in self.iter().enumerate() {
            func(member, index);
        }
    }

    /// Threads `init` through `func` for every member.
    pub fn accumulate<Acc, F>(&self, init: Acc, func: F) -> Acc
    where
        F: FnMut(Acc, &'static MemberDescriptor) -> Acc,
    {
        self.iter().fold(init, func)
    }

    pub fn fields(&self) -> Self {
        self.filter(MemberDescriptor::is_field)
    }

    pub fn functions(&self) -> Self {
        self.filter(MemberDescriptor::is_function)
    }
}

impl FromIterator<&'static MemberDescriptor> for MemberList {
    fn from_iter<I: IntoIterator<Item = &'static MemberDescriptor>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MemberList {
    type Item = &'static MemberDescriptor;
    type IntoIter = MemberIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for MemberList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(MemberDescriptor::name))
            .finish()
    }
}

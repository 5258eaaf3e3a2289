// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "TODO")]

pub mod erased;

pub use erased::ErasedClosureOnce;

use crate::ThreadAware;

/// A FnOnce-like, parameterless closure whose captured values all implement [`ThreadAware`]
///
/// Use [`relocate_once`] function to construct these.
pub trait RelocateFnOnce<T: ?Sized>: ThreadAware {
    /// Calls the closure, consuming it in the process.
    fn call_once(self) -> T;
}

/// A trait for callable types that can be called multiple times.
/// This trait is used to define closures that can be called multiple times, without consuming the closure.
pub trait RelocateFn<T>: ThreadAware {
    /// Calls the closure, returning the result.
    fn call(&self) -> T;
}

/// A trait for callable types that can be called mutably.
/// This trait is used to define closures that can be called mutably, allowing the closure to modify its internal state.
pub trait RelocateFnMut<T>: ThreadAware {
    /// Calls the closure mutably, returning the result.
    fn call_mut(&mut self) -> T;
}

/// A common implementation of [`RelocateFn`]
///
/// Construct this using the [`relocate`] function.
#[derive(Debug, Copy, Hash)]
pub struct Closure<T, D> {
    data: D,
    f: fn(&D) -> T,
}

impl<T, D> Clone for Closure<T, D>
where
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            f: self.f,
        }
    }
}

impl<T, D> RelocateFn<T> for Closure<T, D>
where
    D: ThreadAware,
{
    fn call(&self) -> T {
        (self.f)(&self.data)
    }
}

impl<T, D> RelocateFnMut<T> for Closure<T, D>
where
    D: ThreadAware,
{
    fn call_mut(&mut self) -> T {
        self.call()
    }
}

impl<T, D> RelocateFnOnce<T> for Closure<T, D>
where
    D: ThreadAware,
{
    fn call_once(self) -> T {
        self.call()
    }
}

impl<T, D> ThreadAware for Closure<T, D>
where
    D: ThreadAware,
{
    fn relocated(self, source: crate::MemoryAffinity, destination: crate::PinnedAffinity) -> Self {
        let data = self.data.relocated(source, destination);
        Self { data, f: self.f }
    }
}

/// A common implementation of [`RelocateFnOnce`]
///
/// Construct this using the [`relocate_once`] function.
#[derive(Debug, Copy, Hash)]
pub struct ClosureOnce<T, D> {
    data: D,
    f: fn(D) -> T,
}

impl<T, D> Clone for ClosureOnce<T, D>
where
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            f: self.f,
        }
    }
}

impl<T, D> RelocateFnOnce<T> for ClosureOnce<T, D>
where
    D: ThreadAware,
{
    fn call_once(self) -> T {
        (self.f)(self.data)
    }
}

impl<T, D> ThreadAware for ClosureOnce<T, D>
where
    D: ThreadAware,
{
    fn relocated(self, source: crate::MemoryAffinity, destination: crate::PinnedAffinity) -> Self {
        let data = self.data.relocated(source, destination);
        Self { data, f: self.f }
    }
}

/// A common implementation of [`RelocateFnMut`]]
///
/// Construct this using the [`relocate_mut`] function.
#[derive(Debug, Copy, Hash)]
pub struct ClosureMut<T, D> {
    data: D,
    f: fn(&mut D) -> T,
}

impl<T, D> Clone for ClosureMut<T, D>
where
    D: Clone,
{
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            f: self.f,
        }
    }
}

impl<T, D> RelocateFnMut<T> for ClosureMut<T, D>
where
    D: ThreadAware,
{
    fn call_mut(&mut self) -> T {
        (self.f)(&mut self.data)
    }
}

impl<T, D> RelocateFnOnce<T> for ClosureMut<T, D>
where
    D: ThreadAware,
{
    fn call_once(mut self) -> T {
        self.call_mut()
    }
}

impl<T, D> ThreadAware for ClosureMut<T, D>
where
    D: ThreadAware,
{
    fn relocated(self, source: crate::MemoryAffinity, destination: crate::PinnedAffinity) -> Self {
        let data = self.data.relocated(source, destination);
        Self { data, f: self.f }
    }
}

/// Construct a [`RelocateFn`] - a closure-like object where the captured data implement [`ThreadAware`].
///
/// Create a closure-like object by explicitly providing closed-over
/// value and a function pointer to operate on that value, essentially simulating a
/// parameterless closure that ensures that captured data implements [`ThreadAware`].
pub fn relocate<T, D>(data: D, f: fn(&D) -> T) -> Closure<T, D>
where
    D: ThreadAware,
{
    Closure { data, f }
}

/// Construct a [`RelocateFnMut`] - a closure-like object where the captured data implement [`ThreadAware`].
///
/// Create a closure-like object by explicitly providing closed-over
/// value and a function pointer to operate on that value, essentially simulating a
/// parameterless closure that ensures that captured data implements [`ThreadAware`].
pub fn relocate_mut<T, D>(data: D, f: fn(&mut D) -> T) -> ClosureMut<T, D>
where
    D: ThreadAware,
{
    ClosureMut { data, f }
}

/// Construct a [`RelocateFnOnce`] - a closure-like object where the captured data implement [`ThreadAware`].
///
/// Create a closure-like object by explicitly providing closed-over
/// value and a function pointer to operate on that value, essentially simulating a
/// parameterless closure that ensures that captured data implements [`ThreadAware`].
///
/// Usage:
/// ```rust
/// # use thread_aware::{PinnedAffinity, ThreadAware, MemoryAffinity, relocate_once, RelocateFnOnce};
/// struct Transferrable;
/// impl ThreadAware for Transferrable {
///     // ...
///     # fn relocated(self, source: MemoryAffinity, destination: PinnedAffinity) -> Self {
///     #    Self {}
///     # }
/// }
///
/// let closure = relocate_once(Transferrable, |transferrable| {
///     // do stuff with transferrable
/// });
///
/// closure.call_once();
///
/// let closure_with_multiple_captured = relocate_once((Transferrable, Transferrable), |(a, b)| {
///     // do stuff with a and b
/// });
///
/// closure_with_multiple_captured.call_once();
/// ```
///
/// This exists because Rust closures don't give us control over the types of captured values.
pub fn relocate_once<T, D>(data: D, f: fn(D) -> T) -> ClosureOnce<T, D>
where
    D: ThreadAware,
{
    ClosureOnce { data, f }
}

use {
    crate::{
        error::{Error, Result},
        handler::{self, call_empty, Action, CallFn, HandleFn},
        signature::{Invocable, Signature},
        storage::Storage,
    },
    std::{fmt, marker::PhantomData, mem},
};

/// Thread-safety capability of an [`AnyInvocable`].
///
/// Either [`Local`] (the default) or [`Sendable`].
pub trait Threading: sealed::Sealed {}

/// Callables of any type are accepted; the wrapper is neither `Send` nor `Sync`.
#[derive(Debug)]
pub enum Local {}

/// Only `Send` callables are accepted; the wrapper is `Send`.
///
/// It is never `Sync`: calling requires `&mut self`.
#[derive(Debug)]
pub enum Sendable {}

/// Implemented by a [`Threading`] capability for every callable type `F` it accepts.
pub trait Admits<F>: Threading {}

impl Threading for Local {}
impl Threading for Sendable {}

impl<F> Admits<F> for Local {}
impl<F: Send> Admits<F> for Sendable {}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Local {}
    impl Sealed for super::Sendable {}
}

/// The null value an [`AnyInvocable`] may be constructed from and compared against.
///
/// ```
/// use anyinvocable::{AnyInvocable, Null};
///
/// let f: AnyInvocable<'static, fn()> = Null.into();
/// assert!(f == Null);
/// assert!(Null == f);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

/// Move-only, type-erased wrapper for a callable with the call [`Signature`] `S`.
///
/// Internally uses the small object optimization: callables which fit in
/// [`INLINE_SIZE`] bytes (two pointers) with a compatible alignment are stored inline,
/// larger ones are stored on the heap. See [`fits_inline`].
///
/// The wrapper is either empty or holds a callable.
/// Calling an empty wrapper panics; see [`try_call`] for the non-panicking alternative.
///
/// `'a` bounds the borrows of the stored callable, if any.
/// `M` is the [`Threading`] capability, [`Local`] by default;
/// see [`SendInvocable`] for a wrapper which may be sent to another thread.
///
/// ```
/// use anyinvocable::AnyInvocable;
///
/// let mut total = 0;
///
/// {
///     let mut f: AnyInvocable<'_, fn(i32) -> i32> = AnyInvocable::new(|x: i32| {
///         total += x;
///         total
///     });
///
///     assert_eq!(f.call(2), 2);
///     assert_eq!(f.call(3), 5);
/// }
///
/// assert_eq!(total, 5);
/// ```
///
/// [`INLINE_SIZE`]: crate::INLINE_SIZE
/// [`fits_inline`]: crate::fits_inline
/// [`try_call`]: #method.try_call
pub struct AnyInvocable<'a, S: Signature, M: Threading = Local> {
    storage: Storage,
    /// `None` if empty.
    handle: Option<HandleFn>,
    /// Meaningful only if `handle` is `Some`; `call_empty` otherwise.
    call: CallFn<S>,
    _marker: PhantomData<(&'a (), S, M)>,
}

/// An [`AnyInvocable`] which may be sent to another thread.
pub type SendInvocable<'a, S> = AnyInvocable<'a, S, Sendable>;

unsafe impl<'a, S: Signature> Send for AnyInvocable<'a, S, Sendable> {}

impl<'a, S: Signature, M: Threading> AnyInvocable<'a, S, M> {
    /// Creates an empty wrapper.
    pub fn empty() -> Self {
        Self {
            storage: Storage::uninit(),
            handle: None,
            call: call_empty::<S>,
            _marker: PhantomData,
        }
    }

    /// Creates a wrapper which holds the callable `f`.
    ///
    /// Closure arguments must be annotated with their types:
    /// the signature is not used to infer them.
    pub fn new<F>(f: F) -> Self
    where
        F: Invocable<S> + 'a,
        M: Admits<F>,
    {
        let mut result = Self::empty();
        result.store(f);
        result
    }

    /// Creates a wrapper which holds a `T` constructed from `args`.
    ///
    /// Multiple constructor arguments are passed as a tuple,
    /// a list of arguments as an array or a slice; the conversion receives `args` whole.
    pub fn in_place<T, A>(args: A) -> Self
    where
        T: From<A> + Invocable<S> + 'a,
        M: Admits<T>,
    {
        Self::new(T::from(args))
    }

    /// Creates a wrapper which holds the callable returned by `ctor`.
    pub fn new_with<F, C>(ctor: C) -> Self
    where
        C: FnOnce() -> F,
        F: Invocable<S> + 'a,
        M: Admits<F>,
    {
        Self::new(ctor())
    }

    /// Returns `true` if the wrapper holds a callable.
    pub fn is_some(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns `true` if the wrapper is empty.
    pub fn is_none(&self) -> bool {
        self.handle.is_none()
    }

    /// Replaces the held callable, if any, with `f`.
    pub fn set<F>(&mut self, f: F)
    where
        F: Invocable<S> + 'a,
        M: Admits<F>,
    {
        self.assign(Self::new(f));
    }

    /// Replaces the held callable, if any, with a reference to `f`.
    ///
    /// The callable is not moved or copied:
    /// calls through the wrapper observe and mutate `f` itself.
    pub fn set_ref<F>(&mut self, f: &'a mut F)
    where
        F: ?Sized,
        &'a mut F: Invocable<S>,
        M: Admits<&'a mut F>,
    {
        self.set(f);
    }

    /// Replaces the held callable, if any, with the one held by `other`.
    ///
    /// The previously held callable is dropped.
    pub fn assign(&mut self, mut other: Self) {
        self.swap(&mut other);
    }

    /// Same as [`reset`](#method.reset).
    pub fn assign_null(&mut self, _: Null) {
        self.reset();
    }

    /// Drops the held callable, if any, leaving the wrapper empty.
    pub fn reset(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.call = call_empty::<S>;

            unsafe {
                handle(&mut self.storage, Action::Destroy);
            }
        }
    }

    /// Moves the held callable, if any, out into a new wrapper, leaving this one empty.
    ///
    /// Never allocates.
    pub fn take(&mut self) -> Self {
        let mut result = Self::empty();

        if let Some(handle) = self.handle.take() {
            unsafe {
                handle(&mut result.storage, Action::MoveFrom(&mut self.storage));
            }

            result.handle = Some(handle);
            result.call = mem::replace(&mut self.call, call_empty::<S>);
        }

        result
    }

    /// Exchanges the held callables (or their absence) of the two wrappers.
    ///
    /// Never allocates.
    pub fn swap(&mut self, other: &mut Self) {
        match (self.handle, other.handle) {
            (Some(handle), Some(other_handle)) => {
                unsafe {
                    let mut tmp = Storage::uninit();
                    handle(&mut tmp, Action::MoveFrom(&mut self.storage));
                    other_handle(&mut self.storage, Action::MoveFrom(&mut other.storage));
                    handle(&mut other.storage, Action::MoveFrom(&mut tmp));
                }

                mem::swap(&mut self.handle, &mut other.handle);
                mem::swap(&mut self.call, &mut other.call);
            }
            (Some(_), None) => other.swap(self),
            (None, Some(other_handle)) => {
                unsafe {
                    other_handle(&mut self.storage, Action::MoveFrom(&mut other.storage));
                }

                self.handle = other.handle.take();
                self.call = mem::replace(&mut other.call, call_empty::<S>);
            }
            (None, None) => {}
        }
    }

    /// Calls the held callable with the argument tuple.
    ///
    /// # Panics
    ///
    /// Panics if the wrapper is empty.
    pub fn call_with(&mut self, args: S::Args) -> S::Output {
        unsafe { (self.call)(&mut self.storage, args) }
    }

    /// Calls the held callable with the argument tuple.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the wrapper is empty.
    pub fn try_call_with(&mut self, args: S::Args) -> Result<S::Output> {
        if self.is_none() {
            trace!("call on an empty `AnyInvocable`");
            return Err(Error::Empty);
        }

        Ok(self.call_with(args))
    }

    fn store<F>(&mut self, f: F)
    where
        F: Invocable<S> + 'a,
    {
        debug_assert!(
            self.is_none(),
            "tried to store a callable in an occupied `AnyInvocable`"
        );

        let (handle, call) = unsafe { handler::install::<S, F>(&mut self.storage, f) };

        self.handle = Some(handle);
        self.call = call;
    }
}

macro_rules! call {
    ($($arg:ident: $ty:ident),*) => {
        impl<'a, R, $($ty,)* M: Threading> AnyInvocable<'a, fn($($ty),*) -> R, M> {
            /// Calls the held callable.
            ///
            /// # Panics
            ///
            /// Panics if the wrapper is empty.
            #[inline]
            pub fn call(&mut self, $($arg: $ty),*) -> R {
                self.call_with(($($arg,)*))
            }

            /// Calls the held callable.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Empty`] if the wrapper is empty.
            #[inline]
            pub fn try_call(&mut self, $($arg: $ty),*) -> Result<R> {
                self.try_call_with(($($arg,)*))
            }
        }
    };
}

call!();
call!(a0: A0);
call!(a0: A0, a1: A1);
call!(a0: A0, a1: A1, a2: A2);
call!(a0: A0, a1: A1, a2: A2, a3: A3);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);

/// Exchanges the held callables (or their absence) of the two wrappers.
pub fn swap<'a, S: Signature, M: Threading>(
    lhs: &mut AnyInvocable<'a, S, M>,
    rhs: &mut AnyInvocable<'a, S, M>,
) {
    lhs.swap(rhs);
}

impl<'a, S: Signature, M: Threading> Default for AnyInvocable<'a, S, M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, S: Signature, M: Threading> Drop for AnyInvocable<'a, S, M> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<'a, S: Signature, M: Threading> From<Null> for AnyInvocable<'a, S, M> {
    fn from(_: Null) -> Self {
        Self::empty()
    }
}

impl<'a, S: Signature, M: Threading> PartialEq<Null> for AnyInvocable<'a, S, M> {
    fn eq(&self, _: &Null) -> bool {
        self.is_none()
    }
}

impl<'a, S: Signature, M: Threading> PartialEq<AnyInvocable<'a, S, M>> for Null {
    fn eq(&self, other: &AnyInvocable<'a, S, M>) -> bool {
        other.is_none()
    }
}

impl<'a, S: Signature, M: Threading> fmt::Debug for AnyInvocable<'a, S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyInvocable")
            .field("is_some", &self.is_some())
            .finish_non_exhaustive()
    }
}

/// Call signature of an [`AnyInvocable`], spelled as a function pointer type.
///
/// `fn(A, B) -> R` describes a callable taking `A` and `B` and returning `R`.
/// Implemented for function pointer types of up to 8 arguments.
///
/// Argument types which borrow must name their lifetime (`fn(&'a str) -> usize`);
/// higher-ranked function pointer types (`fn(&str) -> usize`) are not signatures.
///
/// [`AnyInvocable`]: crate::AnyInvocable
pub trait Signature: sealed::Sealed {
    /// Argument types, as a tuple.
    type Args;
    /// Result type.
    type Output;
}

/// A callable which may be stored in an [`AnyInvocable`] with signature `S`.
///
/// Implemented for every `FnMut` closure, function item and function pointer
/// with a matching argument list and result type.
/// Implement it manually for named callable types, e.g. to construct them in place
/// with [`AnyInvocable::in_place`].
///
/// [`AnyInvocable`]: crate::AnyInvocable
/// [`AnyInvocable::in_place`]: crate::AnyInvocable::in_place
pub trait Invocable<S: Signature> {
    /// Invokes the callable with the argument tuple.
    fn invoke(&mut self, args: S::Args) -> S::Output;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! signature {
    ($($arg:ident: $ty:ident),*) => {
        impl<R, $($ty),*> sealed::Sealed for fn($($ty),*) -> R {}

        impl<R, $($ty),*> Signature for fn($($ty),*) -> R {
            type Args = ($($ty,)*);
            type Output = R;
        }

        impl<F, R, $($ty),*> Invocable<fn($($ty),*) -> R> for F
        where
            F: FnMut($($ty),*) -> R,
        {
            #[inline]
            fn invoke(&mut self, ($($arg,)*): ($($ty,)*)) -> R {
                self($($arg),*)
            }
        }
    };
}

signature!();
signature!(a0: A0);
signature!(a0: A0, a1: A1);
signature!(a0: A0, a1: A1, a2: A2);
signature!(a0: A0, a1: A1, a2: A2, a3: A3);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
signature!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);

//! Move-only, type-erased wrapper for a callable with a fixed call signature.
//!
//! [`AnyInvocable`] stores any closure, function item or function pointer which may be called
//! with the arguments of its [`Signature`] and returns its result type,
//! without the owner knowing the callable's concrete type.
//!
//! Internally uses the small object optimization: [`INLINE_SIZE`] bytes (two pointers)
//! of callable storage live in the wrapper itself. Larger or over-aligned callables are stored on the heap.
//! Moving, swapping, dropping and calling a wrapper goes through two statically generated
//! function pointers and never allocates.
//!
//! ```
//! use anyinvocable::{AnyInvocable, Null};
//!
//! fn foo() -> i32 {
//!     5
//! }
//!
//! let mut f: AnyInvocable<'static, fn() -> i32> = AnyInvocable::new(foo);
//! assert_eq!(f.call(), 5);
//!
//! let mut g = f.take();
//! assert!(f == Null);
//! assert_eq!(g.call(), 5);
//!
//! g.set(|| 7);
//! f.swap(&mut g);
//! assert_eq!(f.call(), 7);
//! assert!(g.is_none());
//! ```
//!
//! # Features
//!
//! - **`tracing`** (disabled by default): emits `trace`-level [`tracing`] events
//!   when a callable is boxed and when an empty wrapper is called through [`try_call`].
//!
//! [`tracing`]: https://docs.rs/tracing
//! [`try_call`]: AnyInvocable::try_call

#![deny(missing_docs)]

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

mod error;
mod handler;
mod invocable;
mod signature;
mod storage;

pub use crate::{
    error::{Error, Result},
    invocable::{swap, Admits, AnyInvocable, Local, Null, SendInvocable, Sendable, Threading},
    signature::{Invocable, Signature},
    storage::{fits_inline, INLINE_ALIGN, INLINE_SIZE},
};

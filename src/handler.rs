use {
    crate::{
        error::Error,
        signature::{Invocable, Signature},
        storage::{fits_inline, Storage},
    },
    std::{marker::PhantomData, ptr},
};

/// Lifecycle operation requested from a [`HandleFn`].
pub(crate) enum Action<'a> {
    /// Drops the callable stored in the target cell and releases its storage.
    Destroy,
    /// Relocates the callable stored in the source cell into the (unoccupied) target cell.
    /// The source cell is left logically uninitialized.
    MoveFrom(&'a mut Storage),
}

/// Static function which performs a lifecycle [`Action`] on a storage cell
/// holding a callable of the concrete type it was generated for.
pub(crate) type HandleFn = unsafe fn(&mut Storage, Action<'_>);

/// Static function which
/// 1) unpacks the correct callable type from the storage cell, inline or boxed,
/// 2) invokes it with the argument tuple.
pub(crate) type CallFn<S> =
    unsafe fn(&mut Storage, <S as Signature>::Args) -> <S as Signature>::Output;

/// Typed operations on a storage cell for one concrete callable type and storage mode.
///
/// All functions are unsafe: the caller guarantees the cell is in the state the
/// operation expects (occupied by a `Self::Target` stored by this handler, or unoccupied for `create`).
pub(crate) trait Handler {
    type Target;

    unsafe fn create(storage: &mut Storage, value: Self::Target);

    unsafe fn destroy(storage: &mut Storage);

    unsafe fn relocate(dst: &mut Storage, src: &mut Storage);

    unsafe fn get(storage: &mut Storage) -> &mut Self::Target;

    unsafe fn handle(storage: &mut Storage, action: Action<'_>) {
        match action {
            Action::Destroy => Self::destroy(storage),
            Action::MoveFrom(src) => Self::relocate(storage, src),
        }
    }

    unsafe fn call<S>(storage: &mut Storage, args: S::Args) -> S::Output
    where
        S: Signature,
        Self::Target: Invocable<S>,
    {
        <Self::Target as Invocable<S>>::invoke(Self::get(storage), args)
    }
}

/// Stores the callable directly in the cell's bytes.
pub(crate) struct Inline<T>(PhantomData<T>);

impl<T> Handler for Inline<T> {
    type Target = T;

    unsafe fn create(storage: &mut Storage, value: T) {
        ptr::write(storage.inline_ptr::<T>(), value);
    }

    unsafe fn destroy(storage: &mut Storage) {
        ptr::drop_in_place(storage.inline_ptr::<T>());
    }

    unsafe fn relocate(dst: &mut Storage, src: &mut Storage) {
        ptr::write(dst.inline_ptr::<T>(), ptr::read(src.inline_ptr::<T>()));
    }

    unsafe fn get(storage: &mut Storage) -> &mut T {
        &mut *storage.inline_ptr::<T>()
    }
}

/// Stores the callable on the heap, keeping the owning pointer in the cell.
pub(crate) struct Boxed<T>(PhantomData<T>);

impl<T> Handler for Boxed<T> {
    type Target = T;

    unsafe fn create(storage: &mut Storage, value: T) {
        trace!(
            size = std::mem::size_of::<T>(),
            align = std::mem::align_of::<T>(),
            "callable does not fit inline storage, boxing"
        );

        storage.set_heap_ptr(Box::into_raw(Box::new(value)));
    }

    unsafe fn destroy(storage: &mut Storage) {
        drop(Box::from_raw(storage.heap_ptr::<T>()));
    }

    unsafe fn relocate(dst: &mut Storage, src: &mut Storage) {
        dst.set_heap_ptr(src.heap_ptr::<T>());
    }

    unsafe fn get(storage: &mut Storage) -> &mut T {
        &mut *storage.heap_ptr::<T>()
    }
}

/// Stores `value` in the unoccupied cell, inline or boxed depending on [`fits_inline`],
/// and returns the lifecycle and invocation functions for it.
///
/// # Safety
///
/// The caller guarantees that `storage` is unoccupied,
/// and that the returned functions are only ever used with this cell (or a cell the callable is moved to)
/// while the callable's borrows, if any, are alive.
pub(crate) unsafe fn install<S, F>(storage: &mut Storage, value: F) -> (HandleFn, CallFn<S>)
where
    S: Signature,
    F: Invocable<S>,
{
    if fits_inline::<F>() {
        emplace::<Inline<F>, S>(storage, value)
    } else {
        emplace::<Boxed<F>, S>(storage, value)
    }
}

unsafe fn emplace<H, S>(storage: &mut Storage, value: H::Target) -> (HandleFn, CallFn<S>)
where
    H: Handler,
    S: Signature,
    H::Target: Invocable<S>,
{
    H::create(storage, value);

    (H::handle as HandleFn, H::call::<S> as CallFn<S>)
}

/// Invocation function installed in an empty wrapper.
pub(crate) unsafe fn call_empty<S: Signature>(_: &mut Storage, _: S::Args) -> S::Output {
    panic!("{}", Error::Empty)
}

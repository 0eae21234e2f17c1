use {
    static_assertions::{assert_eq_align, const_assert_eq},
    std::mem::{align_of, size_of, MaybeUninit},
};

/// Amount of memory available for inline callable storage in an [`AnyInvocable`].
///
/// x86: 8b (two 4b words)
/// x64: 16b (two 8b words)
///
/// [`AnyInvocable`]: crate::AnyInvocable
pub const INLINE_SIZE: usize = 2 * size_of::<*const ()>();

/// Alignment of the inline callable storage. Same as a pointer.
pub const INLINE_ALIGN: usize = align_of::<*const ()>();

/// Returns `true` if a callable of type `T` is stored inline, without a heap allocation.
///
/// A callable is stored inline if it fits in [`INLINE_SIZE`] bytes
/// and its alignment divides [`INLINE_ALIGN`].
/// Moves are plain bitwise copies and cannot fail, so no further checks apply.
///
/// ```
/// use anyinvocable::fits_inline;
///
/// assert!(fits_inline::<fn() -> i32>());
/// assert!(!fits_inline::<[usize; 3]>());
/// ```
pub const fn fits_inline<T>() -> bool {
    size_of::<T>() <= INLINE_SIZE && INLINE_ALIGN % align_of::<T>() == 0
}

/// Callable storage cell.
/// Inline callable bytes or a single owning pointer to a heap-allocated callable.
/// Tag/discriminant is not stored here; it is implied by the lifecycle handler installed in the owner.
#[repr(C)]
pub(crate) union Storage {
    ptr: *mut (),
    _buf: MaybeUninit<[*const (); 2]>,
}

const_assert_eq!(size_of::<Storage>(), INLINE_SIZE);
assert_eq_align!(Storage, *const ());

impl Storage {
    pub(crate) const fn uninit() -> Self {
        Self {
            _buf: MaybeUninit::uninit(),
        }
    }

    /// Pointer to the inline bytes, cast to the stored callable type.
    ///
    /// All union fields live at offset 0.
    pub(crate) fn inline_ptr<T>(&mut self) -> *mut T {
        debug_assert!(fits_inline::<T>());

        (self as *mut Self).cast()
    }

    /// Reads back the owning pointer stored by [`set_heap_ptr`].
    ///
    /// # Safety
    ///
    /// The caller guarantees the cell currently holds a heap pointer to a `T`.
    ///
    /// [`set_heap_ptr`]: #method.set_heap_ptr
    pub(crate) unsafe fn heap_ptr<T>(&self) -> *mut T {
        self.ptr.cast()
    }

    pub(crate) fn set_heap_ptr<T>(&mut self, ptr: *mut T) {
        self.ptr = ptr.cast();
    }
}

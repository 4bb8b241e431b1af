//! Internal utility types.

/// Marker type used when type-erasing containers, elements and cursors.
///
/// This zero-sized type serves as a placeholder pointee when the actual
/// concrete type has been erased. For example, a `*mut Erased` inside a
/// [`RawCursor`] points either at an element or at a boxed position, and only
/// the cursor's vtable knows which.
///
/// Using a distinct marker type (rather than `()`) makes the intent clearer
/// in type signatures and error messages.
///
/// [`RawCursor`]: crate::cursor::RawCursor
#[derive(Clone, Copy, Debug)]
pub struct Erased {
    /// Prevents construction outside of this crate
    _private: (),
}

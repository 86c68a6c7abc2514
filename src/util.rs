//! Small helpers shared by the reader and writer.

#[inline(always)]
#[cold]
fn cold_path() {}

/// "Annotation" to hint that a branch of an if-statement is likely to occur.
#[inline(always)]
pub(crate) fn likely(b: bool) -> bool {
    if b {
        true
    } else {
        cold_path();
        false
    }
}

/// "Annotation" to hint that a branch of an if-statement is _not likely_ to occur.
#[inline(always)]
pub(crate) fn unlikely(b: bool) -> bool {
    if b {
        cold_path();
        true
    } else {
        false
    }
}

/// Infallible widening conversion, spelled out so `as` never hides a truncation.
pub(crate) trait CastFrom<T> {
    fn cast_from(from: T) -> Self;
}

// The crate only targets platforms where `usize` is at least 32 bits wide.
static_assertions::const_assert!(usize::BITS >= 32);

#[allow(clippy::as_conversions)]
impl CastFrom<u32> for usize {
    #[inline(always)]
    fn cast_from(from: u32) -> Self {
        from as usize
    }
}

/// Stack left free before a recursion point switches to a fresh segment.
pub const RED_ZONE: usize = 64 * 1024;

/// Size of each segment allocated once the red zone is reached.
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Runs `f`, first moving to a newly allocated stack segment if less than
/// [`RED_ZONE`] bytes remain on the current one.
///
/// The parser and the evaluator recurse once per nesting level of the
/// program. Routing those recursion points through here keeps deep but
/// permitted nesting from exhausting small thread stacks.
///
/// ## Example
/// ```
/// use foolang::util::stack::guarded;
///
/// fn depth(n: u32) -> u32 {
///     if n == 0 { 0 } else { guarded(|| 1 + depth(n - 1)) }
/// }
///
/// assert_eq!(depth(10_000), 10_000);
/// ```
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

use std::fmt::Display;
use std::ops::Deref;

/// Byte range into the source text. Newtype over miette::SourceSpan with a start/end
/// representation that is easier to build from regex matches.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SourceSpan {
    start: usize,
    /// MUST be >= self.start
    end: usize,
}

impl SourceSpan {
    pub const fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past its end {end}");
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for SourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

impl From<SourceSpan> for miette::SourceSpan {
    fn from(value: SourceSpan) -> Self {
        (value.start, value.len()).into()
    }
}

impl From<&SourceSpan> for miette::SourceSpan {
    fn from(value: &SourceSpan) -> Self {
        (*value).into()
    }
}

/// Span<T> is transparent to T (Deref, Display) and carries where T came from in the source.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Span<T> {
    pub inner: T,
    pub span: SourceSpan,
}

/// Helper trait so that wrapping values in a Span (mostly in tests) is less noisy
pub trait Spanned: Sized {
    fn spanned(self, s: SourceSpan) -> Span<Self>;
}

impl<T> Spanned for T {
    #[inline(always)]
    fn spanned(self, s: SourceSpan) -> Span<Self> {
        Span {
            inner: self,
            span: s,
        }
    }
}

impl<T> Deref for Span<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> Display for Span<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

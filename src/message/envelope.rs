// Layer 1: Standard library imports
use std::any::Any;
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::header::Header;
use crate::addr::Addr;

/// Marks a payload as an error resolution.
///
/// Rust has no dynamic `value.(error)` type assertion the way the
/// original Go runtime does, so rejection is modeled explicitly: wrap the
/// failure in `ErrorPayload` before handing it to [`Envelope::new`] (or
/// use [`Envelope::new_error`] directly) and [`Envelope::is_error`] will
/// report `true`. This is the idiomatic-Rust translation of
/// `original_source/future_impl.go`'s `env.Data.(error)` check.
pub struct ErrorPayload(Box<dyn std::error::Error + Send + Sync>);

impl ErrorPayload {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }

    /// Wraps an already-boxed error without re-boxing, used by
    /// [`crate::future::FutureAddr::escalate`] which accepts any
    /// `Into<Box<dyn Error + Send + Sync>>`.
    pub fn from_boxed(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self(err)
    }
}

impl fmt::Debug for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErrorPayload({})", self.0)
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ErrorPayload {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Immutable message carrier (spec §3, §4.1).
///
/// `data` is type-erased (`Any`), mirroring the spec's `data: Any` field.
/// Equality is intentionally not implemented on the payload: two
/// envelopes carrying structurally-equal-but-distinct `Any` values cannot
/// be compared without knowing the concrete type, so callers that need
/// equality should downcast first.
#[derive(Clone)]
pub struct Envelope {
    sender: Addr,
    header: Header,
    data: Arc<dyn Any + Send + Sync>,
    is_error: bool,
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("header", &self.header)
            .field("is_error", &self.is_error)
            .finish_non_exhaustive()
    }
}

impl Envelope {
    /// The only constructor for ordinary payloads (spec §4.1: "the only
    /// constructor"). If `data`'s concrete type is [`ErrorPayload`], the
    /// envelope is automatically marked as an error/rejection.
    pub fn new<T: Any + Send + Sync>(sender: Addr, header: Header, data: T) -> Self {
        let data: Arc<dyn Any + Send + Sync> = Arc::new(data);
        let is_error = data.downcast_ref::<ErrorPayload>().is_some();
        Self {
            sender,
            header,
            data,
            is_error,
        }
    }

    /// Convenience constructor that always marks the envelope as an
    /// error/rejection, used by [`crate::future::FutureAddr::escalate`].
    pub fn new_error(
        sender: Addr,
        header: Header,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(sender, header, ErrorPayload::new(err))
    }

    pub fn sender(&self) -> &Addr {
        &self.sender
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Whether this envelope's payload is of error kind (spec §4.7
    /// "Rejection is the case where `envelope.data` is of error kind").
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Downcasts the payload to `T`, or `None` if the concrete type
    /// doesn't match.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Returns the underlying error, if [`Envelope::is_error`] is true.
    pub fn error(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        self.data
            .downcast_ref::<ErrorPayload>()
            .map(|e| e.0.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DeadLetters;

    fn dead_letters_addr() -> Addr {
        DeadLetters::standalone_for_test().addr()
    }

    #[test]
    fn ordinary_payload_is_not_error() {
        let env = Envelope::new(dead_letters_addr(), Header::new(), 42i32);
        assert!(!env.is_error());
        assert_eq!(env.downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn error_payload_is_detected() {
        #[derive(Debug)]
        struct Boom;
        impl fmt::Display for Boom {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "boom")
            }
        }
        impl std::error::Error for Boom {}

        let env = Envelope::new_error(dead_letters_addr(), Header::new(), Boom);
        assert!(env.is_error());
        assert_eq!(env.error().unwrap().to_string(), "boom");
    }
}

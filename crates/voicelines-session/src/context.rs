//! Request-time context supplied by the host.
//!
//! The player picks a voice based on two flags the host reads from its own
//! state when a recipe is requested. The session layer does not know where
//! they come from; the host plugs in a [`ContextSource`].

/// Flags embedded in every `PlayRecipe` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Elevated-status flag (e.g. the protagonist holds a title).
    pub elevated: bool,
    /// Secondary-voice flag (selects the alternate voice set).
    pub secondary_voice: bool,
}

/// Supplies the request context at send time.
pub trait ContextSource: Send + Sync {
    fn request_context(&self) -> RequestContext;
}

/// A context that never changes. Useful for tools and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedContext(pub RequestContext);

impl ContextSource for FixedContext {
    fn request_context(&self) -> RequestContext {
        self.0
    }
}

impl<F> ContextSource for F
where
    F: Fn() -> RequestContext + Send + Sync,
{
    fn request_context(&self) -> RequestContext {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_context_returns_its_flags() {
        let source = FixedContext(RequestContext {
            elevated: true,
            secondary_voice: false,
        });
        let ctx = source.request_context();
        assert!(ctx.elevated);
        assert!(!ctx.secondary_voice);
    }

    #[test]
    fn closures_are_context_sources() {
        let source = || RequestContext {
            elevated: false,
            secondary_voice: true,
        };
        assert!(source.request_context().secondary_voice);
    }
}

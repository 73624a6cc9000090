use witness::{CancelSource, CancelToken, Eff, HasCancel};

/// The smallest environment that can host the cancellation capability; every
/// suite-level cancellation scenario runs against it.
#[derive(Debug, Clone)]
pub struct TestRuntime {
    source: CancelSource,
    token: CancelToken,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self::with_source(CancelSource::new())
    }

    fn with_source(source: CancelSource) -> Self {
        let token = source.token();
        TestRuntime { source, token }
    }

    /// Trigger this runtime's own scope.
    pub fn cancel(&self) {
        self.source.cancel();
    }

    /// A runtime nested under this one's scope, for exercising one-way
    /// parent-to-child propagation.
    pub fn nested(&self) -> Self {
        Self::with_source(self.source.child())
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        TestRuntime::new()
    }
}

impl HasCancel for TestRuntime {
    fn cancel_token(&self) -> &CancelToken {
        &self.token
    }

    fn cancel_source() -> Eff<Self, CancelSource> {
        Eff::new(|rt: &TestRuntime| rt.source.clone())
    }

    fn local_cancel(&self) -> Self {
        TestRuntime::new()
    }
}

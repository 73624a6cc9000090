use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::eff::Eff;

/// Shared backing state for one cancellation scope.
///
/// Cancelled state flows one way, parent to child: a check walks the parent
/// chain upward, while cancelling only ever sets the local flag.
#[derive(Debug)]
struct Flag {
    local: AtomicBool,
    parent: Option<Arc<Flag>>,
}

impl Flag {
    fn set(&self) {
        self.local.store(true, Ordering::SeqCst);
    }

    fn is_set(&self) -> bool {
        if self.local.load(Ordering::SeqCst) {
            return true;
        }
        self.parent.as_ref().is_some_and(|parent| parent.is_set())
    }
}

/// The owning half of a cancellation scope: the only handle a scope can be
/// cancelled through.
///
/// Cancellation is monotone. Once requested, the scope stays cancelled, and
/// requesting it again changes nothing. Clones share the same scope rather
/// than starting a new one.
#[derive(Debug, Clone)]
pub struct CancelSource {
    flag: Arc<Flag>,
}

impl CancelSource {
    /// A fresh root scope, independent of every existing scope.
    pub fn new() -> Self {
        CancelSource {
            flag: Arc::new(Flag {
                local: AtomicBool::new(false),
                parent: None,
            }),
        }
    }

    /// A scope nested under `self`: the child observes the parent's
    /// cancellation, while cancelling the child never touches the parent.
    pub fn child(&self) -> CancelSource {
        tracing::trace!("derived child cancellation scope");
        CancelSource {
            flag: Arc::new(Flag {
                local: AtomicBool::new(false),
                parent: Some(self.flag.clone()),
            }),
        }
    }

    /// Request cancellation of this scope and, transitively, of every scope
    /// nested under it via [`CancelSource::child`].
    pub fn cancel(&self) {
        tracing::debug!("cancellation requested");
        self.flag.set();
    }

    /// Whether this scope, or a scope it is nested under, has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_set()
    }

    /// An observing token for this scope. Tokens are cheap to hand out; all
    /// of them watch the same underlying flag.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            flag: self.flag.clone(),
        }
    }
}

impl Default for CancelSource {
    fn default() -> Self {
        CancelSource::new()
    }
}

/// The observing half of a cancellation scope.
///
/// Checking is a lock-free atomic load (plus a walk up the parent chain for
/// nested scopes), safe from any thread and cheap enough to poll in a tight
/// loop. A token cannot cancel anything; that stays with [`CancelSource`].
#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Arc<Flag>,
}

impl CancelToken {
    /// Whether the scope this token observes has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_set()
    }
}

/// Capability: a runtime environment that carries a cancellation scope.
///
/// Environments implement the three required methods; everything else an
/// environment-generic caller needs (today just [`HasCancel::token`]) is
/// derived from them, so adding a derived accessor never touches
/// implementors.
///
/// ```rust
/// use witness::{CancelSource, CancelToken, Eff, HasCancel};
///
/// struct Runtime {
///     source: CancelSource,
///     token: CancelToken,
/// }
///
/// impl Runtime {
///     fn new() -> Self {
///         let source = CancelSource::new();
///         let token = source.token();
///         Runtime { source, token }
///     }
/// }
///
/// impl HasCancel for Runtime {
///     fn cancel_token(&self) -> &CancelToken {
///         &self.token
///     }
///
///     fn cancel_source() -> Eff<Self, CancelSource> {
///         Eff::new(|rt: &Runtime| rt.source.clone())
///     }
///
///     fn local_cancel(&self) -> Self {
///         Runtime::new()
///     }
/// }
///
/// let outer = Runtime::new();
/// let scoped = outer.local_cancel();
/// outer.source.cancel();
///
/// assert!(outer.cancel_token().is_cancelled());
/// assert!(!scoped.cancel_token().is_cancelled());
/// ```
pub trait HasCancel: Sized {
    /// The live signal for the current scope. Must be cheap and allocation
    /// free; callers poll it.
    fn cancel_token(&self) -> &CancelToken;

    /// The scope's owning source, deferred into an effect description so that
    /// obtaining it can happen wherever the description is eventually run.
    fn cancel_source() -> Eff<Self, CancelSource>;

    /// A structurally identical environment whose cancellation scope is fresh
    /// and fully independent of this one, in both directions. Used to bound a
    /// sub-computation's cancellation lifetime separately from its caller's.
    fn local_cancel(&self) -> Self;

    /// The current scope's signal as an effect description.
    ///
    /// Derived from [`HasCancel::cancel_token`]; implementors get it for free
    /// and there is no reason to override it.
    fn token() -> Eff<Self, CancelToken>
    where
        Self: 'static,
    {
        Eff::new(|runtime: &Self| runtime.cancel_token().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn fresh_scopes_start_active() {
        let source = CancelSource::new();
        assert!(!source.is_cancelled());
        assert!(!source.token().is_cancelled());
    }

    #[test]
    fn cancel_is_monotone_and_idempotent() {
        let source = CancelSource::new();
        let token = source.token();

        source.cancel();
        assert!(token.is_cancelled());

        source.cancel();
        assert!(token.is_cancelled());
        assert!(source.is_cancelled());
    }

    #[test]
    fn tokens_issued_before_and_after_cancel_agree() {
        let source = CancelSource::new();
        let early = source.token();
        source.cancel();
        let late = source.token();

        assert!(early.is_cancelled());
        assert!(late.is_cancelled());
    }

    #[test]
    fn parent_cancellation_reaches_children() {
        let parent = CancelSource::new();
        let child = parent.child();
        let grandchild = child.child();

        parent.cancel();

        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn child_cancellation_stays_below_the_parent() {
        let parent = CancelSource::new();
        let child = parent.child();

        child.cancel();

        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn sibling_scopes_are_independent() {
        let parent = CancelSource::new();
        let left = parent.child();
        let right = parent.child();

        left.cancel();

        assert!(left.is_cancelled());
        assert!(!right.is_cancelled());
    }

    #[test]
    fn cancellation_is_visible_across_threads() {
        let source = CancelSource::new();
        let token = source.token();

        let watcher = thread::spawn(move || {
            while !token.is_cancelled() {
                thread::yield_now();
            }
            true
        });

        source.cancel();
        assert!(watcher.join().unwrap());
    }
}

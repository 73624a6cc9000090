use std::fmt;

/// A deferred computation against a runtime environment `RT`.
///
/// Building one executes nothing; each call to [`Eff::run`] applies the
/// stored recipe to the environment it is given, so one description can be
/// run against many environments. This is deliberately only the
/// description-and-execution sliver of an effect system, just enough to let
/// capabilities like [`crate::HasCancel`] hand out environment-derived values
/// without eager access to an environment.
///
/// ```rust
/// use witness::Eff;
///
/// let double: Eff<i32, i32> = Eff::new(|env| env * 2);
/// assert_eq!(double.run(&21), 42);
/// assert_eq!(double.run(&3), 6);
/// ```
pub struct Eff<RT, A> {
    run_fn: Box<dyn Fn(&RT) -> A + Send + Sync>,
}

impl<RT, A> Eff<RT, A> {
    /// Describe a computation without running it.
    pub fn new(f: impl Fn(&RT) -> A + Send + Sync + 'static) -> Self {
        Eff { run_fn: Box::new(f) }
    }

    /// Execute the description against `runtime`.
    pub fn run(&self, runtime: &RT) -> A {
        (self.run_fn)(runtime)
    }
}

// the recipe is opaque, so there is nothing more useful to print
impl<RT, A> fmt::Debug for Eff<RT, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Eff(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn building_an_eff_runs_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let eff: Eff<(), usize> = Eff::new(move |_| seen.fetch_add(1, Ordering::SeqCst) + 1);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(eff.run(&()), 1);
        assert_eq!(eff.run(&()), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn debug_is_opaque() {
        let eff: Eff<(), i32> = Eff::new(|_| 7);
        assert_eq!(format!("{eff:?}"), "Eff(..)");
    }
}

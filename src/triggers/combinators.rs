//! Boolean combinators over [`Condition`]s.
//!
//! [`All`] and [`Any`] poll **every** child on every poll before combining
//! the results. Children may be stateful filters whose timers only stay
//! correct if they see every tick, so the polling itself never
//! short-circuits.

use super::{Condition, SharedFlag};

// ---------------------------------------------------------------------------
// All / Any
// ---------------------------------------------------------------------------

/// True iff every child is true. Vacuously true with no children.
#[derive(Default)]
pub struct All<'a> {
    children: Vec<Box<dyn Condition + 'a>>,
}

/// True iff at least one child is true. False with no children.
#[derive(Default)]
pub struct Any<'a> {
    children: Vec<Box<dyn Condition + 'a>>,
}

macro_rules! impl_group {
    ($name:ident) => {
        impl<'a> $name<'a> {
            pub fn new(children: Vec<Box<dyn Condition + 'a>>) -> Self {
                Self { children }
            }

            /// Append a child; builder style.
            #[must_use]
            pub fn with(mut self, child: impl Condition + 'a) -> Self {
                self.push(child);
                self
            }

            pub fn push(&mut self, child: impl Condition + 'a) {
                self.children.push(Box::new(child));
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }
        }

        impl<'a> FromIterator<Box<dyn Condition + 'a>> for $name<'a> {
            fn from_iter<I: IntoIterator<Item = Box<dyn Condition + 'a>>>(iter: I) -> Self {
                Self::new(iter.into_iter().collect())
            }
        }
    };
}

impl_group!(All);
impl_group!(Any);

impl Condition for All<'_> {
    fn poll(&mut self) -> bool {
        self.children
            .iter_mut()
            .fold(true, |acc, child| child.poll() & acc)
    }
}

impl Condition for Any<'_> {
    fn poll(&mut self) -> bool {
        self.children
            .iter_mut()
            .fold(false, |acc, child| child.poll() | acc)
    }
}

// ---------------------------------------------------------------------------
// Gated
// ---------------------------------------------------------------------------

/// Passes its child through only while an externally owned flag matches
/// `required`.
///
/// Flip the flag to suppress a trigger's effect at runtime without
/// rewiring it. The child keeps being polled while suppressed.
pub struct Gated<C> {
    inner: C,
    flag: SharedFlag,
    required: bool,
}

impl<C: Condition> Gated<C> {
    /// Active only while `flag` is `true`.
    pub fn new(inner: C, flag: SharedFlag) -> Self {
        Self::with_required(inner, flag, true)
    }

    /// Active only while `flag` equals `required`.
    pub fn with_required(inner: C, flag: SharedFlag, required: bool) -> Self {
        Self {
            inner,
            flag,
            required,
        }
    }

    pub fn flag(&self) -> &SharedFlag {
        &self.flag
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Condition> Condition for Gated<C> {
    fn poll(&mut self) -> bool {
        let active = self.inner.poll();
        active && self.flag.get() == self.required
    }
}

//! # Garden Booking Core
//!
//! Core traits and types for the garden booking workflow.
//!
//! The booking engine is written as a reducer: every user interaction is an
//! action, and a pure function decides how the state changes and which side
//! effects should happen next.
//!
//! ## Core Concepts
//!
//! - **State**: The booking draft and everything derived from it
//! - **Action**: Every input to the workflow (field edits, Next, Back, submission results)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies (clock, submission collaborator)
//!
//! ## Example
//!
//! ```ignore
//! use garden_booking_core::*;
//!
//! impl Reducer for BookingReducer {
//!     type State = BookingState;
//!     type Action = BookingAction;
//!     type Environment = BookingEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut BookingState,
//!         action: BookingAction,
//!         env: &BookingEnvironment,
//!     ) -> SmallVec<[Effect<BookingAction>; 4]> {
//!         // Business logic goes here
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{NaiveDate, NaiveDateTime};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce no effects; the inline capacity of four keeps
        /// the common path off the heap.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution), returned from reducers and executed by
/// the Store.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation into an `Effect::Future`
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{Local, NaiveDate, NaiveDateTime};

    /// Clock trait - abstracts time operations for testability
    ///
    /// The booking workflow runs on a fixed-width local wall clock: slot
    /// instants and "now" are compared without any time zone conversion, so
    /// the clock hands out naive local date-times.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use garden_booking_core::environment::Clock;
    ///
    /// struct Noon;
    /// impl Clock for Noon {
    ///     fn now(&self) -> chrono::NaiveDateTime {
    ///         NaiveDate::from_ymd_opt(2025, 6, 10)
    ///             .and_then(|d| d.and_hms_opt(12, 0, 0))
    ///             .unwrap_or_default()
    ///     }
    /// }
    ///
    /// assert_eq!(Noon.today(), NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current local wall-clock time
        fn now(&self) -> NaiveDateTime;

        /// Get the current local calendar date
        fn today(&self) -> NaiveDate {
            self.now().date()
        }
    }

    /// Production clock reading the host's local time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> NaiveDateTime {
            Local::now().naive_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock};

    #[test]
    fn none_effects_are_none() {
        let effect: Effect<()> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(effect.is_none());
    }

    #[test]
    fn future_effect_is_not_none() {
        let effect: Effect<u8> = Effect::merge(vec![
            Effect::None,
            Effect::future(async { Some(1) }),
        ]);
        assert!(!effect.is_none());
        assert_eq!(
            format!("{effect:?}"),
            "Effect::Parallel([Effect::None, Effect::Future(<future>)])"
        );
    }

    #[test]
    fn future_effect_yields_its_action() {
        let effect: Effect<u8> = Effect::future(async { Some(7) });
        let Effect::Future(fut) = effect else {
            unreachable!("constructed as a future");
        };
        assert_eq!(tokio_test::block_on(fut), Some(7));
    }

    #[test]
    fn system_clock_today_matches_now() {
        let clock = SystemClock;
        let now = clock.now();
        let today = clock.today();
        // Allow for a midnight rollover between the two reads
        assert!(today == now.date() || today == now.date().succ_opt().unwrap_or(today));
    }
}

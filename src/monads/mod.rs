//! Runners that interpret a chain over contextual values.
//!
//! | runner | stages see | stops when |
//! |---|---|---|
//! | [`maybe`] | `Contextual<V>` | the skip flag is in the context |
//! | [`until_error`] | `V` | a stage fails; the error joins the context |
//! | [`saving_context`] | `V` | never; the input context is re-attached |
//! | [`either`] | `Contextual<V>` | runs the branch chosen by the context |
//!
//! Every runner implements [`Runner`](crate::algebras::Runner) and can be
//! embedded in an outer chain with `into_stage`.

pub mod either;
pub mod future;
pub mod maybe;
pub mod saving_context;
pub mod until_error;

pub use either::{either, Either};
pub use future::{future_from, in_future, Deferred};
pub use maybe::{maybe, Maybe};
pub use saving_context::{saving_context, SavingContext};
pub use until_error::{until_error, UntilError};

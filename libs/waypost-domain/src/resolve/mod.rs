//! Resolution domain module
//!
//! Everything between a segment and its resolved metadata: the declared
//! configuration model, the resolver capabilities and registry, the binding
//! that ties them together, and the dispatch that normalizes heterogeneous
//! resolver results into one cancellable value sequence.

mod binding;
mod data;
mod dispatch;
mod error;
mod ports;
mod stream;

pub use binding::ResolutionBinding;
pub use data::{ResolverId, RouteData};
pub use dispatch::resolve_segment;
pub use error::{ResolveError, Result};
pub use ports::{NullResolver, ResolverOutput, ResolverRegistry, RouteResolver, TitleFormatter};
pub use stream::ValueStream;

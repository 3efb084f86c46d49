//! Document source abstraction: query descriptors, results, and the
//! backend trait.

pub mod query;
pub mod result;
pub mod traits;

pub use query::{Cursor, Direction, FilterClause, OrderBy, QueryDescriptor, RangeOp};
pub use result::{PageResult, Record};
pub use traits::{DocumentStore, WriteOp};

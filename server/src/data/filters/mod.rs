//! Search filter compilation
//!
//! Turns a caller-supplied filter object into a SQL boolean expression for the
//! WHERE clause of a company or job search. Keys are checked against the
//! resource allow-list before anything is rendered.
//!
//! ## Usage
//!
//! ```
//! use jobly_server::data::filters::{Resource, compile_filter};
//!
//! let json = serde_json::json!({"name": "bro", "minEmployees": 100});
//! let filters = json.as_object().unwrap();
//! let sql = compile_filter(Resource::Company, filters).unwrap();
//! assert_eq!(sql, "LOWER(name) LIKE '%bro%' AND num_employees > 100");
//! ```

mod compiler;
mod range;
mod types;

pub use compiler::{WhereClause, compile_filter, compile_filter_params, compile_filter_with};
pub use range::{check_bounds, check_range};
pub use types::{
    COMPANY_FILTERS, CompareOp, FilterField, FilterMode, FilterObject, JOB_FILTERS, Predicate,
    RangeBounds, Resource, ResourceDescriptor, literal_text,
};

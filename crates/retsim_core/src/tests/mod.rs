//! Integration tests for the return simulation engine
//!
//! Tests are organized by topic:
//! - `golden` - Pinned fixtures computed by hand from the monthly formulas
//! - `invariants` - Path/statistics invariants over many parameter sets
//! - `epochs` - Sample reuse and regeneration across seed epochs
//! - `controller_flow` - Debounced recomputation and presenter output

mod controller_flow;

//! # API Route Modules
//!
//! - `policies` — insurance policy CRUD and paged listing under
//!   `/api/policies`, the whole API surface of this service.

pub mod policies;

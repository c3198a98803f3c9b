//! restgen - API metadata registry
//!
//! The declarative half of the restgen toolchain: projects build one
//! [`Registry`] describing their API surface (value types, named schemas,
//! business errors, groups, endpoints, service info), and the companion
//! `restgen-codegen` crate turns that registry into TypeScript source files.
//!
//! # Example
//!
//! ```
//! use restgen::{Endpoint, ErrorDescriptor, FieldSpec, Method, Registry};
//!
//! fn bootstrap() -> restgen::Result<Registry> {
//!     let mut registry = Registry::new();
//!     registry.group("base", "Base");
//!     registry.register_error(ErrorDescriptor::new("NOT_FOUND_ERROR", -1001, "Not found"))?;
//!     registry.register(
//!         Endpoint::builder(Method::Get, "/base/index")
//!             .title("Index")
//!             .group("base")
//!             .query("silent", FieldSpec::new("Boolean").comment("Suppress greeting"))
//!             .build(),
//!     )?;
//!     Ok(registry)
//! }
//! ```

pub mod endpoint;
pub mod error;
pub mod errors;
pub mod registry;
pub mod schema;
pub mod types;

// Re-export main types
pub use endpoint::{Endpoint, EndpointBuilder, Method, ResponseSpec};
pub use error::{RegistryError, Result};
pub use errors::{ErrorCatalog, ErrorDescriptor};
pub use registry::{ApiInfo, Registry};
pub use schema::{FieldSpec, Schema, SchemaRegistry};
pub use types::{TypeDescriptor, TypeRegistry};

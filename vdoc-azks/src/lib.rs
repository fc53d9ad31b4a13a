//! Configuration and state documents of the AKS module.
//!
//! ```
//! use vdoc_azks::v0::Config;
//! use vdoc_core::Document;
//!
//! let config = Config::init("v1.0.0");
//! assert!(config.validate().is_ok());
//! ```

pub mod v0;

//! # fabnet Test Suite
//!
//! Cross-crate scenarios: topology in, engine calls out, checked against the
//! recording `InMemoryRuntime`.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Topologies and service construction
//! └── integration/
//!     ├── scenarios.rs   # Peer-only, peer+orderer and listing scenarios
//!     ├── failures.rs    # Create/start/network/list failure propagation
//!     └── concurrency.rs # Group ordering and cross-group cancellation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fabnet-tests
//! cargo test -p fabnet-tests integration::failures
//! ```

pub mod fixtures;
pub mod integration;

//! Staged address resolution and broadband coverage lookup.
//!
//! [`CoveragePipeline::resolve_coverage`] is the entry point; everything else
//! is exported for the binaries and for tests that drive single stages.

pub mod address;
pub mod envelope;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod resolvers;
pub mod tls;
pub mod transport;
pub mod types;

pub use address::{normalize_address, NormalizedAddress};
pub use error::{CoverageError, DataShapeError, InputError, TransportError};
pub use pipeline::{CoverageOutcome, CoveragePipeline, CoverageReport, Stage};
pub use report::{CoverageStatus, ReportRow};
pub use tls::TlsPosture;
pub use transport::{HttpTransport, RawResponse, Transport, TransportSettings};

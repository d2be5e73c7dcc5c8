//! Tour page sources

pub mod http;
pub mod page;
pub mod payload;

pub use http::{Fetcher, HttpTransport, Transport};
pub use page::extract_payload;
pub use payload::{RawCoordinate, SourceTour};

//! riskline-ingest: turns vendor-specific JSON shapes into normalized
//! observation records.
//!
//! Three vendor families are understood: FRED-style economic series,
//! port congestion reports, and freight cost indices. Every malformed
//! payload is a typed [`IngestError`](riskline_core::IngestError), so a
//! caller can always tell "no data" apart from "bad data".

mod parser;
mod record;

pub use parser::{parse_fred, parse_payload, parse_port_congestion};
pub use record::ObservationRecord;

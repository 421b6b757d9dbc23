//! Polling Driver
//!
//! One periodic task drives the batch-read → decode → store → history →
//! alert pipeline. Each tick runs to completion before the next is
//! scheduled, so two pipeline runs never overlap. The transport read is
//! the only suspension point per tick.

mod clock;
mod config;
mod driver;
mod sink;
mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::PollerConfig;
pub use driver::{Poller, PollerHandle, TickReport};
pub use sink::{AlertSink, SampleSink, SinkError};
pub use transport::{MockTransport, Transport, TransportError};

//! Shift state machine.
//!
//! ```text
//! NoOpenShift --clock_in--> Active --start_break--> OnBreak
//!                             ^                        |
//!                             +-------end_break--------+
//!
//! Active | OnBreak --clock_out--> Completed
//! (administrative) ------------> Cancelled
//! ```
//!
//! Clock-out is the only transition that also closes a break that is still
//! open. `Completed` and `Cancelled` are terminal.

mod machine;

pub use machine::{ShiftAction, ShiftMachine};

//! Terminal sinks writing textual output.

pub mod delimited;

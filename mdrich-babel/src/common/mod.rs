//! Logic shared by the exporter, the range adapter and the inspect formats.

pub mod segments;

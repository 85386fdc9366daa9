// Application layer: the two run modes wired on top of core.

pub mod batch;
pub mod single;

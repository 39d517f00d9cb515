pub mod attach;
pub mod exec;
pub mod scan;
pub mod signatures;

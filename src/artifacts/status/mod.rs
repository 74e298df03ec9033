//! Status report types

pub mod file_status;

// Record I/O: delimited tables in, labeled tables out

pub mod csv;
pub mod error;
pub mod output;

pub use error::IoError;

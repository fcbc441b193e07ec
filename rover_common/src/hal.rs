//! Hardware abstraction: the narrow collaborator interfaces the control
//! core talks to, and the error type they report.

pub mod driver;
pub mod types;

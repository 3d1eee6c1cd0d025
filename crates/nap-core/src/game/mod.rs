pub mod bid;
pub mod rules;
pub mod session;
pub mod snapshot;
pub mod track;

pub mod goal;
pub mod status;
pub mod study;
pub mod subject;

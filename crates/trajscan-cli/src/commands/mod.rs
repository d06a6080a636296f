pub mod info;
pub mod scan;

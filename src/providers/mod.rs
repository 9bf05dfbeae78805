pub mod memory;
pub mod object_store;

pub mod assembler;
pub mod carpool_result;
pub mod fare;
pub mod item_builder;
pub mod params;
pub mod perspective;
pub mod result_item;
pub mod result_role;
pub mod temporal;
pub mod timeline;

pub mod first_present;
pub mod id_newtype;

pub mod cors;
pub mod not_found;

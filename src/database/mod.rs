pub mod db;

pub use db::connect_store;

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod kv;
pub mod models;
pub mod response;
pub mod validate;
pub mod voyager;

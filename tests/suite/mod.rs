mod concurrency;
mod config;
mod duplicate;
mod point;
mod serialization;
mod store_guard;

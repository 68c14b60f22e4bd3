//! File-backed history store

mod json_repository;

pub use json_repository::JsonHistoryRepository;

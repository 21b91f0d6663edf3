// src/repositories/mod.rs
//
// Repositories - Collection Storage Layer

pub mod movie_repository;

pub use movie_repository::{InMemoryMovieRepository, MovieRepository};

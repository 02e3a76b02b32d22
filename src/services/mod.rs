//! Business logic services

pub mod auth;
pub mod books;

use crate::{config::SecurityConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub access: auth::AccessControl,
}

impl Services {
    /// Create all services over the given store
    pub fn new(repository: Repository, security: &SecurityConfig) -> AppResult<Self> {
        Ok(Self {
            books: books::BookService::new(repository),
            access: auth::AccessControl::from_config(security)?,
        })
    }
}

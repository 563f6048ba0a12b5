//! Test doubles for the repository layer.

mod mock_contact_repository;

pub use mock_contact_repository::MockContactRepository;

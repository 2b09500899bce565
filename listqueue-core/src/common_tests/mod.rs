//! Reusable queue checks shared by unit and integration tests.

//! External API clients

pub mod codeforces;

pub use codeforces::{ApiError, CodeforcesClient};

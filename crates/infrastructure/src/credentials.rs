//! Password hashing
//!
//! bcrypt is CPU bound, so hashing and verification run on the blocking pool
//! instead of stalling the async workers.

use taskboard_core::{TaskboardError, TaskboardResult};

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &str) -> TaskboardResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| TaskboardError::internal(format!("password hashing task failed: {e}")))?
            .map_err(|e| TaskboardError::internal(format!("failed to hash password: {e}")))
    }

    /// A malformed stored hash counts as a mismatch.
    pub async fn verify(&self, password: &str, hash: &str) -> TaskboardResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
            .await
            .map_err(|e| TaskboardError::internal(format!("password verification task failed: {e}")))
    }

    /// Burns the same work as a real verification so unknown usernames do not
    /// answer faster than wrong passwords.
    pub async fn waste(&self, password: &str) -> TaskboardResult<()> {
        self.hash(password).await.map(|_| ())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("s3cret").await.unwrap();

        assert_ne!(hash, "s3cret");
        assert!(hasher.verify("s3cret", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("s3cret", "not-a-bcrypt-hash").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_cost_is_internal_error() {
        let hasher = PasswordHasher::new(2);
        let err = hasher.hash("s3cret").await.unwrap_err();
        assert!(matches!(err, TaskboardError::Internal(_)));
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordHasher::default().cost(), bcrypt::DEFAULT_COST);
    }
}

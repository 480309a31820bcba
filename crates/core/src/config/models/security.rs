use serde::{Deserialize, Serialize};

/// bcrypt accepts work factors in this range.
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub password_hash_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: 12,
        }
    }
}

impl SecurityConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.password_hash_cost) {
            return Err(anyhow::anyhow!(
                "password_hash_cost must be between {MIN_HASH_COST} and {MAX_HASH_COST}"
            ));
        }
        Ok(())
    }
}

use rand::RngCore;
use rand::rngs::OsRng;
use uuid::{Builder, Uuid};

use crate::utils::error::StoreError;

/// Source of fresh topic identifiers.
///
/// The store draws every new id from an `IdSource`. Production code uses
/// [`OsRandomIds`]; tests swap in deterministic or failing sources.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> Result<Uuid, StoreError>;
}

/// Random v4 identifiers filled from the operating system's entropy source.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomIds;

impl IdSource for OsRandomIds {
    fn next_id(&self) -> Result<Uuid, StoreError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| StoreError::IdentifierGeneration(e.to_string()))?;
        Ok(Builder::from_random_bytes(bytes).into_uuid())
    }
}

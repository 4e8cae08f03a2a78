use chrono::{DateTime, Utc};
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};

const ID_LEN: usize = 16;

/// Short hex id from the record's identifying text, its timestamp and a nonce,
/// so two records created in the same millisecond still differ.
pub fn new_id(seed: &str, at: DateTime<Utc>) -> String {
    let nonce: u64 = thread_rng().gen();

    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(at.timestamp_millis().to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let mut id = hex::encode(hasher.finalize());
    id.truncate(ID_LEN);
    id
}

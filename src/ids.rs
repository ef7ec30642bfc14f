//! Random identifiers for short codes and account ids

use rand::{distr::Alphanumeric, Rng};

/// Number of characters in every generated identifier
pub const ID_LEN: usize = 6;

/// Draws a 6-character identifier from `A-Z`, `a-z` and `0-9`.
///
/// Uses the thread-local, non-cryptographic RNG and gives no uniqueness
/// guarantee on its own; see [`allocate`].
pub fn generate() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

/// Draws identifiers until `taken` reports one as unused.
pub fn allocate<E>(mut taken: impl FnMut(&str) -> Result<bool, E>) -> Result<String, E> {
    loop {
        let candidate = generate();
        if !taken(&candidate)? {
            return Ok(candidate);
        }
        tracing::debug!("identifier collision on {candidate}, drawing again");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        for _ in 0..100 {
            let id = generate();
            assert_eq!(id.len(), ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_allocate_skips_taken_ids() {
        let mut rejected = Vec::new();
        let id = allocate(|candidate| {
            if rejected.len() < 3 {
                rejected.push(candidate.to_string());
                Ok::<_, ()>(true)
            } else {
                Ok(false)
            }
        })
        .unwrap();

        assert_eq!(rejected.len(), 3);
        assert_eq!(id.len(), ID_LEN);
    }

    #[test]
    fn test_allocate_propagates_errors() {
        let result = allocate(|_| Err::<bool, _>("store down"));
        assert_eq!(result, Err("store down"));
    }
}

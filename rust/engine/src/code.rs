use rand::Rng;

// Uppercase letters and digits minus the visually confusable I, O, 0, 1.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const CODE_LENGTH: usize = 6;

/// Draws one candidate join code. Uniqueness is the store's concern; callers
/// retry with a fresh draw on collision.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Canonical form for lookups: codes are compared case-insensitively and
/// ignoring surrounding whitespace.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn codes_use_only_the_unambiguous_alphabet() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)), "{code}");
            for confusable in ['0', 'O', '1', 'I'] {
                assert!(!code.contains(confusable), "{code}");
            }
        }
    }

    #[test]
    fn same_seed_draws_the_same_codes() {
        let mut a = ChaCha20Rng::seed_from_u64(42);
        let mut b = ChaCha20Rng::seed_from_u64(42);
        assert_eq!(generate_code(&mut a), generate_code(&mut b));
    }

    #[test]
    fn normalization_uppercases_and_trims() {
        assert_eq!(normalize_code("  abq2x9 "), "ABQ2X9");
        assert_eq!(normalize_code("ABQ2X9"), "ABQ2X9");
    }
}

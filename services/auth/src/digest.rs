//! services/auth/src/digest.rs
//!
//! The credential digest used to compare submitted passwords with stored ones.
//!
//! **Not secure.** This is a 32-bit rolling string hash kept for demonstration
//! and for compatibility with digests already persisted by earlier clients. It is
//! fast, deterministic and trivially collidable, and offers no protection for real
//! secrets. Production use needs a salted, slow password hash (e.g. Argon2), which
//! would change every stored digest.

/// Maps `password` to a token of the form `h<digits>`.
///
/// Folds `h = h * 31 + unit` with 32-bit wrap-around over the UTF-16 code units
/// of the input, then renders the absolute value.
pub fn credential_digest(password: &str) -> String {
    let h = password.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    });
    // Widened so that i32::MIN has an absolute value.
    format!("h{}", i64::from(h).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(credential_digest(""), "h0");
        assert_eq!(credential_digest("p1"), "h3521");
        assert_eq!(credential_digest("abc"), "h96354");
        assert_eq!(credential_digest("senha123"), "h1251475389");
    }

    #[test]
    fn overflow_wraps_and_sign_is_dropped() {
        assert_eq!(credential_digest("Hello World"), "h862545276");
    }

    #[test]
    fn hashes_utf16_code_units() {
        assert_eq!(credential_digest("ç"), "h231");
        // Surrogate pair D83D DE00.
        assert_eq!(credential_digest("😀"), "h1772899");
    }

    #[test]
    fn deterministic() {
        assert_eq!(credential_digest("secret"), credential_digest("secret"));
        assert_ne!(credential_digest("Secret"), credential_digest("secret"));
    }
}

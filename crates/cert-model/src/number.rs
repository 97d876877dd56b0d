//! Certificate and ATC number generation and validation
//!
//! Generated numbers are always uppercase `FIBQ-XXXX-XXXX`. Validation is
//! case-insensitive; it gates the generator and form input only, never the
//! verification lookup.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_group(rng: &mut impl Rng) -> String {
    (0..4)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate a fresh certificate number, format `FIBQ-XXXX-XXXX`
pub fn generate_certificate_number() -> String {
    let mut rng = rand::rng();
    format!("FIBQ-{}-{}", random_group(&mut rng), random_group(&mut rng))
}

/// Generate a fresh ATC code, format `ATC-` + 4 digits
pub fn generate_atc_code() -> String {
    let mut rng = rand::rng();
    format!("ATC-{:04}", rng.random_range(0..10_000))
}

/// Check `FIBQ-XXXX-XXXX` (4 alphanumerics per group), case-insensitive
pub fn is_valid_certificate_number(input: &str) -> bool {
    let upper = input.trim().to_ascii_uppercase();
    let mut parts = upper.split('-');

    let (prefix, a, b) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(p), Some(a), Some(b), None) => (p, a, b),
        _ => return false,
    };

    prefix == "FIBQ" && is_group(a) && is_group(b)
}

fn is_group(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Check `ATC-` + exactly 4 digits
pub fn is_valid_atc_code(input: &str) -> bool {
    let upper = input.trim().to_ascii_uppercase();
    match upper.strip_prefix("ATC-") {
        Some(digits) => digits.len() == 4 && digits.bytes().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_validate() {
        for _ in 0..100 {
            let number = generate_certificate_number();
            assert!(is_valid_certificate_number(&number), "rejected {number}");
            assert_eq!(number, number.to_ascii_uppercase());
            assert!(number.starts_with("FIBQ-"));
            assert_eq!(number.len(), "FIBQ-XXXX-XXXX".len());
        }
    }

    #[test]
    fn validation_is_case_insensitive() {
        assert!(is_valid_certificate_number("fibq-a1b2-c3d4"));
        assert!(is_valid_certificate_number("FIBQ-A1B2-C3D4"));
        assert!(is_valid_certificate_number("  FIBQ-A1B2-C3D4  "));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(!is_valid_certificate_number(""));
        assert!(!is_valid_certificate_number("FIBQ-A1B2"));
        assert!(!is_valid_certificate_number("FIBQ-A1B2-C3D4-E5F6"));
        assert!(!is_valid_certificate_number("ABCD-A1B2-C3D4"));
        assert!(!is_valid_certificate_number("FIBQ-A1B-C3D4"));
        assert!(!is_valid_certificate_number("FIBQ-A1B!-C3D4"));
    }

    #[test]
    fn generated_atc_codes_validate() {
        for _ in 0..100 {
            let code = generate_atc_code();
            assert!(is_valid_atc_code(&code), "rejected {code}");
        }
    }

    #[test]
    fn malformed_atc_codes_are_rejected() {
        assert!(!is_valid_atc_code("ATC-12"));
        assert!(!is_valid_atc_code("ATC-12345"));
        assert!(!is_valid_atc_code("ATC-12a4"));
        assert!(!is_valid_atc_code("XYZ-1234"));
    }
}

use subtle::ConstantTimeEq;

/// Exact comparison of a caller-supplied secret against the expected value.
///
/// Runs in constant time for equal-length inputs; a length mismatch returns early.
pub fn secrets_match(expected: &str, candidate: &str) -> bool {
    let expected_bytes = expected.as_bytes();
    let candidate_bytes = candidate.as_bytes();

    if expected_bytes.len() != candidate_bytes.len() {
        return false;
    }

    expected_bytes.ct_eq(candidate_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_secrets_match() {
        assert!(secrets_match("s3cr3t", "s3cr3t"));
    }

    #[test]
    fn different_secret_of_same_length_does_not_match() {
        assert!(!secrets_match("s3cr3t", "s3cr3T"));
    }

    #[test]
    fn prefix_does_not_match() {
        assert!(!secrets_match("s3cr3t", "s3cr"));
        assert!(!secrets_match("s3cr3t", "s3cr3t "));
    }

    #[test]
    fn empty_candidate_does_not_match() {
        assert!(!secrets_match("s3cr3t", ""));
    }
}

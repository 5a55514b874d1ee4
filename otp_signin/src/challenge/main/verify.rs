use subtle::ConstantTimeEq;

/// Check a submitted answer against the expected passcode.
///
/// The comparison is constant time for equal-length inputs so response
/// timing does not leak how many leading digits matched.
pub(crate) fn verify_auth_challenge(expected: &str, answer: &str) -> bool {
    if expected.len() != answer.len() {
        return false;
    }
    expected.as_bytes().ct_eq(answer.as_bytes()).into()
}

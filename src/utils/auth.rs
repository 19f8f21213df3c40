/// Check an admin API key in constant time
///
/// An unset expected key never matches, which keeps admin endpoints closed
/// until a key is configured.
pub fn verify_api_key(provided: &str, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return false;
    };

    provided.len() == expected.len()
        && provided
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

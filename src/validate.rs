/// Checks a candidate Starknet address: `0x` prefix, total length between 10
/// and 80 inclusive, and only hex digits (either case) after the prefix.
///
/// Runs at the API boundary before any network call; addresses are treated as
/// opaque keys afterwards.
pub fn is_valid_address(addr: &str) -> bool {
    if !addr.starts_with("0x") {
        return false;
    }
    if addr.len() < 10 || addr.len() > 80 {
        return false;
    }
    addr.as_bytes()[2..].iter().all(u8::is_ascii_hexdigit)
}

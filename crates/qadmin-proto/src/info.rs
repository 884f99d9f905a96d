//! Engine info strings.
//!
//! Userinfo travels as `\key\value\key\value`. The leading backslash is
//! optional. Values cannot contain backslashes.

/// Check that an info string is safe to store and later interpolate.
///
/// Quotes and semicolons are rejected; every other byte is accepted.
pub fn validate(s: &str) -> bool {
    !s.contains(['"', ';'])
}

/// Look up `key` in an info string.
///
/// Keys match exactly (engines treat them case-sensitively). Returns
/// `None` when the key is absent.
///
/// ```
/// use qadmin_proto::value_for_key;
///
/// let info = r"\name\^1Bob\ip\10.0.0.5:27960\cl_guid\ABCD";
/// assert_eq!(value_for_key(info, "ip"), Some("10.0.0.5:27960"));
/// assert_eq!(value_for_key(info, "rate"), None);
/// ```
pub fn value_for_key<'a>(s: &'a str, key: &str) -> Option<&'a str> {
    let s = s.strip_prefix('\\').unwrap_or(s);
    let mut parts = s.split('\\');
    while let Some(k) = parts.next() {
        let v = parts.next().unwrap_or("");
        if k == key {
            return Some(v);
        }
    }
    None
}

/// Drop a `:port` suffix from an address.
///
/// Engines report `ip` as `host:port`, or `[v6]:port` for IPv6; bans and
/// login matching use the bare host only. An unbracketed address with more
/// than one `:` is IPv6 without a port and is returned unchanged.
///
/// ```
/// use qadmin_proto::strip_port;
///
/// assert_eq!(strip_port("10.0.0.5:27960"), "10.0.0.5");
/// assert_eq!(strip_port("[2001:db8::1]:27960"), "2001:db8::1");
/// assert_eq!(strip_port("2001:db8::1"), "2001:db8::1");
/// ```
pub fn strip_port(addr: &str) -> &str {
    if let Some(rest) = addr.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((host, _)) => host,
            None => addr,
        };
    }
    match addr.split_once(':') {
        Some((host, port)) if !port.contains(':') => host,
        _ => addr,
    }
}

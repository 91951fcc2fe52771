use rand::Rng;
use std::net::IpAddr;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const CLIENT_ID_SUFFIX_LEN: usize = 13;

// "client-<millis>-<13 base36 chars>"; identifies, does not authenticate
pub fn generate_client_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CLIENT_ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("client-{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}

/// Rate-limit bucket for a request.
///
/// A page that kept the id it got from `/api/session` is throttled by that id.
/// Anyone else is throttled by peer address, so anonymous visitors never share
/// a budget with each other. The two namespaces cannot collide, which keeps a
/// header from draining somebody's address bucket. Both are advisory.
pub fn throttle_key(client_id: Option<&str>, peer: IpAddr) -> String {
    match client_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("id:{id}"),
        None => format!("peer:{peer}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const A: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    const B: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

    #[test]
    fn client_id_shape() {
        let id = generate_client_id();
        let mut parts = id.splitn(3, '-');
        assert_eq!(parts.next(), Some("client"));
        assert!(parts.next().unwrap().parse::<i64>().is_ok());
        let suffix = parts.next().unwrap();
        assert_eq!(suffix.len(), CLIENT_ID_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn minted_ids_differ() {
        assert_ne!(generate_client_id(), generate_client_id());
    }

    #[test]
    fn anonymous_visitors_get_their_own_key() {
        assert_eq!(throttle_key(None, A), "peer:10.0.0.1");
        assert_ne!(throttle_key(None, A), throttle_key(None, B));
        assert_eq!(throttle_key(Some("   "), A), throttle_key(None, A));
    }

    #[test]
    fn session_id_wins_over_address() {
        assert_eq!(throttle_key(Some(" client-1-abc "), A), "id:client-1-abc");
        assert_eq!(throttle_key(Some("client-1-abc"), A), throttle_key(Some("client-1-abc"), B));
    }

    #[test]
    fn header_cannot_name_an_address_bucket() {
        assert_ne!(throttle_key(Some("peer:10.0.0.1"), B), throttle_key(None, A));
    }
}

//! Random MAC address generation.

use rand::Rng;

/// First octet of every generated address: locally administered, unicast.
pub const LOCAL_UNICAST_PREFIX: u8 = 0x02;

/// Generate a random locally administered unicast MAC address.
///
/// The first octet is always `02`; the other five are uniformly random.
/// The result is lowercase and colon separated, e.g. `02:5f:a0:11:9c:e3`.
pub fn random_locally_administered_mac() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; 6];
    bytes[0] = LOCAL_UNICAST_PREFIX;
    rng.fill(&mut bytes[1..]);
    format_mac(&bytes)
}

/// Format six bytes as `xx:xx:xx:xx:xx:xx`.
pub fn format_mac(bytes: &[u8; 6]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_mac_shape() {
        for _ in 0..200 {
            let mac = random_locally_administered_mac();
            let groups: Vec<&str> = mac.split(':').collect();
            assert_eq!(groups.len(), 6, "{}", mac);
            assert_eq!(groups[0], "02");
            for group in groups {
                assert_eq!(group.len(), 2);
                assert!(group
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            }
        }
    }

    #[test]
    fn test_random_macs_differ() {
        let first = random_locally_administered_mac();
        let differs = (0..20).any(|_| random_locally_administered_mac() != first);
        assert!(differs);
    }

    #[test]
    fn test_format_mac() {
        assert_eq!(
            format_mac(&[0x02, 0x00, 0xab, 0x0c, 0xff, 0x10]),
            "02:00:ab:0c:ff:10"
        );
    }
}

//! Peer discovery seeds

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

/// Seconds in one week
const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// A fixed seed record: IPv6 (or IPv4-mapped) address and port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSpec6 {
    /// Address bytes in network order
    pub addr: [u8; 16],
    /// TCP port
    pub port: u16,
}

/// Embedded mainnet fixed seeds
pub const MAINNET_FIXED_SEEDS: &[SeedSpec6] = &[];

/// A DNS seed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    /// Display name
    pub name: &'static str,
    /// Host to resolve
    pub host: &'static str,
}

impl DnsSeed {
    /// Seed whose name and host are the same
    pub const fn new(host: &'static str) -> Self {
        Self { name: host, host }
    }
}

/// A fixed seed address ready for the address manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    /// Socket address
    pub addr: SocketAddr,
    /// Synthetic last-seen time
    pub last_seen: DateTime<Utc>,
}

/// Convert fixed seed records into addresses.
///
/// Each seed gets a random last-seen time between one and two weeks before
/// `now`; once connected, the node learns addresses with newer timestamps and
/// stops favouring the seeds. Times saturate at the earliest representable
/// instant.
pub fn convert_seed6<R: Rng>(
    specs: &[SeedSpec6],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SeedAddress> {
    specs
        .iter()
        .map(|spec| {
            let ip = Ipv6Addr::from(spec.addr);
            let ip = match ip.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => IpAddr::V6(ip),
            };
            let age = rng.gen_range(0..ONE_WEEK_SECS) + ONE_WEEK_SECS;
            let last_seen = now
                .checked_sub_signed(Duration::seconds(age))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            SeedAddress {
                addr: SocketAddr::new(ip, spec.port),
                last_seen,
            }
        })
        .collect()
}

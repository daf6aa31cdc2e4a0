use regrws::models::IpVersion;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Longest network name the registry accepts for the customer part
const SLUG_MAX_CHARS: usize = 20;

/// A CIDR block such as `192.0.2.0/28` or `2001:db8::/48`.
///
/// Host bits must be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    address: IpAddr,
    prefix: u8,
}

impl Network {
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    pub const fn version(&self) -> IpVersion {
        match self.address {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }

    /// Last address of the block
    pub fn broadcast(&self) -> IpAddr {
        match self.address {
            IpAddr::V4(addr) => {
                let host = u32::MAX.checked_shr(u32::from(self.prefix)).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(addr) | host))
            }
            IpAddr::V6(addr) => {
                let host = u128::MAX.checked_shr(u32::from(self.prefix)).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(addr) | host))
            }
        }
    }

    /// Range passed to `find_net`: network..broadcast, which for an IPv4
    /// /31 is the pair of addresses network..network+1
    pub fn search_range(&self) -> (IpAddr, IpAddr) {
        (self.address, self.broadcast())
    }

    /// `<CUSTOMER-SLUG>-<network>` with separators replaced by `-`
    pub fn net_name(&self, customer_name: &str) -> String {
        let slug: String = customer_name
            .to_uppercase()
            .replace(' ', "-")
            .chars()
            .take(SLUG_MAX_CHARS)
            .collect();
        let network = self.to_string().replace(['.', '/', ':'], "-");
        format!("{slug}-{network}")
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (address, prefix) = value
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("'{value}' is not in address/prefix form"))?;
        let address: IpAddr = address
            .parse()
            .map_err(|e| format!("invalid address in '{value}': {e}"))?;
        let prefix: u8 = prefix
            .parse()
            .map_err(|e| format!("invalid prefix length in '{value}': {e}"))?;

        let max = if address.is_ipv4() { 32 } else { 128 };
        if prefix > max {
            return Err(format!("prefix length /{prefix} exceeds {max} in '{value}'"));
        }

        let network = Self { address, prefix };
        let host_bits_set = match address {
            IpAddr::V4(addr) => {
                u32::from(addr) & u32::MAX.checked_shr(u32::from(prefix)).unwrap_or(0) != 0
            }
            IpAddr::V6(addr) => {
                u128::from(addr) & u128::MAX.checked_shr(u32::from(prefix)).unwrap_or(0) != 0
            }
        };
        if host_bits_set {
            return Err(format!("'{value}' has host bits set"));
        }
        Ok(network)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

// Fri Oct 16 2026 - Alex

use crate::memory::map::ADDRESS_SPACE_SIZE;
use crate::memory::Address;

/// Value left in slots whose read timed out.
pub const UNREAD_SENTINEL: u8 = 0xFF;

/// One full pass over the readable target space, indexed by address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSnapshot {
    bytes: Vec<u8>,
}

impl TargetSnapshot {
    pub fn new() -> Self {
        Self {
            bytes: vec![UNREAD_SENTINEL; ADDRESS_SPACE_SIZE],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, addr: Address) -> Option<u8> {
        self.bytes.get(addr.as_usize()).copied()
    }

    pub fn set(&mut self, addr: Address, value: u8) -> bool {
        match self.bytes.get_mut(addr.as_usize()) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn addresses() -> impl Iterator<Item = Address> {
        (0..ADDRESS_SPACE_SIZE as u16).map(Address::new)
    }
}

impl Default for TargetSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshot_is_sentinel() {
        let snap = TargetSnapshot::new();
        assert_eq!(snap.len(), 8192);
        assert!(snap.as_bytes().iter().all(|&b| b == UNREAD_SENTINEL));
    }

    #[test]
    fn test_set_outside_space() {
        let mut snap = TargetSnapshot::new();
        assert!(snap.set(Address::new(0x1FFF), 0x12));
        assert!(!snap.set(Address::new(0x2000), 0x12));
        assert_eq!(snap.get(Address::new(0x1FFF)), Some(0x12));
        assert_eq!(TargetSnapshot::addresses().count(), 8192);
    }
}

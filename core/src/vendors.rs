use ouidb_common::network::mac::AddressKey;
use pnet::util::MacAddr;

use crate::database::OuiDatabase;

/// Defines the contract for resolving device manufacturers from MAC addresses.
pub trait VendorRepository {
    /// Retrieves the vendor name for a given MAC address.
    ///
    /// # Arguments
    /// * `mac_addr` - The MAC address to lookup.
    ///
    /// # Returns
    /// * `Some(String)` - The name of the vendor if found.
    /// * `None` - If the OUI is unknown.
    fn get_vendor(&self, mac_addr: MacAddr) -> Option<String>;
}

impl<T: OuiDatabase + ?Sized> VendorRepository for T {
    fn get_vendor(&self, mac_addr: MacAddr) -> Option<String> {
        self.lookup(AddressKey::from(mac_addr))
            .ok()
            .map(|record| record.manufacturer().to_string())
    }
}

//! Shared helpers for PC/SC tests that need real hardware

use myna_apdu_transport_pcsc::{ConnectStrategy, PcscConfig, PcscDeviceManager, PcscTransport};

/// Open a transport to the first reader with a card, if there is one
pub fn get_test_transport() -> Option<PcscTransport> {
    let manager = PcscDeviceManager::new().ok()?;
    manager
        .connect_strategy(ConnectStrategy::AnyCard, PcscConfig::default())
        .ok()
}

// Device descriptors sampled into summaries and snapshots
//
// The session does not cache device state; it samples through a DeviceProbe
// at render/export time so the reported values reflect the environment at
// that instant (viewport resizes between snapshots show up).

use serde::Serialize;

/// Environment descriptors for the browsing context
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// "WxH" in pixels; a missing viewport reports "0x0"
    pub viewport: String,
    pub user_agent: String,
    pub locale: String,
    pub platform: String,
}

/// Source of device descriptors, read fresh on every sample
pub trait DeviceProbe: Send {
    fn sample(&self) -> DeviceInfo;
}

/// Probe with fixed descriptors, used by the demo driver and tests
pub struct StaticProbe {
    info: DeviceInfo,
}

impl StaticProbe {
    pub fn new(width: u32, height: u32, user_agent: &str, locale: &str, platform: &str) -> Self {
        Self {
            info: DeviceInfo {
                viewport: format!("{width}x{height}"),
                user_agent: user_agent.to_string(),
                locale: locale.to_string(),
                platform: platform.to_string(),
            },
        }
    }
}

impl DeviceProbe for StaticProbe {
    fn sample(&self) -> DeviceInfo {
        self.info.clone()
    }
}

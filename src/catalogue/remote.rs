//! Remote controls: one command fanned out to every device under a remote.

use std::fmt;

use thiserror::Error;

use crate::domain::{Capability, Hierarchy, HierarchyResult, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnOn,
    TurnOff,
    SetChannel(u16),
    /// Only advanced remotes offer this, so it is sent to their subtree alone.
    Mute,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeviceError {
    #[error("channel {channel} not available (max {max})")]
    ChannelOutOfRange { channel: u16, max: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Television {
    pub brand: String,
    pub max_channel: u16,
}

impl Television {
    pub fn new(brand: impl Into<String>, max_channel: u16) -> Self {
        Self {
            brand: brand.into(),
            max_channel,
        }
    }
}

impl fmt::Display for Television {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TV", self.brand)
    }
}

impl Capability<Command> for Television {
    type Output = String;
    type Error = DeviceError;

    fn perform(&self, _label: &str, op: &Command) -> Result<String, DeviceError> {
        match *op {
            Command::TurnOn => Ok(format!("{} is turned on", self)),
            Command::TurnOff => Ok(format!("{} is turned off", self)),
            Command::SetChannel(channel) if channel > self.max_channel => {
                Err(DeviceError::ChannelOutOfRange {
                    channel,
                    max: self.max_channel,
                })
            }
            Command::SetChannel(channel) => Ok(format!("{} set to channel {}", self, channel)),
            Command::Mute => Ok(format!("{} is muted", self)),
        }
    }
}

/// Container decoration naming the remote a command went through.
pub fn remote_heading(label: &str) -> String {
    format!("{}:", label)
}

/// Basic Remote → Sony (99 channels), Advanced Remote → Samsung (50 channels).
///
/// Returns a living-room container holding both remotes.
pub fn living_room(h: &mut Hierarchy<Television>) -> HierarchyResult<NodeId> {
    let room = h.new_container("Living Room");
    for (remote, device, tv) in [
        ("Basic Remote", "sony", Television::new("Sony", 99)),
        ("Advanced Remote", "samsung", Television::new("Samsung", 50)),
    ] {
        let remote = h.new_container(remote);
        let device = h.new_leaf(device, tv);
        h.attach(remote, device)?;
        h.attach(room, remote)?;
    }
    Ok(room)
}

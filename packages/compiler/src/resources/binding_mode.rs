//! Binding modes

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Direction of data flow for a property binding
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BindingMode: u8 {
        const ONE_TIME = 0b0001;
        const TO_VIEW = 0b0010;
        const FROM_VIEW = 0b0100;
        const TWO_WAY = Self::TO_VIEW.bits() | Self::FROM_VIEW.bits();
        /// Defer to the owning resource's default
        const DEFAULT = 0b1000;
    }
}

impl Default for BindingMode {
    fn default() -> Self {
        BindingMode::DEFAULT
    }
}

impl BindingMode {
    /// Fixed mode for a binding command. `bind` has none; it resolves
    /// against the target bindable.
    pub fn from_command(command: &str) -> Option<BindingMode> {
        match command {
            "one-time" => Some(BindingMode::ONE_TIME),
            "to-view" => Some(BindingMode::TO_VIEW),
            "from-view" => Some(BindingMode::FROM_VIEW),
            "two-way" => Some(BindingMode::TWO_WAY),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        const NAMES: [(BindingMode, &str); 5] = [
            (BindingMode::ONE_TIME, "oneTime"),
            (BindingMode::TO_VIEW, "toView"),
            (BindingMode::FROM_VIEW, "fromView"),
            (BindingMode::TWO_WAY, "twoWay"),
            (BindingMode::DEFAULT, "default"),
        ];
        NAMES
            .iter()
            .find(|(mode, _)| mode == self)
            .map(|(_, name)| *name)
            .unwrap_or("mixed")
    }
}

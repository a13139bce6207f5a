// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use thiserror::Error;

use crate::InvalidAddress;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),
    #[error("invalid value {value} (expected {expected})")]
    InvalidValue {
        value: f64,
        expected: &'static str,
    },
    #[error("send: {msg}")]
    Send { msg: Cow<'static, str> },
}

pub type OutputResult<T> = std::result::Result<T, OutputError>;

const LED_OFF: u8 = 0x00;
const LED_ON: u8 = 0x7f;

/// Simple LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedState {
    #[default]
    Off,
    On,
}

impl LedState {
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    #[must_use]
    pub const fn to_u7(self) -> u8 {
        match self {
            Self::Off => LED_OFF,
            Self::On => LED_ON,
        }
    }
}

impl From<bool> for LedState {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

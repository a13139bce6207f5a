// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Atomic value slots
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crossbeam_utils::atomic::AtomicConsume;
use enum_as_inner::EnumAsInner;

use super::Value;

/// Atomic f32 value with limited functionality.
#[derive(Debug)]
#[repr(transparent)]
pub(super) struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    #[must_use]
    pub(super) fn new(value: f32) -> Self {
        let bits = value.to_bits();
        Self {
            bits: AtomicU32::new(bits),
        }
    }

    #[must_use]
    pub(super) fn load(&self, ordering: Ordering) -> f32 {
        f32::from_bits(self.bits.load(ordering))
    }

    pub(super) fn swap(&self, value: f32, ordering: Ordering) -> f32 {
        let bits = value.to_bits();
        f32::from_bits(self.bits.swap(bits, ordering))
    }
}

/// Values are written before the observed flag is set.
const OBSERVED_STORE_ORDERING: Ordering = Ordering::Release;

#[derive(Debug, EnumAsInner)]
enum AtomicValue {
    Bool(AtomicBool),
    F32(AtomicF32),
}

/// A preallocated slot with a single writer and many readers.
///
/// Empty until the first value has been stored.
#[derive(Debug)]
pub(super) struct AtomicSlot {
    observed: AtomicBool,
    value: AtomicValue,
}

impl AtomicSlot {
    #[must_use]
    pub(super) fn new_bool() -> Self {
        Self {
            observed: AtomicBool::new(false),
            value: AtomicValue::Bool(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub(super) fn new_f32() -> Self {
        Self {
            observed: AtomicBool::new(false),
            value: AtomicValue::F32(AtomicF32::new(0.0)),
        }
    }

    #[must_use]
    pub(super) fn load(&self) -> Option<Value> {
        if !self.observed.load_consume() {
            return None;
        }
        let value = match &self.value {
            AtomicValue::Bool(atomic) => Value::Bool(atomic.load(Ordering::Relaxed)),
            AtomicValue::F32(atomic) => Value::F32(atomic.load(Ordering::Relaxed)),
        };
        Some(value)
    }

    /// Store a new value and return the previous value, if any.
    ///
    /// Returns `None` and stores nothing if the type does not match.
    pub(super) fn store(&self, value: Value) -> Option<Option<Value>> {
        let previous = match value {
            Value::Bool(value) => {
                Value::Bool(self.value.as_bool()?.swap(value, Ordering::Relaxed))
            }
            Value::F32(value) => Value::F32(self.value.as_f32()?.swap(value, Ordering::Relaxed)),
        };
        let observed = self.observed.swap(true, OBSERVED_STORE_ORDERING);
        Some(observed.then_some(previous))
    }

    pub(super) fn clear(&self) {
        self.observed.store(false, OBSERVED_STORE_ORDERING);
    }
}

// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard modifiers held during pointer input.

bitflags::bitflags! {
    /// Modifier keys held while a pointer event was generated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CTRL = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Super key.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Modifiers that turn a click into a multi-select click by default.
    pub const MULTI_SELECT: Self = Self::SHIFT.union(Self::CTRL).union(Self::META);

    /// Returns `true` if any of `mask` is held.
    #[must_use]
    pub fn any_of(self, mask: Self) -> bool {
        self.intersects(mask)
    }
}

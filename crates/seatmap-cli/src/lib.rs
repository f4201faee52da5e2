// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seat map developer CLI.
//!
//! Reads text seating plans, builds a [`seatmap_core::SeatBookingView`] over
//! them and replays taps through the same picking path an interactive front
//! end would use.

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)
)]

pub mod cli;
pub mod delegate;
pub mod plan;

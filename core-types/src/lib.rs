// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Shared wire-level types for the ITCH capture converters.

pub mod csv;
pub mod envelope;
pub mod wire;

pub use envelope::{Envelope, ItchRecord, PacketHeader};
pub use wire::{Cursor, WireError};

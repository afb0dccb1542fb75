// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! NASDAQ Equities TotalView-ITCH v5.0 dialect: flat superset record,
//! per-message decoders, and the Arrow/Parquet schema mapping.

mod record;
mod schema;

pub use record::Record;

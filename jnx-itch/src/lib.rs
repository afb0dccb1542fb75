// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Japannext Equities PTS ITCH v1.6 dialect: flat superset record,
//! per-message decoders, and the Arrow/Parquet schema mapping.

mod record;
mod schema;

pub use record::Record;

//! Infrastructure adapters: the external market data source.

pub mod darkstat;

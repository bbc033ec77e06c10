// SPDX-License-Identifier: MPL-2.0
//! Infrastructure adapters implementing the engine's ports.

pub mod http;

pub use http::HttpBackend;

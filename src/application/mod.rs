// SPDX-License-Identifier: MPL-2.0
//! Application-layer seams between the engine and its collaborators.

pub mod port;

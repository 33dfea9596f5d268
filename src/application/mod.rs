// SPDX-License-Identifier: MPL-2.0
//! Application layer - collaborator contracts.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - The notification core (`crate::notify`) only talks to these traits
//! - The iced widgets in `crate::ui` implement them
//! - Tests implement them with recording fakes

pub mod port;

//! Client-side state: controller plus the MVI state machines it drives.

pub mod controller;
pub mod lifecycle;
pub mod mvi;
pub mod selector;
pub mod toast;

//! Structural elements module

mod member;
mod node;
mod support;

pub use member::{Member, MemberKind, ANGLE_TOLERANCE};
pub use node::{MemberEnd, Node, NodeConnection};
pub use support::{Support, SupportKind};

pub(crate) use member::{folded_degrees, orientation};

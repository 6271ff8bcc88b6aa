pub mod registry;
pub mod transaction;

pub use registry::{
    KnownMessage,
    Registry,
};

//! GitHub webhook payloads and delivery signatures.

pub mod event;
pub mod signature;

pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";
pub const HOOK_ID_HEADER: &str = "X-GitHub-Hook-ID";
pub const SIGNATURE_256_HEADER: &str = "X-Hub-Signature-256";

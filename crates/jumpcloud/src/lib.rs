#![forbid(unsafe_code)]
//! Client and typed event model for the JumpCloud Directory Insights API.
//!
//! One call to [`JumpCloudClient::events_since`] issues a single request
//! covering all event kinds and returns an [`EventPage`] partitioned by kind.
//! Classification happens in [`decode_events`]: each raw record is routed on
//! its `service` discriminator and decoded into the matching typed shape in
//! one pass. Unknown kinds are tolerated and dropped; a recognized kind with
//! a malformed body fails the page.

mod client;
mod decode;
mod error;
mod events;

pub use client::{JumpCloudClient, JumpCloudClientOptions, DEFAULT_BASE_URL};
pub use decode::decode_events;
pub use error::JumpCloudError;
pub use events::{
    AdminEvent, AdminResource, AppliedPolicy, AuthContext, AuthMethods, DirectoryEvent, Event,
    EventKind, EventPage, FieldChange, GeoIp, InitiatedBy, LdapEvent, MfaMeta, PasswordMethod,
    PolicyMetadata, RadiusAuthMeta, RadiusEvent, RadiusOuter, SsoApplication, SsoEvent,
    SystemEvent, SystemInfo, SystemResource, UserAgent, WindowsMeta,
};

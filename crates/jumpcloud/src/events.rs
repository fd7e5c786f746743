use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// The event kinds the Directory Insights API can return.
///
/// The wire discriminator is the `service` field on each record:
/// - `directory`: Admin Portal and User Portal activity.
/// - `ldap`: LDAP authentications, including Bind and Search.
/// - `systems`: authentications to macOS, Windows, and Linux systems.
/// - `radius`: RADIUS authentications (Wi-Fi and VPNs).
/// - `sso`: authentications to SAML applications.
/// - `admin`: administrator authentications and changes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EventKind {
    Directory,
    Ldap,
    Systems,
    Radius,
    Sso,
    Admin,
}

impl EventKind {
    /// Maps a wire `service` discriminator to a known kind.
    pub fn from_service(service: &str) -> Option<Self> {
        match service {
            "directory" => Some(Self::Directory),
            "ldap" => Some(Self::Ldap),
            "systems" => Some(Self::Systems),
            "radius" => Some(Self::Radius),
            "sso" => Some(Self::Sso),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// The canonical label stamped on normalized records. Always equals the
    /// discriminator value that selects this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Ldap => "ldap",
            Self::Systems => "systems",
            Self::Radius => "radius",
            Self::Sso => "sso",
            Self::Admin => "admin",
        }
    }
}

/// Actor that initiated an event. Which fields are populated varies by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitiatedBy {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoIp {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub continent_code: String,
    #[serde(default)]
    pub region_name: String,
    #[serde(default)]
    pub region_code: String,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAgent {
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub minor: String,
    #[serde(default)]
    pub os_minor: String,
    #[serde(default)]
    pub os_major: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub os_patch: String,
    #[serde(default)]
    pub patch: String,
    #[serde(default)]
    pub os_full: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub os_name: String,
    #[serde(default)]
    pub device: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordMethod {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthMethods {
    #[serde(default)]
    pub password: PasswordMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedPolicy {
    #[serde(default)]
    pub metadata: PolicyMetadata,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    #[serde(default)]
    pub auth_methods: AuthMethods,
    #[serde(default)]
    pub policies_applied: Vec<AppliedPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadiusAuthMeta {
    #[serde(default)]
    pub user_password_enabled: bool,
    #[serde(default)]
    pub device_cert_enabled: bool,
    #[serde(default)]
    pub user_cert_enabled: bool,
    #[serde(default)]
    pub auth_idp: String,
    #[serde(default)]
    pub userid_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadiusOuter {
    #[serde(default)]
    pub error_message: Value,
    #[serde(default)]
    pub eap_type: Value,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MfaMeta {
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub hostname: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemResource {
    #[serde(default)]
    pub hostname: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminResource {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    #[serde(default)]
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowsMeta {
    #[serde(default)]
    pub logon_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsoApplication {
    #[serde(default)]
    pub display_label: String,
    #[serde(default)]
    pub sso_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sso_url: String,
}

/// An Admin Portal / User Portal activity event.
///
/// `timestamp` is the only field a record must carry: the cursor is computed
/// from it, so a recognized event without one is a decode error. Everything
/// else defaults when absent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEvent {
    #[serde(default)]
    pub jumpcloud_event_type: String,
    #[serde(default)]
    pub initiated_by: InitiatedBy,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub geoip: GeoIp,
    #[serde(default)]
    pub auth_context: AuthContext,
    #[serde(default)]
    pub useragent: UserAgent,
    #[serde(default)]
    pub mfa: bool,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// An LDAP authentication event (Bind, Search, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdapEvent {
    #[serde(default)]
    pub jumpcloud_event_type: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub initiated_by: InitiatedBy,
    #[serde(default)]
    pub operation_type: String,
    #[serde(default)]
    pub start_tls: bool,
    #[serde(default)]
    pub tls_established: bool,
    #[serde(default)]
    pub dn: String,
    #[serde(default)]
    pub auth_meta: AuthContext,
    #[serde(default)]
    pub mech: String,
    #[serde(default)]
    pub auth_method: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub connection_id: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub operation_number: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub deref: i64,
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub scope: i64,
    #[serde(default)]
    pub number_of_results: i64,
    #[serde(default)]
    pub attr: String,
    #[serde(default)]
    pub base: String,
}

/// A system authentication or agent event on macOS, Windows, or Linux.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    #[serde(default)]
    pub jumpcloud_event_type: String,
    #[serde(default)]
    pub initiated_by: InitiatedBy,
    #[serde(default)]
    pub geoip: GeoIp,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub system: SystemInfo,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub system_timestamp: Option<OffsetDateTime>,
    #[serde(default)]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub process_name: String,
    #[serde(default)]
    pub windows_meta: WindowsMeta,
    #[serde(default)]
    pub resource: SystemResource,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
}

/// A RADIUS authentication event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusEvent {
    #[serde(default)]
    pub jumpcloud_event_type: String,
    #[serde(default)]
    pub initiated_by: InitiatedBy,
    #[serde(default)]
    pub error_message: Value,
    #[serde(default)]
    pub auth_type: String,
    #[serde(default)]
    pub geoip: GeoIp,
    #[serde(default)]
    pub nas_mfa_state: String,
    #[serde(default)]
    pub eap_type: String,
    #[serde(default)]
    pub outer: RadiusOuter,
    #[serde(default)]
    pub mfa: bool,
    #[serde(default)]
    pub auth_meta: RadiusAuthMeta,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub mfa_meta: MfaMeta,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// An SSO (SAML application) authentication event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsoEvent {
    #[serde(default)]
    pub jumpcloud_event_type: String,
    #[serde(default)]
    pub initiated_by: InitiatedBy,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub geoip: GeoIp,
    #[serde(default)]
    pub sso_token_success: bool,
    #[serde(default)]
    pub auth_context: AuthContext,
    #[serde(default)]
    pub useragent: UserAgent,
    #[serde(default)]
    pub mfa: bool,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub application: SsoApplication,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub idp_initiated: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// An administrator authentication or change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminEvent {
    #[serde(default)]
    pub jumpcloud_event_type: String,
    #[serde(default)]
    pub initiated_by: InitiatedBy,
    #[serde(default)]
    pub geoip: GeoIp,
    #[serde(default)]
    pub resource: AdminResource,
    #[serde(default)]
    pub auth_method: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub provider: Value,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "@version", default)]
    pub version: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// One decoded event of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Event {
    Directory(DirectoryEvent),
    Ldap(LdapEvent),
    Systems(SystemEvent),
    Radius(RadiusEvent),
    Sso(SsoEvent),
    Admin(AdminEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Directory(_) => EventKind::Directory,
            Self::Ldap(_) => EventKind::Ldap,
            Self::Systems(_) => EventKind::Systems,
            Self::Radius(_) => EventKind::Radius,
            Self::Sso(_) => EventKind::Sso,
            Self::Admin(_) => EventKind::Admin,
        }
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        match self {
            Self::Directory(e) => e.timestamp,
            Self::Ldap(e) => e.timestamp,
            Self::Systems(e) => e.timestamp,
            Self::Radius(e) => e.timestamp,
            Self::Sso(e) => e.timestamp,
            Self::Admin(e) => e.timestamp,
        }
    }
}

/// The decoded result of one fetch call, partitioned by kind.
///
/// Built immutably by [`crate::decode_events`] and handed to the caller once;
/// nothing mutates a page after decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPage {
    pub directory: Vec<DirectoryEvent>,
    pub ldap: Vec<LdapEvent>,
    pub systems: Vec<SystemEvent>,
    pub radius: Vec<RadiusEvent>,
    pub sso: Vec<SsoEvent>,
    pub admin: Vec<AdminEvent>,
}

impl EventPage {
    pub fn len(&self) -> usize {
        self.directory.len()
            + self.ldap.len()
            + self.systems.len()
            + self.radius.len()
            + self.sso.len()
            + self.admin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the page into owned events, kind by kind.
    pub fn into_events(self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.len());
        events.extend(self.directory.into_iter().map(Event::Directory));
        events.extend(self.ldap.into_iter().map(Event::Ldap));
        events.extend(self.systems.into_iter().map(Event::Systems));
        events.extend(self.radius.into_iter().map(Event::Radius));
        events.extend(self.sso.into_iter().map(Event::Sso));
        events.extend(self.admin.into_iter().map(Event::Admin));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_round_trip_through_the_discriminator() {
        for kind in [
            EventKind::Directory,
            EventKind::Ldap,
            EventKind::Systems,
            EventKind::Radius,
            EventKind::Sso,
            EventKind::Admin,
        ] {
            assert_eq!(EventKind::from_service(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_service("mdm"), None);
        assert_eq!(EventKind::from_service(""), None);
    }
}

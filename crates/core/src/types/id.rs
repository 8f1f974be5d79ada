//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_record_id!` macro to create type-safe ID wrappers that
//! prevent accidentally mixing IDs from different entity types.
//!
//! Record IDs are opaque strings assigned by the remote store on insert; the
//! client never parses or fabricates them. The actor ID is the UUID the auth
//! service assigns to a user account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe record ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use fieldwork_core::define_record_id;
/// define_record_id!(JobId);
/// define_record_id!(CustomerId);
///
/// let job_id = JobId::new("j1");
/// let customer_id = CustomerId::new("c1");
///
/// // These are different types, so this won't compile:
/// // let _: JobId = customer_id;
/// ```
#[macro_export]
macro_rules! define_record_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_record_id!(JobId);
define_record_id!(CustomerId);
define_record_id!(QuoteId);
define_record_id!(InvoiceId);
define_record_id!(AppointmentId);

/// The owning-user identifier assigned by the auth service.
///
/// Every record carries the actor that created it; the remote store's
/// row-level security scopes reads and writes by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Create a new actor ID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ActorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ActorId> for Uuid {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    define_record_id!(TestId);

    #[test]
    fn test_record_id_roundtrip() {
        let id = TestId::new("rec-42");
        assert_eq!(id.as_str(), "rec-42");
        assert_eq!(id.to_string(), "rec-42");
        assert_eq!(String::from(id), "rec-42");
    }

    #[test]
    fn test_record_id_serde_transparent() {
        let id = JobId::new("j1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"j1\"");

        let back: JobId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn test_actor_id_display() {
        let uuid = Uuid::nil();
        let actor = ActorId::new(uuid);
        assert_eq!(actor.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}

//! Domain layer containing token and audit entities.

pub mod entities;

pub use entities::{
    AuditEvent, AuditEventType, Claims, IssuedSession, RevocationRecord, TokenPair, TokenType,
    VerifiedIdentity,
};

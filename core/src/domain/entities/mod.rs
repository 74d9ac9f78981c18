//! Domain entities representing token lifecycle objects.

pub mod audit;
pub mod token;

pub use audit::{AuditEvent, AuditEventType};
pub use token::{
    new_session_id, new_token_id, Claims, IssuedSession, RevocationRecord, TokenPair, TokenType,
    VerifiedIdentity,
};

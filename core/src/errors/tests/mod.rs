use super::*;
use crate::domain::entities::token::TokenType;

#[test]
fn test_token_error_converts_into_domain_error() {
    let err: DomainError = TokenError::TokenReuse.into();
    assert_eq!(err.token_error(), Some(&TokenError::TokenReuse));
    assert_eq!(err.to_string(), "Refresh token reuse detected");
}

#[test]
fn test_wrong_type_names_both_types() {
    let err = TokenError::WrongTokenType {
        expected: TokenType::Refresh,
        found: TokenType::Access,
    };
    assert_eq!(err.to_string(), "Wrong token type: expected refresh, found access");
}

#[test]
fn test_non_token_errors_have_no_token_kind() {
    let err: DomainError = AuthError::InvalidCredentials.into();
    assert!(err.token_error().is_none());

    let err = DomainError::Store {
        message: "connection refused".to_string(),
    };
    assert!(err.token_error().is_none());
}

use super::*;

#[test]
fn http_status_mapping() {
    assert_eq!(AppError::user("bad_input", "oops").http_status(), 400);
    assert_eq!(AppError::conflict("conflict", "dup").http_status(), 409);
    assert_eq!(AppError::auth("auth", "no").http_status(), 401);
    assert_eq!(AppError::internal("internal", "panic").http_status(), 500);
    assert_eq!(AppError::authentication_failed().http_status(), 401);
}

#[test]
fn member_errors_map_to_input_and_conflict() {
    let e: AppError = MemberError::EmptyField("name").into();
    assert_eq!(e.http_status(), 400);
    assert_eq!(e.code_str(), "invalid_member");
    assert_eq!(e.message(), "name must not be empty");

    let e: AppError = MemberError::DuplicateLoginId("alice".into()).into();
    assert_eq!(e.http_status(), 409);
    assert_eq!(e.code_str(), "duplicate_login_id");
}

#[test]
fn display_includes_code_and_message() {
    let e = AppError::authentication_failed();
    assert_eq!(e.to_string(), "authentication_failed: login id or password is incorrect");
}

#[test]
fn into_response_uses_mapped_status() {
    let resp = AppError::conflict("duplicate_login_id", "taken").into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

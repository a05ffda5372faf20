//! Tests for the registry service error translation and query policy.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockClientRepository, MockEnrollmentRepository, MockProgramRepository};
use crate::domain::{ErrorCode, ProgramId};

type MockService =
    RegistryService<MockClientRepository, MockProgramRepository, MockEnrollmentRepository>;

fn make_service(
    clients: MockClientRepository,
    programs: MockProgramRepository,
    enrollments: MockEnrollmentRepository,
) -> MockService {
    RegistryService::new(Arc::new(clients), Arc::new(programs), Arc::new(enrollments))
}

fn sample_client(id: i64) -> Client {
    Client::from_stored(
        ClientId::new(id),
        "John Doe".to_owned(),
        NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        "Male".to_owned(),
        "john@x.com".to_owned(),
    )
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_search_skips_repository(#[case] query: &str) {
    let mut clients = MockClientRepository::new();
    clients.expect_search_by_name().never();
    let service = make_service(
        clients,
        MockProgramRepository::new(),
        MockEnrollmentRepository::new(),
    );

    let found = service.search_clients(query).await.expect("search succeeds");
    assert!(found.is_empty());
}

#[tokio::test]
async fn search_returns_repository_matches() {
    let mut clients = MockClientRepository::new();
    clients
        .expect_search_by_name()
        .times(1)
        .return_once(|_| Ok(vec![sample_client(1)]));
    let service = make_service(
        clients,
        MockProgramRepository::new(),
        MockEnrollmentRepository::new(),
    );

    let found = service.search_clients(" john ").await.expect("search succeeds");
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn duplicate_program_is_a_conflict() {
    let mut programs = MockProgramRepository::new();
    programs
        .expect_insert()
        .times(1)
        .return_once(|_| Err(ProgramRepositoryError::duplicate_name("TB")));
    let service = make_service(
        MockClientRepository::new(),
        programs,
        MockEnrollmentRepository::new(),
    );
    let draft = NewProgram::try_from_parts(Some("TB"), Some("different")).expect("valid");

    let error = service.create_program(draft).await.expect_err("conflict");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Program already exists");
}

#[rstest]
#[case(EnrollmentRepositoryError::duplicate(1_i64, 2_i64), ErrorCode::Conflict)]
#[case(EnrollmentRepositoryError::missing_client(1_i64), ErrorCode::NotFound)]
#[case(EnrollmentRepositoryError::missing_program(2_i64), ErrorCode::NotFound)]
#[case(EnrollmentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(EnrollmentRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn enrollment_errors_map_to_domain_codes(
    #[case] failure: EnrollmentRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_insert()
        .times(1)
        .return_once(move |_| Err(failure));
    let service = make_service(
        MockClientRepository::new(),
        MockProgramRepository::new(),
        enrollments,
    );
    let request = EnrollmentRequest::new(ClientId::new(1), ProgramId::new(2));

    let error = service.enroll_client(request).await.expect_err("failure");
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn duplicate_enrollment_message_matches_form_contract() {
    let mut enrollments = MockEnrollmentRepository::new();
    enrollments
        .expect_insert()
        .return_once(|_| Err(EnrollmentRepositoryError::duplicate(1_i64, 2_i64)));
    let service = make_service(
        MockClientRepository::new(),
        MockProgramRepository::new(),
        enrollments,
    );

    let error = service
        .enroll_client(EnrollmentRequest::new(ClientId::new(1), ProgramId::new(2)))
        .await
        .expect_err("conflict");
    assert_eq!(error.message(), "Client already enrolled");
}

#[tokio::test]
async fn missing_client_is_not_found() {
    let mut clients = MockClientRepository::new();
    clients.expect_find_by_id().times(1).return_once(|_| Ok(None));
    clients.expect_find_profile().times(1).return_once(|_| Ok(None));
    let service = make_service(
        clients,
        MockProgramRepository::new(),
        MockEnrollmentRepository::new(),
    );

    let by_id = service.get_client(ClientId::new(9)).await.expect_err("missing");
    let profile = service
        .get_client_profile(ClientId::new(9))
        .await
        .expect_err("missing");
    assert_eq!(by_id.code(), ErrorCode::NotFound);
    assert_eq!(profile.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn profile_carries_program_names() {
    let mut clients = MockClientRepository::new();
    clients.expect_find_profile().times(1).return_once(|id| {
        Ok(Some(ClientProfile::new(
            sample_client(id.as_i64()),
            vec!["TB".to_owned()],
        )))
    });
    let service = make_service(
        clients,
        MockProgramRepository::new(),
        MockEnrollmentRepository::new(),
    );

    let profile = service
        .get_client_profile(ClientId::new(4))
        .await
        .expect("profile");
    assert_eq!(profile.client().id(), ClientId::new(4));
    assert_eq!(profile.programs(), ["TB".to_owned()]);
}

#[tokio::test]
async fn unreachable_storage_is_service_unavailable() {
    let mut programs = MockProgramRepository::new();
    programs
        .expect_list_all()
        .times(1)
        .return_once(|| Err(ProgramRepositoryError::connection("pool timed out")));
    let service = make_service(
        MockClientRepository::new(),
        programs,
        MockEnrollmentRepository::new(),
    );

    let error = service.list_programs().await.expect_err("unavailable");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

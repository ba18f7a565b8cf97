/// Catalog handler tests
/// Exercises lookup and public key retrieval against a recording catalog double
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};
use svarinn_katalog::{
    Account, AccountId, AccountStatus, ApiError, CatalogAccount, CatalogApi, Identifier,
    IdentifierKind, KatalogError, KatalogHandler, LookupRequest, OrganizationId,
    PublicKeyRecord,
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Lookup {
        key: String,
        message_type: String,
        security_level: u32,
    },
    GetPublicKey(Uuid),
}

struct MockCatalogApi {
    calls: Mutex<Vec<Call>>,
    lookup_result: Result<CatalogAccount, ApiError>,
    public_key_result: Result<PublicKeyRecord, ApiError>,
}

impl MockCatalogApi {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            lookup_result: Err(ApiError::NotFound),
            public_key_result: Err(ApiError::Transport("not stubbed".to_string())),
        }
    }

    fn with_lookup(mut self, result: Result<CatalogAccount, ApiError>) -> Self {
        self.lookup_result = result;
        self
    }

    fn with_public_key(mut self, result: Result<PublicKeyRecord, ApiError>) -> Self {
        self.public_key_result = result;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn lookup(
        &self,
        key: &str,
        message_type: &str,
        security_level: u32,
    ) -> Result<CatalogAccount, ApiError> {
        self.calls.lock().unwrap().push(Call::Lookup {
            key: key.to_string(),
            message_type: message_type.to_string(),
            security_level,
        });
        self.lookup_result.clone()
    }

    async fn get_public_key(&self, account_id: Uuid) -> Result<PublicKeyRecord, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::GetPublicKey(account_id));
        self.public_key_result.clone()
    }
}

fn handler(api: &Arc<MockCatalogApi>) -> KatalogHandler {
    KatalogHandler::new(Arc::clone(api) as Arc<dyn CatalogApi>)
}

fn org_no_request() -> LookupRequest {
    LookupRequest::builder()
        .identifier(Identifier::new(IdentifierKind::OrgNo, "999999999"))
        .message_type("melding")
        .security_level(4)
        .build()
        .unwrap()
}

fn key_record(key_material: String) -> PublicKeyRecord {
    PublicKeyRecord {
        key_material,
        serial: "0x523DC4FE".to_string(),
        issuer_dn: "CN=KS,OU=Alice,O=KS - 971032146,L=HAAKON VIISGT 9 0161 OSLO,C=NO".to_string(),
        subject_dn: "CN=KS,OU=Alice,O=KS - 971032146,L=HAAKON VIISGT 9 0161 OSLO,C=NO".to_string(),
        valid_from: Utc::now() - Duration::days(365),
        valid_to: Utc::now() + Duration::days(365),
    }
}

#[tokio::test]
async fn test_lookup_not_found() {
    let api = Arc::new(MockCatalogApi::new());

    let account = handler(&api).lookup(&org_no_request()).await.unwrap();

    assert!(account.is_none());
    assert_eq!(
        api.calls(),
        vec![Call::Lookup {
            key: "ORG_NO.999999999".to_string(),
            message_type: "melding".to_string(),
            security_level: 4,
        }]
    );
}

#[tokio::test]
async fn test_lookup_found() {
    let expected = Account {
        account_id: AccountId::new(Uuid::new_v4()),
        account_name: "Testkonto".to_string(),
        organization_id: OrganizationId::new(Uuid::new_v4()),
        organization_name: "OrgNavn".to_string(),
        is_valid_sender: true,
        is_valid_recipient: true,
    };
    let record = CatalogAccount {
        account_id: expected.account_id.uuid(),
        account_name: expected.account_name.clone(),
        organization_id: expected.organization_id.uuid(),
        organization_name: expected.organization_name.clone(),
        status: AccountStatus {
            valid_sender: true,
            valid_recipient: true,
        },
    };
    let api = Arc::new(MockCatalogApi::new().with_lookup(Ok(record)));

    let account = handler(&api).lookup(&org_no_request()).await.unwrap();

    assert_eq!(account, Some(expected));
    assert_eq!(
        api.calls(),
        vec![Call::Lookup {
            key: "ORG_NO.999999999".to_string(),
            message_type: "melding".to_string(),
            security_level: 4,
        }]
    );
}

#[tokio::test]
async fn test_lookup_key_for_every_kind() {
    for kind in IdentifierKind::ALL {
        let api = Arc::new(MockCatalogApi::new());
        let request = LookupRequest::builder()
            .identifier(Identifier::new(kind, "12345"))
            .message_type("no.ks.fiks.test")
            .security_level(3)
            .build()
            .unwrap();

        handler(&api).lookup(&request).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![Call::Lookup {
                key: format!("{}.12345", kind.as_str()),
                message_type: "no.ks.fiks.test".to_string(),
                security_level: 3,
            }]
        );
    }
}

#[tokio::test]
async fn test_lookup_transport_failure_propagates() {
    let api = Arc::new(
        MockCatalogApi::new().with_lookup(Err(ApiError::Transport("connection refused".to_string()))),
    );

    let result = handler(&api).lookup(&org_no_request()).await;

    match result {
        Err(KatalogError::Api(ApiError::Transport(message))) => {
            assert_eq!(message, "connection refused")
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_get_public_key_fails() {
    let api = Arc::new(
        MockCatalogApi::new().with_public_key(Err(ApiError::Decode("Could not decode".to_string()))),
    );
    let account_id = Uuid::new_v4();

    let result = handler(&api).get_public_key(AccountId::new(account_id)).await;

    match result {
        Err(err @ KatalogError::Api(_)) => {
            assert!(err.is_infrastructure());
            assert_eq!(
                err.api_error(),
                Some(&ApiError::Decode("Could not decode".to_string()))
            );
        }
        other => panic!("expected decode error, got {:?}", other),
    }
    assert_eq!(api.calls(), vec![Call::GetPublicKey(account_id)]);
}

#[tokio::test]
async fn test_get_public_key_found_but_fails() {
    let api = Arc::new(
        MockCatalogApi::new().with_public_key(Ok(key_record("something".to_string()))),
    );
    let account_id = Uuid::new_v4();

    let result = handler(&api).get_public_key(AccountId::new(account_id)).await;

    match result {
        Err(err) => {
            assert!(err.is_certificate());
            assert!(!err.is_infrastructure());
        }
        Ok(handle) => panic!("expected parse error, got {:?}", handle),
    }
    assert_eq!(api.calls(), vec![Call::GetPublicKey(account_id)]);
}

#[tokio::test]
async fn test_get_public_key_found_and_valid() {
    let certified = rcgen::generate_simple_self_signed(vec!["alice.example".to_string()]).unwrap();
    let pem = certified.cert.pem();
    let api = Arc::new(MockCatalogApi::new().with_public_key(Ok(key_record(pem))));
    let account_id = Uuid::new_v4();

    let handle = handler(&api)
        .get_public_key(AccountId::new(account_id))
        .await
        .unwrap();

    assert_eq!(handle.der(), certified.cert.der().as_ref());
    assert!(handle.is_valid_at(Utc::now()));
    assert_eq!(api.calls(), vec![Call::GetPublicKey(account_id)]);
}

#[tokio::test]
async fn test_get_public_key_is_not_cached() {
    let pem = rcgen::generate_simple_self_signed(vec!["alice.example".to_string()])
        .unwrap()
        .cert
        .pem();
    let api = Arc::new(MockCatalogApi::new().with_public_key(Ok(key_record(pem))));
    let account_id = AccountId::new(Uuid::new_v4());
    let handler = handler(&api);

    let first = handler.get_public_key(account_id).await.unwrap();
    let second = handler.get_public_key(account_id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        api.calls(),
        vec![
            Call::GetPublicKey(account_id.uuid()),
            Call::GetPublicKey(account_id.uuid())
        ]
    );
}

#[tokio::test]
async fn test_concurrent_lookups() {
    let api = Arc::new(MockCatalogApi::new());
    let handler = handler(&api);

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let handler = handler.clone();
            tokio::spawn(async move {
                let request = LookupRequest::builder()
                    .identifier(Identifier::new(IdentifierKind::OrgNo, format!("91000000{}", i)))
                    .message_type("melding")
                    .security_level(4)
                    .build()
                    .unwrap();
                handler.lookup(&request).await
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_none());
    }
    assert_eq!(api.calls().len(), 8);
}

use std::io::Write;
use std::sync::Arc;

use guestlist::{AuthError, Directory, DirectoryConfig, SignIn};
use store::{InMemoryStore, KeyValueStore};
use tempfile::NamedTempFile;

const WIDER_DIRECTORY: &str = r#"
version: "1.0"
name: "Test Wedding"
users:
  - { display_name: Arden Chew, user_key: arden_chew }
  - { display_name: Charlie Chu, user_key: charlie_chu }
  - { display_name: Emily Kwan, user_key: emily_kwan }
guests:
  - { slug: arden_chew, first: Arden, last: Chew, events: [dinner, courthouse] }
  - { slug: charlie_chu, first: Charlie, last: Chu, events: [dinner] }
  - { slug: emily_kwan, first: Emily, last: Kwan, events: [courthouse] }
events:
  - slug: courthouse
    name: Courthouse
    start_time: "2026-09-24T15:00:00"
    location: City Hall
    description: Ceremony.
    rsvpable: true
  - slug: dinner
    name: Dinner
    start_time: "2026-09-24T19:00:00"
    location: Rich Table
    description: Dinner.
    rsvpable: true
"#;

fn wider_sign_in(store: Arc<InMemoryStore>) -> SignIn {
    let directory = Directory::from_config(DirectoryConfig::from_yaml(WIDER_DIRECTORY).unwrap()).unwrap();
    SignIn::new(Arc::new(directory), store)
}

#[tokio::test]
async fn typed_name_to_signed_in_user() {
    let store = Arc::new(InMemoryStore::with_entries([(
        "user:arden_chew:password",
        "rich-table",
    )]));
    let sign_in = SignIn::new(Arc::new(Directory::builtin().unwrap()), store);

    let lookup = sign_in.resolve_name("  ARDEN chew ").unwrap();
    assert_eq!(lookup.display_name, "Arden Chew");
    assert!(!lookup.ambiguous);

    let user = sign_in
        .authenticate(&lookup.display_name, "rich-table")
        .await
        .unwrap();
    assert_eq!(user.full_name, "Arden Chew");
    assert_eq!(user.normalized_name, "arden chew");
}

#[tokio::test]
async fn ambiguous_query_reports_ranked_candidates() {
    let sign_in = wider_sign_in(Arc::new(InMemoryStore::new()));

    // Both names contain "ch"; the shorter one ranks first on equal score.
    let lookup = sign_in.resolve_name("ch").unwrap();
    assert!(lookup.ambiguous);
    assert_eq!(lookup.candidates.len(), 2);
    assert!(lookup.candidates.contains(&"Arden Chew".to_string()));
    assert!(lookup.candidates.contains(&"Charlie Chu".to_string()));
    assert_eq!(lookup.display_name, lookup.candidates[0]);

    // Same query, same order.
    assert_eq!(sign_in.resolve_name("ch").unwrap(), lookup);
}

#[tokio::test]
async fn store_failure_surfaces_as_store_error() {
    struct Failing;

    #[async_trait::async_trait]
    impl KeyValueStore for Failing {
        async fn get(&self, _key: &str) -> Result<Option<String>, store::StoreError> {
            Err(store::StoreError::backend("down"))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), store::StoreError> {
            Err(store::StoreError::backend("down"))
        }

        fn kind(&self) -> &'static str {
            "failing"
        }
    }

    let sign_in = SignIn::new(Arc::new(Directory::builtin().unwrap()), Arc::new(Failing));
    let result = sign_in.authenticate("Emily Kwan", "sept24").await;
    assert!(matches!(result, Err(AuthError::Store(_))));
}

#[test]
fn directory_from_file_drives_schedule() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(WIDER_DIRECTORY.as_bytes()).unwrap();

    let directory = Directory::load(file.path()).unwrap();
    let schedule: Vec<&str> = directory
        .events_for_guest("arden_chew")
        .into_iter()
        .map(|e| e.slug.as_str())
        .collect();
    assert_eq!(schedule, ["courthouse", "dinner"]);
    assert_eq!(directory.name(), Some("Test Wedding"));
}

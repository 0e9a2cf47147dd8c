//! Integration tests for tandem-engine
//!
//! These exercise the engine's public operations end to end against the
//! SQLite store: request lifecycle, the feed/search exclusion asymmetry,
//! connection management, and the account-deletion cascade.

use tandem_domain::traits::RelationshipStore;
use tandem_domain::{RequestStatus, SafeProfile, UserId};
use tandem_engine::{Engine, EngineError};
use tandem_store::SqliteStore;

fn setup() -> (Engine, SqliteStore) {
    (Engine::default_config(), SqliteStore::new(":memory:").unwrap())
}

fn add_user(store: &mut SqliteStore, name: &str) -> UserId {
    let profile = SafeProfile::new(UserId::new(), name);
    let id = profile.id;
    store.create_user(&profile).unwrap();
    id
}

fn add_user_with_skills(store: &mut SqliteStore, name: &str, skills: &[&str]) -> UserId {
    let mut profile = SafeProfile::new(UserId::new(), name);
    profile.skills = skills.iter().map(|s| s.to_string()).collect();
    let id = profile.id;
    store.create_user(&profile).unwrap();
    id
}

#[test]
fn test_send_request_records_direction() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    let record = engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();
    assert_eq!(record.from_user, alice);
    assert_eq!(record.to_user, bob);
    assert_eq!(record.status, RequestStatus::Interested);
}

#[test]
fn test_send_request_rejects_self() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");

    let result = engine.send_request(&mut store, alice, alice, RequestStatus::Interested);
    assert_eq!(result.unwrap_err(), EngineError::SelfRequest);
}

#[test]
fn test_send_request_rejects_missing_target() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");

    let result = engine.send_request(&mut store, alice, UserId::new(), RequestStatus::Ignored);
    assert_eq!(result.unwrap_err(), EngineError::TargetNotFound);
}

#[test]
fn test_send_request_rejects_non_initial_status() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    for status in [RequestStatus::Accepted, RequestStatus::Rejected] {
        let result = engine.send_request(&mut store, alice, bob, status);
        assert!(matches!(result, Err(EngineError::InvalidStatus(_))));
    }
}

#[test]
fn test_duplicate_pair_in_either_direction() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();

    let reverse = engine.send_request(&mut store, bob, alice, RequestStatus::Ignored);
    assert_eq!(reverse.unwrap_err(), EngineError::DuplicateRelationship);

    // Symmetric lookup sees the same record either way.
    let forward = store.find_by_pair(alice, bob).unwrap().unwrap();
    let backward = store.find_by_pair(bob, alice).unwrap().unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_review_lifecycle() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    let request = engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();

    // The sender may not review their own request.
    let by_sender = engine.review_request(&mut store, alice, request.id, RequestStatus::Accepted);
    assert_eq!(by_sender.unwrap_err(), EngineError::Forbidden);

    // The recipient may.
    let accepted = engine
        .review_request(&mut store, bob, request.id, RequestStatus::Accepted)
        .unwrap();
    assert_eq!(accepted.status, RequestStatus::Accepted);

    // A second review finds a terminal record.
    let again = engine.review_request(&mut store, bob, request.id, RequestStatus::Rejected);
    assert_eq!(again.unwrap_err(), EngineError::InvalidTransition);
}

#[test]
fn test_review_rejects_bad_input() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    let request = engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();

    // Only decision statuses are reviewable outcomes.
    let result = engine.review_request(&mut store, bob, request.id, RequestStatus::Ignored);
    assert!(matches!(result, Err(EngineError::InvalidStatus(_))));

    // Unknown request id.
    let missing = engine.review_request(
        &mut store,
        bob,
        tandem_domain::RelationshipId::new(),
        RequestStatus::Accepted,
    );
    assert_eq!(missing.unwrap_err(), EngineError::NotFound);

    // An ignored record is terminal; its recipient cannot accept it.
    let carol = add_user(&mut store, "Carol");
    let ignored = engine
        .send_request(&mut store, alice, carol, RequestStatus::Ignored)
        .unwrap();
    let result = engine.review_request(&mut store, carol, ignored.id, RequestStatus::Accepted);
    assert_eq!(result.unwrap_err(), EngineError::InvalidTransition);
}

#[test]
fn test_request_listings() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");
    let carol = add_user(&mut store, "Carol");

    engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();
    engine
        .send_request(&mut store, carol, bob, RequestStatus::Interested)
        .unwrap();

    let received = engine.list_received_requests(&store, bob).unwrap();
    assert_eq!(received.len(), 2);
    let senders: Vec<UserId> = received.iter().map(|(_, p)| p.id).collect();
    assert!(senders.contains(&alice));
    assert!(senders.contains(&carol));

    let sent = engine.list_sent_requests(&store, alice).unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1.id, bob);

    // Ignored records are not pending requests and appear in neither list.
    let dave = add_user(&mut store, "Dave");
    engine
        .send_request(&mut store, dave, bob, RequestStatus::Ignored)
        .unwrap();
    assert_eq!(engine.list_received_requests(&store, bob).unwrap().len(), 2);
    assert!(engine.list_sent_requests(&store, dave).unwrap().is_empty());
}

#[test]
fn test_feed_excludes_any_interaction() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");
    let carol = add_user(&mut store, "Carol");
    let dave = add_user(&mut store, "Dave");
    let erin = add_user(&mut store, "Erin");

    // One relationship of every flavor.
    engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();
    engine
        .send_request(&mut store, alice, carol, RequestStatus::Ignored)
        .unwrap();
    let to_accept = engine
        .send_request(&mut store, dave, alice, RequestStatus::Interested)
        .unwrap();
    engine
        .review_request(&mut store, alice, to_accept.id, RequestStatus::Accepted)
        .unwrap();

    // Every counterpart is hidden regardless of status; only Erin remains.
    let feed: Vec<UserId> = engine
        .feed(&store, alice, 1, 50)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(feed, vec![erin]);

    // Exclusion is mutual: Alice is absent from Bob's feed too.
    let bobs_feed: Vec<UserId> = engine
        .feed(&store, bob, 1, 50)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert!(!bobs_feed.contains(&alice));
    assert!(bobs_feed.contains(&erin));
}

#[test]
fn test_feed_pagination_and_clamping() {
    let (engine, mut store) = setup();
    let viewer = add_user(&mut store, "Viewer");
    for i in 0..60 {
        add_user(&mut store, &format!("User{}", i));
    }

    // Requested limit above the cap comes back clamped to 50.
    let first = engine.feed(&store, viewer, 1, 500).unwrap();
    assert_eq!(first.len(), 50);

    let second = engine.feed(&store, viewer, 2, 500).unwrap();
    assert_eq!(second.len(), 10);

    // Pages never overlap and follow the stable candidate order.
    let first_ids: Vec<UserId> = first.iter().map(|p| p.id).collect();
    assert!(second.iter().all(|p| !first_ids.contains(&p.id)));

    // Past the end is empty, not an error.
    assert!(engine.feed(&store, viewer, 3, 500).unwrap().is_empty());

    // Zero limit falls back to the default page size.
    assert_eq!(engine.feed(&store, viewer, 1, 0).unwrap().len(), 10);

    // Page zero is treated as the first page.
    let page_zero = engine.feed(&store, viewer, 0, 5).unwrap();
    let page_one = engine.feed(&store, viewer, 1, 5).unwrap();
    assert_eq!(page_zero, page_one);
}

#[test]
fn test_search_exclusion_is_narrower_than_feed() {
    let (engine, mut store) = setup();
    let viewer = add_user(&mut store, "Viewer");
    let ignored = add_user_with_skills(&mut store, "Iggy", &["rust"]);
    let rejected = add_user_with_skills(&mut store, "Roger", &["rust"]);
    let pending = add_user_with_skills(&mut store, "Pat", &["rust"]);
    let connected = add_user_with_skills(&mut store, "Connie", &["rust"]);

    engine
        .send_request(&mut store, viewer, ignored, RequestStatus::Ignored)
        .unwrap();
    let r = engine
        .send_request(&mut store, viewer, rejected, RequestStatus::Interested)
        .unwrap();
    engine
        .review_request(&mut store, rejected, r.id, RequestStatus::Rejected)
        .unwrap();
    engine
        .send_request(&mut store, viewer, pending, RequestStatus::Interested)
        .unwrap();
    let c = engine
        .send_request(&mut store, viewer, connected, RequestStatus::Interested)
        .unwrap();
    engine
        .review_request(&mut store, connected, c.id, RequestStatus::Accepted)
        .unwrap();

    // The feed hides all four.
    let feed: Vec<UserId> = engine
        .feed(&store, viewer, 1, 50)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    for hidden in [ignored, rejected, pending, connected] {
        assert!(!feed.contains(&hidden));
    }

    // Search re-surfaces ignored and rejected counterparts only.
    let found: Vec<UserId> = engine
        .search(&store, viewer, "rust")
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert!(found.contains(&ignored));
    assert!(found.contains(&rejected));
    assert!(!found.contains(&pending));
    assert!(!found.contains(&connected));
}

#[test]
fn test_search_query_semantics() {
    let (engine, mut store) = setup();
    let viewer = add_user(&mut store, "Viewer");
    let ada = add_user_with_skills(&mut store, "Ada", &["Analytical Engines"]);
    add_user(&mut store, "Grace");

    // Empty and whitespace-only queries return nothing.
    assert!(engine.search(&store, viewer, "").unwrap().is_empty());
    assert!(engine.search(&store, viewer, "   ").unwrap().is_empty());

    // Case-insensitive substring over name...
    let by_name = engine.search(&store, viewer, "aDa").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, ada);

    // ...and skills.
    let by_skill = engine.search(&store, viewer, "engines").unwrap();
    assert_eq!(by_skill.len(), 1);
    assert_eq!(by_skill[0].id, ada);

    // The viewer never matches themselves.
    assert!(engine.search(&store, viewer, "viewer").unwrap().is_empty());
}

#[test]
fn test_connections_listing_and_removal() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    let request = engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();

    // Pending is not a connection.
    assert!(engine.list_connections(&store, alice).unwrap().is_empty());

    engine
        .review_request(&mut store, bob, request.id, RequestStatus::Accepted)
        .unwrap();

    // Both sides see the other party's profile.
    let alices: Vec<UserId> = engine
        .list_connections(&store, alice)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    let bobs: Vec<UserId> = engine
        .list_connections(&store, bob)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(alices, vec![bob]);
    assert_eq!(bobs, vec![alice]);

    // Either party may sever; here the original recipient does.
    engine.remove_connection(&mut store, bob, alice).unwrap();
    assert!(engine.list_connections(&store, alice).unwrap().is_empty());
    assert!(engine.list_connections(&store, bob).unwrap().is_empty());

    // The record is deleted, not transitioned; the pair is free again.
    assert!(store.find_by_pair(alice, bob).unwrap().is_none());
    assert!(engine
        .send_request(&mut store, bob, alice, RequestStatus::Interested)
        .is_ok());
}

#[test]
fn test_remove_connection_requires_accepted_record() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");
    let carol = add_user(&mut store, "Carol");

    // No record at all.
    let none = engine.remove_connection(&mut store, alice, carol);
    assert_eq!(none.unwrap_err(), EngineError::NotFound);

    // A pending record is not severable.
    engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();
    let pending = engine.remove_connection(&mut store, alice, bob);
    assert_eq!(pending.unwrap_err(), EngineError::NotFound);
    // And it survives the attempt.
    assert!(store.find_by_pair(alice, bob).unwrap().is_some());
}

#[test]
fn test_account_deletion_cascade() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");
    let carol = add_user(&mut store, "Carol");

    engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();
    engine
        .send_request(&mut store, carol, alice, RequestStatus::Ignored)
        .unwrap();

    let removed = engine.on_account_deleted(&mut store, alice).unwrap();
    assert_eq!(removed, 2);

    for other in [bob, carol] {
        assert!(store.find_by_pair(alice, other).unwrap().is_none());
    }

    // Former counterparties are free to interact with a fresh account.
    let alice2 = add_user(&mut store, "Alice");
    assert!(engine
        .send_request(&mut store, bob, alice2, RequestStatus::Interested)
        .is_ok());
}

#[test]
fn test_full_scenario() {
    let (engine, mut store) = setup();
    let alice = add_user(&mut store, "Alice");
    let bob = add_user(&mut store, "Bob");

    // A sends interested to B.
    let r1 = engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .unwrap();

    // B sees it, with A's safe profile attached.
    let received = engine.list_received_requests(&store, bob).unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0.id, r1.id);
    assert_eq!(received[0].1.id, alice);
    assert_eq!(received[0].1.first_name, "Alice");

    // B accepts; both now appear in each other's connections.
    engine
        .review_request(&mut store, bob, r1.id, RequestStatus::Accepted)
        .unwrap();
    assert_eq!(engine.list_connections(&store, alice).unwrap()[0].id, bob);
    assert_eq!(engine.list_connections(&store, bob).unwrap()[0].id, alice);

    // B is absent from A's feed.
    let feed: Vec<UserId> = engine
        .feed(&store, alice, 1, 50)
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert!(!feed.contains(&bob));

    // A removes the connection: gone without a trace, and a fresh request
    // is permitted again.
    engine.remove_connection(&mut store, alice, bob).unwrap();
    assert!(engine.list_connections(&store, alice).unwrap().is_empty());
    assert!(store.find_by_pair(alice, bob).unwrap().is_none());
    assert!(engine
        .send_request(&mut store, alice, bob, RequestStatus::Interested)
        .is_ok());
}

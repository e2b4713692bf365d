//! Integration tests for the remote collaborator contracts, driven
//! through their in-memory implementations.

use lexideck::{
    order_status_from_return, ExerciseService, Folder, InMemoryExerciseService,
    InMemoryPaymentGateway, InMemoryUserDirectory, OrderRequest, OrderStatus, PaymentGateway,
    ServiceError, SortKey, UserDirectory, UserDraft, UserQuery, UserStatus, UserUpdate,
};

#[tokio::test]
async fn purchase_flow_settles_after_gateway_return() {
    let gateway = InMemoryPaymentGateway::with_checkout_url("https://pay.example.com/checkout");

    // The material page creates an order and sends the user off to pay.
    let created = gateway
        .create_order(&OrderRequest {
            item_id: "c-1".into(),
            amount_cents: 199_000,
            return_url: "https://app.example.com/payment/return".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.order.status, OrderStatus::Pending);
    assert!(created.redirect_url.is_some());

    // The gateway sends the user back with its result parameters.
    let returned = order_status_from_return([
        ("orderId", created.order.id.as_str()),
        ("responseCode", "00"),
    ]);
    assert_eq!(returned, OrderStatus::Success);

    // The backend records the same outcome; a status check agrees.
    gateway.settle(&created.order.id, returned).unwrap();
    assert_eq!(
        gateway.order_status(&created.order.id).await.unwrap(),
        OrderStatus::Success
    );
}

#[tokio::test]
async fn abandoned_payment_can_be_cancelled() {
    let gateway = InMemoryPaymentGateway::new();
    let created = gateway
        .create_order(&OrderRequest {
            item_id: "c-2".into(),
            amount_cents: 99_000,
            return_url: "https://app.example.com/payment/return".into(),
        })
        .await
        .unwrap();

    // User backed out at the gateway.
    let returned = order_status_from_return([("responseCode", "24")]);
    assert_eq!(returned, OrderStatus::Cancelled);

    gateway.cancel_order(&created.order.id).await.unwrap();
    assert_eq!(
        gateway.order_status(&created.order.id).await.unwrap(),
        OrderStatus::Cancelled
    );

    // A second cancel is rejected: the order is no longer pending.
    let err = gateway.cancel_order(&created.order.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
}

#[tokio::test]
async fn directory_lists_pages_over_created_accounts() {
    let directory = InMemoryUserDirectory::new();
    for i in 0..25 {
        directory
            .create(&UserDraft {
                username: format!("user{:02}", i),
                email: format!("user{:02}@example.com", i),
                role_name: if i % 5 == 0 { "admin" } else { "user" }.into(),
            })
            .await
            .unwrap();
    }

    let page = directory
        .list(&UserQuery {
            page: 3,
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 25);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_pages(), 3);

    let admins = directory
        .list(&UserQuery {
            role: Some("admin".into()),
            sort: Some(SortKey::parse("-username")),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(admins.total, 5);
    assert_eq!(admins.items[0].username, "user20");
}

#[tokio::test]
async fn soft_deleted_accounts_disappear_from_active_listings() {
    let directory = InMemoryUserDirectory::new();
    let account = directory
        .create(&UserDraft {
            username: "mai".into(),
            email: "mai@example.com".into(),
            role_name: "user".into(),
        })
        .await
        .unwrap();

    directory.deactivate(account.id).await.unwrap();

    let active = directory
        .list(&UserQuery {
            status: Some(UserStatus::Active),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.total, 0);

    directory.restore(account.id).await.unwrap();
    let updated = directory
        .update(
            account.id,
            &UserUpdate {
                role_name: Some("admin".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, UserStatus::Active);
    assert_eq!(updated.role_name, "admin");
}

#[tokio::test]
async fn folder_interactions_round_trip() {
    let service = InMemoryExerciseService::with_folders(vec![Folder {
        id: "f-10".into(),
        name: "Listening drills".into(),
        description: "Unit 3".into(),
        liked_by: vec![],
        comments: vec![],
    }]);

    service.set_liked("f-10", 42, true).await.unwrap();
    let comment = service
        .add_comment("f-10", 42, "really useful")
        .await
        .unwrap();

    let folder = service.folder("f-10").await.unwrap();
    assert_eq!(folder.like_count(), 1);
    assert_eq!(folder.comments, vec![comment]);

    service.delete_folder("f-10").await.unwrap();
    assert!(matches!(
        service.folder("f-10").await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

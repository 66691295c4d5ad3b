use oreh::domain::billing::{NewAffiliate, NewCoupon, NewPlan};
use oreh::domain::chat::{ChatStage, NewChat};
use oreh::domain::client::{NewClient, UpdateClient};
use oreh::domain::company::{NewCompany, UpdateCompanyBilling};
use oreh::domain::product::{NewProduct, UpdateProduct};
use oreh::domain::settings::UpdateAiSettings;
use oreh::domain::types::{AffiliateId, ChatId, ClientId, CompanyId, CouponId, PlanId, ProductId};
use oreh::live::{ChangeFeed, ChangeOp, EntityKind};
use oreh::repository::errors::RepositoryError;
use oreh::repository::{
    AffiliateReader, AffiliateWriter, ChatReader, ChatWriter, ClientListQuery, ClientReader,
    ClientWriter, CompanyReader, CompanyWriter, CouponReader, CouponWriter, DieselRepository,
    MetricsReader, PlanReader, PlanWriter, ProductReader, ProductWriter, SettingsReader,
    SettingsWriter,
};

mod common;

fn setup(db_name: &str) -> (common::TestDb, DieselRepository, ChangeFeed) {
    let test_db = common::TestDb::new(db_name);
    let feed = ChangeFeed::default();
    let repo = DieselRepository::new(test_db.pool().clone(), feed.clone());
    (test_db, repo, feed)
}

fn create_company(repo: &DieselRepository, name: &str) -> CompanyId {
    let company = repo
        .create_company(&NewCompany::new(name.to_string()))
        .unwrap();
    CompanyId::new(company.id).unwrap()
}

#[test]
fn chat_lifecycle_and_tenant_scoping() {
    let (_db, repo, _feed) = setup("test_chat_lifecycle.db");
    let acme = create_company(&repo, "Acme");
    let other = create_company(&repo, "Other");

    let chat = repo
        .create_chat(&NewChat::new(
            acme.get(),
            "Ana".into(),
            "+5511987654321".into(),
            Some("oi".into()),
        ))
        .unwrap();
    assert_eq!(chat.stage, ChatStage::Novo);

    repo.create_chat(&NewChat::new(
        other.get(),
        "Beto".into(),
        "+5511911111111".into(),
        None,
    ))
    .unwrap();

    // Lists are scoped to the tenant.
    assert_eq!(repo.list_chats(acme).unwrap().len(), 1);
    assert_eq!(repo.list_chats(other).unwrap().len(), 1);

    let chat_id = ChatId::new(chat.id).unwrap();
    let moved = repo
        .set_chat_stage(chat_id, acme, ChatStage::Atendimento)
        .unwrap();
    assert_eq!(moved.stage, ChatStage::Atendimento);
    assert!(moved.updated_at >= chat.updated_at);

    // A chat cannot be touched through another tenant.
    assert!(
        repo.set_chat_stage(chat_id, other, ChatStage::Finalizado)
            .is_err()
    );

    // Deleting through another tenant matches nothing.
    assert!(matches!(
        repo.delete_chat(chat_id, other),
        Err(RepositoryError::NotFound)
    ));
    assert!(repo.get_chat_by_id(chat_id, acme).unwrap().is_some());

    repo.delete_chat(chat_id, acme).unwrap();
    assert!(repo.get_chat_by_id(chat_id, acme).unwrap().is_none());

    // A second delete is an error, not a silent no-op.
    assert!(matches!(
        repo.delete_chat(chat_id, acme),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn client_crud_search_and_pagination() {
    let (_db, repo, _feed) = setup("test_client_crud.db");
    let company = create_company(&repo, "Acme");

    let inserted = repo
        .create_clients(&[
            NewClient::new(
                company.get(),
                "Alice".into(),
                "+5511911111111".into(),
                Some("alice@example.com".into()),
                None,
            ),
            NewClient::new(
                company.get(),
                "Bob".into(),
                "+5511922222222".into(),
                Some("bob@example.com".into()),
                None,
            ),
        ])
        .unwrap();
    assert_eq!(inserted, 2);

    let (total, items) = repo.list_clients(ClientListQuery::new(company)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (search_total, search_items) = repo
        .list_clients(ClientListQuery::new(company).search("bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name, "Bob");

    let (_, page) = repo
        .list_clients(ClientListQuery::new(company).paginate(1, 1))
        .unwrap();
    assert_eq!(page.len(), 1);

    let bob = search_items[0].clone();
    let other = create_company(&repo, "Other");
    let bob_id = ClientId::new(bob.id).unwrap();
    assert!(repo.get_client_by_id(bob_id, company).unwrap().is_some());
    // A client is invisible through another tenant.
    assert!(repo.get_client_by_id(bob_id, other).unwrap().is_none());

    let updated = repo
        .update_client(
            bob_id,
            company,
            &UpdateClient::new(
                "Bobby".into(),
                bob.phone.clone(),
                bob.email.clone(),
                Some("vip".into()),
            ),
        )
        .unwrap();
    assert_eq!(updated.name, "Bobby");
    assert_eq!(updated.notes.as_deref(), Some("vip"));

    repo.delete_client(bob_id, company).unwrap();
    assert!(matches!(
        repo.delete_client(bob_id, company),
        Err(RepositoryError::NotFound)
    ));
    let (total_after, _) = repo.list_clients(ClientListQuery::new(company)).unwrap();
    assert_eq!(total_after, 1);
}

#[test]
fn product_crud() {
    let (_db, repo, _feed) = setup("test_product_crud.db");
    let company = create_company(&repo, "Acme");

    let product = repo
        .create_product(&NewProduct::new(
            company.get(),
            "Consultoria".into(),
            Some("pacote mensal".into()),
            14990,
        ))
        .unwrap();
    assert!(product.active);

    let updated = repo
        .update_product(
            ProductId::new(product.id).unwrap(),
            company,
            &UpdateProduct::new("Consultoria".into(), None, 19990, false),
        )
        .unwrap();
    assert_eq!(updated.price_cents, 19990);
    assert!(!updated.active);

    let product_id = ProductId::new(product.id).unwrap();
    let fetched = repo.get_product_by_id(product_id, company).unwrap();
    assert_eq!(fetched.map(|p| p.price_cents), Some(19990));

    repo.delete_product(product_id, company).unwrap();
    assert!(matches!(
        repo.delete_product(product_id, company),
        Err(RepositoryError::NotFound)
    ));
    assert!(repo.list_products(company).unwrap().is_empty());
}

#[test]
fn settings_upsert_keeps_the_stored_api_key() {
    let (_db, repo, _feed) = setup("test_settings_upsert.db");
    let company = create_company(&repo, "Acme");

    assert!(repo.get_settings(company).unwrap().is_none());

    let first = repo
        .upsert_settings(
            company,
            &UpdateAiSettings {
                agent_name: "Vendedora".into(),
                system_prompt: "Responda com educacao".into(),
                ai_model: "gpt-4o-mini".into(),
                api_key: Some("sk-abcd1234".into()),
                webhook_url: None,
            },
        )
        .unwrap();
    assert_eq!(first.api_key.as_deref(), Some("sk-abcd1234"));

    // A second save without a key keeps the stored one.
    let second = repo
        .upsert_settings(
            company,
            &UpdateAiSettings {
                agent_name: "Vendedora".into(),
                system_prompt: "Novo prompt".into(),
                ai_model: "gpt-4o".into(),
                api_key: None,
                webhook_url: Some("https://hooks.example.com/wa".into()),
            },
        )
        .unwrap();
    assert_eq!(second.api_key.as_deref(), Some("sk-abcd1234"));
    assert_eq!(second.system_prompt, "Novo prompt");
}

#[test]
fn dashboard_metrics_count_per_tenant() {
    let (_db, repo, _feed) = setup("test_dashboard_metrics.db");
    let company = create_company(&repo, "Acme");
    let other = create_company(&repo, "Other");

    repo.create_clients(&[NewClient::new(
        company.get(),
        "Alice".into(),
        "+5511911111111".into(),
        None,
        None,
    )])
    .unwrap();
    let chat = repo
        .create_chat(&NewChat::new(
            company.get(),
            "Ana".into(),
            "+5511987654321".into(),
            None,
        ))
        .unwrap();
    repo.set_chat_stage(
        ChatId::new(chat.id).unwrap(),
        company,
        ChatStage::Finalizado,
    )
    .unwrap();
    repo.create_product(&NewProduct::new(company.get(), "Plano".into(), None, 1000))
        .unwrap();

    let metrics = repo.dashboard_metrics(company).unwrap();
    assert_eq!(metrics.total_clients, 1);
    assert_eq!(metrics.open_chats, 0);
    assert_eq!(metrics.chats_today, 1);
    assert_eq!(metrics.finished_today, 1);
    assert_eq!(metrics.active_products, 1);

    let empty = repo.dashboard_metrics(other).unwrap();
    assert_eq!(empty.total_clients, 0);
    assert_eq!(empty.chats_today, 0);
}

#[test]
fn catalog_plans_coupons_affiliates() {
    let (_db, repo, _feed) = setup("test_catalog.db");

    let plan = repo
        .create_plan(&NewPlan::new("Pro".into(), 9900, 100, "pro-monthly".into()))
        .unwrap();
    assert_eq!(repo.list_plans().unwrap().len(), 1);

    let updated = repo
        .update_plan(
            PlanId::new(plan.id).unwrap(),
            &NewPlan::new("Pro".into(), 12900, 150, "pro-monthly".into()),
        )
        .unwrap();
    assert_eq!(updated.price_cents, 12900);

    let affiliate = repo
        .create_affiliate(&NewAffiliate::new(
            "Carla".into(),
            "carla@example.com".into(),
            20,
        ))
        .unwrap();

    assert!(
        repo.get_affiliate_by_id(AffiliateId::new(affiliate.id).unwrap())
            .unwrap()
            .is_some()
    );

    let coupon = repo
        .create_coupon(&NewCoupon::generate(10, Some(affiliate.id)))
        .unwrap();
    assert!(coupon.active);
    assert_eq!(coupon.code.len(), 8);

    let found = repo.get_coupon_by_code(&coupon.code).unwrap().unwrap();
    assert_eq!(found.id, coupon.id);

    let listed = repo.list_coupons().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].1.as_ref().unwrap().name, "Carla");

    let affiliates = repo.list_affiliates().unwrap();
    assert_eq!(affiliates.len(), 1);
    assert_eq!(affiliates[0].1.len(), 1);
    assert_eq!(affiliates[0].1[0].code, coupon.code);

    let retired = repo
        .deactivate_coupon(CouponId::new(coupon.id).unwrap())
        .unwrap();
    assert!(!retired.active);

    repo.delete_plan(PlanId::new(plan.id).unwrap()).unwrap();
    assert!(repo.list_plans().unwrap().is_empty());
}

#[test]
fn company_billing_ids_are_persisted() {
    let (_db, repo, _feed) = setup("test_company_billing.db");
    let company_id = create_company(&repo, "Acme");
    let plan = repo
        .create_plan(&NewPlan::new("Pro".into(), 9900, 100, "pro-monthly".into()))
        .unwrap();

    let updated = repo
        .update_company_billing(
            company_id,
            &UpdateCompanyBilling {
                plan_id: Some(plan.id),
                billing_customer_id: Some("cus_1".into()),
                billing_subscription_id: Some("sub_1".into()),
            },
        )
        .unwrap();
    assert_eq!(updated.billing_customer_id.as_deref(), Some("cus_1"));

    let fetched = repo.get_company_by_id(company_id).unwrap().unwrap();
    assert_eq!(fetched.billing_subscription_id.as_deref(), Some("sub_1"));
    assert_eq!(fetched.plan_id, Some(plan.id));

    // A customer-only update leaves the other billing columns alone.
    let partial = repo
        .update_company_billing(
            company_id,
            &UpdateCompanyBilling {
                plan_id: None,
                billing_customer_id: Some("cus_2".into()),
                billing_subscription_id: None,
            },
        )
        .unwrap();
    assert_eq!(partial.billing_customer_id.as_deref(), Some("cus_2"));
    assert_eq!(partial.billing_subscription_id.as_deref(), Some("sub_1"));
    assert_eq!(partial.plan_id, Some(plan.id));
}

#[test]
fn tenant_writes_publish_change_notifications() {
    let (_db, repo, feed) = setup("test_change_notifications.db");
    let company = create_company(&repo, "Acme");
    let mut rx = feed.subscribe();

    repo.create_chat(&NewChat::new(
        company.get(),
        "Ana".into(),
        "+5511987654321".into(),
        None,
    ))
    .unwrap();

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.company_id, company.get());
    assert_eq!(notification.entity, EntityKind::Chat);
    assert_eq!(notification.op, ChangeOp::Insert);

    // Catalog tables are platform-global and stay silent.
    repo.create_plan(&NewPlan::new("Pro".into(), 9900, 100, "pro".into()))
        .unwrap();
    assert!(rx.try_recv().is_err());

    // A delete that matched no row publishes nothing.
    assert!(repo.delete_chat(ChatId::new(9999).unwrap(), company).is_err());
    assert!(rx.try_recv().is_err());
}
